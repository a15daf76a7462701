//! Output records of the experiment drivers.

use serde::{Deserialize, Serialize};

/// One row of a performance-gap sweep: a single ambiguity radius with
/// in-sample objectives and out-of-sample average losses for both methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapRecord {
    /// Ambiguity radius ε.
    pub epsilon: f64,
    /// SAA in-sample objective (empirical average loss at the optimum).
    pub in_sample_saa: f64,
    /// DRO in-sample objective (worst-case value at the optimum).
    pub in_sample_dro: f64,
    /// Out-of-sample average loss of the SAA weights.
    pub oos_saa: f64,
    /// Out-of-sample average loss of the DRO weights.
    pub oos_dro: f64,
    /// Percentage gain of DRO over SAA out of sample:
    /// 100·(oos_saa − oos_dro)/|oos_saa|. Non-finite when oos_saa is zero.
    pub pct_gain: f64,
}

impl GapRecord {
    /// Assemble a record, deriving the percentage gain.
    pub fn new(
        epsilon: f64,
        in_sample_saa: f64,
        in_sample_dro: f64,
        oos_saa: f64,
        oos_dro: f64,
    ) -> Self {
        Self {
            epsilon,
            in_sample_saa,
            in_sample_dro,
            oos_saa,
            oos_dro,
            pct_gain: 100.0 * (oos_saa - oos_dro) / oos_saa.abs(),
        }
    }
}

/// One row of the weight-convergence study: DRO weights averaged over
/// independent Monte Carlo runs at a fixed sample size and radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceRecord {
    /// Training sample size N.
    pub sample_size: usize,
    /// Ambiguity radius ε.
    pub epsilon: f64,
    /// Per-asset weights averaged across runs.
    pub mean_weights: Vec<f64>,
    /// Euclidean distance of the averaged weights from the uniform
    /// portfolio (1/d, ..., 1/d).
    pub uniform_distance: f64,
}

/// Paired performance-gap sweeps under the two losses, on identical data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossComparison {
    /// Sweep under the mean-risk loss.
    pub mean_risk: Vec<GapRecord>,
    /// Sweep under the shortfall loss.
    pub shortfall: Vec<GapRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pct_gain_sign_convention() {
        // SAA losing -1% vs DRO losing -2%: DRO is better by 100% of |SAA|.
        let rec = GapRecord::new(0.01, -0.012, -0.011, -0.01, -0.02);
        assert_relative_eq!(rec.pct_gain, 100.0, epsilon = 1e-12);

        // DRO worse out of sample gives a negative gain.
        let rec = GapRecord::new(0.01, -0.012, -0.011, -0.02, -0.01);
        assert_relative_eq!(rec.pct_gain, -50.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pct_gain_undefined_at_zero_baseline() {
        let rec = GapRecord::new(0.01, 0.0, 0.0, 0.0, -0.01);
        assert!(rec.pct_gain.is_nan() || rec.pct_gain.is_infinite());
    }
}
