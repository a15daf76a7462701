//! Per-sweep summaries of the performance gap.

use std::fmt;

use serde::{Deserialize, Serialize};

use fremantle_experiments::GapRecord;

/// Aggregate view of the percentage gain across a performance-gap sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapSummary {
    /// Label of the loss the sweep ran under.
    pub loss: String,
    /// Number of radii in the sweep.
    pub records: usize,
    /// Mean percentage gain of DRO over SAA.
    pub mean_gain: f64,
    /// Median percentage gain.
    pub median_gain: f64,
    /// Largest percentage gain over the grid.
    pub max_gain: f64,
}

/// Summarize a sweep's percentage gains. Returns `None` for an empty sweep
/// or one containing non-finite gains (a zero out-of-sample baseline).
pub fn summarize(loss: &str, records: &[GapRecord]) -> Option<GapSummary> {
    if records.is_empty() || records.iter().any(|r| !r.pct_gain.is_finite()) {
        return None;
    }

    let mut gains: Vec<f64> = records.iter().map(|r| r.pct_gain).collect();
    gains.sort_by(|a, b| a.partial_cmp(b).expect("gains are finite"));

    let n = gains.len();
    let median = if n % 2 == 1 {
        gains[n / 2]
    } else {
        (gains[n / 2 - 1] + gains[n / 2]) / 2.0
    };

    Some(GapSummary {
        loss: loss.to_string(),
        records: n,
        mean_gain: gains.iter().sum::<f64>() / n as f64,
        median_gain: median,
        max_gain: gains[n - 1],
    })
}

impl fmt::Display for GapSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: median gain {:.3}%, mean {:.3}%, max {:.3}% over {} radii",
            self.loss, self.median_gain, self.mean_gain, self.max_gain, self.records
        )
    }
}
