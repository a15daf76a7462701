//! Portfolio weight vectors.

use ndarray::{Array1, ArrayView1};

/// A portfolio weight vector over d assets.
///
/// Weights are produced by a successful SAA or DRO solve and are expected to
/// lie (numerically) on the simplex: every component non-negative up to
/// solver tolerance and the components summing to one. No clamping or
/// renormalization is applied; [`PortfolioWeights::is_simplex`] makes the
/// tolerance explicit where it matters.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioWeights {
    weights: Array1<f64>,
}

impl PortfolioWeights {
    /// Wrap a raw weight vector.
    pub const fn new(weights: Array1<f64>) -> Self {
        Self { weights }
    }

    /// The uniform portfolio (1/d, ..., 1/d).
    pub fn uniform(n_assets: usize) -> Self {
        Self {
            weights: Array1::from_elem(n_assets, 1.0 / n_assets as f64),
        }
    }

    /// Number of assets d.
    pub fn n_assets(&self) -> usize {
        self.weights.len()
    }

    /// The underlying weight vector.
    pub const fn as_array(&self) -> &Array1<f64> {
        &self.weights
    }

    /// Weights as a plain slice (row-major, always contiguous).
    pub fn as_slice(&self) -> &[f64] {
        self.weights.as_slice().expect("owned 1-d array is contiguous")
    }

    /// Portfolio return ξᵀx for one scenario.
    ///
    /// # Panics
    /// Panics if the scenario dimension does not match `n_assets()`.
    pub fn portfolio_return(&self, scenario: ArrayView1<'_, f64>) -> f64 {
        self.weights.dot(&scenario)
    }

    /// Euclidean norm ‖x‖₂.
    pub fn l2_norm(&self) -> f64 {
        self.weights.dot(&self.weights).sqrt()
    }

    /// Euclidean distance to another weight vector of the same dimension.
    pub fn l2_distance(&self, other: &Self) -> f64 {
        let diff = &self.weights - &other.weights;
        diff.dot(&diff).sqrt()
    }

    /// Whether the weights lie on the simplex within `tol`: every component
    /// at least `-tol` and the sum within `tol` of one.
    pub fn is_simplex(&self, tol: f64) -> bool {
        self.weights.iter().all(|&w| w >= -tol) && (self.weights.sum() - 1.0).abs() <= tol
    }
}

impl From<Vec<f64>> for PortfolioWeights {
    fn from(weights: Vec<f64>) -> Self {
        Self::new(Array1::from_vec(weights))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_uniform() {
        let w = PortfolioWeights::uniform(4);
        assert_eq!(w.n_assets(), 4);
        assert_relative_eq!(w.as_array().sum(), 1.0, epsilon = 1e-12);
        assert!(w.is_simplex(1e-9));
    }

    #[test]
    fn test_portfolio_return() {
        let w = PortfolioWeights::from(vec![0.25, 0.75]);
        let r = w.portfolio_return(array![0.2, -0.04].view());
        assert_relative_eq!(r, 0.25 * 0.2 - 0.75 * 0.04, epsilon = 1e-12);
    }

    #[test]
    fn test_l2_distance_to_uniform() {
        let concentrated = PortfolioWeights::from(vec![1.0, 0.0]);
        let uniform = PortfolioWeights::uniform(2);
        assert_relative_eq!(
            concentrated.l2_distance(&uniform),
            (0.25f64 + 0.25).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_simplex_tolerance() {
        let w = PortfolioWeights::from(vec![-5e-9, 1.0]);
        assert!(w.is_simplex(1e-8));
        assert!(!w.is_simplex(1e-10));

        let off = PortfolioWeights::from(vec![0.6, 0.6]);
        assert!(!off.is_simplex(1e-6));
    }
}
