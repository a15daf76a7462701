//! Scenario sets of asset returns.
//!
//! A [`ScenarioSet`] is a dense N×d matrix holding N sampled return vectors
//! for d assets. It is the single data shape consumed by both the SAA and
//! DRO problems, whether the scenarios come from the synthetic generator or
//! from historical industry returns.

use ndarray::{Array1, Array2, ArrayView1, Axis};
use thiserror::Error;

/// Errors raised when constructing or splitting a scenario set.
#[derive(Debug, Error, PartialEq)]
pub enum ScenarioError {
    /// The set contains no scenarios.
    #[error("Scenario set must contain at least one scenario")]
    Empty,

    /// The scenarios have zero assets.
    #[error("Scenario set must cover at least one asset")]
    NoAssets,

    /// A row has a different width than the first row.
    #[error("Ragged scenario row {row}: expected {expected} assets, got {actual}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        actual: usize,
    },

    /// A chronological split would leave one side empty.
    #[error("Invalid train fraction {fraction}: split {train}/{test} leaves one side empty")]
    InvalidSplit {
        /// Requested training fraction.
        fraction: f64,
        /// Resulting number of training rows.
        train: usize,
        /// Resulting number of test rows.
        test: usize,
    },
}

/// An immutable, ordered set of return scenarios (N rows) over d assets.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioSet {
    returns: Array2<f64>,
}

impl ScenarioSet {
    /// Wrap an N×d return matrix, requiring N ≥ 1 and d ≥ 1.
    pub fn new(returns: Array2<f64>) -> Result<Self, ScenarioError> {
        if returns.nrows() == 0 {
            return Err(ScenarioError::Empty);
        }
        if returns.ncols() == 0 {
            return Err(ScenarioError::NoAssets);
        }
        Ok(Self { returns })
    }

    /// Build a scenario set from row vectors, checking that every row has
    /// the same width.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, ScenarioError> {
        let n = rows.len();
        if n == 0 {
            return Err(ScenarioError::Empty);
        }
        let d = rows[0].len();
        if d == 0 {
            return Err(ScenarioError::NoAssets);
        }
        let mut flat = Vec::with_capacity(n * d);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != d {
                return Err(ScenarioError::RaggedRow {
                    row: i,
                    expected: d,
                    actual: row.len(),
                });
            }
            flat.extend_from_slice(row);
        }
        let returns = Array2::from_shape_vec((n, d), flat)
            .expect("row-major buffer matches the checked shape");
        Ok(Self { returns })
    }

    /// Number of scenarios N.
    pub fn n_scenarios(&self) -> usize {
        self.returns.nrows()
    }

    /// Number of assets d.
    pub fn n_assets(&self) -> usize {
        self.returns.ncols()
    }

    /// View of the i-th scenario vector.
    ///
    /// # Panics
    /// Panics if `i >= n_scenarios()`.
    pub fn scenario(&self, i: usize) -> ArrayView1<'_, f64> {
        self.returns.row(i)
    }

    /// Iterate over scenario vectors in order.
    pub fn iter_scenarios(&self) -> impl Iterator<Item = ArrayView1<'_, f64>> {
        self.returns.axis_iter(Axis(0))
    }

    /// The underlying N×d matrix.
    pub const fn returns(&self) -> &Array2<f64> {
        &self.returns
    }

    /// Per-asset sample mean return.
    pub fn mean_returns(&self) -> Array1<f64> {
        self.returns
            .mean_axis(Axis(0))
            .expect("N >= 1 by construction")
    }

    /// Split chronologically ordered scenarios into a leading training set
    /// and a trailing test set.
    ///
    /// The first `floor(fraction * N)` rows become the training set. Both
    /// halves must come out non-empty.
    pub fn split_chronological(&self, fraction: f64) -> Result<(Self, Self), ScenarioError> {
        let n = self.n_scenarios();
        let split = (fraction * n as f64).floor() as usize;
        let test = n.saturating_sub(split);
        if split == 0 || test == 0 {
            return Err(ScenarioError::InvalidSplit {
                fraction,
                train: split,
                test,
            });
        }
        let train = Self::new(self.returns.slice(ndarray::s![..split, ..]).to_owned())?;
        let rest = Self::new(self.returns.slice(ndarray::s![split.., ..]).to_owned())?;
        Ok((train, rest))
    }
}
