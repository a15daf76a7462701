//! Error types for experiment drivers.

use thiserror::Error;

/// Result type for experiment operations.
pub type Result<T> = std::result::Result<T, ExperimentError>;

/// Errors that can abort an experiment sweep.
#[derive(Debug, Error)]
pub enum ExperimentError {
    /// A solve inside the sweep failed; the sweep aborts rather than filling
    /// the row with substitute weights.
    #[error("Solve failed during sweep: {0}")]
    Solve(#[from] fremantle_solve::SolveError),

    /// Scenario generation or loading failed.
    #[error("Scenario source failed: {0}")]
    Data(#[from] fremantle_data::DataError),

    /// Invalid scenario data.
    #[error(transparent)]
    Scenario(#[from] fremantle::ScenarioError),

    /// Train and test sets disagree on the asset count.
    #[error("Train/test dimension mismatch: train has {train} assets, test has {test}")]
    DimensionMismatch {
        /// Assets in the training set.
        train: usize,
        /// Assets in the test set.
        test: usize,
    },

    /// The radius grid is empty.
    #[error("Radius grid must contain at least one value")]
    EmptyGrid,

    /// The run or sample-size configuration is degenerate.
    #[error("Invalid experiment configuration: {0}")]
    InvalidConfig(String),

    /// The sweep was cancelled from outside.
    #[error("Sweep cancelled")]
    Cancelled,
}
