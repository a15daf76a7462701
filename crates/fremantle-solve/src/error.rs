//! Error types for the solver layer.

use thiserror::Error;

use crate::conic::SolveStatus;

/// Result type for solver operations.
pub type Result<T> = std::result::Result<T, SolveError>;

/// Errors raised while formulating or solving a convex program.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The constraints admit no feasible point.
    #[error("Program is infeasible")]
    Infeasible,

    /// The objective is unbounded below over the feasible set.
    #[error("Program is unbounded")]
    Unbounded,

    /// The backend stopped without an optimality certificate. The original
    /// solver status is preserved for diagnostics.
    #[error("Solver did not converge (status: {status:?})")]
    NotConverged {
        /// Status reported by the backend.
        status: SolveStatus,
    },

    /// The backend rejected the problem data.
    #[error("Solver backend error: {0}")]
    Backend(String),

    /// A dimension disagrees with the scenario set's asset count.
    #[error("Dimension mismatch: expected {expected} assets, got {actual}")]
    DimensionMismatch {
        /// Expected number of assets.
        expected: usize,
        /// Actual number supplied.
        actual: usize,
    },

    /// The ambiguity radius is negative.
    #[error("Invalid ambiguity radius {0}: must be non-negative")]
    InvalidRadius(f64),

    /// Invalid scenario data.
    #[error(transparent)]
    Scenario(#[from] fremantle::ScenarioError),
}
