//! Error types for scenario sources.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while generating or loading scenarios.
#[derive(Debug, Error)]
pub enum DataError {
    /// IO error reading a data file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Data parsing error.
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date of the range.
        start: String,
        /// End date of the range.
        end: String,
    },

    /// A sample of zero scenarios was requested.
    #[error("Sample size must be at least one scenario")]
    EmptySample,

    /// No rows survived filtering to the requested date range.
    #[error("No complete observations between {start} and {end}")]
    NoObservations {
        /// Start date of the range.
        start: String,
        /// End date of the range.
        end: String,
    },

    /// Invalid model parameter.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid scenario data.
    #[error(transparent)]
    Scenario(#[from] fremantle::ScenarioError),
}
