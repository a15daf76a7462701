#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/fremantle-research/fremantle/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod conic;
pub mod constraints;
pub mod dro;
pub mod error;
pub mod problem;
pub mod saa;

pub use conic::{ConicProgram, ConicSolution, SolveStatus, SolverSettings};
pub use constraints::ConstraintSet;
pub use dro::DroProblem;
pub use error::{Result, SolveError};
pub use problem::Optimum;
pub use saa::SaaProblem;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
