#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/fremantle-research/fremantle/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod loss;
pub mod scenario;
pub mod weights;

pub use loss::{AffinePiece, LossFunction};
pub use scenario::{ScenarioError, ScenarioSet};
pub use weights::PortfolioWeights;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
