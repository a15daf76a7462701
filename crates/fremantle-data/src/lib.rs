#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/fremantle-research/fremantle/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod famafrench;
pub mod synthetic;

pub use error::{DataError, Result};
pub use famafrench::{IndustryReturns, load_industry_returns};
pub use synthetic::SyntheticModel;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
