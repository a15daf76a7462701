#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/fremantle-research/fremantle/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod summary;

pub use export::{ExportError, ExportFormat, write_convergence_records, write_gap_records};
pub use summary::{GapSummary, summarize};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
