#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/fremantle-research/fremantle/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub mod compare;
pub mod convergence;
pub mod error;
pub mod gap;
pub mod records;

pub use compare::loss_comparison;
pub use convergence::{ConvergenceConfig, weight_convergence};
pub use error::{ExperimentError, Result};
pub use gap::performance_gap;
pub use records::{ConvergenceRecord, GapRecord, LossComparison};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A log-spaced grid of ambiguity radii from 10^min_exp to 10^max_exp
/// (inclusive), the radius axis of every sweep in the study.
pub fn log_grid(min_exp: f64, max_exp: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![10f64.powf(min_exp)],
        _ => {
            let step = (max_exp - min_exp) / (count - 1) as f64;
            (0..count)
                .map(|i| 10f64.powf(min_exp + step * i as f64))
                .collect()
        }
    }
}

/// Cooperative cancellation for long parameter sweeps.
///
/// Drivers check the flag between iterations and return
/// [`ExperimentError::Cancelled`] once it is raised. Clones share the flag.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// A fresh, unraised flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag; every sweep sharing it stops at its next check.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether the flag has been raised.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub(crate) fn checkpoint(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(ExperimentError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_log_grid_endpoints() {
        let grid = log_grid(-4.0, -1.0, 4);
        assert_eq!(grid.len(), 4);
        assert_relative_eq!(grid[0], 1e-4, max_relative = 1e-12);
        assert_relative_eq!(grid[1], 1e-3, max_relative = 1e-12);
        assert_relative_eq!(grid[3], 1e-1, max_relative = 1e-12);
    }

    #[test]
    fn test_log_grid_degenerate_counts() {
        assert!(log_grid(-4.0, -1.0, 0).is_empty());
        let single = log_grid(-2.0, -1.0, 1);
        assert_relative_eq!(single[0], 1e-2, max_relative = 1e-12);
    }

    #[test]
    fn test_cancel_flag_shared_across_clones() {
        let flag = CancelFlag::new();
        let clone = flag.clone();
        assert!(!clone.is_cancelled());
        flag.cancel();
        assert!(clone.is_cancelled());
        assert!(clone.checkpoint().is_err());
    }
}
