//! Loss-function comparison.
//!
//! Repeats the performance-gap experiment under the mean-risk and shortfall
//! losses on the same train/test data. The two sweeps are built and solved
//! independently; nothing is shared between them beyond the immutable
//! scenario sets, so one loss cannot contaminate the other's records.

use indicatif::ProgressBar;

use fremantle::{LossFunction, ScenarioSet};

use crate::error::Result;
use crate::gap::performance_gap_with_progress;
use crate::records::LossComparison;
use crate::CancelFlag;

/// Run the performance-gap sweep under both losses.
pub fn loss_comparison(
    train: &ScenarioSet,
    test: &ScenarioSet,
    epsilons: &[f64],
    cancel: &CancelFlag,
) -> Result<LossComparison> {
    loss_comparison_with_progress(train, test, epsilons, cancel, None)
}

/// Run the comparison, ticking `progress` once per radius per loss.
pub fn loss_comparison_with_progress(
    train: &ScenarioSet,
    test: &ScenarioSet,
    epsilons: &[f64],
    cancel: &CancelFlag,
    progress: Option<&ProgressBar>,
) -> Result<LossComparison> {
    let mean_risk = performance_gap_with_progress(
        train,
        test,
        epsilons,
        LossFunction::MeanRisk,
        cancel,
        progress,
    )?;
    let shortfall = performance_gap_with_progress(
        train,
        test,
        epsilons,
        LossFunction::Shortfall,
        cancel,
        progress,
    )?;
    Ok(LossComparison {
        mean_risk,
        shortfall,
    })
}
