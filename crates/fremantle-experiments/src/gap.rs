//! Performance-gap experiment.
//!
//! For each ambiguity radius in the grid, fit SAA (once) and DRO (once per
//! radius) on the training scenarios, then compare the two weight vectors by
//! their average loss on the held-out test scenarios.
//!
//! Failure policy: any failed solve aborts the whole sweep with the
//! propagated error. Rows are never filled with substitute weights and
//! partial sweeps are never returned, so downstream aggregation cannot
//! silently mix failed and successful fits.

use indicatif::ProgressBar;

use fremantle::{LossFunction, PortfolioWeights, ScenarioSet};
use fremantle_solve::{DroProblem, SaaProblem};

use crate::error::{ExperimentError, Result};
use crate::records::GapRecord;
use crate::CancelFlag;

/// Run the performance-gap sweep over `epsilons`.
pub fn performance_gap(
    train: &ScenarioSet,
    test: &ScenarioSet,
    epsilons: &[f64],
    loss: LossFunction,
    cancel: &CancelFlag,
) -> Result<Vec<GapRecord>> {
    performance_gap_with_progress(train, test, epsilons, loss, cancel, None)
}

/// Run the performance-gap sweep, ticking `progress` once per radius.
pub fn performance_gap_with_progress(
    train: &ScenarioSet,
    test: &ScenarioSet,
    epsilons: &[f64],
    loss: LossFunction,
    cancel: &CancelFlag,
    progress: Option<&ProgressBar>,
) -> Result<Vec<GapRecord>> {
    if train.n_assets() != test.n_assets() {
        return Err(ExperimentError::DimensionMismatch {
            train: train.n_assets(),
            test: test.n_assets(),
        });
    }
    if epsilons.is_empty() {
        return Err(ExperimentError::EmptyGrid);
    }

    // The SAA fit does not depend on the radius; solve it once.
    let saa = SaaProblem::new(train.clone(), loss).solve()?;
    let oos_saa = mean_loss(&saa.weights, test, loss);

    let mut records = Vec::with_capacity(epsilons.len());
    for &epsilon in epsilons {
        cancel.checkpoint()?;
        let dro = DroProblem::new(train.clone(), epsilon, loss)?.solve()?;
        let oos_dro = mean_loss(&dro.weights, test, loss);
        records.push(GapRecord::new(
            epsilon,
            saa.objective,
            dro.objective,
            oos_saa,
            oos_dro,
        ));
        if let Some(pb) = progress {
            pb.inc(1);
        }
    }
    Ok(records)
}

/// Average loss of fixed weights over a scenario set.
pub fn mean_loss(weights: &PortfolioWeights, scenarios: &ScenarioSet, loss: LossFunction) -> f64 {
    scenarios
        .iter_scenarios()
        .map(|xi| loss.evaluate(weights, xi))
        .sum::<f64>()
        / scenarios.n_scenarios() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fremantle_data::SyntheticModel;

    fn toy_sets() -> (ScenarioSet, ScenarioSet) {
        let model = SyntheticModel::new(3);
        let train = model.sample(40, 0).unwrap();
        let test = model.sample(400, 1).unwrap();
        (train, test)
    }

    #[test]
    fn test_sweep_produces_one_record_per_radius() {
        let (train, test) = toy_sets();
        let epsilons = [1e-3, 1e-2, 1e-1];
        let records = performance_gap(
            &train,
            &test,
            &epsilons,
            LossFunction::MeanRisk,
            &CancelFlag::new(),
        )
        .unwrap();

        assert_eq!(records.len(), 3);
        for (rec, &eps) in records.iter().zip(&epsilons) {
            assert_relative_eq!(rec.epsilon, eps, epsilon = 1e-15);
            // The SAA column is radius-independent within a sweep.
            assert_relative_eq!(rec.in_sample_saa, records[0].in_sample_saa, epsilon = 1e-15);
            assert_relative_eq!(rec.oos_saa, records[0].oos_saa, epsilon = 1e-15);
            // The robust in-sample value can only be pessimistic relative
            // to the empirical one.
            assert!(rec.in_sample_dro >= rec.in_sample_saa - 1e-7);
        }
    }

    #[test]
    fn test_dimension_mismatch_fails_fast() {
        let train = SyntheticModel::new(3).sample(20, 0).unwrap();
        let test = SyntheticModel::new(4).sample(20, 1).unwrap();
        let err = performance_gap(
            &train,
            &test,
            &[0.01],
            LossFunction::MeanRisk,
            &CancelFlag::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ExperimentError::DimensionMismatch { train: 3, test: 4 }
        ));
    }

    #[test]
    fn test_empty_grid_rejected() {
        let (train, test) = toy_sets();
        assert!(matches!(
            performance_gap(&train, &test, &[], LossFunction::MeanRisk, &CancelFlag::new()),
            Err(ExperimentError::EmptyGrid)
        ));
    }

    #[test]
    fn test_cancelled_sweep_aborts() {
        let (train, test) = toy_sets();
        let cancel = CancelFlag::new();
        cancel.cancel();
        assert!(matches!(
            performance_gap(&train, &test, &[0.01], LossFunction::MeanRisk, &cancel),
            Err(ExperimentError::Cancelled)
        ));
    }
}
