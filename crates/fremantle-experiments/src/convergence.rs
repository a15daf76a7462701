//! Weight-convergence experiment.
//!
//! For each training sample size N and ambiguity radius ε, the DRO problem
//! is solved on R independently generated synthetic samples and the
//! resulting weight vectors are averaged. As ε grows large relative to the
//! data dispersion the averaged weights must approach the uniform portfolio,
//! the known limit of Wasserstein-DRO under a simplex constraint.
//!
//! Monte Carlo protocol: run r draws its sample with seed `base_seed + r`,
//! so the same run index reuses its sample across every (N, ε) cell. The
//! sweeps are therefore paired, which removes sampling noise from the
//! ε-axis comparison. Runs execute on the rayon pool, each owning its own seeded
//! RNG; results are collected in run order before averaging, so the output
//! never depends on scheduling.

use indicatif::ProgressBar;
use ndarray::Array1;
use rayon::prelude::*;

use fremantle::{LossFunction, PortfolioWeights};
use fremantle_data::SyntheticModel;
use fremantle_solve::DroProblem;

use crate::error::{ExperimentError, Result};
use crate::records::ConvergenceRecord;
use crate::CancelFlag;

/// Configuration of the weight-convergence study.
#[derive(Debug, Clone)]
pub struct ConvergenceConfig {
    /// Training sample sizes N to sweep.
    pub sample_sizes: Vec<usize>,
    /// Ambiguity radii ε to sweep.
    pub epsilons: Vec<f64>,
    /// Independent Monte Carlo runs per (N, ε) cell.
    pub runs: usize,
    /// Number of assets in the synthetic model.
    pub n_assets: usize,
    /// Base seed; run r uses seed `base_seed + r`.
    pub base_seed: u64,
    /// Loss under which the DRO problems are solved.
    pub loss: LossFunction,
}

impl ConvergenceConfig {
    /// The study's defaults: N ∈ {30, 300, 3000}, 20 radii from 1e-4 to
    /// 1e-1, 100 runs over 10 assets with the mean-risk loss.
    pub fn study_defaults() -> Self {
        Self {
            sample_sizes: vec![30, 300, 3000],
            epsilons: crate::log_grid(-4.0, -1.0, 20),
            runs: 100,
            n_assets: 10,
            base_seed: 0,
            loss: LossFunction::MeanRisk,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.sample_sizes.is_empty() || self.sample_sizes.contains(&0) {
            return Err(ExperimentError::InvalidConfig(
                "sample sizes must be non-empty and positive".to_string(),
            ));
        }
        if self.epsilons.is_empty() {
            return Err(ExperimentError::EmptyGrid);
        }
        if self.runs == 0 {
            return Err(ExperimentError::InvalidConfig(
                "at least one Monte Carlo run is required".to_string(),
            ));
        }
        if self.n_assets == 0 {
            return Err(ExperimentError::InvalidConfig(
                "at least one asset is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Run the weight-convergence study.
pub fn weight_convergence(
    config: &ConvergenceConfig,
    cancel: &CancelFlag,
) -> Result<Vec<ConvergenceRecord>> {
    weight_convergence_with_progress(config, cancel, None)
}

/// Run the weight-convergence study, ticking `progress` once per (N, ε)
/// cell.
pub fn weight_convergence_with_progress(
    config: &ConvergenceConfig,
    cancel: &CancelFlag,
    progress: Option<&ProgressBar>,
) -> Result<Vec<ConvergenceRecord>> {
    config.validate()?;

    let model = SyntheticModel::new(config.n_assets);
    let uniform = PortfolioWeights::uniform(config.n_assets);
    let mut records = Vec::with_capacity(config.sample_sizes.len() * config.epsilons.len());

    for &n in &config.sample_sizes {
        for &epsilon in &config.epsilons {
            cancel.checkpoint()?;

            // Independent runs, each with its own seed and fresh sample.
            let weights: Vec<PortfolioWeights> = (0..config.runs)
                .into_par_iter()
                .map(|run| -> Result<PortfolioWeights> {
                    cancel.checkpoint()?;
                    let sample = model.sample(n, config.base_seed + run as u64)?;
                    let opt = DroProblem::new(sample, epsilon, config.loss)?.solve()?;
                    Ok(opt.weights)
                })
                .collect::<Result<_>>()?;

            let mut mean = Array1::<f64>::zeros(config.n_assets);
            for w in &weights {
                mean += w.as_array();
            }
            mean /= config.runs as f64;
            let mean = PortfolioWeights::new(mean);

            records.push(ConvergenceRecord {
                sample_size: n,
                epsilon,
                uniform_distance: mean.l2_distance(&uniform),
                mean_weights: mean.as_slice().to_vec(),
            });
            if let Some(pb) = progress {
                pb.inc(1);
            }
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tiny_config() -> ConvergenceConfig {
        ConvergenceConfig {
            sample_sizes: vec![20, 40],
            epsilons: vec![1e-3, 1e-1],
            runs: 3,
            n_assets: 3,
            base_seed: 0,
            loss: LossFunction::MeanRisk,
        }
    }

    #[test]
    fn test_record_ordering_and_shape() {
        let records = weight_convergence(&tiny_config(), &CancelFlag::new()).unwrap();
        assert_eq!(records.len(), 4);
        // Ordered by (N, eps) regardless of worker scheduling.
        assert_eq!(records[0].sample_size, 20);
        assert_relative_eq!(records[0].epsilon, 1e-3, max_relative = 1e-12);
        assert_eq!(records[3].sample_size, 40);
        assert_relative_eq!(records[3].epsilon, 1e-1, max_relative = 1e-12);
        for rec in &records {
            assert_eq!(rec.mean_weights.len(), 3);
            // Averaged simplex vectors stay on the simplex.
            let sum: f64 = rec.mean_weights.iter().sum();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_deterministic_across_calls() {
        // Same seeds, same records, however rayon schedules the runs.
        let a = weight_convergence(&tiny_config(), &CancelFlag::new()).unwrap();
        let b = weight_convergence(&tiny_config(), &CancelFlag::new()).unwrap();
        for (ra, rb) in a.iter().zip(&b) {
            assert_eq!(ra.sample_size, rb.sample_size);
            for (wa, wb) in ra.mean_weights.iter().zip(&rb.mean_weights) {
                assert_relative_eq!(wa, wb, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_large_radius_approaches_uniform() {
        let config = ConvergenceConfig {
            epsilons: vec![1e-3, 10.0],
            ..tiny_config()
        };
        let records = weight_convergence(&config, &CancelFlag::new()).unwrap();
        // Within each sample size, the large radius sits closer to uniform.
        assert!(records[1].uniform_distance < records[0].uniform_distance);
        assert!(records[1].uniform_distance < 1e-2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = tiny_config();
        config.runs = 0;
        assert!(matches!(
            weight_convergence(&config, &CancelFlag::new()),
            Err(ExperimentError::InvalidConfig(_))
        ));

        let mut config = tiny_config();
        config.epsilons.clear();
        assert!(matches!(
            weight_convergence(&config, &CancelFlag::new()),
            Err(ExperimentError::EmptyGrid)
        ));
    }

    #[test]
    fn test_cancellation() {
        let cancel = CancelFlag::new();
        cancel.cancel();
        assert!(matches!(
            weight_convergence(&tiny_config(), &cancel),
            Err(ExperimentError::Cancelled)
        ));
    }
}
