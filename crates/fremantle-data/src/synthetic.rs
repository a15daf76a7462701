//! Synthetic return scenarios.
//!
//! A two-level normal model: every period draws a common shock
//! ψ ~ N(0, shock_std²) shared by all assets, plus an asset-specific term
//! ζ_j ~ N(mean_step·(j+1), variance_step·(j+1)). Later assets therefore
//! carry both higher mean return and higher variance, which is what makes
//! the SAA/DRO comparison interesting: the empirical optimizer chases the
//! high-mean assets while the robust one hedges their dispersion.

use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use fremantle::ScenarioSet;

use crate::error::DataError;

/// The two-level normal return model.
#[derive(Debug, Clone)]
pub struct SyntheticModel {
    n_assets: usize,
    shock_std: f64,
    mean_step: f64,
    variance_step: f64,
}

impl SyntheticModel {
    /// A model over `n_assets` assets with the study's default parameters:
    /// common shock std 0.02, per-asset mean step 0.03 and variance step
    /// 0.025.
    pub const fn new(n_assets: usize) -> Self {
        Self {
            n_assets,
            shock_std: 0.02,
            mean_step: 0.03,
            variance_step: 0.025,
        }
    }

    /// Override the common-shock standard deviation.
    pub fn with_shock_std(mut self, shock_std: f64) -> Result<Self, DataError> {
        if shock_std.is_nan() || shock_std <= 0.0 {
            return Err(DataError::InvalidParameter(format!(
                "shock_std must be positive, got {shock_std}"
            )));
        }
        self.shock_std = shock_std;
        Ok(self)
    }

    /// Override the per-asset mean increment.
    pub const fn with_mean_step(mut self, mean_step: f64) -> Self {
        self.mean_step = mean_step;
        self
    }

    /// Override the per-asset variance increment.
    pub fn with_variance_step(mut self, variance_step: f64) -> Result<Self, DataError> {
        if variance_step.is_nan() || variance_step <= 0.0 {
            return Err(DataError::InvalidParameter(format!(
                "variance_step must be positive, got {variance_step}"
            )));
        }
        self.variance_step = variance_step;
        Ok(self)
    }

    /// Number of assets m.
    pub const fn n_assets(&self) -> usize {
        self.n_assets
    }

    /// Draw `n_scenarios` return vectors. Deterministic per seed: the same
    /// seed yields a bit-identical matrix across calls.
    pub fn sample(&self, n_scenarios: usize, seed: u64) -> Result<ScenarioSet, DataError> {
        if n_scenarios == 0 {
            return Err(DataError::EmptySample);
        }
        if self.n_assets == 0 {
            return Err(DataError::InvalidParameter(
                "model must cover at least one asset".to_string(),
            ));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let shock = Normal::new(0.0, self.shock_std)
            .map_err(|e| DataError::InvalidParameter(e.to_string()))?;
        let asset_noise: Vec<Normal<f64>> = (0..self.n_assets)
            .map(|j| {
                let level = (j + 1) as f64;
                Normal::new(
                    self.mean_step * level,
                    (self.variance_step * level).sqrt(),
                )
                .map_err(|e| DataError::InvalidParameter(e.to_string()))
            })
            .collect::<Result<_, _>>()?;

        let mut returns = Array2::zeros((n_scenarios, self.n_assets));
        for mut row in returns.rows_mut() {
            let psi = shock.sample(&mut rng);
            for (j, value) in row.iter_mut().enumerate() {
                *value = psi + asset_noise[j].sample(&mut rng);
            }
        }

        Ok(ScenarioSet::new(returns)?)
    }
}
