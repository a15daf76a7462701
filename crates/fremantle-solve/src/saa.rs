//! Sample Average Approximation.
//!
//! The SAA benchmark solves
//!
//!   minimize (1/N) Σᵢ h(x, ξᵢ)   subject to x in the constraint set,
//!
//! the empirical-risk counterpart of the true stochastic program. With
//! max-affine losses this is a linear program after the standard epigraph
//! lift: one variable t_i per scenario with t_i ≥ h(x, ξ_i).

use fremantle::{LossFunction, ScenarioSet};

use crate::conic::{ConicProgram, SolverSettings};
use crate::constraints::ConstraintSet;
use crate::error::SolveError;
use crate::problem::{Optimum, add_loss_epigraph, weights_from_primal};

/// The empirical-risk minimization problem over a scenario set.
#[derive(Debug, Clone)]
pub struct SaaProblem {
    scenarios: ScenarioSet,
    loss: LossFunction,
    constraints: ConstraintSet,
    settings: SolverSettings,
}

impl SaaProblem {
    /// A problem over `scenarios` with the default simplex constraints and
    /// solver settings.
    pub fn new(scenarios: ScenarioSet, loss: LossFunction) -> Self {
        let constraints = ConstraintSet::simplex(scenarios.n_assets());
        Self {
            scenarios,
            loss,
            constraints,
            settings: SolverSettings::default(),
        }
    }

    /// Replace the default simplex constraints with a custom set.
    pub fn with_constraints(mut self, constraints: ConstraintSet) -> Result<Self, SolveError> {
        if constraints.n_assets() != self.scenarios.n_assets() {
            return Err(SolveError::DimensionMismatch {
                expected: self.scenarios.n_assets(),
                actual: constraints.n_assets(),
            });
        }
        self.constraints = constraints;
        Ok(self)
    }

    /// Override the backend solver settings.
    pub fn with_settings(mut self, settings: SolverSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The scenario set being fitted.
    pub const fn scenarios(&self) -> &ScenarioSet {
        &self.scenarios
    }

    /// Solve for the weights minimizing the empirical average loss.
    pub fn solve(&self) -> Result<Optimum, SolveError> {
        let d = self.scenarios.n_assets();
        let n = self.scenarios.n_scenarios();

        // Variables: weights x at 0..d, epigraph t at d..d+n.
        let mut prog = ConicProgram::new(d + n);
        for i in 0..n {
            prog.set_cost(d + i, 1.0 / n as f64);
        }
        add_loss_epigraph(&mut prog, &self.scenarios, self.loss, d);
        self.constraints.apply(&mut prog);

        let solution = prog.solve(&self.settings)?;
        Ok(Optimum {
            weights: weights_from_primal(&solution.x, d),
            objective: solution.objective,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fremantle::ScenarioSet;

    fn pinned_scenarios() -> ScenarioSet {
        ScenarioSet::from_rows(&[
            vec![0.1, -0.05],
            vec![0.2, 0.0],
            vec![-0.1, 0.15],
            vec![0.05, 0.05],
        ])
        .unwrap()
    }

    #[test]
    fn test_mean_risk_concentrates_on_best_mean() {
        // Sample means are 0.0625 vs 0.0375, so the empirical minimizer of
        // -x'mean over the simplex puts full weight on asset 1.
        let opt = SaaProblem::new(pinned_scenarios(), LossFunction::MeanRisk)
            .solve()
            .unwrap();
        assert!(opt.weights.is_simplex(1e-6));
        assert_relative_eq!(opt.weights.as_slice()[0], 1.0, epsilon = 1e-5);
        assert_relative_eq!(opt.objective, -0.0625, epsilon = 1e-6);
    }

    #[test]
    fn test_shortfall_objective_nonnegative() {
        let opt = SaaProblem::new(pinned_scenarios(), LossFunction::Shortfall)
            .solve()
            .unwrap();
        assert!(opt.weights.is_simplex(1e-6));
        assert!(opt.objective >= -1e-8);
    }

    #[test]
    fn test_custom_constraints_dimension_mismatch() {
        let err = SaaProblem::new(pinned_scenarios(), LossFunction::MeanRisk)
            .with_constraints(ConstraintSet::simplex(5))
            .unwrap_err();
        assert!(matches!(err, SolveError::DimensionMismatch { expected: 2, actual: 5 }));
    }

    #[test]
    fn test_infeasible_custom_constraints() {
        // Simplex plus x_0 = 2 cannot hold with x >= 0 and sum x = 1.
        let mut constraints = ConstraintSet::simplex(2);
        constraints.add_eq(vec![1.0, 0.0], 2.0).unwrap();
        let err = SaaProblem::new(pinned_scenarios(), LossFunction::MeanRisk)
            .with_constraints(constraints)
            .unwrap()
            .solve()
            .unwrap_err();
        assert!(matches!(err, SolveError::Infeasible));
    }
}
