//! Wasserstein distributionally robust optimization.
//!
//! The robust problem guards against sampling error by minimizing the worst
//! case over every distribution within 1-Wasserstein distance ε of the
//! empirical one:
//!
//!   minimize sup { E_Q[h(x, ξ)] : d_W(Q, P̂_N) ≤ ε }  subject to x in X.
//!
//! For a loss that is max-affine in ξ with pieces whose ξ-gradients are -x
//! or 0 (both losses in this study), strong duality for Wasserstein
//! ambiguity sets (Mohajerin Esfahani & Kuhn, 2018) collapses the
//! semi-infinite supremum to a finite, exact expression:
//!
//!   (1/N) Σᵢ h(x, ξᵢ) + ε · ‖x‖₂,
//!
//! the empirical average plus the ambiguity radius times the dual-norm
//! Lipschitz modulus of the loss in ξ. The modulus depends on the decision
//! variable, so it enters the program as a second-order-cone bound
//! s ≥ ‖x‖₂ rather than a hardcoded constant. At ε = 0 the penalty term
//! drops and the program is exactly the SAA problem.

use fremantle::{LossFunction, ScenarioSet};

use crate::conic::{ConicProgram, SolverSettings};
use crate::constraints::ConstraintSet;
use crate::error::SolveError;
use crate::problem::{Optimum, add_loss_epigraph, weights_from_primal};

/// The worst-case risk minimization problem over a Wasserstein ball of
/// radius ε around the empirical scenario distribution.
#[derive(Debug, Clone)]
pub struct DroProblem {
    scenarios: ScenarioSet,
    epsilon: f64,
    loss: LossFunction,
    constraints: ConstraintSet,
    settings: SolverSettings,
}

impl DroProblem {
    /// A problem over `scenarios` with ambiguity radius `epsilon`, default
    /// simplex constraints and solver settings.
    pub fn new(
        scenarios: ScenarioSet,
        epsilon: f64,
        loss: LossFunction,
    ) -> Result<Self, SolveError> {
        if epsilon.is_nan() || epsilon < 0.0 {
            return Err(SolveError::InvalidRadius(epsilon));
        }
        let constraints = ConstraintSet::simplex(scenarios.n_assets());
        Ok(Self {
            scenarios,
            epsilon,
            loss,
            constraints,
            settings: SolverSettings::default(),
        })
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

    /// The ambiguity radius ε.
    pub const fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Solve for the weights minimizing the worst-case expected loss.
    pub fn solve(&self) -> Result<Optimum, SolveError> {
        let d = self.scenarios.n_assets();
        let n = self.scenarios.n_scenarios();

        // Variables: weights x at 0..d, epigraph t at d..d+n, and for a
        // positive radius the Lipschitz bound s at d+n. At eps = 0 the
        // penalty column would carry zero cost and a degenerate cone, so it
        // is omitted and the program is exactly the SAA program.
        let penalized = self.epsilon > 0.0;
        let mut prog = ConicProgram::new(d + n + usize::from(penalized));
        for i in 0..n {
            prog.set_cost(d + i, 1.0 / n as f64);
        }
        add_loss_epigraph(&mut prog, &self.scenarios, self.loss, d);

        if penalized {
            // s >= ||x||_2: the dual-norm modulus of the loss in the
            // scenario argument.
            let s = d + n;
            prog.set_cost(s, self.epsilon);
            let args: Vec<Vec<(usize, f64)>> = (0..d).map(|var| vec![(var, 1.0)]).collect();
            prog.add_soc(&[(s, 1.0)], &args);
        }

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
    fn test_negative_radius_rejected() {
        let err = DroProblem::new(pinned_scenarios(), -0.1, LossFunction::MeanRisk).unwrap_err();
        assert!(matches!(err, SolveError::InvalidRadius(_)));
    }

    #[test]
    fn test_weights_on_simplex() {
        let opt = DroProblem::new(pinned_scenarios(), 0.05, LossFunction::MeanRisk)
            .unwrap()
            .solve()
            .unwrap();
        assert!(opt.weights.is_simplex(1e-6));
    }

    #[test]
    fn test_duality_identity_at_optimum() {
        // objective = in-sample average loss + eps * ||x||_2 must hold at
        // the optimum of the reformulated program.
        let scenarios = pinned_scenarios();
        let eps = 0.02;
        let loss = LossFunction::MeanRisk;
        let opt = DroProblem::new(scenarios.clone(), eps, loss)
            .unwrap()
            .solve()
            .unwrap();

        let avg_loss: f64 = scenarios
            .iter_scenarios()
            .map(|xi| loss.evaluate(&opt.weights, xi))
            .sum::<f64>()
            / scenarios.n_scenarios() as f64;
        let penalty = eps * loss.scenario_lipschitz(&opt.weights);
        assert_relative_eq!(opt.objective, avg_loss + penalty, epsilon = 1e-6);
    }
}
