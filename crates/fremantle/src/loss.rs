//! Portfolio loss functions.
//!
//! Both problems minimize an expectation of a scalar loss h(x, ξ) that must
//! be convex in the weights x for every fixed scenario ξ. The two losses
//! used in the study are max-affine in x:
//!
//! - mean-risk:  h(x, ξ) = -ξᵀx (the negative portfolio return)
//! - shortfall:  h(x, ξ) = max(0, -ξᵀx) (only the downside is penalized)
//!
//! Rather than accepting arbitrary closures, the loss is a tagged enum that
//! exposes its affine pieces. The solvers lower the pieces into epigraph
//! constraints on their symbolic decision variable, and the experiment
//! drivers evaluate the same pieces numerically on held-out data, so the two
//! code paths cannot drift apart.

use ndarray::{Array1, ArrayView1};

use crate::weights::PortfolioWeights;

/// One affine piece of a max-affine loss: value = slopeᵀx + intercept.
#[derive(Debug, Clone, PartialEq)]
pub struct AffinePiece {
    /// Coefficients on the weight vector.
    pub slope: Array1<f64>,
    /// Constant offset.
    pub intercept: f64,
}

/// Convex loss of a portfolio on a single return scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LossFunction {
    /// Negative portfolio return: h(x, ξ) = -ξᵀx.
    #[default]
    MeanRisk,
    /// Downside-only loss: h(x, ξ) = max(0, -ξᵀx).
    Shortfall,
}

impl LossFunction {
    /// The affine pieces of h(·, ξ) as a function of the weights, so that
    /// h(x, ξ) = max over pieces of (slopeᵀx + intercept).
    pub fn affine_pieces(&self, scenario: ArrayView1<'_, f64>) -> Vec<AffinePiece> {
        let negated = scenario.mapv(|r| -r);
        match self {
            Self::MeanRisk => vec![AffinePiece {
                slope: negated,
                intercept: 0.0,
            }],
            Self::Shortfall => vec![
                AffinePiece {
                    slope: negated,
                    intercept: 0.0,
                },
                AffinePiece {
                    slope: Array1::zeros(scenario.len()),
                    intercept: 0.0,
                },
            ],
        }
    }

    /// Numeric loss of concrete weights on one scenario.
    pub fn evaluate(&self, weights: &PortfolioWeights, scenario: ArrayView1<'_, f64>) -> f64 {
        let negative_return = -weights.portfolio_return(scenario);
        match self {
            Self::MeanRisk => negative_return,
            Self::Shortfall => negative_return.max(0.0),
        }
    }

    /// Lipschitz modulus of h(x, ·) in the scenario argument, in the ℓ₂
    /// norm, for fixed weights x.
    ///
    /// Every affine piece has gradient -x or 0 with respect to ξ, so the
    /// modulus is ‖x‖₂ for both losses. This is the decision-dependent
    /// constant that the Wasserstein-DRO reformulation penalizes.
    pub fn scenario_lipschitz(&self, weights: &PortfolioWeights) -> f64 {
        weights.l2_norm()
    }

    /// Short machine-friendly name, used in CSV columns and file stems.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MeanRisk => "mean_risk",
            Self::Shortfall => "shortfall",
        }
    }
}
