//! Shared pieces of the SAA and DRO formulations.

use fremantle::{LossFunction, PortfolioWeights, ScenarioSet};

use crate::conic::ConicProgram;

/// Result of a successful solve: the optimal weights and objective value.
#[derive(Debug, Clone)]
pub struct Optimum {
    /// Optimal portfolio weights.
    pub weights: PortfolioWeights,
    /// Optimal objective value of the solved program.
    pub objective: f64,
}

/// Lower the loss into per-scenario epigraph constraints.
///
/// Variables `t_offset + i` are the epigraph variables t_i; for every affine
/// piece of the loss on scenario i this adds
///
///   sliceᵀx - t_i ≤ -intercept
///
/// so that t_i ≥ h(x, ξ_i) holds at any feasible point and binds at the
/// optimum. The weights are assumed to occupy variables 0..d.
pub(crate) fn add_loss_epigraph(
    prog: &mut ConicProgram,
    scenarios: &ScenarioSet,
    loss: LossFunction,
    t_offset: usize,
) {
    for (i, scenario) in scenarios.iter_scenarios().enumerate() {
        for piece in loss.affine_pieces(scenario) {
            let mut terms: Vec<(usize, f64)> = piece
                .slope
                .iter()
                .enumerate()
                .filter(|&(_, &c)| c != 0.0)
                .map(|(var, &c)| (var, c))
                .collect();
            terms.push((t_offset + i, -1.0));
            prog.add_ineq(&terms, -piece.intercept);
        }
    }
}

/// Extract the weight block from a primal solution vector.
pub(crate) fn weights_from_primal(x: &[f64], n_assets: usize) -> PortfolioWeights {
    PortfolioWeights::from(x[..n_assets].to_vec())
}
