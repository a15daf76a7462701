//! Feasible sets for the portfolio weight vector.

use crate::conic::ConicProgram;
use crate::error::SolveError;

/// Affine constraints on the weight vector x.
///
/// The default feasible set is the long-only simplex {x ≥ 0, Σx = 1}.
/// Custom sets can be assembled with [`ConstraintSet::empty`] plus
/// [`add_eq`](ConstraintSet::add_eq) / [`add_ineq`](ConstraintSet::add_ineq);
/// the solvers apply whatever set they are given, so an over-constrained
/// custom set surfaces as [`SolveError::Infeasible`] rather than being
/// silently repaired.
#[derive(Debug, Clone)]
pub struct ConstraintSet {
    n_assets: usize,
    eqs: Vec<(Vec<f64>, f64)>,
    ineqs: Vec<(Vec<f64>, f64)>,
}

impl ConstraintSet {
    /// The long-only simplex over `n_assets` weights.
    pub fn simplex(n_assets: usize) -> Self {
        let mut set = Self::empty(n_assets);
        set.eqs.push((vec![1.0; n_assets], 1.0));
        for asset in 0..n_assets {
            let mut coeffs = vec![0.0; n_assets];
            coeffs[asset] = -1.0;
            set.ineqs.push((coeffs, 0.0));
        }
        set
    }

    /// An unconstrained set over `n_assets` weights.
    pub const fn empty(n_assets: usize) -> Self {
        Self {
            n_assets,
            eqs: Vec::new(),
            ineqs: Vec::new(),
        }
    }

    /// Number of assets the set constrains.
    pub const fn n_assets(&self) -> usize {
        self.n_assets
    }

    /// Add an equality constraint coeffsᵀx = rhs.
    pub fn add_eq(&mut self, coeffs: Vec<f64>, rhs: f64) -> Result<&mut Self, SolveError> {
        self.check_width(coeffs.len())?;
        self.eqs.push((coeffs, rhs));
        Ok(self)
    }

    /// Add an inequality constraint coeffsᵀx ≤ rhs.
    pub fn add_ineq(&mut self, coeffs: Vec<f64>, rhs: f64) -> Result<&mut Self, SolveError> {
        self.check_width(coeffs.len())?;
        self.ineqs.push((coeffs, rhs));
        Ok(self)
    }

    fn check_width(&self, actual: usize) -> Result<(), SolveError> {
        if actual != self.n_assets {
            return Err(SolveError::DimensionMismatch {
                expected: self.n_assets,
                actual,
            });
        }
        Ok(())
    }

    /// Emit the constraints into a program whose first `n_assets` variables
    /// are the weights.
    pub(crate) fn apply(&self, prog: &mut ConicProgram) {
        for (coeffs, rhs) in &self.eqs {
            let terms: Vec<(usize, f64)> = nonzero_terms(coeffs);
            prog.add_eq(&terms, *rhs);
        }
        for (coeffs, rhs) in &self.ineqs {
            let terms: Vec<(usize, f64)> = nonzero_terms(coeffs);
            prog.add_ineq(&terms, *rhs);
        }
    }
}

fn nonzero_terms(coeffs: &[f64]) -> Vec<(usize, f64)> {
    coeffs
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c != 0.0)
        .map(|(var, &c)| (var, c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simplex_shape() {
        let set = ConstraintSet::simplex(3);
        assert_eq!(set.n_assets(), 3);
        assert_eq!(set.eqs.len(), 1);
        assert_eq!(set.ineqs.len(), 3);
    }

    #[test]
    fn test_custom_constraint_dimension_check() {
        let mut set = ConstraintSet::empty(3);
        assert!(set.add_eq(vec![1.0, 1.0], 1.0).is_err());
        assert!(set.add_ineq(vec![1.0, 0.0, 0.0], 0.5).is_ok());
    }
}
