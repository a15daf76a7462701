//! Conic solver boundary.
//!
//! The rest of the workspace treats convex solving as a single opaque
//! capability: hand over a linear cost, affine rows and second-order-cone
//! blocks, get back a primal optimum and objective value or a typed failure.
//! This module is the only place that speaks the Clarabel API.

use clarabel::algebra::CscMatrix;
use clarabel::solver::{
    DefaultSettingsBuilder, DefaultSolver, IPSolver, SolverStatus, SupportedConeT,
};

use crate::error::SolveError;

/// Solution status reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Optimal solution found.
    Optimal,
    /// Problem is infeasible.
    Infeasible,
    /// Problem is unbounded.
    Unbounded,
    /// Iteration or time limit reached.
    MaxIterations,
    /// Numerical difficulties.
    NumericalError,
    /// Any other backend status.
    Unknown,
}

impl From<SolverStatus> for SolveStatus {
    fn from(status: SolverStatus) -> Self {
        match status {
            SolverStatus::Solved => Self::Optimal,
            SolverStatus::PrimalInfeasible => Self::Infeasible,
            SolverStatus::DualInfeasible => Self::Unbounded,
            SolverStatus::MaxIterations | SolverStatus::MaxTime => Self::MaxIterations,
            SolverStatus::NumericalError | SolverStatus::InsufficientProgress => {
                Self::NumericalError
            }
            _ => Self::Unknown,
        }
    }
}

/// Backend solver settings.
#[derive(Debug, Clone)]
pub struct SolverSettings {
    /// Print solver output.
    pub verbose: bool,
    /// Maximum interior-point iterations.
    pub max_iter: u32,
    /// Time limit in seconds.
    pub time_limit: f64,
    /// Absolute duality-gap tolerance.
    pub tol_gap_abs: f64,
    /// Relative duality-gap tolerance.
    pub tol_gap_rel: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            verbose: false,
            max_iter: 200,
            time_limit: f64::INFINITY,
            tol_gap_abs: 1e-8,
            tol_gap_rel: 1e-8,
        }
    }
}

/// Primal solution of a conic program.
#[derive(Debug, Clone)]
pub struct ConicSolution {
    /// Optimal decision vector.
    pub x: Vec<f64>,
    /// Optimal objective value qᵀx.
    pub objective: f64,
    /// Interior-point iterations used.
    pub iterations: u32,
    /// Solve time in seconds.
    pub solve_time: f64,
}

/// One affine row aᵀx (relation and rhs tracked by the containing group).
#[derive(Debug, Clone)]
struct Row {
    terms: Vec<(usize, f64)>,
    rhs: f64,
}

/// A convex minimization program with linear cost over affine equalities,
/// affine inequalities and second-order-cone constraints.
#[derive(Debug, Clone)]
pub struct ConicProgram {
    n_vars: usize,
    cost: Vec<f64>,
    eq_rows: Vec<Row>,
    ineq_rows: Vec<Row>,
    // Each block is stored in Clarabel (A, b) form: s = b - Ax must land in
    // the second-order cone.
    soc_blocks: Vec<Vec<Row>>,
}

impl ConicProgram {
    /// A program over `n_vars` decision variables with zero cost.
    pub fn new(n_vars: usize) -> Self {
        Self {
            n_vars,
            cost: vec![0.0; n_vars],
            eq_rows: Vec::new(),
            ineq_rows: Vec::new(),
            soc_blocks: Vec::new(),
        }
    }

    /// Number of decision variables.
    pub const fn n_vars(&self) -> usize {
        self.n_vars
    }

    /// Set the linear cost coefficient of one variable.
    ///
    /// # Panics
    /// Panics if `var` is out of range; indices past the declared variable
    /// count are a programming error, not a recoverable condition.
    pub fn set_cost(&mut self, var: usize, coeff: f64) {
        assert!(var < self.n_vars, "variable index {var} out of range");
        self.cost[var] = coeff;
    }

    /// Add an equality constraint Σ terms·x = rhs.
    pub fn add_eq(&mut self, terms: &[(usize, f64)], rhs: f64) {
        self.eq_rows.push(self.row(terms, rhs));
    }

    /// Add an inequality constraint Σ terms·x ≤ rhs.
    pub fn add_ineq(&mut self, terms: &[(usize, f64)], rhs: f64) {
        self.ineq_rows.push(self.row(terms, rhs));
    }

    /// Add a second-order-cone constraint ‖(argᵀx)_k‖₂ ≤ boundᵀx.
    ///
    /// `bound` is the affine expression on the cone's radial axis, `args`
    /// the expressions whose Euclidean norm it dominates.
    pub fn add_soc(&mut self, bound: &[(usize, f64)], args: &[Vec<(usize, f64)>]) {
        let mut block = Vec::with_capacity(1 + args.len());
        block.push(self.negated_row(bound));
        for arg in args {
            block.push(self.negated_row(arg));
        }
        self.soc_blocks.push(block);
    }

    fn row(&self, terms: &[(usize, f64)], rhs: f64) -> Row {
        for &(var, _) in terms {
            assert!(var < self.n_vars, "variable index {var} out of range");
        }
        Row {
            terms: terms.to_vec(),
            rhs,
        }
    }

    fn negated_row(&self, terms: &[(usize, f64)]) -> Row {
        let negated: Vec<(usize, f64)> = terms.iter().map(|&(v, c)| (v, -c)).collect();
        self.row(&negated, 0.0)
    }

    /// Solve the program with Clarabel.
    pub fn solve(&self, settings: &SolverSettings) -> Result<ConicSolution, SolveError> {
        let n_eq = self.eq_rows.len();
        let n_ineq = self.ineq_rows.len();
        let n_soc: usize = self.soc_blocks.iter().map(Vec::len).sum();
        let n_rows = n_eq + n_ineq + n_soc;

        // Stack rows in cone order: zero cone, nonnegative cone, SOC blocks.
        let mut b = Vec::with_capacity(n_rows);
        let mut cols: Vec<Vec<(usize, f64)>> = vec![Vec::new(); self.n_vars];
        let all_rows = self
            .eq_rows
            .iter()
            .chain(&self.ineq_rows)
            .chain(self.soc_blocks.iter().flatten());
        for (row_idx, row) in all_rows.enumerate() {
            b.push(row.rhs);
            for &(var, coeff) in &row.terms {
                cols[var].push((row_idx, coeff));
            }
        }

        // Rows were visited in increasing index order, so each column is
        // already sorted for CSC assembly.
        let mut colptr = Vec::with_capacity(self.n_vars + 1);
        let mut rowval = Vec::new();
        let mut nzval = Vec::new();
        colptr.push(0);
        for col in &cols {
            for &(row_idx, coeff) in col {
                rowval.push(row_idx);
                nzval.push(coeff);
            }
            colptr.push(rowval.len());
        }
        let a = CscMatrix::new(n_rows, self.n_vars, colptr, rowval, nzval);

        // No quadratic cost term; P is the zero matrix.
        let p = CscMatrix::new(
            self.n_vars,
            self.n_vars,
            vec![0; self.n_vars + 1],
            Vec::new(),
            Vec::new(),
        );

        let mut cones: Vec<SupportedConeT<f64>> = Vec::new();
        if n_eq > 0 {
            cones.push(SupportedConeT::ZeroConeT(n_eq));
        }
        if n_ineq > 0 {
            cones.push(SupportedConeT::NonnegativeConeT(n_ineq));
        }
        for block in &self.soc_blocks {
            cones.push(SupportedConeT::SecondOrderConeT(block.len()));
        }

        let clarabel_settings = DefaultSettingsBuilder::default()
            .verbose(settings.verbose)
            .max_iter(settings.max_iter)
            .time_limit(settings.time_limit)
            .tol_gap_abs(settings.tol_gap_abs)
            .tol_gap_rel(settings.tol_gap_rel)
            .build()
            .map_err(|e| SolveError::Backend(e.to_string()))?;

        let mut solver = DefaultSolver::new(&p, &self.cost, &a, &b, &cones, clarabel_settings);
        solver.solve();

        let status: SolveStatus = solver.solution.status.into();
        match status {
            SolveStatus::Optimal => {
                let x = solver.solution.x.clone();
                let objective = self.cost.iter().zip(&x).map(|(q, xi)| q * xi).sum();
                Ok(ConicSolution {
                    x,
                    objective,
                    iterations: solver.info.iterations,
                    solve_time: solver.solution.solve_time,
                })
            }
            SolveStatus::Infeasible => Err(SolveError::Infeasible),
            SolveStatus::Unbounded => Err(SolveError::Unbounded),
            _ => Err(SolveError::NotConverged { status }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_settings() {
        let settings = SolverSettings::default();
        assert!(!settings.verbose);
        assert_eq!(settings.max_iter, 200);
    }

    #[test]
    fn test_simple_lp() {
        // minimize x subject to x >= 1, i.e. -x <= -1.
        let mut prog = ConicProgram::new(1);
        prog.set_cost(0, 1.0);
        prog.add_ineq(&[(0, -1.0)], -1.0);

        let sol = prog.solve(&SolverSettings::default()).unwrap();
        assert_relative_eq!(sol.x[0], 1.0, epsilon = 1e-6);
        assert_relative_eq!(sol.objective, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_simplex_lp_picks_cheapest_vertex() {
        // minimize c'x over the simplex; the optimum sits on the smallest
        // cost coordinate.
        let mut prog = ConicProgram::new(3);
        prog.set_cost(0, 2.0);
        prog.set_cost(1, 1.0);
        prog.set_cost(2, 3.0);
        prog.add_eq(&[(0, 1.0), (1, 1.0), (2, 1.0)], 1.0);
        for var in 0..3 {
            prog.add_ineq(&[(var, -1.0)], 0.0);
        }

        let sol = prog.solve(&SolverSettings::default()).unwrap();
        assert_relative_eq!(sol.x[1], 1.0, epsilon = 1e-6);
        assert_relative_eq!(sol.objective, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_soc_norm_bound() {
        // minimize s subject to s >= ||(x0, x1)|| with x pinned at (3, 4).
        let mut prog = ConicProgram::new(3);
        prog.set_cost(2, 1.0);
        prog.add_eq(&[(0, 1.0)], 3.0);
        prog.add_eq(&[(1, 1.0)], 4.0);
        prog.add_soc(&[(2, 1.0)], &[vec![(0, 1.0)], vec![(1, 1.0)]]);

        let sol = prog.solve(&SolverSettings::default()).unwrap();
        assert_relative_eq!(sol.x[2], 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_infeasible_is_typed() {
        // x <= 0 and x >= 1 cannot hold together.
        let mut prog = ConicProgram::new(1);
        prog.add_ineq(&[(0, 1.0)], 0.0);
        prog.add_ineq(&[(0, -1.0)], -1.0);

        let err = prog.solve(&SolverSettings::default()).unwrap_err();
        assert!(matches!(err, SolveError::Infeasible));
    }

    #[test]
    fn test_unbounded_is_typed() {
        // minimize x with only x <= 0: unbounded below.
        let mut prog = ConicProgram::new(1);
        prog.set_cost(0, 1.0);
        prog.add_ineq(&[(0, 1.0)], 0.0);

        let err = prog.solve(&SolverSettings::default()).unwrap_err();
        assert!(matches!(err, SolveError::Unbounded));
    }
}
