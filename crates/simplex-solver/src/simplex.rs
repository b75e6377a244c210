use log::{debug, trace};

use crate::problem::{LpProblem, ProblemError};
use crate::solution::Solution;
use crate::tableau::{PivotError, Tableau};

/// Simplex solver for problems in canonical form
#[derive(Debug, Clone)]
pub struct Solver {
    /// Maximum pivots before giving up
    max_iterations: usize,
    /// Tolerance used when checking the returned solution against the constraints
    tolerance: f64,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            max_iterations: 10000,
            tolerance: 1e-9,
        }
    }
}

/// How the pivot loop ended
#[derive(Debug, Clone, PartialEq)]
pub enum SimplexResult {
    Optimal,
    /// Entering column with no eligible leaving row
    Unbounded { column: usize },
    IterationLimit,
    /// The selected pivot could not be applied
    Error(PivotError),
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Solve the LP problem starting from the all-slack basis
    pub fn solve(&self, problem: &LpProblem) -> Result<Solution, ProblemError> {
        self.solve_with_tableau(problem).map(|(solution, _)| solution)
    }

    /// Like [`Solver::solve`], also handing back the final tableau
    pub fn solve_with_tableau(&self, problem: &LpProblem) -> Result<(Solution, Tableau), ProblemError> {
        let mut tableau = Tableau::new(problem)?;
        let result = self.run(&mut tableau);
        let solution = self.extract_solution(&tableau, result, problem);
        Ok((solution, tableau))
    }

    /// Pivot until no column improves the objective, the problem proves
    /// unbounded, or the iteration cap is reached.
    pub fn run(&self, tableau: &mut Tableau) -> SimplexResult {
        trace!("initial tableau:\n{}", tableau);

        while tableau.can_improve() {
            if tableau.iterations() >= self.max_iterations {
                debug!(
                    "iteration limit of {} reached, objective {}",
                    self.max_iterations,
                    tableau.objective_value()
                );
                return SimplexResult::IterationLimit;
            }

            // can_improve and entering_column share the `< 0.0` test
            let Some(col) = tableau.entering_column() else {
                break;
            };
            let Some(row) = tableau.leaving_row(Some(col)) else {
                debug!("column {} has no positive entry, problem is unbounded", col);
                return SimplexResult::Unbounded { column: col };
            };

            // Basic columns stay unit vectors, so a selected pivot is never basic or zero
            if let Err(e) = tableau.pivot(row, col) {
                debug!("pivot failed: {}", e);
                return SimplexResult::Error(e);
            }

            debug!(
                "iteration {}: x[{}] enters at row {}, objective {}",
                tableau.iterations(),
                col,
                row,
                tableau.objective_value()
            );
        }

        SimplexResult::Optimal
    }

    fn extract_solution(&self, tableau: &Tableau, result: SimplexResult, problem: &LpProblem) -> Solution {
        let iterations = tableau.iterations();
        match result {
            SimplexResult::Unbounded { .. } => Solution::unbounded(iterations),
            SimplexResult::Error(_) => Solution::error(iterations),
            SimplexResult::IterationLimit => {
                Solution::iteration_limit(tableau.primal_solution(), tableau.objective_value(), iterations)
            }
            SimplexResult::Optimal => {
                let values = tableau.primal_solution();
                let violations = problem.violations(&values, self.tolerance);
                if violations.is_empty() {
                    return Solution::optimal(values, tableau.objective_value(), iterations);
                }
                debug!("optimal basis violates constraints: {:?}", violations);
                Solution::optimal_with_violations(values, tableau.objective_value(), iterations, violations)
            }
        }
    }
}
