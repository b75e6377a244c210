use crate::problem::Violation;

/// The result of solving an LP problem
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Solution status
    pub status: SolutionStatus,
    /// Value of each decision variable (empty when unbounded)
    pub values: Vec<f64>,
    /// Objective value `c x` (absent when no finite value exists)
    pub objective_value: Option<f64>,
    /// Number of pivots performed
    pub iterations: usize,
    /// Constraints and bounds the returned values break, worst first
    pub violations: Vec<Violation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolutionStatus {
    /// An optimal solution was found
    Optimal,
    /// The objective can grow without limit
    Unbounded,
    /// The iteration cap was hit before reaching optimality
    IterationLimit,
    /// Solver encountered an error
    Error,
}

impl Solution {
    pub fn optimal(values: Vec<f64>, objective_value: f64, iterations: usize) -> Self {
        Self {
            status: SolutionStatus::Optimal,
            values,
            objective_value: Some(objective_value),
            iterations,
            violations: Vec::new(),
        }
    }

    /// An optimal basis whose values fail the constraint check
    pub fn optimal_with_violations(
        values: Vec<f64>,
        objective_value: f64,
        iterations: usize,
        violations: Vec<Violation>,
    ) -> Self {
        Self {
            violations,
            ..Self::optimal(values, objective_value, iterations)
        }
    }

    pub fn unbounded(iterations: usize) -> Self {
        Self {
            status: SolutionStatus::Unbounded,
            values: Vec::new(),
            objective_value: None,
            iterations,
            violations: Vec::new(),
        }
    }

    /// The last basic feasible solution reached before giving up
    pub fn iteration_limit(values: Vec<f64>, objective_value: f64, iterations: usize) -> Self {
        Self {
            status: SolutionStatus::IterationLimit,
            values,
            objective_value: Some(objective_value),
            iterations,
            violations: Vec::new(),
        }
    }

    pub fn error(iterations: usize) -> Self {
        Self {
            status: SolutionStatus::Error,
            values: Vec::new(),
            objective_value: None,
            iterations,
            violations: Vec::new(),
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }

    /// Optimal and satisfying every constraint within the solver tolerance
    pub fn is_certified(&self) -> bool {
        self.is_optimal() && self.violations.is_empty()
    }
}

impl std::fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolutionStatus::Optimal => write!(f, "OPTIMAL"),
            SolutionStatus::Unbounded => write!(f, "UNBOUNDED"),
            SolutionStatus::IterationLimit => write!(f, "ITERATION LIMIT"),
            SolutionStatus::Error => write!(f, "ERROR"),
        }
    }
}
