mod problem;
mod simplex;
mod solution;
mod tableau;

pub use problem::{ConstraintViolation, LpProblem, ProblemError, Violation};
pub use simplex::{SimplexResult, Solver};
pub use solution::{Solution, SolutionStatus};
pub use tableau::{PivotError, Tableau};
