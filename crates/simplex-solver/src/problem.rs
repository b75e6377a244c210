use thiserror::Error;

/// A linear program in canonical form:
///
/// maximize   c x
/// subject to A x <= b
///            x >= 0
///
/// with `b >= 0`, so the all-slack basis is a feasible starting point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LpProblem {
    /// Constraint matrix, one row per constraint
    pub a: Vec<Vec<f64>>,
    /// Right-hand side of each constraint
    pub b: Vec<f64>,
    /// Objective coefficients (maximized)
    pub c: Vec<f64>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProblemError {
    #[error("Problem has no constraints or no variables")]
    Empty,
    #[error("Constraint row {row} has {found} coefficients, expected {expected}")]
    RowLength { row: usize, expected: usize, found: usize },
    #[error("Right-hand side has {found} entries, expected {expected}")]
    RhsLength { expected: usize, found: usize },
    #[error("Right-hand side of row {row} is negative ({value}); the all-slack basis is infeasible")]
    NegativeRhs { row: usize, value: f64 },
    #[error("Non-finite value in {what}")]
    NonFinite { what: String },
}

/// A constraint or bound broken by a candidate solution
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Violation {
    /// Row `row` of `A x <= b` does not hold
    Constraint(ConstraintViolation),
    /// Variable `index` is below its lower bound of zero
    NegativeValue { index: usize, value: f64 },
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintViolation {
    /// Constraint row
    pub row: usize,
    /// Right-hand side of the row
    pub limit: f64,
    /// Left-hand side evaluated at the candidate
    pub actual: f64,
    /// How far the left-hand side exceeds the limit
    pub amount: f64,
}

impl Violation {
    pub fn amount(&self) -> f64 {
        match self {
            Violation::Constraint(c) => c.amount,
            Violation::NegativeValue { value, .. } => -value,
        }
    }
}

impl LpProblem {
    pub fn new(a: Vec<Vec<f64>>, b: Vec<f64>, c: Vec<f64>) -> Self {
        Self { a, b, c }
    }

    /// Number of constraints (`m`)
    pub fn num_constraints(&self) -> usize {
        self.b.len()
    }

    /// Number of decision variables (`n`)
    pub fn num_variables(&self) -> usize {
        self.c.len()
    }

    /// Check that the dimensions of `A`, `b` and `c` agree and that the
    /// starting basis is feasible.
    pub fn validate(&self) -> Result<(), ProblemError> {
        let m = self.num_constraints();
        let n = self.num_variables();

        if self.a.len() != m {
            return Err(ProblemError::RhsLength {
                expected: self.a.len(),
                found: m,
            });
        }
        if m == 0 || n == 0 {
            return Err(ProblemError::Empty);
        }

        for (i, row) in self.a.iter().enumerate() {
            if row.len() != n {
                return Err(ProblemError::RowLength {
                    row: i,
                    expected: n,
                    found: row.len(),
                });
            }
            if row.iter().any(|v| !v.is_finite()) {
                return Err(ProblemError::NonFinite {
                    what: format!("constraint row {}", i),
                });
            }
        }

        if self.c.iter().any(|v| !v.is_finite()) {
            return Err(ProblemError::NonFinite {
                what: "objective coefficients".to_string(),
            });
        }

        for (i, &value) in self.b.iter().enumerate() {
            if !value.is_finite() {
                return Err(ProblemError::NonFinite {
                    what: format!("right-hand side of row {}", i),
                });
            }
            if value < 0.0 {
                return Err(ProblemError::NegativeRhs { row: i, value });
            }
        }

        Ok(())
    }

    /// Evaluate `c x`
    pub fn objective_at(&self, x: &[f64]) -> f64 {
        self.c.iter().zip(x).map(|(c, x)| c * x).sum()
    }

    /// Find which constraints and bounds `x` breaks, worst first.
    ///
    /// An empty result certifies `A x <= b` and `x >= 0` within `tolerance`.
    pub fn violations(&self, x: &[f64], tolerance: f64) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (i, row) in self.a.iter().enumerate() {
            let lhs: f64 = row.iter().zip(x).map(|(a, x)| a * x).sum();
            let limit = self.b[i];
            if lhs > limit + tolerance {
                violations.push(Violation::Constraint(ConstraintViolation {
                    row: i,
                    limit,
                    actual: lhs,
                    amount: lhs - limit,
                }));
            }
        }

        for (j, &value) in x.iter().enumerate() {
            if value < -tolerance {
                violations.push(Violation::NegativeValue { index: j, value });
            }
        }

        violations.sort_by(|a, b| {
            b.amount()
                .partial_cmp(&a.amount())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LpProblem {
        LpProblem::new(
            vec![vec![1.0, 0.0], vec![0.0, 2.0], vec![3.0, 2.0]],
            vec![4.0, 12.0, 18.0],
            vec![3.0, 5.0],
        )
    }

    #[test]
    fn test_validate_accepts_canonical_form() {
        let problem = sample();
        assert_eq!(problem.num_constraints(), 3);
        assert_eq!(problem.num_variables(), 2);
        assert!(problem.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_row() {
        let mut problem = sample();
        problem.a[1] = vec![1.0];
        assert_eq!(
            problem.validate(),
            Err(ProblemError::RowLength { row: 1, expected: 2, found: 1 })
        );
    }

    #[test]
    fn test_validate_rejects_rhs_length_mismatch() {
        let mut problem = sample();
        problem.b.pop();
        assert_eq!(
            problem.validate(),
            Err(ProblemError::RhsLength { expected: 3, found: 2 })
        );
    }

    #[test]
    fn test_validate_reports_missing_rhs_before_empty() {
        let problem = LpProblem::new(vec![vec![1.0]], Vec::new(), vec![1.0]);
        assert_eq!(
            problem.validate(),
            Err(ProblemError::RhsLength { expected: 1, found: 0 })
        );
    }

    #[test]
    fn test_validate_rejects_negative_rhs() {
        let mut problem = sample();
        problem.b[2] = -1.0;
        assert_eq!(
            problem.validate(),
            Err(ProblemError::NegativeRhs { row: 2, value: -1.0 })
        );
    }

    #[test]
    fn test_validate_rejects_empty_and_non_finite() {
        let empty = LpProblem::new(Vec::new(), Vec::new(), vec![1.0]);
        assert_eq!(empty.validate(), Err(ProblemError::Empty));

        let mut problem = sample();
        problem.c[0] = f64::NAN;
        assert!(matches!(problem.validate(), Err(ProblemError::NonFinite { .. })));
    }

    #[test]
    fn test_violations_sorted_worst_first() {
        let problem = sample();
        assert!(problem.violations(&[2.0, 6.0], 1e-9).is_empty());

        // 3*4 + 2*7 = 26 breaks row 2 by 8, 2*7 = 14 breaks row 1 by 2
        let violations = problem.violations(&[4.0, 7.0], 1e-9);
        assert_eq!(violations.len(), 2);
        match &violations[0] {
            Violation::Constraint(c) => {
                assert_eq!(c.row, 2);
                assert!((c.amount - 8.0).abs() < 1e-9);
            }
            other => panic!("unexpected violation {:?}", other),
        }

        let negative = problem.violations(&[-1.0, 0.0], 1e-9);
        assert_eq!(negative, vec![Violation::NegativeValue { index: 0, value: -1.0 }]);
    }
}
