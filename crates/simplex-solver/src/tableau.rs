use std::fmt;

use log::trace;
use thiserror::Error;

use crate::problem::{LpProblem, ProblemError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PivotError {
    #[error("Pivot row {row} is out of range (tableau has {rows} constraint rows)")]
    RowOutOfRange { row: usize, rows: usize },
    #[error("Pivot column {column} is out of range (tableau has {columns} variable columns)")]
    ColumnOutOfRange { column: usize, columns: usize },
    #[error("Column {column} is already basic in row {row}")]
    AlreadyBasic { row: usize, column: usize },
    #[error("Pivot element at ({row}, {column}) is {value}")]
    ZeroPivot { row: usize, column: usize, value: f64 },
}

/// Dense simplex tableau for `max c x, A x <= b, x >= 0`.
///
/// Layout, with `m` constraints and `n` decision variables:
///
/// ```text
///            0..n        n..n+m      n+m
/// 0..m    |   A    |  identity  |    b    |
/// m       |  -c    |     0      |    z    |
/// ```
///
/// A negative entry in the objective row marks a column whose entry into
/// the basis increases `z`.
#[derive(Debug, Clone)]
pub struct Tableau {
    data: Vec<Vec<f64>>,
    /// basis[i] = column of the variable basic in row i
    basis: Vec<usize>,
    n_vars: usize,
    n_constraints: usize,
    iterations: usize,
}

impl Tableau {
    /// Build the initial tableau with every slack variable basic
    pub fn new(problem: &LpProblem) -> Result<Self, ProblemError> {
        problem.validate()?;

        let n_vars = problem.num_variables();
        let n_constraints = problem.num_constraints();
        let total_cols = n_vars + n_constraints + 1;
        let rhs_col = total_cols - 1;

        let mut data = vec![vec![0.0; total_cols]; n_constraints + 1];

        for (i, row) in problem.a.iter().enumerate() {
            data[i][..n_vars].copy_from_slice(row);
            data[i][n_vars + i] = 1.0;
            data[i][rhs_col] = problem.b[i];
        }

        for (j, &coef) in problem.c.iter().enumerate() {
            data[n_constraints][j] = -coef;
        }

        Ok(Self {
            data,
            basis: (n_vars..n_vars + n_constraints).collect(),
            n_vars,
            n_constraints,
            iterations: 0,
        })
    }

    pub fn num_variables(&self) -> usize {
        self.n_vars
    }

    pub fn num_constraints(&self) -> usize {
        self.n_constraints
    }

    fn rhs_col(&self) -> usize {
        self.n_vars + self.n_constraints
    }

    fn objective_row(&self) -> &[f64] {
        &self.data[self.n_constraints][..self.rhs_col()]
    }

    /// Whether some column still improves the objective.
    ///
    /// Stops at the first negative entry; the entering rule makes its own
    /// full pass.
    pub fn can_improve(&self) -> bool {
        self.objective_row().iter().any(|&v| v < 0.0)
    }

    pub fn is_optimal(&self) -> bool {
        !self.can_improve()
    }

    /// Column with the most negative objective entry (largest magnitude).
    /// Ties keep the lowest index.
    pub fn entering_column(&self) -> Option<usize> {
        let mut max_val = 0.0;
        let mut max_col = None;

        for (j, &v) in self.objective_row().iter().enumerate() {
            if v < 0.0 && v.abs() > max_val {
                max_val = v.abs();
                max_col = Some(j);
            }
        }

        max_col
    }

    /// Minimum-ratio test on column `col`. Only strictly positive entries
    /// qualify and the first row seen wins a tie.
    ///
    /// `None` for a given column means the problem is unbounded along it.
    pub fn leaving_row(&self, col: Option<usize>) -> Option<usize> {
        let col = col?;
        let rhs_col = self.rhs_col();
        if col >= rhs_col {
            return None;
        }

        let mut min_ratio = f64::INFINITY;
        let mut min_row = None;

        for i in 0..self.n_constraints {
            let val = self.data[i][col];
            if val > 0.0 {
                let ratio = self.data[i][rhs_col] / val;
                if min_row.is_none() || ratio < min_ratio {
                    min_ratio = ratio;
                    min_row = Some(i);
                }
            }
        }

        min_row
    }

    /// Gauss-Jordan elimination on `(row, col)`, objective row included.
    ///
    /// On error the tableau is left untouched.
    pub fn pivot(&mut self, row: usize, col: usize) -> Result<(), PivotError> {
        if row >= self.n_constraints {
            return Err(PivotError::RowOutOfRange {
                row,
                rows: self.n_constraints,
            });
        }
        if col >= self.rhs_col() {
            return Err(PivotError::ColumnOutOfRange {
                column: col,
                columns: self.rhs_col(),
            });
        }
        if self.basis[row] == col {
            return Err(PivotError::AlreadyBasic { row, column: col });
        }

        let pivot_val = self.data[row][col];
        if pivot_val == 0.0 || !pivot_val.is_finite() {
            return Err(PivotError::ZeroPivot {
                row,
                column: col,
                value: pivot_val,
            });
        }

        for v in self.data[row].iter_mut() {
            *v /= pivot_val;
        }

        let pivot_row = self.data[row].clone();
        for (i, current) in self.data.iter_mut().enumerate() {
            if i == row {
                continue;
            }
            let factor = current[col];
            if factor == 0.0 {
                continue;
            }
            for (v, p) in current.iter_mut().zip(&pivot_row) {
                *v -= factor * p;
            }
        }

        self.basis[row] = col;
        self.iterations += 1;
        trace!("tableau after pivot ({}, {}):\n{}", row, col, self);

        Ok(())
    }

    /// Current value of `c x`
    pub fn objective_value(&self) -> f64 {
        self.data[self.n_constraints][self.rhs_col()]
    }

    /// Decision variable values of the current basic solution
    pub fn primal_solution(&self) -> Vec<f64> {
        let rhs_col = self.rhs_col();
        let mut values = vec![0.0; self.n_vars];
        for (i, &basic) in self.basis.iter().enumerate() {
            if basic < self.n_vars {
                values[basic] = self.data[i][rhs_col];
            }
        }
        values
    }

    /// Number of pivots applied so far
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn basis(&self) -> &[usize] {
        &self.basis
    }

    /// Right-hand side of each constraint row
    pub fn rhs(&self) -> Vec<f64> {
        let rhs_col = self.rhs_col();
        self.data[..self.n_constraints]
            .iter()
            .map(|row| row[rhs_col])
            .collect()
    }
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "m = {}, n = {}", self.n_constraints, self.n_vars)?;

        write!(f, "{:8}", "")?;
        for j in 0..self.rhs_col() {
            write!(f, " {:>9}", format!("x[{}]", j))?;
        }
        writeln!(f, " {:>9}", "b")?;

        for (i, row) in self.data.iter().enumerate() {
            let label = if i < self.n_constraints {
                format!("x[{}]", self.basis[i])
            } else {
                "z".to_string()
            };
            write!(f, "{:>6} =", label)?;
            for v in row {
                write!(f, " {:>9.2}", v)?;
            }
            if i < self.n_constraints {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}
