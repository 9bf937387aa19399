/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! Aggregate checker: row, column and diagonal sums.
//!
//! # Check order
//!
//! [`check_aggregates`] evaluates lazily and stops at the first failure:
//!
//! 1. all row sums equal
//! 2. all column sums equal
//! 3. main diagonal sum == `row_sum[0]`
//! 4. anti-diagonal sum == `row_sum[0]`
//!
//! Column sums are never compared against the common row sum. For a square
//! matrix this comparison is implied: `M` equal row sums `r` and `M` equal
//! column sums `c` both total the matrix, so `M·r = M·c` and `r = c`.

use alloc::vec::Vec;

use crate::exec::{map_indices, Execution};
use crate::matrix::{Cell, SquareMatrix};

/// `true` if every value equals the first. Vacuously `true` for an empty slice.
pub fn all_equal(values: &[Cell]) -> bool {
    match values.split_first() {
        Some((first, rest)) => rest.iter().all(|v| v == first),
        None => true,
    }
}

/// Sum of each row, top to bottom.
pub fn row_sums(matrix: &SquareMatrix, exec: Execution) -> Vec<Cell> {
    map_indices(matrix.dim(), exec, |r| matrix.row(r).iter().sum())
}

/// Sum of each column, left to right.
pub fn column_sums(matrix: &SquareMatrix, exec: Execution) -> Vec<Cell> {
    let dim = matrix.dim();
    map_indices(dim, exec, |c| {
        matrix.as_slice().iter().skip(c).step_by(dim).sum()
    })
}

/// Σ `m[k][k]`.
pub fn main_diagonal_sum(matrix: &SquareMatrix) -> Cell {
    (0..matrix.dim()).map(|k| matrix[(k, k)]).sum()
}

/// Σ `m[k][dim-1-k]`.
pub fn anti_diagonal_sum(matrix: &SquareMatrix) -> Cell {
    let last = matrix.dim() - 1;
    (0..matrix.dim()).map(|k| matrix[(k, last - k)]).sum()
}

/// Why the aggregate check rejected a matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AggregateFailure {
    /// At least two rows have different sums.
    UnequalRowSums,
    /// At least two columns have different sums.
    UnequalColumnSums,
    /// The main diagonal does not sum to `row_sum[0]`.
    MainDiagonal {
        /// `row_sum[0]`.
        expected: Cell,
        /// Σ `m[k][k]`.
        actual: Cell,
    },
    /// The anti-diagonal does not sum to `row_sum[0]`.
    AntiDiagonal {
        /// `row_sum[0]`.
        expected: Cell,
        /// Σ `m[k][dim-1-k]`.
        actual: Cell,
    },
}

/// Run the four sum checks in order, stopping at the first failure.
///
/// On success returns the common sum.
pub fn check_aggregates(matrix: &SquareMatrix, exec: Execution) -> Result<Cell, AggregateFailure> {
    let rows = row_sums(matrix, exec);
    if !all_equal(&rows) {
        log::trace!("row sums differ");
        return Err(AggregateFailure::UnequalRowSums);
    }
    let expected = rows[0];

    let cols = column_sums(matrix, exec);
    if !all_equal(&cols) {
        log::trace!("column sums differ (row sum {expected})");
        return Err(AggregateFailure::UnequalColumnSums);
    }

    let actual = main_diagonal_sum(matrix);
    if actual != expected {
        return Err(AggregateFailure::MainDiagonal { expected, actual });
    }

    let actual = anti_diagonal_sum(matrix);
    if actual != expected {
        return Err(AggregateFailure::AntiDiagonal { expected, actual });
    }

    log::trace!("all sums equal {expected}");
    Ok(expected)
}

/// Every aggregate of a matrix, computed eagerly. Used for reporting.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregateSums {
    /// Per-row sums.
    pub rows: Vec<Cell>,
    /// Per-column sums.
    pub columns: Vec<Cell>,
    /// Main diagonal sum.
    pub main_diagonal: Cell,
    /// Anti-diagonal sum.
    pub anti_diagonal: Cell,
}

impl AggregateSums {
    /// Compute all four aggregates.
    pub fn compute(matrix: &SquareMatrix, exec: Execution) -> Self {
        Self {
            rows: row_sums(matrix, exec),
            columns: column_sums(matrix, exec),
            main_diagonal: main_diagonal_sum(matrix),
            anti_diagonal: anti_diagonal_sum(matrix),
        }
    }

    /// Same acceptance rule as [`check_aggregates`], applied to precomputed sums.
    ///
    /// With no rows there is nothing to compare, so the sums count as balanced.
    pub fn is_balanced(&self) -> bool {
        let Some(&expected) = self.rows.first() else {
            return true;
        };
        all_equal(&self.rows)
            && all_equal(&self.columns)
            && self.main_diagonal == expected
            && self.anti_diagonal == expected
    }
}
