/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! Magic-square orchestrator.
//!
//! A matrix is a magic square when, in this order:
//!
//! 1. all row sums are equal,
//! 2. all column sums are equal,
//! 3. the main diagonal sums to `row_sum[0]`,
//! 4. the anti-diagonal sums to `row_sum[0]`,
//! 5. all cells are pairwise distinct.
//!
//! Evaluation stops at the first failed condition and the [`Verdict`] names it.

use core::fmt;

use crate::aggregate::{check_aggregates, AggregateFailure};
use crate::distinct::{DistinctStrategy, DistinctnessChecker, DEFAULT_DENSE_SPAN_LIMIT};
use crate::exec::Execution;
use crate::matrix::{Cell, SquareMatrix};

/// Outcome of a magic-square check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "verdict", rename_all = "snake_case"))]
pub enum Verdict {
    /// Every condition holds.
    Magic {
        /// The common row, column and diagonal sum.
        magic_sum: Cell,
    },
    /// Two rows differ in sum.
    UnequalRowSums,
    /// Two columns differ in sum.
    UnequalColumnSums,
    /// The main diagonal does not match the row sum.
    MainDiagonalMismatch {
        /// `row_sum[0]`.
        expected: Cell,
        /// Main diagonal sum.
        actual: Cell,
    },
    /// The anti-diagonal does not match the row sum.
    AntiDiagonalMismatch {
        /// `row_sum[0]`.
        expected: Cell,
        /// Anti-diagonal sum.
        actual: Cell,
    },
    /// Sums all match but some value repeats.
    DuplicateValues {
        /// The common sum the matrix would otherwise have.
        magic_sum: Cell,
    },
}

impl Verdict {
    /// `true` only for [`Verdict::Magic`].
    #[inline]
    pub fn is_magic(&self) -> bool {
        matches!(self, Self::Magic { .. })
    }
}

impl From<AggregateFailure> for Verdict {
    fn from(f: AggregateFailure) -> Self {
        match f {
            AggregateFailure::UnequalRowSums => Self::UnequalRowSums,
            AggregateFailure::UnequalColumnSums => Self::UnequalColumnSums,
            AggregateFailure::MainDiagonal { expected, actual } => {
                Self::MainDiagonalMismatch { expected, actual }
            }
            AggregateFailure::AntiDiagonal { expected, actual } => {
                Self::AntiDiagonalMismatch { expected, actual }
            }
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Magic { magic_sum } => write!(f, "magic square (sum {magic_sum})"),
            Self::UnequalRowSums => f.write_str("row sums differ"),
            Self::UnequalColumnSums => f.write_str("column sums differ"),
            Self::MainDiagonalMismatch { expected, actual } => {
                write!(f, "main diagonal sums to {actual}, rows to {expected}")
            }
            Self::AntiDiagonalMismatch { expected, actual } => {
                write!(f, "anti-diagonal sums to {actual}, rows to {expected}")
            }
            Self::DuplicateValues { magic_sum } => {
                write!(f, "sums all equal {magic_sum} but values repeat")
            }
        }
    }
}

/// Runs the aggregate checks and then the distinctness check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MagicSquareChecker {
    /// Scheduling for both the sum passes and the distinctness pass.
    pub execution: Execution,
    /// Distinctness algorithm.
    pub distinct: DistinctStrategy,
    /// Span limit forwarded to [`DistinctStrategy::Dense`].
    pub dense_span_limit: u64,
}

impl Default for MagicSquareChecker {
    fn default() -> Self {
        Self {
            execution: Execution::default(),
            distinct: DistinctStrategy::default(),
            dense_span_limit: DEFAULT_DENSE_SPAN_LIMIT,
        }
    }
}

impl MagicSquareChecker {
    /// Checker with the given execution and default distinctness settings.
    pub fn new(execution: Execution) -> Self {
        Self {
            execution,
            ..Self::default()
        }
    }

    /// Builder-style override of the distinctness strategy.
    pub fn with_distinct(mut self, distinct: DistinctStrategy) -> Self {
        self.distinct = distinct;
        self
    }

    /// Classify `matrix`.
    pub fn check(&self, matrix: &SquareMatrix) -> Verdict {
        let magic_sum = match check_aggregates(matrix, self.execution) {
            Ok(sum) => sum,
            Err(failure) => return failure.into(),
        };
        let distinct = DistinctnessChecker {
            strategy: self.distinct,
            execution: self.execution,
            dense_span_limit: self.dense_span_limit,
        };
        if distinct.is_distinct(matrix) {
            Verdict::Magic { magic_sum }
        } else {
            Verdict::DuplicateValues { magic_sum }
        }
    }

    /// `true` iff `matrix` is a magic square.
    pub fn is_magic_square(&self, matrix: &SquareMatrix) -> bool {
        self.check(matrix).is_magic()
    }
}

/// Sequential, hashed-distinctness magic-square check.
pub fn is_magic_square(matrix: &SquareMatrix) -> bool {
    MagicSquareChecker::default().is_magic_square(matrix)
}
