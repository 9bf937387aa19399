//! Console summary of a run.
//!
//! Printing an M×M matrix is pointless past a few rows, so the summary keeps
//! two corners: the top of the first column and the tail of the last row.
//!
//! ```text
//! 11 18 13 ...
//!  .
//!  .
//!  .
//! 67 66 71
//! Generated matrix is a magic square.
//! ```

use core::fmt;

use heapless::Vec as HVec;

use crate::matrix::{Cell, SquareMatrix};
use crate::pipeline::Outcome;
use crate::verify::Verdict;

/// Number of cells sampled from each corner.
pub const SAMPLE: usize = 3;

/// Corner samples plus the verdict.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    /// Side length of the generated matrix.
    pub dim: usize,
    /// `m[0][0], m[1][0], m[2][0]` (fewer when `dim < 3`).
    pub head: HVec<Cell, SAMPLE>,
    /// The last `SAMPLE` cells of the last row (fewer when `dim < 3`).
    pub tail: HVec<Cell, SAMPLE>,
    /// Outcome of the check.
    pub verdict: Verdict,
}

impl Summary {
    /// Sample `matrix` and attach `verdict`.
    pub fn new(matrix: &SquareMatrix, verdict: Verdict) -> Self {
        let dim = matrix.dim();
        let take = dim.min(SAMPLE);

        let mut head = HVec::new();
        let mut tail = HVec::new();
        for r in 0..take {
            // Capacity is SAMPLE and take <= SAMPLE.
            let _ = head.push(matrix[(r, 0)]);
        }
        for &v in &matrix.row(dim - 1)[dim - take..] {
            let _ = tail.push(v);
        }
        Self {
            dim,
            head,
            tail,
            verdict,
        }
    }

    /// Summary of a pipeline outcome.
    pub fn from_outcome(outcome: &Outcome) -> Self {
        Self::new(&outcome.generated, outcome.verdict)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in &self.head {
            write!(f, "{v} ")?;
        }
        writeln!(f, "... ")?;
        writeln!(f, " . ")?;
        writeln!(f, " . ")?;
        writeln!(f, " . ")?;
        for v in &self.tail {
            write!(f, "{v} ")?;
        }
        writeln!(f)?;
        if self.verdict.is_magic() {
            write!(f, "Generated matrix is a magic square.")
        } else {
            write!(f, "Generated matrix is not a magic square.")
        }
    }
}
