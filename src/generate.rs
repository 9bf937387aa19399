/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! Scaler/Tiler: expand an N×N pattern and modifier into an M×M matrix, M = N².
//!
//! # Algorithm
//!
//! ```text
//! Step 1 (scale):   modifier[r][c] *= M                      for r, c < N
//! Step 2 (tile):    out[i][j] = pattern[i % N][j % N]
//!                             + modifier[i / N][j / N]        for i, j < M
//! ```
//!
//! The combination is additive. Each N×N tile of the output is a copy of the
//! pattern shifted by one scaled modifier value, so tile `(a, b)` occupies the
//! value band `M·modifier[a][b] + pattern`.
//!
//! # Ordering
//!
//! Step 1 finishes before Step 2 starts: every output cell reads a scaled
//! modifier value. Within either step cells are independent, and both are
//! dispatched through [`crate::exec::for_each_row_mut`].
//!
//! # Overflow
//!
//! Cell arithmetic is unchecked. Callers choose magnitudes so that
//! `|pattern| + M·|modifier|` fits in `i64`.

use crate::error::{MagicError, Result};
use crate::exec::{for_each_row_mut, Execution};
use crate::matrix::{Cell, SquareMatrix};

/// Side length of the expanded matrix for inputs of side `n`.
pub fn expanded_dim(n: usize) -> Result<usize> {
    if n == 0 {
        return Err(MagicError::ZeroDimension);
    }
    let m = n.checked_mul(n).ok_or(MagicError::DimensionTooLarge { dim: n })?;
    // The output buffer holds m² cells.
    m.checked_mul(m).ok_or(MagicError::DimensionTooLarge { dim: n })?;
    Ok(m)
}

/// Multiply every modifier cell by `factor`, in place.
pub fn scale_modifier(modifier: &mut SquareMatrix, factor: Cell, exec: Execution) {
    let n = modifier.dim();
    for_each_row_mut(modifier.as_mut_slice(), n, exec, |_, row| {
        for v in row.iter_mut() {
            *v *= factor;
        }
    });
}

/// Value of output cell `(i, j)` given an already-scaled modifier.
///
/// This is the whole of Step 2 for one cell; [`tile`] evaluates it for every
/// cell of the output.
#[inline]
pub fn tile_cell(pattern: &SquareMatrix, scaled_modifier: &SquareMatrix, i: usize, j: usize) -> Cell {
    let n = pattern.dim();
    pattern[(i % n, j % n)] + scaled_modifier[(i / n, j / n)]
}

/// Step 2 alone: build the M×M matrix from a pattern and an already-scaled modifier.
pub fn tile(pattern: &SquareMatrix, scaled_modifier: &SquareMatrix, exec: Execution) -> Result<SquareMatrix> {
    check_dims(pattern, scaled_modifier)?;
    let n = pattern.dim();
    let m = expanded_dim(n)?;
    let mut out = SquareMatrix::zeros(m)?;

    for_each_row_mut(out.as_mut_slice(), m, exec, |i, row| {
        let pattern_row = pattern.row(i % n);
        let modifier_row = scaled_modifier.row(i / n);
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = pattern_row[j % n] + modifier_row[j / n];
        }
    });
    Ok(out)
}

/// Full generation: scale `modifier` in place by M, then tile.
///
/// After this returns, `modifier` holds the scaled values. Calling it twice on
/// the same modifier scales twice.
pub fn generate(pattern: &SquareMatrix, modifier: &mut SquareMatrix, exec: Execution) -> Result<SquareMatrix> {
    check_dims(pattern, modifier)?;
    let n = pattern.dim();
    let m = expanded_dim(n)?;

    scale_modifier(modifier, m as Cell, exec);
    log::debug!("scaled {n}x{n} modifier by {m}");

    let out = tile(pattern, modifier, exec)?;
    log::debug!("tiled {m}x{m} matrix ({:?})", exec.effective());
    Ok(out)
}

fn check_dims(pattern: &SquareMatrix, modifier: &SquareMatrix) -> Result<()> {
    if pattern.dim() != modifier.dim() {
        return Err(MagicError::DimensionMismatch {
            pattern: pattern.dim(),
            modifier: modifier.dim(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[Cell]]) -> SquareMatrix {
        SquareMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn expanded_dim_is_n_squared() {
        assert_eq!(expanded_dim(1).unwrap(), 1);
        assert_eq!(expanded_dim(3).unwrap(), 9);
        assert!(matches!(expanded_dim(0), Err(MagicError::ZeroDimension)));
        assert!(matches!(
            expanded_dim(usize::MAX),
            Err(MagicError::DimensionTooLarge { .. })
        ));
    }

    #[test]
    fn single_cell_adds_scaled_modifier() {
        let pattern = m(&[&[5]]);
        let mut modifier = m(&[&[2]]);
        let out = generate(&pattern, &mut modifier, Execution::Sequential).unwrap();
        assert_eq!(out.to_rows(), vec![vec![7]]);
    }

    #[test]
    fn modifier_is_scaled_in_place() {
        let pattern = m(&[&[0, 0], &[0, 0]]);
        let mut modifier = m(&[&[1, 2], &[3, 4]]);
        generate(&pattern, &mut modifier, Execution::Sequential).unwrap();
        assert_eq!(modifier.as_slice(), &[4, 8, 12, 16]);
    }

    #[test]
    fn two_by_two_layout() {
        let pattern = m(&[&[1, 2], &[3, 4]]);
        let mut modifier = m(&[&[0, 1], &[2, 3]]);
        let out = generate(&pattern, &mut modifier, Execution::Sequential).unwrap();
        assert_eq!(
            out.to_rows(),
            vec![
                vec![1, 2, 5, 6],
                vec![3, 4, 7, 8],
                vec![9, 10, 13, 14],
                vec![11, 12, 15, 16],
            ]
        );
    }

    #[test]
    fn combination_is_additive_not_multiplicative() {
        let pattern = m(&[&[2, 2], &[2, 2]]);
        let mut modifier = m(&[&[3, 3], &[3, 3]]);
        let out = generate(&pattern, &mut modifier, Execution::Sequential).unwrap();
        // 2 + 3·4, not 2·3·4.
        assert!(out.as_slice().iter().all(|&v| v == 14));
    }

    #[test]
    fn tile_cell_matches_tile() {
        let pattern = m(&[&[8, 1, 6], &[3, 5, 7], &[4, 9, 2]]);
        let mut modifier = m(&[&[0, 1, 2], &[3, 4, 5], &[6, 7, 8]]);
        scale_modifier(&mut modifier, 9, Execution::Sequential);
        let out = tile(&pattern, &modifier, Execution::Sequential).unwrap();
        for i in 0..9 {
            for j in 0..9 {
                assert_eq!(out[(i, j)], tile_cell(&pattern, &modifier, i, j));
            }
        }
    }

    #[test]
    fn mismatched_dimensions_are_rejected() {
        let pattern = m(&[&[1, 2], &[3, 4]]);
        let mut modifier = m(&[&[1]]);
        match generate(&pattern, &mut modifier, Execution::Sequential) {
            Err(MagicError::DimensionMismatch { pattern, modifier }) => {
                assert_eq!((pattern, modifier), (2, 1));
            }
            other => panic!("expected DimensionMismatch, got {other:?}"),
        }
        // Rejected before scaling.
        assert_eq!(modifier.as_slice(), &[1]);
    }

    #[test]
    fn parallel_request_matches_sequential() {
        let pattern = m(&[&[8, 1, 6], &[3, 5, 7], &[4, 9, 2]]);
        let base = m(&[&[2, 7, 6], &[9, 5, 1], &[4, 3, 8]]);
        let mut a = base.clone();
        let mut b = base;
        let seq = generate(&pattern, &mut a, Execution::Sequential).unwrap();
        let par = generate(&pattern, &mut b, Execution::Parallel).unwrap();
        assert_eq!(seq, par);
        assert_eq!(a, b);
    }
}
