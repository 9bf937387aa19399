//! Square, row-major integer matrix.
//!
//! [`SquareMatrix`] is the only container the crate works with: the small
//! pattern and modifier inputs, and the expanded output, are all instances of
//! it. The side length is fixed at construction and is always at least 1.
//!
//! Storage is one contiguous `Vec<i64>` so that whole rows can be handed to
//! workers as disjoint `&mut [i64]` slices.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::error::{MagicError, Result};

/// Element type of every matrix in the crate.
pub type Cell = i64;

/// A square matrix of [`Cell`] values stored row-major.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>"))]
pub struct SquareMatrix {
    dim: usize,
    data: Vec<Cell>,
}

impl SquareMatrix {
    /// Zero-filled `dim × dim` matrix.
    pub fn zeros(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(MagicError::ZeroDimension);
        }
        let len = dim
            .checked_mul(dim)
            .ok_or(MagicError::DimensionTooLarge { dim })?;
        Ok(Self {
            dim,
            data: vec![0; len],
        })
    }

    /// Build from nested rows. Every row must be as long as the number of rows.
    pub fn from_rows<R: AsRef<[Cell]>>(rows: &[R]) -> Result<Self> {
        let dim = rows.len();
        if dim == 0 {
            return Err(MagicError::ZeroDimension);
        }
        let mut data = Vec::with_capacity(dim * dim);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != dim {
                return Err(MagicError::RaggedRow {
                    row,
                    expected: dim,
                    actual: values.len(),
                });
            }
            data.extend_from_slice(values);
        }
        Ok(Self { dim, data })
    }

    /// Wrap a flat row-major buffer of exactly `dim²` values.
    pub fn from_vec(dim: usize, data: Vec<Cell>) -> Result<Self> {
        if dim == 0 {
            return Err(MagicError::ZeroDimension);
        }
        if dim.checked_mul(dim) != Some(data.len()) {
            return Err(MagicError::LengthMismatch {
                dim,
                len: data.len(),
            });
        }
        Ok(Self { dim, data })
    }

    /// Side length.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Total number of cells (`dim²`).
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`; a matrix has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Cell at `(row, col)`, or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.dim && col < self.dim {
            Some(self.data[row * self.dim + col])
        } else {
            None
        }
    }

    /// One row as a slice.
    ///
    /// # Panics
    /// If `row >= dim`.
    #[inline]
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.dim;
        &self.data[start..start + self.dim]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Cell]> + '_ {
        self.data.chunks_exact(self.dim)
    }

    /// Flat row-major view of every cell.
    #[inline]
    pub fn as_slice(&self) -> &[Cell] {
        &self.data
    }

    /// Mutable flat row-major view of every cell.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Cell] {
        &mut self.data
    }

    /// Copy out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(<[Cell]>::to_vec).collect()
    }

    /// Consume and return the flat buffer.
    pub fn into_vec(self) -> Vec<Cell> {
        self.data
    }
}

impl TryFrom<Vec<Vec<Cell>>> for SquareMatrix {
    type Error = MagicError;

    fn try_from(rows: Vec<Vec<Cell>>) -> Result<Self> {
        Self::from_rows(&rows)
    }
}

impl From<SquareMatrix> for Vec<Vec<Cell>> {
    fn from(m: SquareMatrix) -> Self {
        m.to_rows()
    }
}

impl Index<(usize, usize)> for SquareMatrix {
    type Output = Cell;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Cell {
        assert!(col < self.dim, "column {col} out of range for dim {}", self.dim);
        &self.data[row * self.dim + col]
    }
}

impl IndexMut<(usize, usize)> for SquareMatrix {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Cell {
        assert!(col < self.dim, "column {col} out of range for dim {}", self.dim);
        &mut self.data[row * self.dim + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_rejects_zero_dimension() {
        assert!(matches!(SquareMatrix::zeros(0), Err(MagicError::ZeroDimension)));
    }

    #[test]
    fn from_rows_is_row_major() {
        let m = SquareMatrix::from_rows(&[[1, 2], [3, 4]]).unwrap();
        assert_eq!(m.dim(), 2);
        assert_eq!(m.as_slice(), &[1, 2, 3, 4]);
        assert_eq!(m[(1, 0)], 3);
        assert_eq!(m.row(1), &[3, 4]);
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let rows: Vec<Vec<Cell>> = vec![vec![1, 2], vec![3]];
        match SquareMatrix::from_rows(&rows) {
            Err(MagicError::RaggedRow { row, expected, actual }) => {
                assert_eq!((row, expected, actual), (1, 2, 1));
            }
            other => panic!("expected RaggedRow, got {other:?}"),
        }
    }

    #[test]
    fn from_rows_rejects_non_square() {
        // Three columns but only two rows.
        let rows = [[1, 2, 3], [4, 5, 6]];
        assert!(matches!(
            SquareMatrix::from_rows(&rows),
            Err(MagicError::RaggedRow { row: 0, .. })
        ));
    }

    #[test]
    fn from_vec_checks_length() {
        assert!(SquareMatrix::from_vec(2, vec![1, 2, 3, 4]).is_ok());
        assert!(matches!(
            SquareMatrix::from_vec(2, vec![1, 2, 3]),
            Err(MagicError::LengthMismatch { dim: 2, len: 3 })
        ));
    }

    #[test]
    fn get_is_bounds_checked() {
        let m = SquareMatrix::from_rows(&[[9]]).unwrap();
        assert_eq!(m.get(0, 0), Some(9));
        assert_eq!(m.get(0, 1), None);
        assert_eq!(m.get(1, 0), None);
    }

    #[test]
    fn converts_to_and_from_nested_rows() {
        let m = SquareMatrix::try_from(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let rows: Vec<Vec<Cell>> = m.into();
        assert_eq!(rows, vec![vec![1, 2], vec![3, 4]]);
        assert!(SquareMatrix::try_from(Vec::<Vec<Cell>>::new()).is_err());
    }

    #[test]
    fn index_mut_writes_through() {
        let mut m = SquareMatrix::zeros(3).unwrap();
        m[(2, 1)] = 7;
        assert_eq!(m.to_rows()[2], vec![0, 7, 0]);
    }
}
