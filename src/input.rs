//! Matrix text format.
//!
//! ```text
//! 3
//! 8 1 6
//! 3 5 7
//! 4 9 2
//! ```
//!
//! Whitespace-separated integers. The first is the side length `N ≥ 1`, and
//! the next `N²` are the cells in row-major order. Line breaks carry no meaning.
//! Anything after the last cell is ignored.

use alloc::string::ToString;
use alloc::vec::Vec;

use crate::error::{MagicError, Result};
use crate::matrix::{Cell, SquareMatrix};

/// Parse one matrix from text.
pub fn parse_matrix(text: &str) -> Result<SquareMatrix> {
    let mut tokens = text.split_whitespace().enumerate();

    let (_, first) = tokens.next().ok_or(MagicError::MissingDimension)?;
    let dim: usize = first.parse().map_err(|_| MagicError::InvalidToken {
        position: 0,
        token: first.to_string(),
    })?;
    if dim == 0 {
        return Err(MagicError::ZeroDimension);
    }
    let expected = dim
        .checked_mul(dim)
        .ok_or(MagicError::DimensionTooLarge { dim })?;

    // Every value needs at least one byte plus a separator, so the header
    // alone cannot size the buffer beyond what the text can hold.
    let mut data: Vec<Cell> = Vec::with_capacity(expected.min(text.len() / 2 + 1));
    for (position, token) in tokens.by_ref().take(expected) {
        let value = token.parse().map_err(|_| MagicError::InvalidToken {
            position,
            token: token.to_string(),
        })?;
        data.push(value);
    }
    if data.len() < expected {
        return Err(MagicError::TooFewValues {
            expected,
            found: data.len(),
        });
    }

    let extra = tokens.count();
    if extra > 0 {
        log::warn!("ignoring {extra} tokens after {dim}x{dim} matrix");
    }
    SquareMatrix::from_vec(dim, data)
}

/// Parse a pattern/modifier pair, rejecting mismatched sizes.
pub fn parse_pair(pattern: &str, modifier: &str) -> Result<(SquareMatrix, SquareMatrix)> {
    let pattern = parse_matrix(pattern)?;
    let modifier = parse_matrix(modifier)?;
    if pattern.dim() != modifier.dim() {
        return Err(MagicError::DimensionMismatch {
            pattern: pattern.dim(),
            modifier: modifier.dim(),
        });
    }
    Ok((pattern, modifier))
}

/// Read and parse a matrix file.
#[cfg(feature = "std")]
pub fn read_matrix(path: impl AsRef<std::path::Path>) -> Result<SquareMatrix> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| MagicError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_matrix(&text)
}

/// Read a pattern/modifier pair from files, rejecting mismatched sizes.
#[cfg(feature = "std")]
pub fn read_pair(
    pattern: impl AsRef<std::path::Path>,
    modifier: impl AsRef<std::path::Path>,
) -> Result<(SquareMatrix, SquareMatrix)> {
    let pattern = read_matrix(pattern)?;
    let modifier = read_matrix(modifier)?;
    if pattern.dim() != modifier.dim() {
        return Err(MagicError::DimensionMismatch {
            pattern: pattern.dim(),
            modifier: modifier.dim(),
        });
    }
    Ok((pattern, modifier))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_layout_independent_of_line_breaks() {
        let a = parse_matrix("2\n1 2\n3 4\n").unwrap();
        let b = parse_matrix("  2 1\t2 3\n\n4").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_rows(), vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn negative_values_are_allowed() {
        let m = parse_matrix("1 -5").unwrap();
        assert_eq!(m[(0, 0)], -5);
    }

    #[test]
    fn empty_input_has_no_dimension() {
        assert!(matches!(parse_matrix("   \n"), Err(MagicError::MissingDimension)));
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert!(matches!(parse_matrix("0"), Err(MagicError::ZeroDimension)));
    }

    #[test]
    fn bad_dimension_token() {
        match parse_matrix("three 1 2 3") {
            Err(MagicError::InvalidToken { position, token }) => {
                assert_eq!(position, 0);
                assert_eq!(token, "three");
            }
            other => panic!("expected InvalidToken, got {other:?}"),
        }
        // Negative dimensions do not parse as usize.
        assert!(matches!(parse_matrix("-2"), Err(MagicError::InvalidToken { position: 0, .. })));
    }

    #[test]
    fn bad_value_token_reports_position() {
        match parse_matrix("2 1 2 x 4") {
            Err(MagicError::InvalidToken { position, token }) => {
                assert_eq!(position, 3);
                assert_eq!(token, "x");
            }
            other => panic!("expected InvalidToken, got {other:?}"),
        }
    }

    #[test]
    fn too_few_values() {
        assert!(matches!(
            parse_matrix("3 1 2 3 4"),
            Err(MagicError::TooFewValues { expected: 9, found: 4 })
        ));
    }

    #[test]
    fn oversized_header_is_reported_not_allocated() {
        assert!(matches!(
            parse_matrix("4000000000 1"),
            Err(MagicError::TooFewValues { found: 1, .. })
        ));
        assert!(matches!(
            parse_matrix("65536 1 2"),
            Err(MagicError::TooFewValues { expected: 4_294_967_296, found: 2 })
        ));
    }

    #[test]
    fn trailing_tokens_are_ignored() {
        let m = parse_matrix("1 7 8 9 junk").unwrap();
        assert_eq!(m.as_slice(), &[7]);
    }

    #[test]
    fn pair_dimensions_must_match() {
        assert!(parse_pair("1 1", "1 2").is_ok());
        assert!(matches!(
            parse_pair("1 1", "2 1 2 3 4"),
            Err(MagicError::DimensionMismatch { pattern: 1, modifier: 2 })
        ));
    }
}
