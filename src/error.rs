//! Error taxonomy for matrix construction, generation and input parsing.
//!
//! Once two valid, equally sized matrices exist, generation and verification
//! cannot fail; every variant below is raised before any cell is computed.

use alloc::string::String;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, MagicError>;

/// Every failure the crate can report.
#[derive(Error, Debug)]
pub enum MagicError {
    /// A matrix side length of zero was requested or parsed.
    #[error("matrix dimension must be at least 1")]
    ZeroDimension,

    /// Pattern and modifier do not share a side length.
    #[error("pattern is {pattern}x{pattern} but modifier is {modifier}x{modifier}")]
    DimensionMismatch {
        /// Side length of the pattern matrix.
        pattern: usize,
        /// Side length of the modifier matrix.
        modifier: usize,
    },

    /// A row handed to [`crate::matrix::SquareMatrix::from_rows`] has the wrong length.
    #[error("row {row} has {actual} values, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Required row length (the number of rows).
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// A flat buffer is not `dim * dim` long.
    #[error("buffer of {len} values cannot back a {dim}x{dim} matrix")]
    LengthMismatch {
        /// Requested side length.
        dim: usize,
        /// Length of the supplied buffer.
        len: usize,
    },

    /// `N⁴` cells do not fit in `usize`.
    #[error("dimension {dim} is too large to expand")]
    DimensionTooLarge {
        /// Offending side length of the input matrices.
        dim: usize,
    },

    /// The input text ended before the leading dimension.
    #[error("input does not start with a matrix dimension")]
    MissingDimension,

    /// A whitespace-separated token is not an integer.
    #[error("token {position} ({token:?}) is not an integer")]
    InvalidToken {
        /// Zero-based token index, counting the dimension as token 0.
        position: usize,
        /// The offending text.
        token: String,
    },

    /// The input text ended before `N²` values were read.
    #[error("expected {expected} matrix values, found {found}")]
    TooFewValues {
        /// Number of values the dimension calls for.
        expected: usize,
        /// Number of values actually present.
        found: usize,
    },

    /// A dedicated rayon pool could not be built.
    #[cfg(feature = "parallel")]
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),

    /// Reading an input file failed.
    #[cfg(feature = "std")]
    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        /// File that could not be read.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
