//! # magic-tile
//!
//! Expand a small N×N *pattern* and N×N *modifier* into an M×M matrix
//! (M = N²), then decide whether the result is a magic square.
//!
//! ---
//!
//! ## Generation
//!
//! The modifier is scaled in place by M. Each output cell is then the pattern
//! cell it tiles onto plus the scaled modifier value of its tile:
//!
//! ```text
//! out[i][j] = pattern[i % N][j % N] + M · modifier[i / N][j / N]
//! ```
//!
//! If the pattern holds `1..=N²` and the modifier holds `0..N²`, each tile gets
//! its own band of values. When both inputs are magic squares, the result is too.
//!
//! ## Verification
//!
//! A matrix is a magic square when all row sums are equal, all column sums are
//! equal, both diagonals match the row sum, and no value repeats. The sum checks
//! are O(M²). The repeat check dominates: a naive all-pairs scan is O(M⁴), so
//! the default is a single pass over a hash set.
//!
//! ## The pipeline
//!
//! ```text
//! pattern, modifier ─→ generate ─→ SquareMatrix ─→ check_aggregates ─→ DistinctnessChecker ─→ Verdict
//!                         ↑                              ↑                      ↑
//!                     Execution                      Execution        DistinctStrategy
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`matrix`] | [`SquareMatrix`] | Row-major square container |
//! | [`exec`] | [`Execution`] | Sequential / rayon data-parallel primitives |
//! | [`generate`] | [`generate()`] | Scale modifier, tile and combine |
//! | [`aggregate`] | [`AggregateSums`] | Row, column, diagonal sums; `all_equal` |
//! | [`distinct`] | [`DistinctnessChecker`], [`DistinctStrategy`] | Naive, hashed and dense-bitmap distinctness |
//! | [`verify`] | [`MagicSquareChecker`], [`Verdict`] | Orchestrates the checks |
//! | [`config`] | [`EngineConfig`] | Execution, strategy, pool size |
//! | [`pipeline`] | [`Engine`], [`Outcome`] | Generate then verify |
//! | [`input`] | [`input::parse_matrix`] | Text matrix format |
//! | [`report`] | [`report::Summary`] | Console summary |
//!
//! ## Features
//!
//! - `std`: file reading helpers.
//! - `parallel`: rayon execution and a sharded seen-set (implies `std`).
//! - `serde`: serialisation of matrices, configs, verdicts and summaries.
//! - `cli`: the `magic-tile` binary.
//! - `python-ffi`: PyO3 bindings.
//!
//! Without `std` the crate is `no_std` + `alloc`.
//!
//! ## Example
//!
//! ```rust
//! use magic_tile::{generate, is_magic_square, Execution, SquareMatrix};
//!
//! let pattern = SquareMatrix::from_rows(&[[2, 7, 6], [9, 5, 1], [4, 3, 8]]).unwrap();
//! let mut modifier = SquareMatrix::from_rows(&[[1, 6, 5], [8, 4, 0], [3, 2, 7]]).unwrap();
//! let big = generate(&pattern, &mut modifier, Execution::Sequential).unwrap();
//! assert_eq!(big.dim(), 9);
//! assert!(is_magic_square(&big));
//! ```

#![cfg_attr(not(any(feature = "std", feature = "python-ffi", test)), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

#[cfg(any(feature = "std", feature = "python-ffi", test))]
extern crate std;

pub mod aggregate;
pub mod config;
pub mod distinct;
pub mod error;
pub mod exec;
pub mod generate;
pub mod input;
pub mod matrix;
pub mod pipeline;
pub mod report;
pub mod verify;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use aggregate::{all_equal, AggregateSums};
pub use config::EngineConfig;
pub use distinct::{is_pairwise_distinct, DistinctStrategy, DistinctnessChecker};
pub use error::{MagicError, Result};
pub use exec::Execution;
pub use generate::generate;
pub use matrix::{Cell, SquareMatrix};
pub use pipeline::{Engine, Outcome};
pub use verify::{is_magic_square, MagicSquareChecker, Verdict};
