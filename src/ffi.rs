//! Python FFI bindings via PyO3.
//!
//! Matrices cross the boundary as `list[list[int]]`.
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! from magic_tile import generate, is_magic_square, check
//!
//! pattern  = [[2, 7, 6], [9, 5, 1], [4, 3, 8]]
//! modifier = [[1, 6, 5], [8, 4, 0], [3, 2, 7]]
//! big = generate(pattern, modifier, parallel=True)
//! print(len(big))               # 9
//! print(is_magic_square(big))   # True
//! print(check(big))             # "magic square (sum 369)"
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::distinct::DistinctStrategy;
use crate::exec::Execution;
use crate::generate as expand;
use crate::matrix::{Cell, SquareMatrix};
use crate::verify::MagicSquareChecker;

fn to_matrix(name: &str, rows: Vec<Vec<Cell>>) -> PyResult<SquareMatrix> {
    SquareMatrix::from_rows(&rows).map_err(|e| PyValueError::new_err(format!("{name}: {e}")))
}

fn execution(parallel: bool) -> Execution {
    if parallel {
        Execution::Parallel
    } else {
        Execution::Sequential
    }
}

fn strategy(name: &str) -> PyResult<DistinctStrategy> {
    match name {
        "naive" => Ok(DistinctStrategy::Naive),
        "hashed" => Ok(DistinctStrategy::Hashed),
        "dense" => Ok(DistinctStrategy::Dense),
        other => Err(PyValueError::new_err(format!(
            "distinct must be 'naive', 'hashed' or 'dense', got {other:?}"
        ))),
    }
}

/// Expand an N×N pattern and modifier into an N²×N² matrix.
///
/// Args:
///     pattern: N×N nested list of ints
///     modifier: N×N nested list of ints (not modified; a copy is scaled)
///     parallel: spread work over threads (default False)
///
/// Returns:
///     N²×N² nested list of ints
#[pyfunction]
#[pyo3(signature = (pattern, modifier, parallel=false))]
pub fn generate(
    py: Python<'_>,
    pattern: Vec<Vec<Cell>>,
    modifier: Vec<Vec<Cell>>,
    parallel: bool,
) -> PyResult<Vec<Vec<Cell>>> {
    let pattern = to_matrix("pattern", pattern)?;
    let mut modifier = to_matrix("modifier", modifier)?;
    let out = py
        .allow_threads(|| expand::generate(&pattern, &mut modifier, execution(parallel)))
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(out.to_rows())
}

/// Return True if the matrix is a magic square.
///
/// Args:
///     matrix: square nested list of ints
///     distinct: 'naive', 'hashed' (default) or 'dense'
///     parallel: spread work over threads (default False)
#[pyfunction]
#[pyo3(signature = (matrix, distinct="hashed", parallel=false))]
pub fn is_magic_square(
    py: Python<'_>,
    matrix: Vec<Vec<Cell>>,
    distinct: &str,
    parallel: bool,
) -> PyResult<bool> {
    let matrix = to_matrix("matrix", matrix)?;
    let checker = MagicSquareChecker::new(execution(parallel)).with_distinct(strategy(distinct)?);
    Ok(py.allow_threads(|| checker.is_magic_square(&matrix)))
}

/// Describe why a matrix is or is not a magic square.
#[pyfunction]
pub fn check(matrix: Vec<Vec<Cell>>) -> PyResult<String> {
    let matrix = to_matrix("matrix", matrix)?;
    Ok(MagicSquareChecker::default().check(&matrix).to_string())
}

// ── Module entry point ────────────────────────────────────────────────────────

/// magic-tile Python bindings.
#[pymodule]
pub fn magic_tile(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(generate, m)?)?;
    m.add_function(wrap_pyfunction!(is_magic_square, m)?)?;
    m.add_function(wrap_pyfunction!(check, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
