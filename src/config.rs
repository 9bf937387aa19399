//! Engine configuration.

use crate::distinct::{DistinctStrategy, DEFAULT_DENSE_SPAN_LIMIT};
use crate::exec::Execution;
use crate::verify::MagicSquareChecker;

/// Configuration for [`crate::pipeline::Engine`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Scheduling for generation and verification.
    /// Default: `Sequential`.
    pub execution: Execution,

    /// Distinctness algorithm.
    /// Default: `Hashed`.
    pub distinct: DistinctStrategy,

    /// Largest value span the dense bitmap may cover before falling back
    /// to the hashed check. Default: 2²⁶.
    pub dense_span_limit: u64,

    /// Worker count for a dedicated rayon pool. `None` uses the global pool.
    /// Ignored under sequential execution.
    pub threads: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            execution: Execution::Sequential,
            distinct: DistinctStrategy::Hashed,
            dense_span_limit: DEFAULT_DENSE_SPAN_LIMIT,
            threads: None,
        }
    }
}

impl EngineConfig {
    /// Default configuration with parallel execution on the global pool.
    pub fn parallel() -> Self {
        Self {
            execution: Execution::Parallel,
            ..Self::default()
        }
    }

    /// The verification settings carried by this configuration.
    pub fn checker(&self) -> MagicSquareChecker {
        MagicSquareChecker {
            execution: self.execution,
            distinct: self.distinct,
            dense_span_limit: self.dense_span_limit,
        }
    }
}
