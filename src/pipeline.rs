//! Generation followed by verification, as one configured unit.
//!
//! ```text
//! pattern ─┐
//!          ├─ generate ─→ generated ─→ MagicSquareChecker ─→ Verdict
//! modifier ┘ (scaled in place)
//! ```

#[cfg(feature = "parallel")]
use alloc::string::ToString;

use crate::config::EngineConfig;
#[cfg(feature = "parallel")]
use crate::error::MagicError;
use crate::error::Result;
use crate::generate::generate;
use crate::matrix::SquareMatrix;
use crate::verify::Verdict;

/// What the core hands back to its caller.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Outcome {
    /// The M×M matrix.
    pub generated: SquareMatrix,
    /// Result of checking it.
    pub verdict: Verdict,
}

impl Outcome {
    /// `true` iff the generated matrix is a magic square.
    pub fn is_magic_square(&self) -> bool {
        self.verdict.is_magic()
    }
}

/// Configured generator and checker.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    #[cfg(feature = "parallel")]
    pool: Option<rayon::ThreadPool>,
}

impl Engine {
    /// Build an engine. With parallel execution and `threads` set, this builds
    /// a dedicated rayon pool.
    pub fn new(config: EngineConfig) -> Result<Self> {
        #[cfg(feature = "parallel")]
        let pool = match config.threads {
            Some(n) if config.execution.is_parallel() => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| alloc::format!("magic-tile-{i}"))
                    .build()
                    .map_err(|e| MagicError::ThreadPool(e.to_string()))?;
                log::debug!("built dedicated pool with {n} workers");
                Some(pool)
            }
            _ => None,
        };
        Ok(Self {
            config,
            #[cfg(feature = "parallel")]
            pool,
        })
    }

    /// The configuration this engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Scale `modifier` in place and expand.
    pub fn generate(&self, pattern: &SquareMatrix, modifier: &mut SquareMatrix) -> Result<SquareMatrix> {
        let exec = self.config.execution;
        self.install(|| generate(pattern, modifier, exec))
    }

    /// Check an already generated matrix.
    pub fn verify(&self, matrix: &SquareMatrix) -> Verdict {
        let checker = self.config.checker();
        self.install(|| checker.check(matrix))
    }

    /// [`Self::generate`] then [`Self::verify`].
    pub fn run(&self, pattern: &SquareMatrix, modifier: &mut SquareMatrix) -> Result<Outcome> {
        let generated = self.generate(pattern, modifier)?;
        let verdict = self.verify(&generated);
        log::debug!("{}x{} matrix: {verdict}", generated.dim(), generated.dim());
        Ok(Outcome { generated, verdict })
    }

    #[cfg(feature = "parallel")]
    fn install<R: Send>(&self, f: impl FnOnce() -> R + Send) -> R {
        match &self.pool {
            Some(pool) => pool.install(f),
            None => f(),
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn install<R>(&self, f: impl FnOnce() -> R) -> R {
        f()
    }
}
