/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! Distinctness checker: are all cells of a matrix pairwise distinct?
//!
//! This is the expensive half of verification. An M×M matrix has M² cells, so
//! comparing every cell with every other is O(M⁴). Three strategies are offered:
//!
//! | Strategy | Cost | Parallel form | When |
//! |----------|------|---------------|------|
//! | [`DistinctStrategy::Naive`] | O(M⁴) | one worker per cell, read-only | reference / tiny inputs |
//! | [`DistinctStrategy::Hashed`] | O(M²) amortised | sharded set, one lock per shard | default |
//! | [`DistinctStrategy::Dense`] | O(M² + span/64) | `AtomicU64` bitmap, `fetch_or` | value span is small |
//!
//! # Insert-if-absent must be one step
//!
//! With parallel workers sharing a seen-set, "is `v` present?" followed by
//! "insert `v`" lets two workers holding the same value both observe absence
//! and both insert, so the duplicate is missed. Every strategy here folds the
//! probe and the insert into one operation:
//!
//! - Hashed: `HashSet::insert` returns `false` if the value was present, and the
//!   call runs while holding the lock of the only shard that value maps to.
//! - Dense: `fetch_or` returns the previous word, so exactly one worker sees the
//!   bit clear.
//!
//! # No modulo tables
//!
//! A fixed-size presence table indexed by `value % SIZE` reports a duplicate
//! whenever two distinct values collide. Dense avoids this by indexing with
//! `value - min`, which is injective. It is only used when the whole span fits
//! under the configured limit and otherwise falls back to Hashed.

use alloc::vec;

use hashbrown::hash_map::Entry;
use hashbrown::{HashMap, HashSet};

use crate::exec::Execution;
use crate::matrix::{Cell, SquareMatrix};

/// Default upper bound on the value span the dense bitmap will cover
/// (2²⁶ bits = 8 MiB).
pub const DEFAULT_DENSE_SPAN_LIMIT: u64 = 1 << 26;

/// Algorithm used to test pairwise distinctness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DistinctStrategy {
    /// Compare every pair of cells.
    Naive,
    /// One pass over a seen-set sized to the cell count.
    #[default]
    Hashed,
    /// One pass over a bitmap indexed by `value - min`.
    Dense,
}

/// A repeated value and the first two places it occurs (row-major order).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Duplicate {
    /// The repeated value.
    pub value: Cell,
    /// `(row, col)` of its first occurrence.
    pub first: (usize, usize),
    /// `(row, col)` of its second occurrence.
    pub second: (usize, usize),
}

/// Configured distinctness check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DistinctnessChecker {
    /// Which algorithm to run.
    pub strategy: DistinctStrategy,
    /// Sequential or parallel.
    pub execution: Execution,
    /// Largest `max - min + 1` the dense bitmap may cover.
    pub dense_span_limit: u64,
}

impl Default for DistinctnessChecker {
    fn default() -> Self {
        Self {
            strategy: DistinctStrategy::default(),
            execution: Execution::default(),
            dense_span_limit: DEFAULT_DENSE_SPAN_LIMIT,
        }
    }
}

impl DistinctnessChecker {
    /// Checker with the given strategy and execution and the default span limit.
    pub fn new(strategy: DistinctStrategy, execution: Execution) -> Self {
        Self {
            strategy,
            execution,
            ..Self::default()
        }
    }

    /// `true` iff every cell of `matrix` holds a different value.
    pub fn is_distinct(&self, matrix: &SquareMatrix) -> bool {
        self.is_distinct_slice(matrix.as_slice())
    }

    /// Same as [`Self::is_distinct`] over an arbitrary slice.
    pub fn is_distinct_slice(&self, values: &[Cell]) -> bool {
        match self.strategy {
            DistinctStrategy::Naive => naive_distinct(values, self.execution),
            DistinctStrategy::Hashed => hashed_distinct(values, self.execution),
            DistinctStrategy::Dense => {
                match dense_distinct(values, self.dense_span_limit, self.execution) {
                    Some(distinct) => distinct,
                    None => {
                        log::debug!(
                            "value span exceeds dense limit {}; using hashed check",
                            self.dense_span_limit
                        );
                        hashed_distinct(values, self.execution)
                    }
                }
            }
        }
    }
}

/// `true` iff every cell of `matrix` holds a different value.
pub fn is_pairwise_distinct(matrix: &SquareMatrix, strategy: DistinctStrategy, exec: Execution) -> bool {
    DistinctnessChecker::new(strategy, exec).is_distinct(matrix)
}

// ─── Naive ───────────────────────────────────────────────────────────────────

/// All-pairs scan. Each cell is compared with every cell after it, which covers
/// every unordered pair once.
#[cfg_attr(not(feature = "parallel"), allow(unused_variables))]
pub fn naive_distinct(values: &[Cell], exec: Execution) -> bool {
    #[cfg(feature = "parallel")]
    if exec.is_parallel() {
        use rayon::prelude::*;
        return !(0..values.len())
            .into_par_iter()
            .any(|i| values[i + 1..].contains(&values[i]));
    }
    !(0..values.len()).any(|i| values[i + 1..].contains(&values[i]))
}

// ─── Hashed ──────────────────────────────────────────────────────────────────

/// Single pass over a seen-set. Stops at the first repeated value.
#[cfg_attr(not(feature = "parallel"), allow(unused_variables))]
pub fn hashed_distinct(values: &[Cell], exec: Execution) -> bool {
    #[cfg(feature = "parallel")]
    if exec.is_parallel() {
        return sharded::hashed_distinct_parallel(values);
    }
    let mut seen: HashSet<Cell> = HashSet::with_capacity(values.len());
    values.iter().all(|&v| seen.insert(v))
}

#[cfg(feature = "parallel")]
mod sharded {
    use alloc::vec::Vec;

    use hashbrown::HashSet;
    use rayon::prelude::*;
    use spin::Mutex;

    use crate::matrix::Cell;

    /// Shards per worker thread. More shards means less lock contention.
    const SHARDS_PER_THREAD: usize = 8;

    /// Seen-set split into independently locked shards.
    ///
    /// A value always maps to the same shard, so holding that shard's lock
    /// while calling `insert` makes insert-if-absent atomic for that value.
    pub(super) struct ShardedSet {
        shards: Vec<Mutex<HashSet<Cell>>>,
        mask: usize,
    }

    impl ShardedSet {
        pub(super) fn new(expected_len: usize, shard_count: usize) -> Self {
            let shard_count = shard_count.max(1).next_power_of_two();
            let per_shard = expected_len / shard_count + 1;
            let shards = (0..shard_count)
                .map(|_| Mutex::new(HashSet::with_capacity(per_shard)))
                .collect();
            Self {
                shards,
                mask: shard_count - 1,
            }
        }

        #[inline]
        fn shard_of(&self, value: Cell) -> usize {
            // Fibonacci hashing; take high bits so nearby values spread out.
            let mixed = (value as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
            (mixed >> 32) as usize & self.mask
        }

        /// Insert `value`; `false` if it was already present.
        #[inline]
        pub(super) fn insert(&self, value: Cell) -> bool {
            self.shards[self.shard_of(value)].lock().insert(value)
        }
    }

    pub(super) fn hashed_distinct_parallel(values: &[Cell]) -> bool {
        let set = ShardedSet::new(values.len(), rayon::current_num_threads() * SHARDS_PER_THREAD);
        !values.par_iter().any(|&v| !set.insert(v))
    }

}

// ─── Dense ───────────────────────────────────────────────────────────────────

/// Bitmap scan over `[min, max]`.
///
/// Returns `None` when the span exceeds `span_limit`; the caller picks another
/// strategy. Returns `Some(false)` without scanning when there are more values
/// than the span can hold.
#[cfg_attr(not(feature = "parallel"), allow(unused_variables))]
pub fn dense_distinct(values: &[Cell], span_limit: u64, exec: Execution) -> Option<bool> {
    let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
        return Some(true);
    };
    let span = (max as i128 - min as i128 + 1) as u128;
    if span > span_limit as u128 || span > usize::MAX as u128 {
        return None;
    }
    let span = span as usize;
    if values.len() > span {
        // Pigeonhole: more cells than possible values.
        return Some(false);
    }
    let offset = |v: Cell| (v as i128 - min as i128) as usize;
    let words = span.div_ceil(64);

    #[cfg(feature = "parallel")]
    if exec.is_parallel() {
        use core::sync::atomic::{AtomicU64, Ordering};
        use rayon::prelude::*;

        let bits: alloc::vec::Vec<AtomicU64> = (0..words).map(|_| AtomicU64::new(0)).collect();
        let repeated = values.par_iter().any(|&v| {
            let off = offset(v);
            let mask = 1u64 << (off & 63);
            bits[off >> 6].fetch_or(mask, Ordering::Relaxed) & mask != 0
        });
        return Some(!repeated);
    }

    let mut bits = vec![0u64; words];
    for &v in values {
        let off = offset(v);
        let mask = 1u64 << (off & 63);
        let word = &mut bits[off >> 6];
        if *word & mask != 0 {
            return Some(false);
        }
        *word |= mask;
    }
    Some(true)
}

// ─── Diagnostics ─────────────────────────────────────────────────────────────

/// First value (row-major) that appears twice, with both positions.
pub fn first_duplicate(matrix: &SquareMatrix) -> Option<Duplicate> {
    let dim = matrix.dim();
    let at = |idx: usize| (idx / dim, idx % dim);
    let mut seen: HashMap<Cell, usize> = HashMap::with_capacity(matrix.len());
    for (idx, &value) in matrix.as_slice().iter().enumerate() {
        match seen.entry(value) {
            Entry::Occupied(e) => {
                return Some(Duplicate {
                    value,
                    first: at(*e.get()),
                    second: at(idx),
                });
            }
            Entry::Vacant(e) => {
                e.insert(idx);
            }
        }
    }
    None
}
