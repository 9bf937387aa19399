//! Execution strategy and the two data-parallel primitives the algorithms use.
//!
//! Every pass in the crate is expressed as one of:
//!
//! - [`for_each_row_mut`]: visit disjoint row slices of a flat buffer, writing in place.
//! - [`map_indices`]: map an index range to values, preserving index order.
//!
//! With `Execution::Parallel` and the `parallel` feature these run on rayon;
//! otherwise they are plain loops. Results never depend on which one ran.

use alloc::vec::Vec;

/// How a pass is scheduled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Execution {
    /// Single-threaded loops. Always available, always correct.
    #[default]
    Sequential,
    /// Rayon work-stealing over independent iterations.
    ///
    /// Falls back to [`Execution::Sequential`] when the crate is built
    /// without the `parallel` feature.
    Parallel,
}

impl Execution {
    /// The strategy that will actually run in this build.
    #[inline]
    pub fn effective(self) -> Self {
        if cfg!(feature = "parallel") {
            self
        } else {
            Self::Sequential
        }
    }

    /// `true` if work will be spread over the rayon pool.
    #[inline]
    pub fn is_parallel(self) -> bool {
        self.effective() == Self::Parallel
    }
}

/// Apply `f(row_index, row)` to each `width`-long row of `data`.
///
/// Rows are disjoint, so workers never contend. `data.len()` must be a
/// multiple of `width`; a short trailing row would be passed through as-is.
pub fn for_each_row_mut<T, F>(data: &mut [T], width: usize, exec: Execution, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    if width == 0 {
        return;
    }
    #[cfg(feature = "parallel")]
    if exec.is_parallel() {
        use rayon::prelude::*;
        data.par_chunks_mut(width)
            .enumerate()
            .for_each(|(row, slice)| f(row, slice));
        return;
    }
    if exec == Execution::Parallel && !exec.is_parallel() {
        log::debug!("parallel execution requested without the `parallel` feature; running sequentially");
    }
    data.chunks_mut(width)
        .enumerate()
        .for_each(|(row, slice)| f(row, slice));
}

/// Collect `f(i)` for every `i` in `0..len`, in index order.
#[cfg_attr(not(feature = "parallel"), allow(unused_variables))]
pub fn map_indices<T, F>(len: usize, exec: Execution, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    #[cfg(feature = "parallel")]
    if exec.is_parallel() {
        use rayon::prelude::*;
        return (0..len).into_par_iter().map(f).collect();
    }
    (0..len).map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_is_the_default() {
        assert_eq!(Execution::default(), Execution::Sequential);
        assert!(!Execution::Sequential.is_parallel());
    }

    #[test]
    fn parallel_degrades_without_feature() {
        let expected = if cfg!(feature = "parallel") {
            Execution::Parallel
        } else {
            Execution::Sequential
        };
        assert_eq!(Execution::Parallel.effective(), expected);
    }

    #[test]
    fn rows_are_visited_with_their_index() {
        for exec in [Execution::Sequential, Execution::Parallel] {
            let mut data = vec![0u32; 12];
            for_each_row_mut(&mut data, 4, exec, |row, slice| {
                for (col, v) in slice.iter_mut().enumerate() {
                    *v = (row * 10 + col) as u32;
                }
            });
            assert_eq!(data, vec![0, 1, 2, 3, 10, 11, 12, 13, 20, 21, 22, 23]);
        }
    }

    #[test]
    fn map_indices_preserves_order() {
        for exec in [Execution::Sequential, Execution::Parallel] {
            let squares = map_indices(6, exec, |i| i * i);
            assert_eq!(squares, vec![0, 1, 4, 9, 16, 25]);
        }
    }

    #[test]
    fn zero_width_is_a_no_op() {
        let mut data = vec![1, 2, 3];
        for_each_row_mut(&mut data, 0, Execution::Sequential, |_, s| s.fill(0));
        assert_eq!(data, vec![1, 2, 3]);
    }
}
