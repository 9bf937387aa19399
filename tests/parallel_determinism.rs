//! Parallel and sequential execution must produce identical results.
//!
//! Run with: `cargo test --features parallel`
//!
//! Inputs are large enough (N = 8, so 64×64 = 4096 cells) that rayon actually
//! splits the work.

#![cfg(feature = "parallel")]

use magic_tile::{
    generate, is_pairwise_distinct, DistinctStrategy, Engine, EngineConfig, Execution,
    MagicSquareChecker, SquareMatrix, Verdict,
};

// ─── helpers ─────────────────────────────────────────────────────────────────

/// Deterministic N×N matrix over 0..N² using the same LCG for every run.
fn permutation(n: usize, seed: u32) -> SquareMatrix {
    let mut values: Vec<i64> = (0..(n * n) as i64).collect();
    let mut s = seed;
    for i in (1..values.len()).rev() {
        s = s.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let j = (s >> 16) as usize % (i + 1);
        values.swap(i, j);
    }
    SquareMatrix::from_vec(n, values).unwrap()
}

/// 8×8 magic square built by the doubly-even complement rule; values 1..=64.
fn doubly_even_magic(n: usize) -> SquareMatrix {
    let mut data = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            let k = (i * n + j + 1) as i64;
            let keep = ((i % 4 == j % 4) || ((i % 4) + (j % 4) == 3)) as i64;
            data.push(if keep == 1 { (n * n) as i64 + 1 - k } else { k });
        }
    }
    SquareMatrix::from_vec(n, data).unwrap()
}

fn shifted_down(m: &SquareMatrix) -> SquareMatrix {
    let data = m.as_slice().iter().map(|v| v - 1).collect();
    SquareMatrix::from_vec(m.dim(), data).unwrap()
}

// ─── generation ──────────────────────────────────────────────────────────────

#[test]
fn generation_is_schedule_independent() {
    let pattern = permutation(8, 7);
    let base = permutation(8, 11);

    let mut a = base.clone();
    let mut b = base.clone();
    let seq = generate(&pattern, &mut a, Execution::Sequential).unwrap();
    let par = generate(&pattern, &mut b, Execution::Parallel).unwrap();

    assert_eq!(seq.dim(), 64);
    assert_eq!(seq, par);
    assert_eq!(a, b, "modifier scaled identically");
}

// ─── distinctness ────────────────────────────────────────────────────────────

#[test]
fn distinctness_is_schedule_independent() {
    let pattern = shifted_down(&permutation(8, 3));
    let mut modifier = permutation(8, 5);
    let mut distinct = generate(&pattern, &mut modifier, Execution::Parallel).unwrap();

    for s in [DistinctStrategy::Hashed, DistinctStrategy::Dense] {
        assert!(is_pairwise_distinct(&distinct, s, Execution::Sequential));
        assert!(is_pairwise_distinct(&distinct, s, Execution::Parallel));
    }

    // A duplicate placed at the far end of the buffer.
    let last = distinct.dim() - 1;
    distinct[(last, last)] = distinct[(0, 0)];
    for s in [DistinctStrategy::Hashed, DistinctStrategy::Dense] {
        assert!(!is_pairwise_distinct(&distinct, s, Execution::Sequential));
        assert!(!is_pairwise_distinct(&distinct, s, Execution::Parallel));
    }
}

/// Every value repeated exactly twice; each pair must be caught however the
/// workers interleave.
#[test]
fn paired_duplicates_are_never_missed() {
    let n = 64;
    let data: Vec<i64> = (0..(n * n) as i64).map(|i| i / 2).collect();
    let m = SquareMatrix::from_vec(n, data).unwrap();
    for _ in 0..20 {
        assert!(!is_pairwise_distinct(&m, DistinctStrategy::Hashed, Execution::Parallel));
        assert!(!is_pairwise_distinct(&m, DistinctStrategy::Dense, Execution::Parallel));
    }
}

// ─── full pipeline ───────────────────────────────────────────────────────────

#[test]
fn large_magic_square_on_dedicated_pool() {
    let pattern = doubly_even_magic(8);
    let modifier = shifted_down(&doubly_even_magic(8));
    assert!(MagicSquareChecker::default().is_magic_square(&pattern));

    let seq = Engine::new(EngineConfig::default()).unwrap();
    let par = Engine::new(EngineConfig {
        threads: Some(4),
        ..EngineConfig::parallel()
    })
    .unwrap();

    let a = seq.run(&pattern, &mut modifier.clone()).unwrap();
    let b = par.run(&pattern, &mut modifier.clone()).unwrap();

    let m = 64i64;
    assert_eq!(a.verdict, Verdict::Magic { magic_sum: m * (m * m + 1) / 2 });
    assert_eq!(a, b);
}
