//! Deterministic tie-break shuffle.
//!
//! Every function here re-seeds its generator from the caller's seed, so
//! the result is a pure function of `(seed, length)`: identical runs of
//! the whole pipeline produce identical output. The trade-off is that
//! call sites sharing one seed are not statistically independent of each
//! other. Reproducing prior output requires keeping both the seed and
//! this re-seeding behavior intact.
//!
//! # Reference
//! Knuth (1997), "The Art of Computer Programming", Vol. 2, §3.4.2,
//! Algorithm P (Fisher–Yates)

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Seed used by the stock allocation pipeline.
pub const DEFAULT_SEED: u64 = 100;

/// Returns a permutation of `0..len` determined entirely by `(seed, len)`.
///
/// Same arguments → identical permutation on every run. The same seed
/// with a different `len` produces a differently-shaped permutation, not
/// a truncation or an extension of the shorter one.
pub fn permutation(seed: u64, len: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    let mut rng = SmallRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    indices
}

/// Shuffles `items` in place, determined entirely by `(seed, items.len())`.
pub fn shuffle<T>(items: &mut [T], seed: u64) {
    let mut rng = SmallRng::seed_from_u64(seed);
    items.shuffle(&mut rng);
}

/// Orders scored names best-first, breaking equal scores with the seeded
/// shuffle. Lower score = better liked.
///
/// Entries are shuffled, then stable-sorted by score, so equal-score
/// entries land in shuffled order while the score ordering itself is
/// exact.
pub fn tie_broken_ranking(scored: &[(String, i32)], seed: u64) -> Vec<String> {
    let mut entries = scored.to_vec();
    shuffle(&mut entries, seed);
    entries.sort_by_key(|&(_, score)| score);
    entries.into_iter().map(|(name, _)| name).collect()
}
