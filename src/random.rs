//! Seedable random source shared by every stochastic operation.
//!
//! All randomness flows from one generator that the caller owns, so a
//! fixed seed reproduces a run exactly.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic generator from `seed`.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from fresh entropy when `None`.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}
