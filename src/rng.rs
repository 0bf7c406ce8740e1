//! Independent random streams for sweep workers.
//!
//! Each worker owns its own generator. Seeds are derived from a run-wide
//! base seed and the worker id, so two workers never replay the same
//! sample paths and a whole run can be reproduced from its base seed.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Generator owned by a single worker.
pub type WorkerRng = StdRng;

/// SplitMix64 finalizer.
fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Seed of worker `worker_id` for a run started with `base_seed`.
pub fn derive_worker_seed(base_seed: u64, worker_id: usize) -> u64 {
    mix64(base_seed ^ mix64((worker_id as u64).wrapping_add(0x9E37_79B9_7F4A_7C15)))
}

pub fn worker_rng(base_seed: u64, worker_id: usize) -> WorkerRng {
    StdRng::seed_from_u64(derive_worker_seed(base_seed, worker_id))
}
