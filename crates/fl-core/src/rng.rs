//! Deterministic per-flow RNG wrapper.
//!
//! # Determinism strategy
//!
//! Each flow record gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (record_index * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive record indices uniformly across the seed space.
//! This means:
//!
//! - Records never share RNG state, so they can be sampled in any order (or
//!   in parallel) and still produce the same timetable.
//! - Appending records to a flow table does not disturb the trips drawn for
//!   the existing ones.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── FlowRng ───────────────────────────────────────────────────────────────────

/// Per-flow-record deterministic RNG.
pub struct FlowRng(SmallRng);

impl FlowRng {
    /// Seed deterministically from the run's global seed and a record index.
    pub fn new(global_seed: u64, record: usize) -> Self {
        let seed = global_seed ^ (record as u64).wrapping_mul(MIXING_CONSTANT);
        FlowRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types
    /// (`rng.inner().sample(...)`, etc.)
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
