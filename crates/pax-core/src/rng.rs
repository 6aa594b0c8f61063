//! Deterministic simulation RNG.
//!
//! The only random decision in the engine is breaking ties between equally
//! near hold rooms when a flight is assigned its room.  The generator is
//! seeded from [`EngineConfig::seed`][crate::EngineConfig::seed] and owned by
//! the engine builder, so two engines built from the same seed make the same
//! choices and tests stay reproducible.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Seeded `SmallRng` wrapper for single-threaded simulation decisions.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.0)
    }
}
