//! Deterministic simulation-level RNG wrapper.
//!
//! The simulator itself is fully deterministic given its inputs; the only
//! randomized step is the seeded shuffle that places robots onto spawn
//! cells, which is what makes the run's `seed` an observable input.
//! Keeping all randomness behind one seeded `SmallRng` means the same seed
//! always produces identical placements and therefore identical runs.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Simulation-level RNG for global operations (robot placement, scenario
/// generation in test fixtures).
///
/// Used only in single-threaded contexts; per-scenario sweeps give each run
/// its own `SimRng` built from that run's seed.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
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

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }
}
