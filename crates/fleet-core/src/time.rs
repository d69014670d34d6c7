//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter advanced by exactly one
//! per scheduler step.  There is no wall-clock mapping: the simulator is a
//! pure function of its inputs, and integer ticks keep all schedule
//! arithmetic exact.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
///
/// Stored as `u64`: even at one tick per simulated second a benchmark run
/// never gets near the limit.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Together with the scenario artifacts this tuple fully determines a run:
/// identical (scenario, seed, robot_count, horizon_ticks) inputs produce
/// byte-identical metrics.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Master RNG seed.  Drives robot → spawn-cell placement.
    pub seed: u64,

    /// Number of robots in the fleet.  Must not exceed the scenario's
    /// spawn-cell count.
    pub robot_count: u32,

    /// Total ticks to simulate (exclusive upper bound on the tick counter).
    pub horizon_ticks: u64,

    /// Call the observer's snapshot hook every N ticks.  0 disables
    /// snapshots entirely; 1 snapshots every tick.
    pub snapshot_interval_ticks: u64,
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.horizon_ticks)
    }
}
