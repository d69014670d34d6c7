//! `fleet-sim` — tick loop orchestrator for the fleet warehouse simulator.
//!
//! # Eight-step tick loop
//!
//! ```text
//! for tick in 0..config.horizon_ticks:
//!   ① Intake      — orders whose creation tick has arrived join the queue.
//!   ② Dispatch    — idle robots (ascending id) pair with the nearest
//!                   pending order; commit only if a route exists.
//!   ③ Plan        — robots with no plan get a fresh route; robots blocked
//!                   last tick replan around the other robots' cells.
//!   ④ Move        — ascending id: book the next cell in the reservation
//!                   table and advance, or wait in place and defend the
//!                   current cell.
//!   ⑤ Transitions — arrival at the phase goal advances the pickup /
//!                   deliver / return cycle.
//!   ⑥ Deadlock    — a tick where no active robot made progress is counted.
//!   ⑦ Purge       — reservations for past ticks are released.
//!   ⑧ Advance     — the tick counter increments by one.
//! ```
//!
//! Robots with lower ids win every contested booking; together with the
//! deterministic planner and dispatcher this makes a run a pure function of
//! (scenario, seed, robot count, horizon).
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fleet_grid::AStarPlanner;
//! use fleet_sim::{NearestShelfDispatch, NoopObserver, SimBuilder};
//!
//! let scenario = fleet_scenario::Scenario::load(dir)?;
//! let mut sim = SimBuilder::new(config, scenario, AStarPlanner, NearestShelfDispatch)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! let (report, heatmaps) = sim.finalize();
//! ```

pub mod builder;
pub mod dispatch;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod queue;
pub mod robot;
pub mod sim;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::SimBuilder;
pub use dispatch::{DispatchPolicy, NearestShelfDispatch};
pub use error::{SimError, SimResult};
pub use metrics::{Heatmaps, MetricsCollector, MetricsReport};
pub use observer::{NoopObserver, SimObserver};
pub use queue::OrderQueue;
pub use robot::{Phase, Robot, RobotStats};
pub use sim::{Sim, TickSummary};
