//! Simulation observer trait for progress reporting and data collection.

use fleet_core::{OrderId, Tick};

use crate::robot::Robot;
use crate::sim::TickSummary;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
///         if tick.0 % self.interval == 0 {
///             println!("{tick}: {} moved, {} pending", summary.moved, summary.pending_orders);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with that tick's summary.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// Called when an order's return leg finishes — the shelf is back on
    /// its anchor and the robot goes idle.  Fires in the tick the
    /// transition happens, before `on_tick_end`.
    fn on_order_completed(&mut self, _tick: Tick, _order: OrderId) {}

    /// Called at snapshot intervals (every `config.snapshot_interval_ticks`
    /// ticks) with read-only access to the whole fleet, so output writers
    /// can record positions without the sim knowing about formats.
    fn on_snapshot(&mut self, _tick: Tick, _robots: &[Robot]) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run`
/// but don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
