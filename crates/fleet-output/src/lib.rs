//! `fleet-output` — benchmark artifact writers.
//!
//! Two output surfaces:
//!
//! - [`write_report`]: the end-of-run artifacts — `metrics.json` plus the
//!   three dense heatmap CSVs it references — written into the scenario
//!   directory for the external renderers.
//! - [`TickTraceWriter`]: an optional [`SimObserver`][fleet_sim::SimObserver]
//!   that streams one CSV row per tick (moved/waited/pending/completed),
//!   feeding time-series plots.
//!
//! Observer hooks return nothing, so the trace writer stores its first
//! write error internally; check [`TickTraceWriter::take_error`] after
//! `sim.run()` returns.

pub mod error;
pub mod report;
pub mod trace;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{OutputError, OutputResult};
pub use report::{METRICS_FILE, write_report};
pub use trace::TickTraceWriter;
