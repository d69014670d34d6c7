//! `fleet-bench` — the benchmark's programmatic invocation surface.
//!
//! [`run_scenario`] is the whole contract: point it at a scenario
//! directory with a [`SimConfig`], and it loads the artifacts, runs the
//! simulation to the horizon, and writes `metrics.json` plus the heatmap
//! arrays back into the same directory.  Binary front-ends map the
//! returned error to a non-zero exit code; the core itself reads no
//! environment variables.
//!
//! [`run_sweep`] executes independent scenario runs in parallel on rayon —
//! the one place parallelism is allowed, a layer above the strictly
//! sequential core.

pub mod error;
pub mod run;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{BenchError, BenchResult};
pub use run::{SweepJob, run_scenario, run_scenario_with, run_sweep};
