//! Scenario execution: load → simulate → write metrics.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use fleet_core::SimConfig;
use fleet_grid::AStarPlanner;
use fleet_output::write_report;
use fleet_scenario::Scenario;
use fleet_sim::{MetricsReport, NearestShelfDispatch, NoopObserver, SimBuilder, SimObserver};

use crate::BenchResult;

/// Run one benchmark scenario end to end.
///
/// Reads the artifacts from `scenario_dir`, simulates `config.horizon_ticks`
/// ticks, writes `metrics.json` and the heatmap arrays back into
/// `scenario_dir`, and returns the report.  Identical inputs produce
/// byte-identical outputs.
pub fn run_scenario(scenario_dir: &Path, config: &SimConfig) -> BenchResult<MetricsReport> {
    run_scenario_with(scenario_dir, config, &mut NoopObserver)
}

/// Like [`run_scenario`], with observer hooks (progress reporting, tick
/// tracing) invoked at every tick boundary.
pub fn run_scenario_with<O: SimObserver>(
    scenario_dir: &Path,
    config: &SimConfig,
    observer: &mut O,
) -> BenchResult<MetricsReport> {
    let scenario = Scenario::load(scenario_dir)?;
    let mut sim =
        SimBuilder::new(config.clone(), scenario, AStarPlanner, NearestShelfDispatch).build()?;
    sim.run(observer);
    let (report, heatmaps) = sim.finalize();
    write_report(scenario_dir, &report, &heatmaps)?;
    Ok(report)
}

/// One entry of a parameter sweep: a scenario directory plus its run
/// configuration.
#[derive(Clone, Debug)]
pub struct SweepJob {
    pub scenario_dir: PathBuf,
    pub config: SimConfig,
}

/// Run independent scenarios in parallel, one rayon task per job.
///
/// Results come back in job order.  Each job is a full [`run_scenario`];
/// the runs share nothing, so this is embarrassingly parallel.
pub fn run_sweep(jobs: &[SweepJob]) -> Vec<BenchResult<MetricsReport>> {
    jobs.par_iter()
        .map(|job| run_scenario(&job.scenario_dir, &job.config))
        .collect()
}
