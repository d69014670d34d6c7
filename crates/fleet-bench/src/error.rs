use thiserror::Error;

use fleet_output::OutputError;
use fleet_scenario::ScenarioError;
use fleet_sim::SimError;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    #[error("simulation error: {0}")]
    Sim(#[from] SimError),

    #[error("output error: {0}")]
    Output(#[from] OutputError),
}

pub type BenchResult<T> = Result<T, BenchError>;
