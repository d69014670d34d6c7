use fleet_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("fleet of {robots} robots exceeds the {spawns} available spawn cells")]
    FleetTooLarge { robots: u32, spawns: usize },

    #[error("order cross-reference: {0}")]
    DanglingReference(#[from] CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
