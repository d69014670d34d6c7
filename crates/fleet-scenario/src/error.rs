//! Scenario-loading error type.
//!
//! Malformed input is fatal at init; every variant names the artifact file
//! (and where sensible the field) so the caller's error report points at
//! the offending input, not at simulator internals.

use thiserror::Error;

use fleet_core::Cell;
use fleet_grid::GridError;

/// Errors produced while loading or validating a scenario directory.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("{file}: I/O error: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}: parse error: {detail}")]
    Parse { file: String, detail: String },

    #[error("{file}: invalid `{field}`: {detail}")]
    Invalid {
        file: String,
        field: String,
        detail: String,
    },

    #[error("required cell {cell} ({what}) is unreachable from the spawn area")]
    Unreachable { what: String, cell: Cell },

    #[error("layout error: {0}")]
    Grid(#[from] GridError),
}

impl ScenarioError {
    /// Attach an artifact file name to an I/O error.
    pub fn io(file: &str, source: std::io::Error) -> Self {
        ScenarioError::Io {
            file: file.to_string(),
            source,
        }
    }

    pub fn parse(file: &str, detail: impl Into<String>) -> Self {
        ScenarioError::Parse {
            file: file.to_string(),
            detail: detail.into(),
        }
    }

    pub fn invalid(file: &str, field: &str, detail: impl Into<String>) -> Self {
        ScenarioError::Invalid {
            file: file.to_string(),
            field: field.to_string(),
            detail: detail.into(),
        }
    }
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;
