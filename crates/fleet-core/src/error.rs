//! Cross-reference error type.
//!
//! Shelf and station ids are positions into the scenario's flat arenas; a
//! lookup with an id the arenas don't cover fails with `CoreError`.
//! Sub-crates either bubble it up wrapped as one of their own variants
//! (`SimError`) or fold it into their structured reports (`ScenarioError`).

use thiserror::Error;

use crate::{ShelfId, StationId};

/// A dangling arena reference.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{0} is not defined by the scenario")]
    ShelfNotFound(ShelfId),

    #[error("{0} is not defined by the scenario")]
    StationNotFound(StationId),
}

/// Shorthand result type for arena lookups.
pub type CoreResult<T> = Result<T, CoreError>;
