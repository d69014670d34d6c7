//! `fleet-core` — foundational types for the fleet warehouse simulator.
//!
//! This crate is a dependency of every other `fleet-*` crate.  It
//! intentionally has no `fleet-*` dependencies and minimal external ones
//! (only `rand` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `RobotId`, `ShelfId`, `StationId`, `OrderId`          |
//! | [`cell`]        | `Cell`, Manhattan distance                            |
//! | [`time`]        | `Tick`, `SimConfig`                                   |
//! | [`rng`]         | `SimRng` (deterministic, seed-driven)                 |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by `fleet-scenario`.                              |

pub mod cell;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::Cell;
pub use error::{CoreError, CoreResult};
pub use ids::{OrderId, RobotId, ShelfId, StationId};
pub use rng::SimRng;
pub use time::{SimConfig, Tick};
