//! `fleet-scenario` — the file contracts between the core and its external
//! collaborators.
//!
//! A scenario is a directory of five input artifacts written by the layout
//! and order generators:
//!
//! | File            | Format | Contents                                   |
//! |-----------------|--------|--------------------------------------------|
//! | `layout.csv`    | CSV    | dense H×W grid of cell-type codes 0..=4    |
//! | `shelves.json`  | JSON   | `[{id, row, col}, …]`                      |
//! | `stations.json` | JSON   | `[{id, row, col}, …]`                      |
//! | `spawn.json`    | JSON   | `[{row, col}, …]`                          |
//! | `orders.json`   | JSON   | `[{id, tick, shelf_id, station_id}, …]`    |
//!
//! [`Scenario::load`] reads and cross-validates all five; every
//! inconsistency is fatal at init and reported with the offending file and
//! field.  [`Scenario::save`] writes the same artifacts, giving tests and
//! generators one round-trip point for the contract.

pub mod error;
pub mod files;
pub mod model;
pub mod scenario;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{ScenarioError, ScenarioResult};
pub use model::{Order, Shelf, SpawnCell, Station};
pub use scenario::Scenario;
