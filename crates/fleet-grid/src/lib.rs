//! `fleet-grid` — spatial model of the warehouse floor.
//!
//! Three pieces:
//!
//! - [`Grid`]: the immutable static obstacle map with cell-type
//!   classification and 4-connected adjacency.
//! - [`Planner`] / [`AStarPlanner`]: pluggable pathfinding over the grid.
//!   The simulator calls planning through the trait so alternative
//!   strategies can be swapped without touching the scheduler.
//! - [`ReservationTable`]: spatio-temporal (cell, tick) bookings that
//!   prevent vertex and edge (swap) conflicts between robots.
//!
//! Planning is purely spatial: the pathfinder never reads the reservation
//! table.  Temporal conflicts are resolved one tick at a time by the
//! scheduler, which waits or replans when a booking is refused.

pub mod astar;
pub mod error;
pub mod grid;
pub mod reservation;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use astar::{AStarPlanner, PlanContext, Planner};
pub use error::{GridError, GridResult};
pub use grid::{CellKind, CellSet, Grid};
pub use reservation::ReservationTable;
