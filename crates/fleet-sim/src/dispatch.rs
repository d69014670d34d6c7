//! Assignment policy: pairing idle robots with pending orders.
//!
//! The scheduler calls assignment through the [`DispatchPolicy`] trait so
//! alternative strategies (batching, regret-based auctioning) can be
//! swapped in without touching the tick loop.  The default
//! [`NearestShelfDispatch`] is a deliberate local heuristic — globally
//! optimal assignment is out of scope.

use rustc_hash::FxHashSet;

use fleet_core::{Cell, OrderId, ShelfId};
use fleet_scenario::{Order, Shelf};

use crate::queue::OrderQueue;

/// Pluggable order-assignment policy.
///
/// Implementations must be deterministic: for identical inputs the same
/// order must be chosen, or the whole run stops being reproducible.
pub trait DispatchPolicy: Send + Sync {
    /// Choose a pending order for an idle robot at `robot_cell`, or `None`
    /// to leave the robot idle this tick.
    ///
    /// `engaged` holds the shelves already claimed by in-flight orders;
    /// orders for those shelves must be skipped until the shelf is back on
    /// its anchor.  The chosen order stays queued; the scheduler removes it
    /// only once the pathfinder confirms the assignment.
    fn select(
        &self,
        robot_cell: Cell,
        queue: &OrderQueue,
        orders: &[Order],
        shelves: &[Shelf],
        engaged: &FxHashSet<ShelfId>,
    ) -> Option<OrderId>;
}

/// Nearest-first: the pending order whose shelf anchor minimizes Manhattan
/// distance from the robot, ties broken by lower order id.
pub struct NearestShelfDispatch;

impl DispatchPolicy for NearestShelfDispatch {
    fn select(
        &self,
        robot_cell: Cell,
        queue: &OrderQueue,
        orders: &[Order],
        shelves: &[Shelf],
        engaged: &FxHashSet<ShelfId>,
    ) -> Option<OrderId> {
        queue
            .iter()
            .filter(|id| !engaged.contains(&orders[id.index()].shelf_id))
            .min_by_key(|&id| {
                let order = &orders[id.index()];
                let anchor = shelves[order.shelf_id.index()].anchor();
                (robot_cell.manhattan(anchor), id)
            })
    }
}
