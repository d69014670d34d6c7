//! Plain domain records mapping 1:1 onto the JSON artifacts.
//!
//! All cross-references are integer ids into flat arrays (`shelves[id]`,
//! `stations[id]`), so the loader requires ids to be dense `0..len` —
//! validated in [`Scenario::load`][crate::Scenario::load].

use serde::{Deserialize, Serialize};

use fleet_core::{Cell, OrderId, ShelfId, StationId, Tick};

/// A storage shelf at its anchor cell.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Shelf {
    pub id: ShelfId,
    pub row: u32,
    pub col: u32,
}

impl Shelf {
    /// The anchor cell the shelf sits on (and is returned to).
    #[inline]
    pub fn anchor(&self) -> Cell {
        Cell::new(self.row, self.col)
    }
}

/// A consolidation station on the layout border.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub row: u32,
    pub col: u32,
}

impl Station {
    #[inline]
    pub fn cell(&self) -> Cell {
        Cell::new(self.row, self.col)
    }
}

/// One spawn cell from `spawn.json`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SpawnCell {
    pub row: u32,
    pub col: u32,
}

impl SpawnCell {
    #[inline]
    pub fn cell(&self) -> Cell {
        Cell::new(self.row, self.col)
    }
}

/// A timed pick order: bring `shelf_id` to `station_id`, then put it back.
///
/// Immutable once created; the simulator only reads these.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Creation tick: the order enters the queue once the clock reaches it.
    pub tick: Tick,
    pub shelf_id: ShelfId,
    pub station_id: StationId,
}
