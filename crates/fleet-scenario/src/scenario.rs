//! The validated in-memory scenario.

use std::path::Path;

use rustc_hash::FxHashSet;

use fleet_core::{Cell, CoreError, CoreResult, OrderId, ShelfId, StationId};
use fleet_grid::{CellKind, Grid};

use crate::files::{
    ORDERS_FILE, SHELVES_FILE, SPAWN_FILE, STATIONS_FILE, load_json, load_layout, save_json,
    save_layout,
};
use crate::model::{Order, Shelf, SpawnCell, Station};
use crate::{ScenarioError, ScenarioResult};

/// All simulation inputs for one benchmark run, loaded and cross-validated.
///
/// `shelves`, `stations`, and `orders` are flat arenas indexed by their
/// dense ids; every cross-reference between them is an id, never a pointer.
#[derive(Debug)]
pub struct Scenario {
    pub grid: Grid,
    pub shelves: Vec<Shelf>,
    pub stations: Vec<Station>,
    pub spawns: Vec<Cell>,
    pub orders: Vec<Order>,
}

impl Scenario {
    /// Load and validate the five artifacts from `dir`.
    ///
    /// Any inconsistency — mismatched grid dimensions, out-of-bounds or
    /// mistyped cells, duplicate ids, dangling order references, or a
    /// station cut off from the spawn area — is fatal here, before a
    /// single tick runs.
    pub fn load(dir: &Path) -> ScenarioResult<Scenario> {
        let (width, height, codes) = load_layout(dir)?;
        let grid = Grid::from_codes(width, height, &codes)?;

        let shelves: Vec<Shelf> = load_json(dir, SHELVES_FILE)?;
        let stations: Vec<Station> = load_json(dir, STATIONS_FILE)?;
        let spawn_cells: Vec<SpawnCell> = load_json(dir, SPAWN_FILE)?;
        let orders: Vec<Order> = load_json(dir, ORDERS_FILE)?;

        let scenario = Scenario {
            grid,
            shelves,
            stations,
            spawns: spawn_cells.iter().map(SpawnCell::cell).collect(),
            orders,
        };
        scenario.validate()?;
        Ok(scenario)
    }

    /// Write the five artifacts into `dir` (which must exist).
    ///
    /// Round-trip counterpart of [`load`][Self::load], used by tests and by
    /// scenario-authoring tools.
    pub fn save(&self, dir: &Path) -> ScenarioResult<()> {
        let codes: Vec<u8> = (0..self.grid.height())
            .flat_map(|row| {
                (0..self.grid.width()).map(move |col| (row, col))
            })
            .map(|(row, col)| self.grid.kind(Cell::new(row, col)).code())
            .collect();
        save_layout(dir, self.grid.width(), &codes)?;
        save_json(dir, SHELVES_FILE, &self.shelves)?;
        save_json(dir, STATIONS_FILE, &self.stations)?;
        let spawn_cells: Vec<SpawnCell> = self
            .spawns
            .iter()
            .map(|c| SpawnCell {
                row: c.row,
                col: c.col,
            })
            .collect();
        save_json(dir, SPAWN_FILE, &spawn_cells)?;
        save_json(dir, ORDERS_FILE, &self.orders)
    }

    // ── Validation ────────────────────────────────────────────────────────

    fn validate(&self) -> ScenarioResult<()> {
        self.validate_shelves()?;
        self.validate_stations()?;
        self.validate_spawns()?;
        self.validate_orders()?;
        self.validate_connectivity()
    }

    fn expect_kind(&self, file: &str, field: &str, cell: Cell, kind: CellKind) -> ScenarioResult<()> {
        if !self.grid.in_bounds(cell) {
            return Err(ScenarioError::invalid(
                file,
                field,
                format!("cell {cell} is outside the {}x{} grid", self.grid.width(), self.grid.height()),
            ));
        }
        if self.grid.kind(cell) != kind {
            return Err(ScenarioError::invalid(
                file,
                field,
                format!("cell {cell} carries layout code {}, expected {}", self.grid.kind(cell).code(), kind.code()),
            ));
        }
        Ok(())
    }

    fn validate_shelves(&self) -> ScenarioResult<()> {
        let mut anchors: FxHashSet<Cell> = FxHashSet::default();
        for (i, shelf) in self.shelves.iter().enumerate() {
            if shelf.id.index() != i {
                return Err(ScenarioError::invalid(
                    SHELVES_FILE,
                    "id",
                    format!("expected dense id {i}, found {}", shelf.id),
                ));
            }
            self.expect_kind(SHELVES_FILE, "row/col", shelf.anchor(), CellKind::Shelf)?;
            if !anchors.insert(shelf.anchor()) {
                return Err(ScenarioError::invalid(
                    SHELVES_FILE,
                    "row/col",
                    format!("duplicate anchor cell {}", shelf.anchor()),
                ));
            }
        }
        Ok(())
    }

    fn validate_stations(&self) -> ScenarioResult<()> {
        let mut cells: FxHashSet<Cell> = FxHashSet::default();
        for (i, station) in self.stations.iter().enumerate() {
            if station.id.index() != i {
                return Err(ScenarioError::invalid(
                    STATIONS_FILE,
                    "id",
                    format!("expected dense id {i}, found {}", station.id),
                ));
            }
            self.expect_kind(STATIONS_FILE, "row/col", station.cell(), CellKind::Station)?;
            if !cells.insert(station.cell()) {
                return Err(ScenarioError::invalid(
                    STATIONS_FILE,
                    "row/col",
                    format!("duplicate station cell {}", station.cell()),
                ));
            }
        }
        Ok(())
    }

    fn validate_spawns(&self) -> ScenarioResult<()> {
        if self.spawns.is_empty() {
            return Err(ScenarioError::invalid(SPAWN_FILE, "cells", "no spawn cells"));
        }
        let mut cells: FxHashSet<Cell> = FxHashSet::default();
        for &spawn in &self.spawns {
            self.expect_kind(SPAWN_FILE, "row/col", spawn, CellKind::Spawn)?;
            if !cells.insert(spawn) {
                return Err(ScenarioError::invalid(
                    SPAWN_FILE,
                    "row/col",
                    format!("duplicate spawn cell {spawn}"),
                ));
            }
        }
        Ok(())
    }

    fn validate_orders(&self) -> ScenarioResult<()> {
        for (i, order) in self.orders.iter().enumerate() {
            if order.id.index() != i {
                return Err(ScenarioError::invalid(
                    ORDERS_FILE,
                    "id",
                    format!("expected dense id {i}, found {}", order.id),
                ));
            }
            self.shelf(order.shelf_id).map_err(|e| {
                ScenarioError::invalid(ORDERS_FILE, "shelf_id", format!("{}: {e}", order.id))
            })?;
            self.station(order.station_id).map_err(|e| {
                ScenarioError::invalid(ORDERS_FILE, "station_id", format!("{}: {e}", order.id))
            })?;
        }
        Ok(())
    }

    /// All spawn cells and all station cells must share one traversable
    /// component.  Shelf anchors are deliberately exempt: a walled-off
    /// shelf makes its orders unreachable (a recoverable condition), not
    /// the scenario invalid.
    fn validate_connectivity(&self) -> ScenarioResult<()> {
        let component = self.grid.reachable_from(&self.spawns[..1]);
        for &spawn in &self.spawns {
            if !component.contains(self.grid.index(spawn)) {
                return Err(ScenarioError::Unreachable {
                    what: "spawn cell".to_string(),
                    cell: spawn,
                });
            }
        }
        for station in &self.stations {
            if !component.contains(self.grid.index(station.cell())) {
                return Err(ScenarioError::Unreachable {
                    what: station.id.to_string(),
                    cell: station.cell(),
                });
            }
        }
        Ok(())
    }

    // ── Convenience accessors ─────────────────────────────────────────────

    /// Look up a shelf by id.
    pub fn shelf(&self, id: ShelfId) -> CoreResult<&Shelf> {
        self.shelves.get(id.index()).ok_or(CoreError::ShelfNotFound(id))
    }

    /// Look up a station by id.
    pub fn station(&self, id: StationId) -> CoreResult<&Station> {
        self.stations
            .get(id.index())
            .ok_or(CoreError::StationNotFound(id))
    }

    /// Order ids in intake order: ascending creation tick, ties by id.
    pub fn intake_sequence(&self) -> Vec<OrderId> {
        let mut ids: Vec<OrderId> = self.orders.iter().map(|o| o.id).collect();
        ids.sort_by_key(|id| (self.orders[id.index()].tick, *id));
        ids
    }
}
