//! Round-trip and validation tests for the scenario artifacts.

use fleet_core::{Cell, OrderId, ShelfId, StationId, Tick};

use crate::files::load_layout_reader;
use crate::{Order, Scenario, ScenarioError, Shelf, SpawnCell, Station};

// ── Fixtures ──────────────────────────────────────────────────────────────────

/// 4×4 world: spawn NW corner, shelf center, station on the south border.
///
/// ```text
/// P . . .
/// . S . .
/// . . . .
/// . . T .
/// ```
fn small_scenario() -> Scenario {
    let codes = [
        3, 0, 0, 0, //
        0, 1, 0, 0, //
        0, 0, 0, 0, //
        0, 0, 2, 0,
    ];
    Scenario {
        grid: fleet_grid::Grid::from_codes(4, 4, &codes).unwrap(),
        shelves: vec![Shelf { id: ShelfId(0), row: 1, col: 1 }],
        stations: vec![Station { id: StationId(0), row: 3, col: 2 }],
        spawns: vec![Cell::new(0, 0)],
        orders: vec![Order {
            id: OrderId(0),
            tick: Tick(0),
            shelf_id: ShelfId(0),
            station_id: StationId(0),
        }],
    }
}

// ── Layout CSV ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod layout {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_dimensions_and_codes() {
        let (w, h, codes) = load_layout_reader(Cursor::new("0,1,2\n3,4,0\n")).unwrap();
        assert_eq!((w, h), (3, 2));
        assert_eq!(codes, vec![0, 1, 2, 3, 4, 0]);
    }

    #[test]
    fn ragged_rows_are_invalid() {
        let err = load_layout_reader(Cursor::new("0,0,0\n0,0\n")).unwrap_err();
        assert!(matches!(err, ScenarioError::Invalid { .. }), "{err}");
    }

    #[test]
    fn non_numeric_cell_is_a_parse_error() {
        let err = load_layout_reader(Cursor::new("0,x\n")).unwrap_err();
        assert!(matches!(err, ScenarioError::Parse { .. }), "{err}");
    }

    #[test]
    fn empty_layout_is_invalid() {
        assert!(load_layout_reader(Cursor::new("")).is_err());
    }
}

// ── Directory round-trip ──────────────────────────────────────────────────────

#[cfg(test)]
mod roundtrip {
    use super::*;

    #[test]
    fn save_then_load_preserves_everything() {
        let dir = tempfile::tempdir().unwrap();
        let original = small_scenario();
        original.save(dir.path()).unwrap();

        let loaded = Scenario::load(dir.path()).unwrap();
        assert_eq!(loaded.grid.width(), 4);
        assert_eq!(loaded.grid.height(), 4);
        assert_eq!(loaded.shelves, original.shelves);
        assert_eq!(loaded.stations, original.stations);
        assert_eq!(loaded.spawns, original.spawns);
        assert_eq!(loaded.orders, original.orders);
    }

    #[test]
    fn missing_artifact_reports_the_file() {
        let dir = tempfile::tempdir().unwrap();
        small_scenario().save(dir.path()).unwrap();
        std::fs::remove_file(dir.path().join("orders.json")).unwrap();

        let err = Scenario::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("orders.json"), "{err}");
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod validation {
    use super::*;

    fn load_mutated(mutate: impl FnOnce(&mut Scenario)) -> Result<Scenario, ScenarioError> {
        let dir = tempfile::tempdir().unwrap();
        let mut scenario = small_scenario();
        mutate(&mut scenario);
        scenario.save(dir.path()).unwrap();
        Scenario::load(dir.path())
    }

    #[test]
    fn valid_scenario_loads() {
        assert!(load_mutated(|_| {}).is_ok());
    }

    #[test]
    fn shelf_on_wrong_cell_kind_is_invalid() {
        let err = load_mutated(|s| s.shelves[0].row = 2).unwrap_err();
        assert!(err.to_string().contains("shelves.json"), "{err}");
    }

    #[test]
    fn out_of_bounds_station_is_invalid() {
        let err = load_mutated(|s| s.stations[0].col = 40).unwrap_err();
        assert!(err.to_string().contains("stations.json"), "{err}");
    }

    #[test]
    fn non_dense_order_ids_are_invalid() {
        let err = load_mutated(|s| s.orders[0].id = OrderId(7)).unwrap_err();
        assert!(err.to_string().contains("orders.json"), "{err}");
    }

    #[test]
    fn dangling_shelf_reference_is_invalid() {
        let err = load_mutated(|s| s.orders[0].shelf_id = ShelfId(9)).unwrap_err();
        assert!(err.to_string().contains("shelf_id"), "{err}");
    }

    #[test]
    fn walled_off_station_is_unreachable() {
        let dir = tempfile::tempdir().unwrap();
        // Station in the SE corner sealed behind obstacles.
        let codes = [
            3, 0, 0, 0, //
            0, 1, 0, 0, //
            0, 0, 4, 4, //
            0, 0, 4, 2,
        ];
        let mut scenario = small_scenario();
        scenario.grid = fleet_grid::Grid::from_codes(4, 4, &codes).unwrap();
        scenario.stations[0] = Station { id: StationId(0), row: 3, col: 3 };
        scenario.save(dir.path()).unwrap();

        let err = Scenario::load(dir.path()).unwrap_err();
        assert!(matches!(err, ScenarioError::Unreachable { .. }), "{err}");
    }

    #[test]
    fn walled_off_shelf_is_allowed() {
        // A sealed shelf yields unreachable orders at run time, not a
        // malformed scenario.
        let dir = tempfile::tempdir().unwrap();
        let codes = [
            3, 0, 0, 0, //
            0, 4, 4, 0, //
            0, 4, 1, 4, //
            0, 2, 4, 4,
        ];
        let mut scenario = small_scenario();
        scenario.grid = fleet_grid::Grid::from_codes(4, 4, &codes).unwrap();
        scenario.shelves[0] = Shelf { id: ShelfId(0), row: 2, col: 2 };
        scenario.stations[0] = Station { id: StationId(0), row: 3, col: 1 };
        scenario.save(dir.path()).unwrap();
        assert!(Scenario::load(dir.path()).is_ok());
    }

    #[test]
    fn spawn_roundtrips_through_record_type() {
        let s = SpawnCell { row: 3, col: 7 };
        assert_eq!(s.cell(), Cell::new(3, 7));
    }

    #[test]
    fn lookup_helpers_reject_unknown_ids() {
        let s = small_scenario();
        assert!(s.shelf(ShelfId(0)).is_ok());
        assert!(s.shelf(ShelfId(9)).is_err());
        assert!(s.station(StationId(0)).is_ok());
        assert!(s.station(StationId(4)).is_err());
    }

    #[test]
    fn intake_sequence_sorts_by_tick_then_id() {
        let mut scenario = small_scenario();
        scenario.orders = vec![
            Order { id: OrderId(0), tick: Tick(5), shelf_id: ShelfId(0), station_id: StationId(0) },
            Order { id: OrderId(1), tick: Tick(0), shelf_id: ShelfId(0), station_id: StationId(0) },
            Order { id: OrderId(2), tick: Tick(5), shelf_id: ShelfId(0), station_id: StationId(0) },
        ];
        assert_eq!(
            scenario.intake_sequence(),
            vec![OrderId(1), OrderId(0), OrderId(2)]
        );
    }
}
