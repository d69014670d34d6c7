//! Unit tests for the grid, the A\* planner, and the reservation table.

use rustc_hash::FxHashSet;

use fleet_core::{Cell, RobotId, Tick};

use crate::{AStarPlanner, CellKind, Grid, PlanContext, Planner, ReservationTable};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Build a grid from an ASCII picture: `.` free, `#` obstacle, `S` shelf,
/// `T` station, `P` spawn.
fn grid(rows: &[&str]) -> Grid {
    let height = rows.len() as u32;
    let width = rows[0].len() as u32;
    let codes: Vec<u8> = rows
        .iter()
        .flat_map(|r| r.bytes())
        .map(|b| match b {
            b'.' => 0,
            b'S' => 1,
            b'T' => 2,
            b'P' => 3,
            b'#' => 4,
            other => panic!("bad picture byte {other}"),
        })
        .collect();
    Grid::from_codes(width, height, &codes).unwrap()
}

fn plan(grid: &Grid, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
    let lifted = FxHashSet::default();
    let avoid = FxHashSet::default();
    AStarPlanner.plan(grid, start, goal, &PlanContext::new(&lifted, &avoid))
}

// ── Grid model ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod grid_model {
    use super::*;

    #[test]
    fn from_codes_rejects_bad_dimensions() {
        assert!(Grid::from_codes(3, 3, &[0; 8]).is_err());
    }

    #[test]
    fn from_codes_rejects_unknown_code() {
        let mut codes = vec![0u8; 9];
        codes[4] = 9;
        let err = Grid::from_codes(3, 3, &codes).unwrap_err();
        assert!(err.to_string().contains("(1, 1)"), "{err}");
    }

    #[test]
    fn kind_classification() {
        let g = grid(&[".S", "TP"]);
        assert_eq!(g.kind(Cell::new(0, 0)), CellKind::Free);
        assert_eq!(g.kind(Cell::new(0, 1)), CellKind::Shelf);
        assert_eq!(g.kind(Cell::new(1, 0)), CellKind::Station);
        assert_eq!(g.kind(Cell::new(1, 1)), CellKind::Spawn);
    }

    #[test]
    fn traversability() {
        let g = grid(&[".S", "#T"]);
        assert!(g.is_traversable(Cell::new(0, 0)));
        assert!(g.is_traversable(Cell::new(1, 1)));
        assert!(!g.is_traversable(Cell::new(0, 1))); // shelf
        assert!(!g.is_traversable(Cell::new(1, 0))); // obstacle
        assert!(!g.is_traversable(Cell::new(5, 5))); // out of bounds
    }

    #[test]
    fn neighbors_clipped_at_borders() {
        let g = grid(&["...", "...", "..."]);
        let corner: Vec<Cell> = g.neighbors4(Cell::new(0, 0)).collect();
        assert_eq!(corner, vec![Cell::new(0, 1), Cell::new(1, 0)]);
        let center: Vec<Cell> = g.neighbors4(Cell::new(1, 1)).collect();
        assert_eq!(center.len(), 4);
    }

    #[test]
    fn flood_fill_respects_walls() {
        let g = grid(&[".#.", ".#.", ".#."]);
        let seen = g.reachable_from(&[Cell::new(0, 0)]);
        assert!(seen.contains(g.index(Cell::new(2, 0))));
        assert!(!seen.contains(g.index(Cell::new(0, 2))));
    }
}

// ── A* planner ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod planner {
    use super::*;

    #[test]
    fn empty_grid_path_length_is_manhattan() {
        let g = grid(&["....."; 5]);
        for (a, b) in [
            (Cell::new(0, 0), Cell::new(4, 4)),
            (Cell::new(2, 1), Cell::new(0, 3)),
            (Cell::new(4, 0), Cell::new(0, 0)),
        ] {
            let path = plan(&g, a, b).unwrap();
            assert_eq!(path.len() as u32 - 1, a.manhattan(b));
            assert_eq!(*path.first().unwrap(), a);
            assert_eq!(*path.last().unwrap(), b);
        }
    }

    #[test]
    fn consecutive_cells_are_adjacent() {
        let g = grid(&[".....", ".###.", ".....", ".###.", "....."]);
        let path = plan(&g, Cell::new(0, 0), Cell::new(4, 4)).unwrap();
        for pair in path.windows(2) {
            assert!(pair[0].is_adjacent(pair[1]), "{} !~ {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn detours_around_walls() {
        let g = grid(&["...", ".#.", "..."]);
        let path = plan(&g, Cell::new(1, 0), Cell::new(1, 2)).unwrap();
        assert_eq!(path.len(), 5); // 2 straight-line steps become 4
        assert!(!path.contains(&Cell::new(1, 1)));
    }

    #[test]
    fn unreachable_goal_returns_none() {
        let g = grid(&["..#.", "..#.", "..#."]);
        assert!(plan(&g, Cell::new(0, 0), Cell::new(0, 3)).is_none());
    }

    #[test]
    fn trivial_plan_is_single_cell() {
        let g = grid(&[".."]);
        let c = Cell::new(0, 0);
        assert_eq!(plan(&g, c, c).unwrap(), vec![c]);
    }

    #[test]
    fn shelf_goal_is_admissible_but_not_passable() {
        // Shelf in the middle of a corridor: a robot may end there (its own
        // pickup target) but a path to the far side must not cut through.
        let g = grid(&["...", ".S.", "..."]);
        let anchor = Cell::new(1, 1);
        let to_shelf = plan(&g, Cell::new(0, 1), anchor).unwrap();
        assert_eq!(*to_shelf.last().unwrap(), anchor);
        let across = plan(&g, Cell::new(1, 0), Cell::new(1, 2)).unwrap();
        assert!(!across.contains(&anchor));
        assert_eq!(across.len(), 5);
    }

    #[test]
    fn lifted_shelf_opens_the_corridor() {
        let g = grid(&["#.#", "#S#", "#.#"]);
        let anchor = Cell::new(1, 1);
        assert!(plan(&g, Cell::new(0, 1), Cell::new(2, 1)).is_none());

        let mut lifted = FxHashSet::default();
        lifted.insert(anchor);
        let avoid = FxHashSet::default();
        let path = AStarPlanner
            .plan(&g, Cell::new(0, 1), Cell::new(2, 1), &PlanContext::new(&lifted, &avoid))
            .unwrap();
        assert!(path.contains(&anchor));
    }

    #[test]
    fn avoid_cells_force_a_detour_or_failure() {
        let g = grid(&["...", "...", "..."]);
        let mut avoid = FxHashSet::default();
        avoid.insert(Cell::new(0, 1));
        let lifted = FxHashSet::default();
        let ctx = PlanContext::new(&lifted, &avoid);

        let path = AStarPlanner
            .plan(&g, Cell::new(0, 0), Cell::new(0, 2), &ctx)
            .unwrap();
        assert!(!path.contains(&Cell::new(0, 1)));
        assert_eq!(path.len(), 5);

        // An avoided goal is unreachable outright.
        let blocked_goal = AStarPlanner.plan(&g, Cell::new(0, 0), Cell::new(0, 1), &ctx);
        assert!(blocked_goal.is_none());
    }

    #[test]
    fn identical_queries_return_identical_paths() {
        let g = grid(&[".....", ".#.#.", ".....", ".#.#.", "....."]);
        let a = plan(&g, Cell::new(0, 0), Cell::new(4, 4)).unwrap();
        let b = plan(&g, Cell::new(0, 0), Cell::new(4, 4)).unwrap();
        assert_eq!(a, b);
    }
}

// ── Reservation table ─────────────────────────────────────────────────────────

#[cfg(test)]
mod reservations {
    use super::*;

    const R0: RobotId = RobotId(0);
    const R1: RobotId = RobotId(1);

    #[test]
    fn vertex_booking_blocks_others() {
        let mut table = ReservationTable::new();
        let a = Cell::new(0, 0);
        let b = Cell::new(0, 1);
        assert!(table.reserve_move(a, b, Tick(5), R0));

        assert!(!table.can_reserve(b, Tick(6), R1));
        assert!(table.can_reserve(b, Tick(6), R0)); // own booking is fine
        assert!(table.can_reserve(b, Tick(7), R1)); // later ticks untouched
    }

    #[test]
    fn swap_is_refused_from_the_other_side() {
        let mut table = ReservationTable::new();
        let a = Cell::new(2, 2);
        let b = Cell::new(2, 3);
        assert!(table.reserve_move(a, b, Tick(0), R0));

        assert!(!table.can_move(b, a, Tick(0), R1));
        assert!(!table.reserve_move(b, a, Tick(0), R1));
        // A parallel move one row over is unrelated.
        assert!(table.can_move(Cell::new(3, 3), Cell::new(3, 2), Tick(0), R1));
    }

    #[test]
    fn failed_check_books_nothing() {
        let mut table = ReservationTable::new();
        let a = Cell::new(0, 0);
        let b = Cell::new(0, 1);
        assert!(table.reserve_move(a, b, Tick(0), R0));
        assert!(!table.reserve_move(b, a, Tick(0), R1));
        // R1's refused swap must not have claimed (a, 1).
        assert!(table.can_reserve(a, Tick(1), R0));
        assert_eq!(table.owner(a, Tick(1)), None);
    }

    #[test]
    fn hold_defends_a_stationary_robot() {
        let mut table = ReservationTable::new();
        let c = Cell::new(4, 4);
        assert!(table.reserve_hold(c, Tick(3), R0));
        assert!(!table.can_reserve(c, Tick(4), R1));
        assert!(!table.reserve_hold(c, Tick(3), R1));
    }

    #[test]
    fn release_past_purges_only_history() {
        let mut table = ReservationTable::new();
        let a = Cell::new(0, 0);
        let b = Cell::new(0, 1);
        table.reserve_move(a, b, Tick(0), R0);
        table.reserve_move(b, a, Tick(5), R0);
        assert_eq!(table.tick_count(), 4); // ticks 0, 1, 5, 6

        table.release_past(Tick(5));
        assert_eq!(table.tick_count(), 2);
        assert_eq!(table.owner(b, Tick(1)), None);
        assert_eq!(table.owner(a, Tick(6)), Some(R0));
        assert_eq!(table.edge_owner(b, a, Tick(5)), Some(R0));
    }

    #[test]
    fn edge_bookings_are_directed() {
        let mut table = ReservationTable::new();
        let a = Cell::new(1, 0);
        let b = Cell::new(1, 1);
        table.reserve_move(a, b, Tick(2), R0);
        assert_eq!(table.edge_owner(a, b, Tick(2)), Some(R0));
        assert_eq!(table.edge_owner(b, a, Tick(2)), None);
    }
}
