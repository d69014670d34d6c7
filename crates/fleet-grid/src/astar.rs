//! Planning trait and default A\* implementation.
//!
//! # Pluggability
//!
//! `fleet-sim` calls pathfinding via the [`Planner`] trait, so applications
//! can swap in custom implementations (jump-point search, congestion-aware
//! heuristics) without touching the scheduler.  The default
//! [`AStarPlanner`] is the reference algorithm.
//!
//! # Determinism
//!
//! The open set is ordered by f-score, then h-score (closer to the goal
//! wins), then row-major cell index.  With fixed inputs the expansion
//! order — and therefore the returned path — is identical across runs.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::FxHashSet;

use fleet_core::Cell;

use crate::grid::{CellSet, Grid};

// ── PlanContext ───────────────────────────────────────────────────────────────

/// Dynamic traversability overlay for a single planning request.
///
/// The grid itself is immutable; what changes over a run is which shelf
/// anchors are vacated and, for conflict-driven replans, which cells are
/// temporarily off-limits.
#[derive(Clone, Copy)]
pub struct PlanContext<'a> {
    /// Shelf anchors whose shelf is currently off the anchor (riding on a
    /// robot).  Traversable for every robot.
    pub lifted: &'a FxHashSet<Cell>,

    /// Cells to treat as obstacles for this request only — the current
    /// positions of other robots when replanning around a conflict.  Empty
    /// for initial plans.
    pub avoid: &'a FxHashSet<Cell>,
}

impl<'a> PlanContext<'a> {
    pub fn new(lifted: &'a FxHashSet<Cell>, avoid: &'a FxHashSet<Cell>) -> Self {
        Self { lifted, avoid }
    }
}

// ── Planner trait ─────────────────────────────────────────────────────────────

/// Pluggable pathfinding engine.
///
/// # Contract
///
/// A returned path starts at `start`, ends at `goal`, and steps only
/// between 4-connected neighbors that are traversable under `ctx` (the goal
/// cell is always admissible — it is the requester's assigned shelf anchor
/// or a station).  `None` means no such path exists; partial paths are
/// never returned.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so independent scenario runs can
/// share one planner across rayon workers.
pub trait Planner: Send + Sync {
    fn plan(&self, grid: &Grid, start: Cell, goal: Cell, ctx: &PlanContext<'_>)
    -> Option<Vec<Cell>>;
}

// ── AStarPlanner ──────────────────────────────────────────────────────────────

/// A\* over the 4-connected grid with the Manhattan heuristic.
///
/// Unit step cost makes the heuristic admissible and consistent, so every
/// returned path is shortest under the static obstacle map.  The closed set
/// is a [`CellSet`] bitset over grid cells; `g` and predecessor arrays are
/// dense row-major vectors.
pub struct AStarPlanner;

impl Planner for AStarPlanner {
    fn plan(
        &self,
        grid: &Grid,
        start: Cell,
        goal: Cell,
        ctx: &PlanContext<'_>,
    ) -> Option<Vec<Cell>> {
        astar(grid, start, goal, ctx)
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

const UNREACHED: u32 = u32::MAX;

/// Traversability of `cell` for this request.  The goal is always
/// admissible (the requester's own shelf anchor unlocks for it); `avoid`
/// overrides everything, including the goal.
#[inline]
fn admissible(grid: &Grid, cell: Cell, goal: Cell, ctx: &PlanContext<'_>) -> bool {
    if ctx.avoid.contains(&cell) {
        return false;
    }
    cell == goal || grid.is_traversable(cell) || ctx.lifted.contains(&cell)
}

fn astar(grid: &Grid, start: Cell, goal: Cell, ctx: &PlanContext<'_>) -> Option<Vec<Cell>> {
    if !grid.in_bounds(start) || !grid.in_bounds(goal) {
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }

    let n = grid.len();
    // g[v] = best known path length (cells stepped) to reach v.
    let mut g = vec![UNREACHED; n];
    // prev[v] = row-major index of the cell that reached v.
    let mut prev = vec![UNREACHED; n];
    let mut closed = CellSet::with_capacity(n);

    let start_idx = grid.index(start);
    g[start_idx] = 0;

    // Min-heap: Reverse makes BinaryHeap (max) behave as min-heap.
    // Key (f, h, index) realizes the f → h → (row, col) tie-break.
    let mut open: BinaryHeap<Reverse<(u32, u32, u32)>> = BinaryHeap::new();
    open.push(Reverse((start.manhattan(goal), start.manhattan(goal), start_idx as u32)));

    while let Some(Reverse((_, _, idx))) = open.pop() {
        let idx = idx as usize;
        // Skip stale heap entries: the first pop of a cell is its final cost.
        if !closed.insert(idx) {
            continue;
        }

        let cell = Cell::new(idx as u32 / grid.width(), idx as u32 % grid.width());
        if cell == goal {
            return Some(reconstruct(grid, &prev, goal));
        }

        for next in grid.neighbors4(cell) {
            if !admissible(grid, next, goal, ctx) {
                continue;
            }
            let next_idx = grid.index(next);
            if closed.contains(next_idx) {
                continue;
            }
            let tentative = g[idx] + 1;
            if tentative < g[next_idx] {
                g[next_idx] = tentative;
                prev[next_idx] = idx as u32;
                let h = next.manhattan(goal);
                open.push(Reverse((tentative + h, h, next_idx as u32)));
            }
        }
    }

    None
}

fn reconstruct(grid: &Grid, prev: &[u32], goal: Cell) -> Vec<Cell> {
    let mut cells = Vec::new();
    let mut idx = grid.index(goal) as u32;
    loop {
        cells.push(Cell::new(idx / grid.width(), idx % grid.width()));
        match prev[idx as usize] {
            UNREACHED => break,
            p => idx = p,
        }
    }
    cells.reverse();
    cells
}
