//! The `Sim` struct and its tick loop.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use fleet_core::{Cell, OrderId, RobotId, ShelfId, SimConfig, Tick};
use fleet_grid::{Grid, PlanContext, Planner, ReservationTable};
use fleet_scenario::{Order, Shelf, Station};

use crate::dispatch::DispatchPolicy;
use crate::metrics::{Heatmaps, MetricsCollector, MetricsReport};
use crate::observer::SimObserver;
use crate::queue::OrderQueue;
use crate::robot::{Phase, Robot};

// ── TickSummary ───────────────────────────────────────────────────────────────

/// What happened during one tick, reported to observers.
#[derive(Default, Debug, Clone)]
pub struct TickSummary {
    /// Robots that advanced to a new cell.
    pub moved: usize,
    /// Robots that wanted to move but were blocked.
    pub waited: usize,
    /// Robots that spent the tick picking up a shelf.
    pub picking: usize,
    /// Non-idle robots processed this tick.
    pub active: usize,
    /// Phase transitions that fired.
    pub transitioned: usize,
    /// Orders still queued at the end of the tick.
    pub pending_orders: usize,
    /// Cumulative completed-order count.
    pub completed_total: u64,
    /// `true` if this tick was counted as a deadlock tick.
    pub deadlocked: bool,
    /// Orders whose return leg finished this tick.
    pub completions: Vec<OrderId>,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<P, D>` holds all run state and drives the eight-step tick loop
/// described at the crate root.  The reservation table and the metrics
/// collector are the only long-lived mutable structures; both are owned
/// here and handed to collaborators as explicit references.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: Planner, D: DispatchPolicy> {
    /// Global configuration (seed, fleet size, horizon).
    pub config: SimConfig,

    /// The current tick, advanced by exactly one per scheduler step.
    pub tick: Tick,

    /// Immutable static obstacle map, shared read-only by all collaborators.
    pub grid: Grid,

    /// Flat arenas indexed by their dense ids.
    pub shelves: Vec<Shelf>,
    pub stations: Vec<Station>,
    pub orders: Vec<Order>,

    /// Spawn cells, kept for end-of-run reachability classification.
    pub spawns: Vec<Cell>,

    /// Order ids in intake order (ascending creation tick, ties by id).
    pub(crate) intake: Vec<OrderId>,
    pub(crate) intake_cursor: usize,

    /// Orders awaiting assignment.
    pub queue: OrderQueue,

    /// The fleet, indexed by `RobotId`.
    pub robots: Vec<Robot>,

    /// Spatio-temporal bookings; mutated exclusively by the tick loop.
    pub reservations: ReservationTable,

    /// Anchors whose shelf is currently riding on a robot, and therefore
    /// traversable for everyone.
    pub(crate) lifted: FxHashSet<Cell>,

    /// Shelves claimed by in-flight orders.  A second order for the same
    /// shelf stays queued until the shelf is back on its anchor.
    pub(crate) engaged: FxHashSet<ShelfId>,

    pub(crate) planner: P,
    pub(crate) dispatcher: D,

    /// Counters and heatmap accumulators.
    pub metrics: MetricsCollector,
}

impl<P: Planner, D: DispatchPolicy> Sim<P, D> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`, invoking observer
    /// hooks at every tick boundary.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        loop {
            let now = self.tick;
            if now >= self.config.end_tick() {
                break;
            }
            observer.on_tick_start(now);
            let summary = self.process_tick(now, observer);
            observer.on_tick_end(now, &summary);
            if self.config.snapshot_interval_ticks > 0
                && now.0.is_multiple_of(self.config.snapshot_interval_ticks)
            {
                observer.on_snapshot(now, &self.robots);
            }
            self.tick = now + 1;
        }
        observer.on_sim_end(self.tick);
    }

    /// Run exactly `n` ticks from the current position (ignores the
    /// horizon).  Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            let now = self.tick;
            observer.on_tick_start(now);
            let summary = self.process_tick(now, observer);
            observer.on_tick_end(now, &summary);
            self.tick = now + 1;
        }
    }

    /// Fold the finished run into the benchmark report and heatmaps.
    ///
    /// Incomplete orders are partitioned by a static flood fill from the
    /// spawn cells: a shelf anchor with no traversable neighbor in that
    /// component can never be served, so its orders count as unreachable
    /// rather than pending.
    pub fn finalize(self) -> (MetricsReport, Heatmaps) {
        let component = self.grid.reachable_from(&self.spawns);
        let mut pending = 0u64;
        let mut unreachable = 0u64;

        for &order_id in &self.intake[..self.intake_cursor] {
            if self.metrics.is_completed(order_id) {
                continue;
            }
            let shelf = self.orders[order_id.index()].shelf_id;
            let anchor = self.shelves[shelf.index()].anchor();
            let servable = self
                .grid
                .neighbors4(anchor)
                .any(|n| component.contains(self.grid.index(n)));
            if servable {
                pending += 1;
            } else {
                unreachable += 1;
            }
        }

        let report =
            self.metrics
                .report(self.config.horizon_ticks, pending, unreachable, &self.robots);
        (report, self.metrics.heatmaps())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> TickSummary {
        let mut summary = TickSummary::default();

        // ── ① Intake: orders whose creation tick has arrived ──────────────
        while self.intake_cursor < self.intake.len() {
            let id = self.intake[self.intake_cursor];
            if self.orders[id.index()].tick > now {
                break;
            }
            self.queue.push_back(id);
            self.intake_cursor += 1;
        }

        // Realized occupancy for this tick, updated in place as robots
        // move.  One O(fleet) build shared by every later check.
        let mut occupied: FxHashMap<Cell, RobotId> =
            self.robots.iter().map(|r| (r.cell, r.id)).collect();

        let no_avoid = FxHashSet::default();

        // ── ② Dispatch ────────────────────────────────────────────────────
        self.dispatch(&no_avoid);

        // ── ③ Plan ────────────────────────────────────────────────────────
        self.plan_routes(&occupied, &no_avoid);

        // ── ④ Move ────────────────────────────────────────────────────────
        self.move_robots(now, &mut occupied, &mut summary);

        // ── ⑤ Phase transitions ───────────────────────────────────────────
        self.apply_transitions(now, observer, &mut summary);

        // ── ⑥ Deadlock detection ──────────────────────────────────────────
        //
        // A pickup dwell and a zero-distance transition both count as
        // progress; only a tick where every active robot sat blocked is a
        // deadlock tick.
        if summary.active > 0
            && summary.moved == 0
            && summary.picking == 0
            && summary.transitioned == 0
        {
            self.metrics.deadlock_ticks += 1;
            summary.deadlocked = true;
        }

        // ── ⑦ Purge expired bookings ──────────────────────────────────────
        self.reservations.release_past(now);

        summary.pending_orders = self.queue.len();
        summary.completed_total = self.metrics.orders_completed();
        summary
    }

    /// ② Pair idle robots (ascending id) with pending orders.
    ///
    /// An assignment only commits when the planner confirms a route; on
    /// failure the order keeps its queue position and the robot stays idle
    /// for this tick.
    fn dispatch(&mut self, no_avoid: &FxHashSet<Cell>) {
        for i in 0..self.robots.len() {
            if !self.robots[i].is_idle() {
                continue;
            }
            let cell = self.robots[i].cell;
            let Some(order_id) = self.dispatcher.select(
                cell,
                &self.queue,
                &self.orders,
                &self.shelves,
                &self.engaged,
            ) else {
                continue;
            };

            let shelf = self.orders[order_id.index()].shelf_id;
            let anchor = self.shelves[shelf.index()].anchor();
            let ctx = PlanContext::new(&self.lifted, no_avoid);
            match self.planner.plan(&self.grid, cell, anchor, &ctx) {
                Some(path) => {
                    self.queue.remove(order_id);
                    self.engaged.insert(shelf);
                    let robot = &mut self.robots[i];
                    robot.order = Some(order_id);
                    robot.phase = Phase::ToShelf;
                    robot.path = VecDeque::from(path);
                }
                None => self.metrics.unreachable_attempts += 1,
            }
        }
    }

    /// ③ Give route-less robots a fresh plan; let robots blocked last tick
    /// replan around the other robots' current cells.
    ///
    /// The conflict replan treats occupied cells as temporary obstacles,
    /// which is what lets plans diverge and transient deadlocks dissolve.
    /// When no detour exists the old path is kept and the robot keeps
    /// waiting for the conflict to clear.
    fn plan_routes(&mut self, occupied: &FxHashMap<Cell, RobotId>, no_avoid: &FxHashSet<Cell>) {
        for i in 0..self.robots.len() {
            if self.robots[i].is_idle() || self.robots[i].dwell_ticks > 0 {
                continue;
            }
            let Some(goal) = self.goal_of(i) else {
                continue;
            };
            let cell = self.robots[i].cell;

            if self.robots[i].path.is_empty() {
                let ctx = PlanContext::new(&self.lifted, no_avoid);
                if let Some(path) = self.planner.plan(&self.grid, cell, goal, &ctx) {
                    self.robots[i].path = VecDeque::from(path);
                }
            } else if self.robots[i].blocked {
                let id = self.robots[i].id;
                let avoid: FxHashSet<Cell> = occupied
                    .iter()
                    .filter(|&(_, &holder)| holder != id)
                    .map(|(&c, _)| c)
                    .collect();
                let ctx = PlanContext::new(&self.lifted, &avoid);
                if let Some(path) = self.planner.plan(&self.grid, cell, goal, &ctx) {
                    self.robots[i].path = VecDeque::from(path);
                }
                self.robots[i].blocked = false;
            }
        }
    }

    /// ④ Advance robots whose next booking holds; everyone else defends
    /// their current cell for the next tick.
    fn move_robots(
        &mut self,
        now: Tick,
        occupied: &mut FxHashMap<Cell, RobotId>,
        summary: &mut TickSummary,
    ) {
        for i in 0..self.robots.len() {
            let id = self.robots[i].id;
            let cur = self.robots[i].cell;

            if self.robots[i].is_idle() {
                self.reservations.reserve_hold(cur, now, id);
                continue;
            }

            self.robots[i].stats.ticks_active += 1;
            summary.active += 1;

            if self.robots[i].dwell_ticks > 0 {
                self.robots[i].dwell_ticks -= 1;
                self.reservations.reserve_hold(cur, now, id);
                summary.picking += 1;
                continue;
            }

            let Some(next) = self.robots[i].next_step() else {
                // Either at the phase goal (the transition fires below) or
                // without a route; only the latter is a blocked tick.
                if self.robots[i].path.is_empty() {
                    self.robots[i].stats.ticks_waiting += 1;
                    self.metrics.record_wait(cur);
                    summary.waited += 1;
                }
                self.reservations.reserve_hold(cur, now, id);
                continue;
            };

            // The target must be traversable for this robot, unoccupied in
            // the realized state, and bookable without a vertex or swap
            // conflict.  Lower ids moved earlier, so their bookings are
            // already visible here.
            let admissible = self.passable_for(i, next) && !occupied.contains_key(&next);
            if admissible && self.reservations.reserve_move(cur, next, now, id) {
                occupied.remove(&cur);
                occupied.insert(next, id);
                let robot = &mut self.robots[i];
                robot.path.pop_front();
                robot.cell = next;
                robot.blocked = false;
                robot.stats.distance += 1;
                robot.stats.ticks_moving += 1;
                self.metrics.record_visit(next);
                summary.moved += 1;
            } else {
                let robot = &mut self.robots[i];
                robot.blocked = true;
                robot.stats.ticks_waiting += 1;
                self.metrics.record_wait(cur);
                summary.waited += 1;
                self.reservations.reserve_hold(cur, now, id);
            }
        }
    }

    /// ⑤ Fire at most one phase transition per robot whose current cell is
    /// its phase goal.  Completed orders are announced through the
    /// observer's `on_order_completed` hook.
    fn apply_transitions<O: SimObserver>(
        &mut self,
        now: Tick,
        observer: &mut O,
        summary: &mut TickSummary,
    ) {
        for i in 0..self.robots.len() {
            let Some(order_id) = self.robots[i].order else {
                continue;
            };
            let order = self.orders[order_id.index()];
            let anchor = self.shelves[order.shelf_id.index()].anchor();
            let station = self.stations[order.station_id.index()].cell();
            let cell = self.robots[i].cell;

            match self.robots[i].phase {
                // Pickup: the shelf leaves its anchor, the robot spends one
                // stationary tick lifting it.
                Phase::ToShelf if cell == anchor => {
                    let robot = &mut self.robots[i];
                    robot.phase = Phase::ToStation;
                    robot.carrying_shelf = true;
                    robot.dwell_ticks = 1;
                    robot.path.clear();
                    self.lifted.insert(anchor);
                    summary.transitioned += 1;
                }

                // Delivery: lead time is fixed here; the robot turns around
                // with the shelf still aboard.
                Phase::ToStation if cell == station => {
                    let robot = &mut self.robots[i];
                    robot.phase = Phase::ToReturn;
                    robot.carrying_shelf = false;
                    robot.path.clear();
                    self.metrics.record_delivery(order_id, now.since(order.tick));
                    summary.transitioned += 1;
                }

                // Return: the shelf is back on its anchor and the robot
                // parks in place, dispatchable again.
                Phase::ToReturn if cell == anchor => {
                    let robot = &mut self.robots[i];
                    robot.phase = Phase::Idle;
                    robot.order = None;
                    robot.path.clear();
                    self.lifted.remove(&anchor);
                    self.engaged.remove(&order.shelf_id);
                    self.metrics.record_completion(order_id);
                    observer.on_order_completed(now, order_id);
                    summary.completions.push(order_id);
                    summary.transitioned += 1;
                }

                _ => {}
            }
        }
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    /// The cell the robot's current phase is heading for.
    fn goal_of(&self, i: usize) -> Option<Cell> {
        let robot = &self.robots[i];
        let order = self.orders[robot.order?.index()];
        match robot.phase {
            Phase::ToShelf | Phase::ToReturn => {
                Some(self.shelves[order.shelf_id.index()].anchor())
            }
            Phase::ToStation => Some(self.stations[order.station_id.index()].cell()),
            Phase::Idle => None,
        }
    }

    /// Traversability of `cell` for robot `i`: statically traversable,
    /// vacated by a lifted shelf, or the robot's own phase goal.
    fn passable_for(&self, i: usize, cell: Cell) -> bool {
        self.grid.is_traversable(cell)
            || self.lifted.contains(&cell)
            || self.goal_of(i) == Some(cell)
    }
}
