//! Fluent builder for constructing a [`Sim`].

use rustc_hash::FxHashSet;

use fleet_core::{RobotId, SimConfig, SimRng, Tick};
use fleet_grid::{Planner, ReservationTable};
use fleet_scenario::Scenario;

use crate::dispatch::DispatchPolicy;
use crate::metrics::MetricsCollector;
use crate::queue::OrderQueue;
use crate::robot::Robot;
use crate::{Sim, SimError, SimResult};

/// Builder for [`Sim<P, D>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — seed, fleet size, horizon.
/// - [`Scenario`] — the validated input artifacts.
/// - `P: Planner` — the pathfinding algorithm (e.g. [`fleet_grid::AStarPlanner`]).
/// - `D: DispatchPolicy` — the assignment policy (e.g.
///   [`NearestShelfDispatch`][crate::NearestShelfDispatch]).
///
/// # Robot placement
///
/// The scenario's spawn cells are shuffled with the run's seed and the
/// first `robot_count` of them become the fleet's starting cells, in
/// ascending robot-id order.  This is the seed's only influence on a run.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, scenario, AStarPlanner, NearestShelfDispatch)
///     .build()?;
/// sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder<P: Planner, D: DispatchPolicy> {
    config: SimConfig,
    scenario: Scenario,
    planner: P,
    dispatcher: D,
}

impl<P: Planner, D: DispatchPolicy> SimBuilder<P, D> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, scenario: Scenario, planner: P, dispatcher: D) -> Self {
        Self {
            config,
            scenario,
            planner,
            dispatcher,
        }
    }

    /// Validate the fleet size, place the robots, and return a ready-to-run
    /// [`Sim`] at tick 0.
    pub fn build(self) -> SimResult<Sim<P, D>> {
        // Scenarios built in code bypass the loader's checks; re-verify
        // every order reference before anything indexes the arenas.
        for order in &self.scenario.orders {
            self.scenario.shelf(order.shelf_id)?;
            self.scenario.station(order.station_id)?;
        }

        let intake = self.scenario.intake_sequence();
        let Scenario {
            grid,
            shelves,
            stations,
            spawns,
            orders,
        } = self.scenario;

        if self.config.robot_count as usize > spawns.len() {
            return Err(SimError::FleetTooLarge {
                robots: self.config.robot_count,
                spawns: spawns.len(),
            });
        }

        // Seeded placement: shuffle the spawn cells, take one per robot.
        let mut cells = spawns.clone();
        let mut rng = SimRng::new(self.config.seed);
        rng.shuffle(&mut cells);

        let mut metrics = MetricsCollector::new(grid.width(), grid.height());
        let robots: Vec<Robot> = cells
            .iter()
            .take(self.config.robot_count as usize)
            .enumerate()
            .map(|(i, &cell)| {
                metrics.record_visit(cell);
                Robot::new(RobotId(i as u32), cell)
            })
            .collect();

        Ok(Sim {
            config: self.config,
            tick: Tick::ZERO,
            grid,
            shelves,
            stations,
            spawns,
            orders,
            intake,
            intake_cursor: 0,
            queue: OrderQueue::new(),
            robots,
            reservations: ReservationTable::new(),
            lifted: FxHashSet::default(),
            engaged: FxHashSet::default(),
            planner: self.planner,
            dispatcher: self.dispatcher,
            metrics,
        })
    }
}
