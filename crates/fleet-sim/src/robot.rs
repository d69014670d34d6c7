//! Per-robot state: the pickup/deliver/return state machine.

use std::collections::VecDeque;

use fleet_core::{Cell, OrderId, RobotId};

/// A robot's current leg in the pickup/deliver/return cycle.
///
/// Transitions (driven by the scheduler when the robot reaches its goal):
///
/// ```text
/// Idle ──assign──▶ ToShelf ──at anchor──▶ ToStation ──at station──▶ ToReturn ──at anchor──▶ Idle
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Phase {
    Idle,
    ToShelf,
    ToStation,
    ToReturn,
}

/// Per-robot activity counters, accumulated every tick.
#[derive(Copy, Clone, Default, Debug)]
pub struct RobotStats {
    /// Cells traversed.
    pub distance: u64,
    /// Ticks spent advancing to a new cell.
    pub ticks_moving: u64,
    /// Ticks spent blocked (wanted to move, could not).
    pub ticks_waiting: u64,
    /// Ticks spent non-idle in any phase.
    pub ticks_active: u64,
}

/// One robot of the fleet.
///
/// Invariants maintained by the scheduler:
/// - `phase == Idle` ⇔ `order.is_none()`
/// - `carrying_shelf` ⇔ `phase == ToStation`
/// - `path.front() == Some(cell)` whenever the path is non-empty
pub struct Robot {
    pub id: RobotId,
    pub cell: Cell,
    pub phase: Phase,
    pub order: Option<OrderId>,
    pub carrying_shelf: bool,

    /// Planned route, front-first.  `path[0]` is the current cell; `path[1]`
    /// is the next move target.
    pub path: VecDeque<Cell>,

    /// Set when a move was refused last tick; triggers a conflict replan.
    pub blocked: bool,

    /// Stationary pickup ticks remaining (1 after reaching the shelf).
    pub dwell_ticks: u8,

    pub stats: RobotStats,
}

impl Robot {
    /// A fresh idle robot parked at its spawn cell.
    pub fn new(id: RobotId, cell: Cell) -> Self {
        Self {
            id,
            cell,
            phase: Phase::Idle,
            order: None,
            carrying_shelf: false,
            path: VecDeque::new(),
            blocked: false,
            dwell_ticks: 0,
            stats: RobotStats::default(),
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// The next cell this robot intends to step into, if it has one.
    #[inline]
    pub fn next_step(&self) -> Option<Cell> {
        self.path.get(1).copied()
    }
}
