//! Metrics collection and the final benchmark report.
//!
//! The collector is plain owned state of the scheduler: counters, the
//! per-cell visit/wait arrays, and per-order lead times.  At the end of a
//! run it is folded into a serializable [`MetricsReport`] (written as
//! `metrics.json`) plus the dense [`Heatmaps`] the renderers consume.
//!
//! All aggregate maps are `BTreeMap`s so every iteration order — and
//! therefore every serialized byte — is deterministic.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use fleet_core::{Cell, OrderId};

use crate::robot::Robot;

// ── Heatmap artifact names ────────────────────────────────────────────────────

pub const VISITS_HEATMAP_FILE: &str = "heatmap_visits.csv";
pub const WAITS_HEATMAP_FILE: &str = "heatmap_waits.csv";
pub const RATIO_HEATMAP_FILE: &str = "heatmap_ratio.csv";

// ── MetricsCollector ──────────────────────────────────────────────────────────

/// Long-lived mutable metrics state, owned by the scheduler.
pub struct MetricsCollector {
    width: u32,
    height: u32,
    /// Row-major per-cell arrival counts.
    visits: Vec<u64>,
    /// Row-major per-cell blocked-tick counts.
    waits: Vec<u64>,

    /// Lead time per *delivered* order (recorded at the station).
    lead_times: BTreeMap<OrderId, u64>,
    /// Orders whose full cycle (including the return leg) finished.
    completed: BTreeSet<OrderId>,

    pub deadlock_ticks: u64,
    pub unreachable_attempts: u64,
}

impl MetricsCollector {
    pub fn new(width: u32, height: u32) -> Self {
        let cells = width as usize * height as usize;
        Self {
            width,
            height,
            visits: vec![0; cells],
            waits: vec![0; cells],
            lead_times: BTreeMap::new(),
            completed: BTreeSet::new(),
            deadlock_ticks: 0,
            unreachable_attempts: 0,
        }
    }

    #[inline]
    fn index(&self, cell: Cell) -> usize {
        cell.row as usize * self.width as usize + cell.col as usize
    }

    /// A robot arrived at (or was initially placed on) `cell`.
    pub fn record_visit(&mut self, cell: Cell) {
        let i = self.index(cell);
        self.visits[i] += 1;
    }

    /// A robot spent a blocked tick at `cell`.
    pub fn record_wait(&mut self, cell: Cell) {
        let i = self.index(cell);
        self.waits[i] += 1;
    }

    /// The shelf reached the station: lead time is fixed here.
    pub fn record_delivery(&mut self, order: OrderId, lead_ticks: u64) {
        self.lead_times.insert(order, lead_ticks);
    }

    /// The shelf is back on its anchor: the order's cycle is complete.
    pub fn record_completion(&mut self, order: OrderId) {
        self.completed.insert(order);
    }

    pub fn is_completed(&self, order: OrderId) -> bool {
        self.completed.contains(&order)
    }

    pub fn orders_completed(&self) -> u64 {
        self.completed.len() as u64
    }

    /// Lead time of a delivered order, if its delivery happened.
    pub fn lead_time(&self, order: OrderId) -> Option<u64> {
        self.lead_times.get(&order).copied()
    }

    // ── Folding into the report ───────────────────────────────────────────

    /// Assemble the final report.  `orders_pending` / `orders_unreachable`
    /// are classified by the scheduler, which owns the grid.
    pub fn report(
        &self,
        horizon_ticks: u64,
        orders_pending: u64,
        orders_unreachable: u64,
        robots: &[Robot],
    ) -> MetricsReport {
        let completed = self.orders_completed();
        let horizon = horizon_ticks.max(1) as f64;

        let mean_lead_time = if self.completed.is_empty() {
            None
        } else {
            let total: u64 = self
                .completed
                .iter()
                .filter_map(|o| self.lead_times.get(o))
                .sum();
            Some(total as f64 / self.completed.len() as f64)
        };

        let mean_utilization = if robots.is_empty() {
            0.0
        } else {
            let moving: u64 = robots.iter().map(|r| r.stats.ticks_moving).sum();
            moving as f64 / (robots.len() as f64 * horizon)
        };

        MetricsReport {
            orders_completed: completed,
            orders_pending,
            orders_unreachable,
            unreachable_attempts: self.unreachable_attempts,
            throughput: completed as f64 / horizon,
            mean_lead_time,
            mean_utilization,
            deadlock_ticks: self.deadlock_ticks,
            total_distance: robots.iter().map(|r| r.stats.distance).sum(),
            heatmaps: HeatmapPaths::default(),
        }
    }

    /// Dense float heatmaps for the renderers.
    pub fn heatmaps(&self) -> Heatmaps {
        let visits: Vec<f64> = self.visits.iter().map(|&v| v as f64).collect();
        let waits: Vec<f64> = self.waits.iter().map(|&w| w as f64).collect();
        let ratio: Vec<f64> = self
            .visits
            .iter()
            .zip(&self.waits)
            .map(|(&v, &w)| w as f64 / v.max(1) as f64)
            .collect();
        Heatmaps {
            width: self.width,
            height: self.height,
            visits,
            waits,
            ratio,
        }
    }
}

// ── MetricsReport ─────────────────────────────────────────────────────────────

/// The serialized benchmark result (`metrics.json`).
///
/// Field order is the serialization order; identical runs produce
/// byte-identical files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub orders_completed: u64,
    pub orders_pending: u64,
    pub orders_unreachable: u64,
    pub unreachable_attempts: u64,
    pub throughput: f64,
    /// `null` when no order completed within the horizon.
    pub mean_lead_time: Option<f64>,
    pub mean_utilization: f64,
    pub deadlock_ticks: u64,
    pub total_distance: u64,
    pub heatmaps: HeatmapPaths,
}

/// Scenario-relative paths of the persisted heatmap arrays.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeatmapPaths {
    pub visits: String,
    pub waits: String,
    pub ratio: String,
}

impl Default for HeatmapPaths {
    fn default() -> Self {
        Self {
            visits: VISITS_HEATMAP_FILE.to_string(),
            waits: WAITS_HEATMAP_FILE.to_string(),
            ratio: RATIO_HEATMAP_FILE.to_string(),
        }
    }
}

/// Dense row-major float arrays backing the heatmap artifacts.
pub struct Heatmaps {
    pub width: u32,
    pub height: u32,
    pub visits: Vec<f64>,
    pub waits: Vec<f64>,
    pub ratio: Vec<f64>,
}
