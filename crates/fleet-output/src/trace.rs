//! Per-tick trace observer: one CSV row per simulated tick.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use fleet_core::Tick;
use fleet_sim::{SimObserver, TickSummary};

use crate::{OutputError, OutputResult};

/// A [`SimObserver`] streaming tick summaries to a CSV file.
///
/// Columns: `tick, moved, waited, picking, pending, completed, deadlocked`.
/// Because observer hooks cannot return errors, the first write failure is
/// stored and all further writes are skipped; retrieve it with
/// [`take_error`][Self::take_error] after the run.
pub struct TickTraceWriter {
    writer: Writer<File>,
    finished: bool,
    last_error: Option<OutputError>,
}

impl TickTraceWriter {
    /// Create `trace.csv`-style output at `path` and write the header row.
    pub fn create(path: &Path) -> OutputResult<Self> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record([
            "tick",
            "moved",
            "waited",
            "picking",
            "pending",
            "completed",
            "deadlocked",
        ])?;
        Ok(Self {
            writer,
            finished: false,
            last_error: None,
        })
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }

    fn write_row(&mut self, tick: Tick, summary: &TickSummary) -> OutputResult<()> {
        self.writer.write_record(&[
            tick.0.to_string(),
            summary.moved.to_string(),
            summary.waited.to_string(),
            summary.picking.to_string(),
            summary.pending_orders.to_string(),
            summary.completed_total.to_string(),
            (summary.deadlocked as u8).to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}

impl SimObserver for TickTraceWriter {
    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        if self.last_error.is_some() {
            return;
        }
        let result = self.write_row(tick, summary);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.finish();
        self.store_err(result);
    }
}
