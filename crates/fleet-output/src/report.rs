//! End-of-run artifacts: `metrics.json` and the heatmap arrays.
//!
//! The heatmaps are written as dense row-major CSVs of floats, one grid
//! row per record, under the file names `metrics.json` points at.  All
//! writes are deterministic: identical reports and heatmaps produce
//! byte-identical files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use fleet_sim::{Heatmaps, MetricsReport};

use crate::OutputResult;

/// File name of the serialized [`MetricsReport`].
pub const METRICS_FILE: &str = "metrics.json";

/// Write `metrics.json` and the three heatmap CSVs into `dir`.
pub fn write_report(dir: &Path, report: &MetricsReport, heatmaps: &Heatmaps) -> OutputResult<()> {
    let file = File::create(dir.join(METRICS_FILE))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush()?;

    write_heatmap(&dir.join(&report.heatmaps.visits), heatmaps.width, &heatmaps.visits)?;
    write_heatmap(&dir.join(&report.heatmaps.waits), heatmaps.width, &heatmaps.waits)?;
    write_heatmap(&dir.join(&report.heatmaps.ratio), heatmaps.width, &heatmaps.ratio)
}

fn write_heatmap(path: &Path, width: u32, values: &[f64]) -> OutputResult<()> {
    let mut writer = csv::Writer::from_writer(BufWriter::new(File::create(path)?));
    for row in values.chunks(width as usize) {
        let fields: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        writer.write_record(&fields)?;
    }
    writer.flush()?;
    Ok(())
}
