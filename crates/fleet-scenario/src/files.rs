//! Artifact file names and low-level readers/writers.
//!
//! The JSON artifacts go through `serde_json`; the layout grid is a plain
//! headerless CSV of integer type codes, one row per grid row.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{ScenarioError, ScenarioResult};

// ── File names ────────────────────────────────────────────────────────────────

pub const LAYOUT_FILE: &str = "layout.csv";
pub const SHELVES_FILE: &str = "shelves.json";
pub const STATIONS_FILE: &str = "stations.json";
pub const SPAWN_FILE: &str = "spawn.json";
pub const ORDERS_FILE: &str = "orders.json";

// ── JSON artifacts ────────────────────────────────────────────────────────────

/// Load one JSON artifact from `dir/name`.
pub fn load_json<T: DeserializeOwned>(dir: &Path, name: &str) -> ScenarioResult<T> {
    let file = File::open(dir.join(name)).map_err(|e| ScenarioError::io(name, e))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| ScenarioError::parse(name, e.to_string()))
}

/// Write one JSON artifact to `dir/name`.
pub fn save_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> ScenarioResult<()> {
    let file = File::create(dir.join(name)).map_err(|e| ScenarioError::io(name, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|e| ScenarioError::parse(name, e.to_string()))?;
    writer.flush().map_err(|e| ScenarioError::io(name, e))
}

// ── Layout grid ───────────────────────────────────────────────────────────────

/// Read the layout CSV into `(width, height, row-major codes)`.
///
/// Every row must have the same number of fields; the grid must be
/// non-empty.
pub fn load_layout(dir: &Path) -> ScenarioResult<(u32, u32, Vec<u8>)> {
    let file =
        File::open(dir.join(LAYOUT_FILE)).map_err(|e| ScenarioError::io(LAYOUT_FILE, e))?;
    load_layout_reader(BufReader::new(file))
}

/// Like [`load_layout`] but accepts any `Read` source — useful for tests
/// (pass a `std::io::Cursor`).
pub fn load_layout_reader<R: Read>(reader: R) -> ScenarioResult<(u32, u32, Vec<u8>)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut width: Option<usize> = None;
    let mut codes: Vec<u8> = Vec::new();
    let mut height = 0u32;

    for record in csv_reader.records() {
        let record = record.map_err(|e| ScenarioError::parse(LAYOUT_FILE, e.to_string()))?;
        match width {
            None => width = Some(record.len()),
            Some(w) if w != record.len() => {
                return Err(ScenarioError::invalid(
                    LAYOUT_FILE,
                    "row",
                    format!("row {height} has {} cells, expected {w}", record.len()),
                ));
            }
            Some(_) => {}
        }
        for field in record.iter() {
            let code: u8 = field.trim().parse().map_err(|_| {
                ScenarioError::parse(LAYOUT_FILE, format!("bad cell code {field:?}"))
            })?;
            codes.push(code);
        }
        height += 1;
    }

    match width {
        None | Some(0) => Err(ScenarioError::invalid(LAYOUT_FILE, "grid", "layout is empty")),
        Some(w) => Ok((w as u32, height, codes)),
    }
}

/// Write the layout CSV from row-major codes.
pub fn save_layout(dir: &Path, width: u32, codes: &[u8]) -> ScenarioResult<()> {
    let file =
        File::create(dir.join(LAYOUT_FILE)).map_err(|e| ScenarioError::io(LAYOUT_FILE, e))?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));
    for row in codes.chunks(width as usize) {
        let fields: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        writer
            .write_record(&fields)
            .map_err(|e| ScenarioError::parse(LAYOUT_FILE, e.to_string()))?;
    }
    writer
        .flush()
        .map_err(|e| ScenarioError::io(LAYOUT_FILE, e))
}
