//! Telemetry sink: an append-only table of play metrics.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::GameError;

pub const CSV_HEADER: &str = "reaction_time,accuracy,lives_lost";

/// One snapshot of the player's performance. `reaction_time` is empty
/// until the player has destroyed something.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricsRow {
    pub reaction_time: Option<f64>,
    pub accuracy: f64,
    pub lives_lost: u32,
}

impl MetricsRow {
    pub fn to_csv(&self) -> String {
        let reaction = self
            .reaction_time
            .map(|r| r.to_string())
            .unwrap_or_default();
        format!("{},{},{}", reaction, self.accuracy, self.lives_lost)
    }
}

pub trait TelemetrySink {
    fn persist(&mut self, row: &MetricsRow) -> Result<(), GameError>;
}

/// Appends rows to a CSV file, writing the header only when the file does
/// not exist yet.
#[derive(Clone, Debug)]
pub struct CsvTelemetry {
    path: PathBuf,
}

impl CsvTelemetry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TelemetrySink for CsvTelemetry {
    fn persist(&mut self, row: &MetricsRow) -> Result<(), GameError> {
        let wrap = |source| GameError::Telemetry {
            path: self.path.clone(),
            source,
        };
        let needs_header = !self.path.exists();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(wrap)?;
        if needs_header {
            writeln!(file, "{CSV_HEADER}").map_err(wrap)?;
        }
        writeln!(file, "{}", row.to_csv()).map_err(wrap)?;
        Ok(())
    }
}

/// Drops every row. For runs that should leave no files behind.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullTelemetry;

impl TelemetrySink for NullTelemetry {
    fn persist(&mut self, _row: &MetricsRow) -> Result<(), GameError> {
        Ok(())
    }
}
