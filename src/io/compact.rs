//! Read/write compact market-data JSON files.
//!
//! The compact document is the wire format served to dashboards. Writing one
//! from a normalized [`MarketData`] re-collapses every series onto the master
//! year axis, so a loaded dashboard can be snapshotted and served again.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::{CompactMarketData, MarketData};
use crate::error::{AppError, EXIT_USAGE};

/// Write a normalized document back out in compact form.
pub fn write_compact_json(path: &Path, data: &MarketData) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to create compact JSON '{}': {e}", path.display())))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &data.to_compact())
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to write compact JSON: {e}")))?;
    writer
        .flush()
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to write compact JSON '{}': {e}", path.display())))
}

/// Read a compact JSON file from disk (no expansion).
pub fn read_compact_json(path: &Path) -> Result<CompactMarketData, AppError> {
    crate::data::source::read_document(path)
}
