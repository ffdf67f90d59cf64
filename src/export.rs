//! Final output writers — JSON arrays for launch records, CSV for sightings.

use crate::scrape::parse::Sighting;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a compact JSON array of items.
pub fn write_json_array<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory: {}", parent.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, items)
        .with_context(|| format!("failed to write JSON array: {}", path.display()))?;
    writer.flush()?;
    Ok(())
}

/// Write sighting rows as CSV with a header row.
pub fn write_sightings_csv(path: &Path, rows: &[Sighting]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory: {}", parent.display()))?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create CSV file: {}", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .context("failed to write sighting row")?;
    }
    writer.flush().context("failed to flush CSV writer")?;
    Ok(())
}
