//! CSV persistence for the plate registry.
//!
//! The table is loaded once at startup if present and fully rewritten at
//! the end of a run, so rows from prior runs that were not re-encountered
//! survive unchanged. Row decoding is lenient: a drifted file (missing or
//! non-numeric id column) degrades to defaulted fields instead of failing,
//! which in turn reseeds the id counter at 1.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use super::PlateRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access registry table: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed registry table: {0}")]
    Csv(#[from] csv::Error),
}

/// A row as read from disk, before lenient numeric conversion.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    id: String,
    #[serde(default)]
    source: String,
    #[serde(default)]
    full_text: String,
    #[serde(default)]
    region_code: String,
    #[serde(default)]
    sequence_code: String,
    #[serde(default)]
    series: String,
    #[serde(default)]
    serial_number: String,
    #[serde(default)]
    first_seen: String,
    #[serde(default)]
    last_seen: String,
    #[serde(default)]
    seen_count: String,
}

impl RawRow {
    fn into_record(self) -> PlateRecord {
        let id = match self.id.trim().parse() {
            Ok(id) => id,
            Err(_) => {
                warn!("non-numeric id {:?} for plate {:?}, keeping row with id 0", self.id, self.full_text);
                0
            }
        };
        PlateRecord {
            id,
            source: self.source,
            full_text: self.full_text,
            region_code: self.region_code,
            sequence_code: self.sequence_code,
            series: self.series,
            serial_number: self.serial_number,
            first_seen: self.first_seen,
            last_seen: self.last_seen,
            seen_count: self.seen_count.trim().parse().unwrap_or(1),
        }
    }
}

/// Read all rows from a registry table. A missing file is the caller's
/// concern; an empty file yields an empty table.
pub fn load_registry(path: &Path) -> Result<Vec<PlateRecord>, StoreError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize::<RawRow>() {
        records.push(row?.into_record());
    }
    Ok(records)
}

/// Rewrite the whole registry table.
pub fn save_registry(path: &Path, records: &[PlateRecord]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
