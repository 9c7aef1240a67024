//! Deduplicated plate registry.
//!
//! One row per distinct normalized plate text ever seen. Repeat sightings
//! of an exact-match string update the existing row; a miss allocates the
//! next monotonic id and inserts a new row. Matching is exact string
//! equality on the normalized text: distinct OCR misreads of the same
//! physical plate deliberately stay separate rows.

pub mod store;

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::parser;

/// Timestamp format used in persisted rows.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One distinct plate and its sighting history.
///
/// Timestamps are kept as already-formatted strings so rows loaded from a
/// prior run round-trip unchanged even when their format drifted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateRecord {
    /// Monotonic id assigned at first sighting, never reused
    pub id: u64,
    /// File the plate was first seen in
    pub source: String,
    /// Normalized plate text, unique within the registry
    pub full_text: String,
    pub region_code: String,
    pub sequence_code: String,
    pub series: String,
    pub serial_number: String,
    /// Time of first sighting, immutable after creation
    pub first_seen: String,
    /// Time of most recent sighting
    pub last_seen: String,
    /// Total sightings, starts at 1
    pub seen_count: u64,
}

/// In-memory registry: O(1) lookup by plate text plus creation order for
/// persistence and id derivation.
pub struct PlateRegistry {
    records: Vec<PlateRecord>,
    index: HashMap<String, usize>,
    next_id: u64,
}

impl PlateRegistry {
    /// Empty registry; the first plate gets id 1.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
            next_id: 1,
        }
    }

    /// Rebuild from a persisted snapshot. The id counter resumes from the
    /// largest id present so a reloaded session never reuses one.
    pub fn load(records: Vec<PlateRecord>) -> Self {
        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let index = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.full_text.clone(), i))
            .collect();
        Self {
            records,
            index,
            next_id,
        }
    }

    /// Record one sighting of `full_text`.
    ///
    /// An exact match bumps `seen_count` and `last_seen` on the existing
    /// row. A miss parses the text into sub-fields and inserts a new row
    /// with the next id. Returns the row and whether it was just created.
    pub fn lookup_or_create(
        &mut self,
        full_text: &str,
        source: &str,
        now: NaiveDateTime,
    ) -> (&PlateRecord, bool) {
        let stamp = now.format(TIME_FORMAT).to_string();

        if let Some(&i) = self.index.get(full_text) {
            let record = &mut self.records[i];
            record.seen_count += 1;
            record.last_seen = stamp;
            return (&self.records[i], false);
        }

        let fields = parser::parse(full_text).unwrap_or_default();
        let record = PlateRecord {
            id: self.next_id,
            source: source.to_string(),
            full_text: full_text.to_string(),
            region_code: fields.region_code,
            sequence_code: fields.sequence_code,
            series: fields.series,
            serial_number: fields.serial_number,
            first_seen: stamp.clone(),
            last_seen: stamp,
            seen_count: 1,
        };

        self.next_id += 1;
        let i = self.records.len();
        self.index.insert(full_text.to_string(), i);
        self.records.push(record);
        (&self.records[i], true)
    }

    /// Look up a row without recording a sighting.
    pub fn get(&self, full_text: &str) -> Option<&PlateRecord> {
        self.index.get(full_text).map(|&i| &self.records[i])
    }

    /// All rows in creation order, for persistence.
    pub fn snapshot(&self) -> &[PlateRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for PlateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 24)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_first_sighting_creates_row() {
        let mut registry = PlateRegistry::new();
        let (record, is_new) = registry.lookup_or_create("MH12AB1234", "car.jpg", at(10, 0, 0));

        assert!(is_new);
        assert_eq!(record.id, 1);
        assert_eq!(record.source, "car.jpg");
        assert_eq!(record.seen_count, 1);
        assert_eq!(record.first_seen, "2026-08-24 10:00:00");
        assert_eq!(record.first_seen, record.last_seen);
        assert_eq!(record.region_code, "MH");
        assert_eq!(record.sequence_code, "12");
        assert_eq!(record.series, "AB");
        assert_eq!(record.serial_number, "1234");
    }

    #[test]
    fn test_repeat_sighting_updates_existing_row() {
        let mut registry = PlateRegistry::new();
        registry.lookup_or_create("MH12AB1234", "a.jpg", at(10, 0, 0));
        let (record, is_new) = registry.lookup_or_create("MH12AB1234", "b.jpg", at(10, 0, 5));

        assert!(!is_new);
        assert_eq!(record.seen_count, 2);
        assert_eq!(record.first_seen, "2026-08-24 10:00:00");
        assert_eq!(record.last_seen, "2026-08-24 10:00:05");
        // source stays the first sighting's file
        assert_eq!(record.source, "a.jpg");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unstructured_text_still_registered() {
        let mut registry = PlateRegistry::new();
        let (record, is_new) = registry.lookup_or_create("HELLO", "a.jpg", at(9, 0, 0));

        assert!(is_new);
        assert_eq!(record.full_text, "HELLO");
        assert_eq!(record.region_code, "");
        assert_eq!(record.sequence_code, "");
        assert_eq!(record.series, "");
        assert_eq!(record.serial_number, "");
    }

    #[test]
    fn test_ids_strictly_increase_in_creation_order() {
        let mut registry = PlateRegistry::new();
        for (i, text) in ["AA11AA111", "BB22BB222", "CC33CC333"].iter().enumerate() {
            let (record, _) = registry.lookup_or_create(text, "a.jpg", at(8, 0, i as u32));
            assert_eq!(record.id, i as u64 + 1);
        }
        let ids: Vec<u64> = registry.snapshot().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_reload_resumes_id_counter_from_max() {
        let mut registry = PlateRegistry::new();
        registry.lookup_or_create("MH12AB1234", "a.jpg", at(10, 0, 0));
        registry.lookup_or_create("DL1C123", "a.jpg", at(10, 0, 1));

        let rows = registry.snapshot().to_vec();
        let mut reloaded = PlateRegistry::load(rows);

        let (record, is_new) = reloaded.lookup_or_create("KA05MX9999", "b.jpg", at(11, 0, 0));
        assert!(is_new);
        assert_eq!(record.id, 3);
    }

    #[test]
    fn test_reload_resumes_seen_count_not_restart() {
        let mut registry = PlateRegistry::new();
        registry.lookup_or_create("MH12AB1234", "a.jpg", at(10, 0, 0));
        registry.lookup_or_create("MH12AB1234", "a.jpg", at(10, 0, 1));

        let mut reloaded = PlateRegistry::load(registry.snapshot().to_vec());
        let (record, is_new) = reloaded.lookup_or_create("MH12AB1234", "b.jpg", at(12, 0, 0));

        assert!(!is_new);
        assert_eq!(record.seen_count, 3);
        assert_eq!(record.first_seen, "2026-08-24 10:00:00");
        assert_eq!(record.last_seen, "2026-08-24 12:00:00");
    }

    #[test]
    fn test_load_empty_starts_at_id_one() {
        let mut registry = PlateRegistry::load(Vec::new());
        let (record, _) = registry.lookup_or_create("MH12AB1234", "a.jpg", at(10, 0, 0));
        assert_eq!(record.id, 1);
    }

    #[test]
    fn test_full_text_stays_unique() {
        let mut registry = PlateRegistry::new();
        for _ in 0..5 {
            registry.lookup_or_create("MH12AB1234", "a.jpg", at(10, 0, 0));
        }
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("MH12AB1234").map(|r| r.seen_count), Some(5));
    }
}
