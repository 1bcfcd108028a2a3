// src/data_input/schema_detector.rs

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::constants::{PLAUSIBLE_HEIGHT_MAX_M, PLAUSIBLE_HEIGHT_MIN_M, TRIPLET_Z_OFFSET};
use crate::data_input::field_patterns::{
    FieldPatterns, CRITICAL_FIELDS, FIELD_PATTERNS, SKELETON_FIELD_PATTERNS,
};
use crate::data_input::log_data::CaptureTable;
use crate::data_input::row_classifier::parse_numeric;
use crate::data_input::sample_row::find_valid_sample_row;
use crate::error::{AnalysisError, Result};

/// Semantic field key -> resolved column index, in pattern-table order.
/// Each key appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(&'static str, Option<usize>)>,
}

impl FieldMap {
    pub fn get(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .and_then(|(_, index)| *index)
    }

    /// Sets the index for `key`, replacing any earlier entry.
    pub fn insert(&mut self, key: &'static str, index: Option<usize>) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = index,
            None => self.entries.push((key, index)),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| *k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<usize>)> + '_ {
        self.entries.iter().copied()
    }

    pub fn resolved_count(&self) -> usize {
        self.entries.iter().filter(|(_, index)| index.is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Unresolved fields serialize as -1, matching the exporter's diagnostics.
impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, index) in &self.entries {
            let value: i64 = index.map_or(-1, |i| i as i64);
            map.serialize_entry(key, &value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DetectionResult {
    /// True iff every critical hand-position field resolved.
    pub success: bool,
    pub fields: FieldMap,
    pub skeleton_joints: FieldMap,
    /// Unresolved keys from both tables, in table order.
    pub missing: Vec<&'static str>,
    pub found: Vec<String>,
}

impl DetectionResult {
    pub fn missing_critical(&self) -> Vec<String> {
        CRITICAL_FIELDS
            .iter()
            .filter(|key| self.fields.get(key).is_none())
            .map(|key| key.to_string())
            .collect()
    }

    /// Gate before time-series extraction.
    pub fn require_success(&self) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(AnalysisError::SchemaDetection {
                missing: self.missing_critical(),
            })
        }
    }

    /// Missing keys that belong to the required table, critical ones included.
    pub fn missing_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.missing
            .iter()
            .copied()
            .filter(|key| self.fields.contains_key(key))
    }
}

/// Every header column equal to, or containing, `pattern`.
pub fn find_all_matches<S: AsRef<str>>(header: &[S], pattern: &str) -> Vec<usize> {
    header
        .iter()
        .enumerate()
        .filter(|(_, label)| {
            let label = label.as_ref();
            label == pattern || label.contains(pattern)
        })
        .map(|(i, _)| i)
        .collect()
}

/// Chooses one column among several matches.
///
/// With a single match, or no sample row, the first match wins. Otherwise the
/// first candidate whose value two columns to the right (the Z of an X,Y,Z
/// triplet) is a plausible body height in meters is taken, falling back to the
/// first match.
pub fn select_valid_index<S: AsRef<str>>(matches: &[usize], sample_row: Option<&[S]>) -> Option<usize> {
    let first = *matches.first()?;
    let sample = match sample_row {
        Some(row) if matches.len() > 1 => row,
        _ => return Some(first),
    };

    let plausible = matches.iter().copied().find(|&idx| {
        sample
            .get(idx + TRIPLET_Z_OFFSET)
            .and_then(|cell| parse_numeric(cell.as_ref()))
            .is_some_and(|z| (PLAUSIBLE_HEIGHT_MIN_M..=PLAUSIBLE_HEIGHT_MAX_M).contains(&z))
    });
    Some(plausible.unwrap_or(first))
}

/// Tries patterns in priority order; the first pattern with any match decides,
/// even when its matches are ambiguous.
fn resolve_field<S: AsRef<str>>(
    header: &[S],
    patterns: &[&str],
    sample_row: Option<&[S]>,
) -> Option<usize> {
    patterns
        .iter()
        .map(|pattern| find_all_matches(header, pattern))
        .find(|matches| !matches.is_empty())
        .and_then(|matches| select_valid_index(&matches, sample_row))
}

fn resolve_table<S: AsRef<str>>(
    header: &[S],
    table: &[FieldPatterns],
    sample_row: Option<&[S]>,
) -> FieldMap {
    let mut map = FieldMap::default();
    for (key, patterns) in table {
        map.insert(*key, resolve_field(header, patterns, sample_row));
    }
    map
}

/// Maps every semantic field and skeleton joint onto header columns.
pub fn detect_field_positions<S: AsRef<str>>(header: &[S], sample_row: Option<&[S]>) -> DetectionResult {
    let fields = resolve_table(header, FIELD_PATTERNS, sample_row);
    let skeleton_joints = resolve_table(header, SKELETON_FIELD_PATTERNS, sample_row);

    let mut missing = Vec::new();
    let mut found = Vec::new();
    for (key, index) in fields.iter() {
        match index {
            Some(column) => found.push(format!("{key}: column {column}")),
            None => missing.push(key),
        }
    }
    // Joint misses are recorded but never reported as warnings.
    missing.extend(
        skeleton_joints
            .iter()
            .filter(|(_, index)| index.is_none())
            .map(|(key, _)| key),
    );

    let success = CRITICAL_FIELDS.iter().all(|key| fields.get(key).is_some());

    DetectionResult {
        success,
        fields,
        skeleton_joints,
        missing,
        found,
    }
}

/// Runs sample-row selection and field detection over a loaded capture.
pub fn detect_schema(table: &CaptureTable, sample_search_rows: usize) -> DetectionResult {
    let sample_row = find_valid_sample_row(&table.rows, sample_search_rows);
    if sample_row.is_none() {
        warn!(
            "No valid sample row in the first {} rows; ambiguous columns resolve to first match",
            sample_search_rows
        );
    }

    let header = table.header();
    let detected = detect_field_positions(header, sample_row);

    if detected.success {
        info!(
            "Schema detected: {}/{} fields, {}/{} skeleton joints",
            detected.fields.resolved_count(),
            detected.fields.len(),
            detected.skeleton_joints.resolved_count(),
            detected.skeleton_joints.len()
        );
    } else {
        warn!(
            "Schema detection failed, missing critical fields: {}",
            detected.missing_critical().join(", ")
        );
    }
    for line in &detected.found {
        debug!("  {}", line);
    }
    let missing_optional: Vec<&str> = detected.missing_fields().collect();
    if detected.success && !missing_optional.is_empty() {
        info!("Missing optional fields: {}", missing_optional.join(", "));
    }
    detected
}


// src/data_input/schema_detector.rs
