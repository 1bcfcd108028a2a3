// src/data_analysis/time_series.rs

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ExtractionConfig;
use crate::constants::{TIME_COLUMN_INDEX, ZERO_HAND_TOLERANCE_M};
use crate::data_analysis::derivative::velocities_from_positions;
use crate::data_input::field_patterns::{
    HAND_R_V, HAND_R_VX, HAND_R_VY, HAND_R_VZ, HAND_R_X, HAND_R_Y, HAND_R_Z,
};
use crate::data_input::log_data::CaptureTable;
use crate::data_input::row_classifier::{is_uniform_values, parse_cell_or_zero};
use crate::data_input::schema_detector::DetectionResult;
use crate::error::{AnalysisError, Result};
use crate::types::{norm, Vec3};

/// Hand trajectory, one entry per accepted frame. `times` is strictly increasing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSeries {
    pub times: Vec<f64>,
    pub positions: Vec<Vec3>,
    pub velocities: Vec<Vec3>,
    pub speeds: Vec<f64>,
    /// Source row of each frame in the capture table. Empty for series that
    /// were not extracted from a table.
    pub row_indices: Vec<usize>,
}

impl TimeSeries {
    /// Builds a series without table provenance.
    pub fn from_parts(times: Vec<f64>, positions: Vec<Vec3>, velocities: Vec<Vec3>, speeds: Vec<f64>) -> Self {
        Self {
            times,
            positions,
            velocities,
            speeds,
            row_indices: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn height(&self, frame: usize) -> f64 {
        self.positions[frame][2]
    }

    pub fn validate(&self) -> Result<()> {
        let n = self.times.len();
        if self.positions.len() != n || self.velocities.len() != n || self.speeds.len() != n {
            return Err(AnalysisError::InvalidSeries(format!(
                "sequence lengths differ: times {}, positions {}, velocities {}, speeds {}",
                n,
                self.positions.len(),
                self.velocities.len(),
                self.speeds.len()
            )));
        }
        if !self.row_indices.is_empty() && self.row_indices.len() != n {
            return Err(AnalysisError::InvalidSeries(format!(
                "row index count {} does not match {} frames",
                self.row_indices.len(),
                n
            )));
        }
        Ok(())
    }
}

/// Columns feeding the extractor, taken from the detected field map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandChannels {
    pub position: [usize; 3],
    /// `None` when the velocity triplet is not in the export; derived from positions.
    pub velocity: Option<[usize; 3]>,
    /// `None` when the speed column is not in the export; computed as |velocity|.
    pub speed: Option<usize>,
}

impl HandChannels {
    pub fn from_detection(detection: &DetectionResult) -> Result<Self> {
        detection.require_success()?;
        let fields = &detection.fields;
        let position = match (fields.get(HAND_R_X), fields.get(HAND_R_Y), fields.get(HAND_R_Z)) {
            (Some(x), Some(y), Some(z)) => [x, y, z],
            _ => {
                return Err(AnalysisError::SchemaDetection {
                    missing: detection.missing_critical(),
                })
            }
        };
        let velocity = match (fields.get(HAND_R_VX), fields.get(HAND_R_VY), fields.get(HAND_R_VZ)) {
            (Some(vx), Some(vy), Some(vz)) => Some([vx, vy, vz]),
            _ => None,
        };
        Ok(Self {
            position,
            velocity,
            speed: fields.get(HAND_R_V),
        })
    }
}

/// Row accounting for one extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    pub rows_examined: usize,
    pub short_rows: usize,
    pub uniform_rows: usize,
    pub non_positive_time_rows: usize,
    pub time_regressions: usize,
    /// Positive-time rows whose hand position is at the origin. Kept, counted only.
    pub zero_hand_rows: usize,
    pub accepted_rows: usize,
    pub velocity_derived: bool,
    pub speed_derived: bool,
}

impl ExtractionStats {
    pub fn is_sparse(&self, min_accepted_rows: usize) -> bool {
        self.accepted_rows < min_accepted_rows
    }
}

fn triplet(values: &[f64], columns: [usize; 3]) -> Vec3 {
    columns.map(|c| values.get(c).copied().unwrap_or(0.0))
}

/// Walks rows 2.. of the capture and collects the hand trajectory.
///
/// Rows with too few cells, uniform artifact rows and rows with a
/// non-positive time stamp are skipped. A row is accepted only if its time
/// strictly exceeds the last accepted time; anything else is a regression and
/// is dropped rather than reordered.
pub fn extract_time_series(
    table: &CaptureTable,
    channels: &HandChannels,
    config: &ExtractionConfig,
) -> (TimeSeries, ExtractionStats) {
    let mut series = TimeSeries::default();
    let mut stats = ExtractionStats::default();
    let mut last_accepted_time = f64::NEG_INFINITY;

    for (row_index, row) in table.data_rows() {
        stats.rows_examined += 1;
        if row.len() <= config.min_columns {
            stats.short_rows += 1;
            continue;
        }

        let values: Vec<f64> = row.iter().map(|cell| parse_cell_or_zero(cell)).collect();
        if is_uniform_values(values.iter().copied()) {
            stats.uniform_rows += 1;
            continue;
        }

        let time = values[TIME_COLUMN_INDEX];
        if time <= 0.0 {
            stats.non_positive_time_rows += 1;
            continue;
        }

        let position = triplet(&values, channels.position);
        if position.iter().all(|c| c.abs() < ZERO_HAND_TOLERANCE_M) {
            stats.zero_hand_rows += 1;
        }

        if time > last_accepted_time {
            last_accepted_time = time;
            series.times.push(time);
            series.positions.push(position);
            if let Some(columns) = channels.velocity {
                series.velocities.push(triplet(&values, columns));
            }
            if let Some(column) = channels.speed {
                series.speeds.push(values.get(column).copied().unwrap_or(0.0));
            }
            series.row_indices.push(row_index);
        } else {
            stats.time_regressions += 1;
            debug!("Dropping row {}: time {} not after {}", row_index, time, last_accepted_time);
        }
    }
    stats.accepted_rows = series.times.len();

    if channels.velocity.is_none() {
        series.velocities = velocities_from_positions(&series.positions, &series.times);
        stats.velocity_derived = true;
    }
    if channels.speed.is_none() {
        series.speeds = series.velocities.iter().map(norm).collect();
        stats.speed_derived = true;
    }

    info!(
        "Extracted {} frames from {} rows (uniform skipped: {}, time regressions: {}, zero-hand rows: {})",
        stats.accepted_rows,
        stats.rows_examined,
        stats.uniform_rows,
        stats.time_regressions,
        stats.zero_hand_rows
    );
    if stats.velocity_derived {
        info!("Hand velocity columns not found; velocities derived from positions");
    }
    if stats.speed_derived {
        info!("Hand speed column not found; speed computed from velocity");
    }
    if stats.is_sparse(config.min_accepted_rows) {
        warn!(
            "{}",
            AnalysisError::InsufficientData {
                required: config.min_accepted_rows,
                available: stats.accepted_rows,
            }
        );
    }

    (series, stats)
}

/// Resolves the hand channels from a detection result and extracts the series.
/// Fails if the detection did not find the critical hand-position fields.
pub fn extract_from_detection(
    table: &CaptureTable,
    detection: &DetectionResult,
    config: &ExtractionConfig,
) -> Result<(TimeSeries, ExtractionStats)> {
    let channels = HandChannels::from_detection(detection)?;
    Ok(extract_time_series(table, &channels, config))
}


// src/data_analysis/time_series.rs
