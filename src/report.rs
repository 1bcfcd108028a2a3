// src/report.rs
// Per-trial pipeline and its serializable result

use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::config::AnalysisConfig;
use crate::data_analysis::release_metrics::{
    arm_extension_at, estimate_flight_distance, release_summary, ReleaseSummary,
};
use crate::data_analysis::release_point::{find_release_point, ReleaseEvent};
use crate::data_analysis::throw_phases::{detect_foot_phases, FootPhases};
use crate::data_analysis::time_series::{extract_from_detection, ExtractionStats, TimeSeries};
use crate::data_input::log_data::CaptureTable;
use crate::data_input::log_parser::load_capture;
use crate::data_input::schema_detector::{detect_schema, DetectionResult};
use crate::error::Result;

#[derive(Debug, Clone, Serialize)]
pub struct TrialReport {
    pub file: String,
    pub detection: DetectionResult,
    pub extraction: ExtractionStats,
    pub release: ReleaseEvent,
    pub summary: ReleaseSummary,
    /// Projectile range from release height, speed and angle; no drag.
    pub projected_distance_m: Option<f64>,
    /// Right elbow angle at release; 180 is a straight arm.
    pub arm_extension_deg: Option<f64>,
    pub foot_phases: Option<FootPhases>,
}

impl TrialReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        info!("Report written to '{}'", path.display());
        Ok(())
    }
}

/// Everything one trial produced: the report plus the series behind it.
#[derive(Debug, Clone)]
pub struct TrialAnalysis {
    pub report: TrialReport,
    pub series: TimeSeries,
}

/// Runs detection, extraction, release detection and the release metrics on
/// an already loaded capture.
pub fn analyze_table(name: &str, table: &CaptureTable, config: &AnalysisConfig) -> Result<TrialAnalysis> {
    let detection = detect_schema(table, config.sample_search_rows);
    let (series, extraction) = extract_from_detection(table, &detection, &config.extraction)?;
    let release = find_release_point(&series, &config.release)?;

    let summary = release_summary(&series, &release);
    let projected_distance_m = estimate_flight_distance(release.height(), release.speed, release.angle_deg);
    let arm_extension_deg = arm_extension_at(table, &detection, &series, release.index);
    let foot_phases = detect_foot_phases(&series, table, &detection, release.index);
    if arm_extension_deg.is_none() {
        warn!("Arm joints not available; arm extension not computed");
    }

    Ok(TrialAnalysis {
        report: TrialReport {
            file: name.to_string(),
            detection,
            extraction,
            release,
            summary,
            projected_distance_m,
            arm_extension_deg,
            foot_phases,
        },
        series,
    })
}

pub fn analyze_file(path: &Path, config: &AnalysisConfig) -> Result<TrialAnalysis> {
    let table = load_capture(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    analyze_table(&name, &table, config)
}

// src/report.rs
