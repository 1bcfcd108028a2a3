// src/config.rs

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::*;
use crate::error::Result;
use crate::types::ImplementKind;

/// Tunables for the release-point detector. Defaults come from `constants.rs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    pub leading_skip_min_frames: usize,
    pub leading_skip_fraction: f64,
    pub trailing_skip_min_frames: usize,
    pub trailing_skip_fraction: f64,
    /// Peak speeds below this classify the trial as shot put.
    pub implement_speed_threshold: f64,
    pub shot_put_min_height: f64,
    pub discus_min_height: f64,
    pub smoothing_radius: usize,
    pub peak_significance_ratio: f64,
    pub peak_lookahead_frames: usize,
    pub peak_min_drop_ratio: f64,
    pub refine_radius_frames: usize,
    pub refine_height_slack: f64,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            leading_skip_min_frames: LEADING_SKIP_MIN_FRAMES,
            leading_skip_fraction: LEADING_SKIP_FRACTION,
            trailing_skip_min_frames: TRAILING_SKIP_MIN_FRAMES,
            trailing_skip_fraction: TRAILING_SKIP_FRACTION,
            implement_speed_threshold: IMPLEMENT_SPEED_THRESHOLD_MPS,
            shot_put_min_height: SHOT_PUT_MIN_RELEASE_HEIGHT_M,
            discus_min_height: DISCUS_MIN_RELEASE_HEIGHT_M,
            smoothing_radius: SPEED_SMOOTHING_RADIUS,
            peak_significance_ratio: PEAK_SIGNIFICANCE_RATIO,
            peak_lookahead_frames: PEAK_LOOKAHEAD_FRAMES,
            peak_min_drop_ratio: PEAK_MIN_DROP_RATIO,
            refine_radius_frames: REFINE_RADIUS_FRAMES,
            refine_height_slack: REFINE_HEIGHT_SLACK_M,
        }
    }
}

impl ReleaseConfig {
    pub fn classify_implement(&self, global_max_speed: f64) -> ImplementKind {
        if global_max_speed < self.implement_speed_threshold {
            ImplementKind::ShotPut
        } else {
            ImplementKind::Discus
        }
    }

    pub fn min_release_height(&self, implement: ImplementKind) -> f64 {
        match implement {
            ImplementKind::ShotPut => self.shot_put_min_height,
            ImplementKind::Discus => self.discus_min_height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Rows with this many cells or fewer are not samples.
    pub min_columns: usize,
    /// Below this many accepted rows the extraction is flagged as sparse.
    pub min_accepted_rows: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_columns: MIN_DATA_COLUMNS,
            min_accepted_rows: MIN_ACCEPTED_ROWS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub sample_search_rows: usize,
    pub extraction: ExtractionConfig,
    pub release: ReleaseConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_search_rows: SAMPLE_ROW_MAX_SEARCH,
            extraction: ExtractionConfig::default(),
            release: ReleaseConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Reads a JSON config; absent keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}


// src/config.rs
