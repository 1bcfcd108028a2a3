// src/constants.rs

use plotters::style::colors::full_palette::{GREY, LIGHTBLUE, ORANGE, PURPLE, RED};
use plotters::style::RGBColor;

// Plot dimensions.
pub const PLOT_WIDTH: u32 = 1920;
pub const PLOT_HEIGHT: u32 = 1080;
// Fraction of the data span added above and below each panel.
pub const RANGE_PADDING_FRACTION: f64 = 0.15;

// --- Capture layout ---
pub const HEADER_ROW_INDEX: usize = 0;
// Row 1 holds units/metadata and is never sampled.
pub const FIRST_DATA_ROW_INDEX: usize = 2;
pub const TIME_COLUMN_INDEX: usize = 0;

// --- Row classifier ---
pub const UNIFORM_SAMPLE_SIZE: usize = 50;
pub const UNIFORM_MIN_PARSED_VALUES: usize = 10;
pub const UNIFORM_VALUE_TOLERANCE: f64 = 0.001;
pub const UNIFORM_SAME_FRACTION: f64 = 0.8;

// --- Sample row selector ---
pub const SAMPLE_ROW_MAX_SEARCH: usize = 20;
pub const SAMPLE_ROW_MIN_COLUMNS: usize = 10;

// --- Schema detector disambiguation ---
// Offset from an X column to its Z column in an X,Y,Z triplet.
pub const TRIPLET_Z_OFFSET: usize = 2;
pub const PLAUSIBLE_HEIGHT_MIN_M: f64 = 0.0;
pub const PLAUSIBLE_HEIGHT_MAX_M: f64 = 2.5;

// --- Time-series extractor ---
pub const MIN_DATA_COLUMNS: usize = 100;
pub const MIN_ACCEPTED_ROWS: usize = 100;
pub const ZERO_HAND_TOLERANCE_M: f64 = 0.01;

// --- Release-point detector ---
pub const LEADING_SKIP_MIN_FRAMES: usize = 5;
pub const LEADING_SKIP_FRACTION: f64 = 0.10;
pub const TRAILING_SKIP_MIN_FRAMES: usize = 3;
pub const TRAILING_SKIP_FRACTION: f64 = 0.02;
pub const MIN_WINDOW_FRAMES: usize = 3;

// Peak hand speed separating shot put (below) from discus (at or above).
pub const IMPLEMENT_SPEED_THRESHOLD_MPS: f64 = 18.0;
pub const SHOT_PUT_MIN_RELEASE_HEIGHT_M: f64 = 1.6;
pub const DISCUS_MIN_RELEASE_HEIGHT_M: f64 = 1.2;

pub const SPEED_SMOOTHING_RADIUS: usize = 2;
pub const PEAK_SIGNIFICANCE_RATIO: f64 = 0.40;
pub const PEAK_LOOKAHEAD_FRAMES: usize = 10;
pub const PEAK_MIN_DROP_RATIO: f64 = 0.05;

pub const REFINE_RADIUS_FRAMES: usize = 5;
pub const REFINE_HEIGHT_SLACK_M: f64 = 0.1;

// --- Release metrics ---
pub const GRAVITY_MPS2: f64 = 9.81;
// Rotation count needs more pre-release frames than this.
pub const ROTATION_MIN_FRAMES: usize = 10;
pub const FOOT_CONTACT_THRESHOLD_M: f64 = 0.15;
pub const FOOT_PHASE_STABLE_FRAMES: usize = 5;
// Minimum frame gap between consecutive foot events.
pub const FOOT_PHASE_MIN_GAP_FRAMES: usize = 5;
// Search start advance when the preceding event was not found.
pub const FOOT_PHASE_MISSING_ADVANCE_FRAMES: usize = 10;

// --- Plot Color Assignments ---
pub const COLOR_SPEED_RAW: &RGBColor = &LIGHTBLUE;
pub const COLOR_SPEED_SMOOTHED: &RGBColor = &PURPLE;
pub const COLOR_HEIGHT: &RGBColor = &ORANGE;
pub const COLOR_RELEASE_MARKER: &RGBColor = &RED;
pub const COLOR_THRESHOLD_LINE: &RGBColor = &GREY;

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 1;
pub const LINE_WIDTH_LEGEND: u32 = 2;
pub const LINE_WIDTH_MARKER: u32 = 2;

pub const FONT_SIZE_MAIN_TITLE: i32 = 24;
pub const FONT_SIZE_CHART_TITLE: i32 = 22;
pub const FONT_SIZE_AXIS_LABEL: i32 = 14;
pub const FONT_SIZE_LEGEND: i32 = 13;
pub const FONT_SIZE_MESSAGE: i32 = 20;

// src/constants.rs
