// src/error.rs

//! Error types for capture loading, schema detection and release analysis.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("capture file has no header row")]
    EmptyCapture,

    #[error("schema detection failed: missing critical fields {}", missing.join(", "))]
    SchemaDetection { missing: Vec<String> },

    #[error("insufficient data: need {required} rows, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error(
        "degenerate search window: {len} frames leave window {window_start}..{window_end}"
    )]
    DegenerateWindow {
        len: usize,
        window_start: usize,
        window_end: usize,
    },

    #[error("invalid time series: {0}")]
    InvalidSeries(String),

    #[error("plot rendering failed: {0}")]
    Plot(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
