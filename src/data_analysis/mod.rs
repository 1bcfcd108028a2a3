// src/data_analysis/mod.rs

pub mod derivative;
pub mod release_metrics;
pub mod release_point;
pub mod smoothing;
pub mod throw_phases;
pub mod time_series;

// src/data_analysis/mod.rs
