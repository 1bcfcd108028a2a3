// src/data_input/mod.rs

pub mod field_patterns;
pub mod log_data;
pub mod log_parser;
pub mod row_classifier;
pub mod sample_row;
pub mod schema_detector;

// src/data_input/mod.rs
