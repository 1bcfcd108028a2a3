// src/lib.rs - Library interface for internal module access

pub mod config;
pub mod constants;
pub mod data_analysis;
pub mod data_input;
pub mod error;
pub mod plot_framework;
pub mod plot_functions;
pub mod report;
pub mod types;

pub use error::{AnalysisError, Result};

pub fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// src/lib.rs
