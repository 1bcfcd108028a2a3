// src/plot_functions/mod.rs

pub mod plot_release;

// src/plot_functions/mod.rs
