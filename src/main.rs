// src/main.rs

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueHint};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use throw_release_analyzer::config::AnalysisConfig;
use throw_release_analyzer::crate_version;
use throw_release_analyzer::plot_functions::plot_release::plot_release;
use throw_release_analyzer::report::{analyze_file, TrialAnalysis};

#[derive(Parser, Debug)]
#[command(author, version, about = "Release point detection for throwing motion captures", long_about = None)]
struct Cli {
    /// Tab-separated capture exports to analyze
    #[arg(required = true, value_hint = ValueHint::FilePath)]
    inputs: Vec<PathBuf>,

    /// JSON file overriding analysis parameters
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Peak hand speed (m/s) at or above which the throw is treated as discus
    #[arg(long)]
    implement_speed_threshold: Option<f64>,

    /// Directory for per-file JSON reports
    #[arg(long, value_hint = ValueHint::DirPath)]
    json: Option<PathBuf>,

    /// Directory for per-file release plots (PNG)
    #[arg(long, value_hint = ValueHint::DirPath)]
    plot: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

fn load_config(cli: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_json_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    if let Some(threshold) = cli.implement_speed_threshold {
        config.release.implement_speed_threshold = threshold;
    }
    Ok(config)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "capture".to_string())
}

fn write_outputs(cli: &Cli, input: &Path, analysis: &TrialAnalysis, config: &AnalysisConfig) -> Result<()> {
    let stem = file_stem(input);
    if let Some(dir) = &cli.json {
        let path = dir.join(format!("{stem}_release.json"));
        analysis
            .report
            .write_json(&path)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(dir) = &cli.plot {
        let path = dir.join(format!("{stem}_release.png"));
        plot_release(&analysis.series, &analysis.report.release, &config.release, &stem, &path)
            .with_context(|| format!("plotting {}", path.display()))?;
    }
    Ok(())
}

fn print_summary(results: &[(String, TrialAnalysis)]) {
    println!(
        "{:<30} | {:>8} | {:>10} | {:>11} | {:>9} | {:>10} | {:<18}",
        "File", "Time (s)", "Height (m)", "Speed (m/s)", "Angle (°)", "Dist (m)", "Method"
    );
    println!("{}", "-".repeat(112));
    for (name, analysis) in results {
        let release = &analysis.report.release;
        let distance = analysis
            .report
            .projected_distance_m
            .map_or_else(|| "-".to_string(), |d| format!("{d:.2}"));
        println!(
            "{:<30} | {:>8.3} | {:>10.3} | {:>11.2} | {:>9.1} | {:>10} | {:<18}",
            name,
            release.time,
            release.height(),
            release.speed,
            release.angle_deg,
            distance,
            format!("{:?}", release.method)
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    info!("throw_release_analyzer {}", crate_version());
    let config = load_config(&cli)?;
    for dir in [&cli.json, &cli.plot].into_iter().flatten() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut results = Vec::new();
    let mut failures = 0usize;
    for input in &cli.inputs {
        info!("Processing '{}'", input.display());
        let outcome = analyze_file(input, &config)
            .map_err(anyhow::Error::from)
            .and_then(|analysis| {
                write_outputs(&cli, input, &analysis, &config)?;
                Ok(analysis)
            });
        match outcome {
            Ok(analysis) => results.push((file_stem(input), analysis)),
            Err(err) => {
                failures += 1;
                error!("{}: {:#}", input.display(), err);
            }
        }
    }

    print_summary(&results);
    if failures > 0 {
        bail!("{} of {} files failed", failures, cli.inputs.len());
    }
    Ok(())
}

// src/main.rs
