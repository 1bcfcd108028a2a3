// src/plot_functions/plot_release.rs

use ndarray::Array1;
use std::path::Path;
use tracing::info;

use crate::config::ReleaseConfig;
use crate::constants::{
    COLOR_HEIGHT, COLOR_RELEASE_MARKER, COLOR_SPEED_RAW, COLOR_SPEED_SMOOTHED, COLOR_THRESHOLD_LINE,
    LINE_WIDTH_MARKER, LINE_WIDTH_PLOT,
};
use crate::data_analysis::release_point::ReleaseEvent;
use crate::data_analysis::smoothing::centered_moving_average;
use crate::data_analysis::time_series::TimeSeries;
use crate::error::{AnalysisError, Result};
use crate::plot_framework::{draw_stacked_panels, padded_range, PanelConfig, PlotSeries, VerticalMarker};

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn release_marker(event: &ReleaseEvent) -> VerticalMarker {
    VerticalMarker {
        x: event.time,
        label: format!("Release ({:.3}s, {:?})", event.time, event.method),
        color: *COLOR_RELEASE_MARKER,
        stroke_width: LINE_WIDTH_MARKER,
    }
}

fn speed_panel(series: &TimeSeries, event: &ReleaseEvent, config: &ReleaseConfig) -> Option<PanelConfig> {
    let (t_min, t_max) = min_max(series.times.iter().copied())?;
    let smoothed = centered_moving_average(&Array1::from(series.speeds.clone()), config.smoothing_radius);
    let (s_min, s_max) = min_max(series.speeds.iter().copied())?;

    let smoothing_span = config.smoothing_radius.saturating_mul(2).saturating_add(1);
    let raw: Vec<(f64, f64)> = series.times.iter().copied().zip(series.speeds.iter().copied()).collect();
    let smooth: Vec<(f64, f64)> = series.times.iter().copied().zip(smoothed.iter().copied()).collect();

    Some(PanelConfig {
        title: format!(
            "Hand Speed ({}, peak {:.2} m/s, release {:.2} m/s)",
            event.implement, event.global_max_speed, event.speed
        ),
        x_range: t_min..t_max,
        y_range: padded_range(s_min.min(0.0), s_max),
        series: vec![
            PlotSeries {
                data: raw,
                label: "Speed (raw)".to_string(),
                color: *COLOR_SPEED_RAW,
                stroke_width: LINE_WIDTH_PLOT,
            },
            PlotSeries {
                data: smooth,
                label: format!("Speed (smoothed, {} frames)", smoothing_span),
                color: *COLOR_SPEED_SMOOTHED,
                stroke_width: LINE_WIDTH_PLOT,
            },
        ],
        markers: vec![release_marker(event)],
        x_label: "Time (s)".to_string(),
        y_label: "Speed (m/s)".to_string(),
    })
}

fn height_panel(series: &TimeSeries, event: &ReleaseEvent) -> Option<PanelConfig> {
    let (t_min, t_max) = min_max(series.times.iter().copied())?;
    let (h_min, h_max) = min_max(series.positions.iter().map(|p| p[2]))?;

    let height: Vec<(f64, f64)> = series
        .times
        .iter()
        .zip(&series.positions)
        .map(|(&t, p)| (t, p[2]))
        .collect();

    Some(PanelConfig {
        title: format!("Hand Height (release {:.3} m, angle {:.1} deg)", event.height(), event.angle_deg),
        x_range: t_min..t_max,
        y_range: padded_range(h_min.min(event.min_height), h_max.max(event.min_height)),
        series: vec![
            PlotSeries {
                data: height,
                label: "Height".to_string(),
                color: *COLOR_HEIGHT,
                stroke_width: LINE_WIDTH_PLOT,
            },
            PlotSeries {
                data: vec![(t_min, event.min_height), (t_max, event.min_height)],
                label: format!("Min release height {:.2} m", event.min_height),
                color: *COLOR_THRESHOLD_LINE,
                stroke_width: LINE_WIDTH_PLOT,
            },
        ],
        markers: vec![release_marker(event)],
        x_label: "Time (s)".to_string(),
        y_label: "Height (m)".to_string(),
    })
}

/// Two stacked panels: hand speed (raw and smoothed) and hand height with the
/// minimum release height, both marked at the release instant.
pub fn plot_release(
    series: &TimeSeries,
    event: &ReleaseEvent,
    config: &ReleaseConfig,
    root_name: &str,
    output_path: &Path,
) -> Result<()> {
    let panels = [
        ("Hand Speed".to_string(), speed_panel(series, event, config)),
        ("Hand Height".to_string(), height_panel(series, event)),
    ];
    let plotted = draw_stacked_panels(output_path, root_name, &panels)
        .map_err(|e| AnalysisError::Plot(e.to_string()))?;
    if plotted {
        info!("Release plot saved as '{}'", output_path.display());
    } else {
        info!(
            "Release plot '{}' has no data, only placeholder messages shown",
            output_path.display()
        );
    }
    Ok(())
}


// src/plot_functions/plot_release.rs
