// src/plot_framework.rs

use plotters::backend::BitMapBackend;
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{PathElement, Text};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color, IntoFont, RGBColor};

use std::error::Error;
use std::ops::Range;
use std::path::Path;

use crate::constants::{
    FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE, FONT_SIZE_LEGEND, FONT_SIZE_MAIN_TITLE,
    FONT_SIZE_MESSAGE, LINE_WIDTH_LEGEND, PLOT_HEIGHT, PLOT_WIDTH, RANGE_PADDING_FRACTION,
};

/// `a..b` (either order) widened by 15% of the span on each side. A flat span
/// gets half a unit each side so the chart still has height.
pub fn padded_range(a: f64, b: f64) -> Range<f64> {
    let (lo, hi) = (a.min(b), a.max(b));
    let pad = match hi - lo {
        span if span < 1e-6 => 0.5,
        span => span * RANGE_PADDING_FRACTION,
    };
    (lo - pad)..(hi + pad)
}

#[derive(Clone)]
pub struct PlotSeries {
    pub data: Vec<(f64, f64)>,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
}

/// A full-height vertical line at `x` (release instant and similar events).
#[derive(Clone)]
pub struct VerticalMarker {
    pub x: f64,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
}

#[derive(Clone)]
pub struct PanelConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<PlotSeries>,
    pub markers: Vec<VerticalMarker>,
    pub x_label: String,
    pub y_label: String,
}

impl PanelConfig {
    fn has_data(&self) -> bool {
        self.series.iter().any(|s| !s.data.is_empty())
    }

    fn has_valid_ranges(&self) -> bool {
        self.x_range.end > self.x_range.start && self.y_range.end > self.y_range.start
    }
}

fn draw_panel(
    area: &DrawingArea<BitMapBackend, Shift>,
    panel: &PanelConfig,
) -> Result<(), Box<dyn Error>> {
    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(5)
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d(panel.x_range.clone(), panel.y_range.clone())?;

    chart
        .configure_mesh()
        .x_desc(&panel.x_label)
        .y_desc(&panel.y_label)
        .x_labels(20)
        .y_labels(10)
        .y_label_formatter(&|y| format!("{:.1}", y))
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    let mut legend_series_count = 0;
    for s in panel.series.iter().filter(|s| !s.data.is_empty()) {
        let series = chart.draw_series(LineSeries::new(
            s.data.iter().cloned(),
            s.color.stroke_width(s.stroke_width),
        ))?;
        if !s.label.is_empty() {
            series.label(&s.label).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], s.color.stroke_width(LINE_WIDTH_LEGEND))
            });
            legend_series_count += 1;
        }
    }

    for marker in &panel.markers {
        if !marker.x.is_finite() {
            continue;
        }
        let x = marker.x.clamp(panel.x_range.start, panel.x_range.end);
        let line = chart.draw_series(LineSeries::new(
            vec![(x, panel.y_range.start), (x, panel.y_range.end)],
            marker.color.stroke_width(marker.stroke_width),
        ))?;
        if !marker.label.is_empty() {
            line.label(&marker.label).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], marker.color.stroke_width(LINE_WIDTH_LEGEND))
            });
            legend_series_count += 1;
        }
    }

    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", FONT_SIZE_LEGEND))
            .draw()?;
    }
    Ok(())
}

/// Renders the panels top to bottom into one PNG. A panel without data or
/// with an empty range gets a placeholder message instead of a chart.
/// Returns whether at least one panel was charted.
pub fn draw_stacked_panels(
    output_path: &Path,
    root_name: &str,
    panels: &[(String, Option<PanelConfig>)],
) -> Result<bool, Box<dyn Error>> {
    let root_area = BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;
    root_area.draw(&Text::new(
        root_name,
        (10, 10),
        ("sans-serif", FONT_SIZE_MAIN_TITLE).into_font().color(&BLACK),
    ))?;
    let margined_root_area = root_area.margin(50, 5, 5, 5);
    let sub_plot_areas = margined_root_area.split_evenly((panels.len().max(1), 1));
    let mut any_panel_plotted = false;

    for ((panel_name, panel), area) in panels.iter().zip(sub_plot_areas.iter()) {
        let reason = match panel {
            Some(panel) if panel.has_data() && panel.has_valid_ranges() => {
                draw_panel(area, panel)?;
                any_panel_plotted = true;
                continue;
            }
            Some(panel) if !panel.has_data() => "no data points",
            Some(_) => "empty axis range",
            None => "series could not be built",
        };
        // Centered two-line notice in place of the chart.
        let (width, height) = area.dim_in_pixel();
        let (cx, cy) = (width as i32 / 2, height as i32 / 2);
        let style = ("sans-serif", FONT_SIZE_MESSAGE)
            .into_font()
            .color(&RED)
            .pos(Pos::new(HPos::Center, VPos::Center));
        area.draw(&Text::new(format!("{panel_name}: unavailable"), (cx, cy - FONT_SIZE_MESSAGE), style.clone()))?;
        area.draw(&Text::new(reason, (cx, cy + FONT_SIZE_MESSAGE / 2), style))?;
    }

    root_area.present()?;
    Ok(any_panel_plotted)
}


// src/plot_framework.rs
