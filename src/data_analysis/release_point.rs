// src/data_analysis/release_point.rs

use ndarray::{s, Array1};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::ReleaseConfig;
use crate::constants::MIN_WINDOW_FRAMES;
use crate::data_analysis::smoothing::centered_moving_average;
use crate::data_analysis::time_series::TimeSeries;
use crate::error::{AnalysisError, Result};
use crate::types::{horizontal_norm, ImplementKind, Vec3};

/// Which stage of the detector picked the release frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReleaseMethod {
    /// First significant smoothed-speed peak followed by a speed drop.
    LocalPeak,
    /// Fastest frame above the minimum release height.
    HeightQualifiedMax,
    /// Fastest frame in the window, height ignored.
    GlobalMax,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseEvent {
    pub index: usize,
    pub time: f64,
    pub position: Vec3,
    pub velocity: Vec3,
    pub speed: f64,
    /// Elevation of the velocity vector above the horizontal plane.
    pub angle_deg: f64,
    pub implement: ImplementKind,
    pub method: ReleaseMethod,
    pub min_height: f64,
    pub global_max_speed: f64,
    /// True if the fallback refinement moved the frame.
    pub refined: bool,
}

impl ReleaseEvent {
    pub fn height(&self) -> f64 {
        self.position[2]
    }
}

/// Frames `start..end` left after trimming the noisy sequence edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    pub start: usize,
    pub end: usize,
}

impl SearchWindow {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last(&self) -> usize {
        self.end - 1
    }
}

fn edge_frames(n: usize, fraction: f64, min_frames: usize) -> usize {
    ((n as f64 * fraction).floor() as usize).max(min_frames)
}

/// Excludes `max(5, 10%)` leading and `max(3, 2%)` trailing frames (defaults).
/// Windows shorter than three frames cannot hold a neighbour-checked peak and
/// are rejected.
pub fn search_window(n: usize, config: &ReleaseConfig) -> Result<SearchWindow> {
    let start = edge_frames(n, config.leading_skip_fraction, config.leading_skip_min_frames);
    let trailing = edge_frames(n, config.trailing_skip_fraction, config.trailing_skip_min_frames);
    let end = n.saturating_sub(trailing);
    if end < start.saturating_add(MIN_WINDOW_FRAMES) {
        return Err(AnalysisError::DegenerateWindow {
            len: n,
            window_start: start,
            window_end: end,
        });
    }
    Ok(SearchWindow { start, end })
}

/// Release angle in degrees; zero when there is no horizontal motion.
pub fn release_angle_deg(velocity: &Vec3) -> f64 {
    let horizontal = horizontal_norm(velocity);
    if horizontal > 0.0 {
        velocity[2].atan2(horizontal).to_degrees()
    } else {
        0.0
    }
}

// Earliest index holding the maximum speed among `candidates`.
fn first_max_speed<I>(speeds: &[f64], candidates: I) -> Option<usize>
where
    I: IntoIterator<Item = usize>,
{
    let mut best: Option<usize> = None;
    for i in candidates {
        match best {
            Some(b) if speeds[i] <= speeds[b] => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Locates the frame at which the implement leaves the hand.
///
/// Stages, in order: implement classification from the peak speed in the
/// search window, then the first significant local peak of the smoothed speed
/// (above the release height) that is followed by a drop, then the fastest
/// frame above the release height, then the fastest frame overall. Frames
/// chosen by a fallback are refined to the fastest nearby frame that is not
/// much lower.
pub fn find_release_point(series: &TimeSeries, config: &ReleaseConfig) -> Result<ReleaseEvent> {
    series.validate()?;
    let n = series.len();
    let window = search_window(n, config)?;
    let speeds = &series.speeds;

    let global_max_speed = speeds[window.start..window.end]
        .iter()
        .fold(0.0_f64, |max, &s| if s > max { s } else { max });
    let implement = config.classify_implement(global_max_speed);
    let min_height = config.min_release_height(implement);
    info!(
        "Implement inferred: {} (max speed {:.2} m/s, min release height {:.2} m)",
        implement, global_max_speed, min_height
    );

    let smoothed = centered_moving_average(&Array1::from(speeds.clone()), config.smoothing_radius);

    let primary = find_primary_peak(series, &smoothed, window, global_max_speed, min_height, config);

    let (index, method, refined) = match primary {
        Some(index) => (index, ReleaseMethod::LocalPeak, false),
        None => {
            let above_height =
                first_max_speed(speeds, (window.start..window.end).filter(|&i| series.height(i) > min_height));
            let (chosen, method) = match above_height {
                Some(i) => (i, ReleaseMethod::HeightQualifiedMax),
                None => {
                    // The window is non-empty, so a fastest frame always exists.
                    let i = first_max_speed(speeds, window.start..window.end).unwrap_or(window.start);
                    debug!("No frame above {:.2} m; using fastest frame {}", min_height, i);
                    (i, ReleaseMethod::GlobalMax)
                }
            };
            let refined_index = refine_release_index(series, chosen, window, min_height, config);
            (refined_index, method, refined_index != chosen)
        }
    };

    let velocity = series.velocities[index];
    let event = ReleaseEvent {
        index,
        time: series.times[index],
        position: series.positions[index],
        velocity,
        speed: speeds[index],
        angle_deg: release_angle_deg(&velocity),
        implement,
        method,
        min_height,
        global_max_speed,
        refined,
    };
    info!(
        "Release at frame {} ({:?}): t={:.3}s, speed={:.2} m/s, height={:.3} m, angle={:.1} deg",
        event.index,
        event.method,
        event.time,
        event.speed,
        event.height(),
        event.angle_deg
    );
    Ok(event)
}

fn find_primary_peak(
    series: &TimeSeries,
    smoothed: &Array1<f64>,
    window: SearchWindow,
    global_max_speed: f64,
    min_height: f64,
    config: &ReleaseConfig,
) -> Option<usize> {
    let speeds = &series.speeds;
    let significance_floor = global_max_speed * config.peak_significance_ratio;

    ((window.start + 1)..window.last())
        .filter(|&i| smoothed[i] > smoothed[i - 1] && smoothed[i] >= smoothed[i + 1])
        .filter(|&i| series.height(i) > min_height)
        .find(|&i| {
            let peak_speed = speeds[i];
            if peak_speed < significance_floor || peak_speed <= 0.0 {
                return false;
            }
            let lookahead_end = i.saturating_add(config.peak_lookahead_frames).min(window.end);
            let min_ahead = if i + 1 < lookahead_end {
                smoothed
                    .slice(s![i + 1..lookahead_end])
                    .fold(peak_speed, |min, &v| min.min(v))
            } else {
                peak_speed
            };
            let drop_ratio = (peak_speed - min_ahead) / peak_speed;
            debug!(
                "Peak candidate frame {}: speed {:.2} m/s, drop {:.1}%",
                i,
                peak_speed,
                drop_ratio * 100.0
            );
            drop_ratio > config.peak_min_drop_ratio
        })
}

fn refine_release_index(
    series: &TimeSeries,
    index: usize,
    window: SearchWindow,
    min_height: f64,
    config: &ReleaseConfig,
) -> usize {
    let lo = index.saturating_sub(config.refine_radius_frames).max(window.start);
    let hi = index.saturating_add(config.refine_radius_frames).min(window.last());
    let height_floor = min_height - config.refine_height_slack;

    let mut best = index;
    for i in lo..=hi {
        if series.speeds[i] > series.speeds[best] && series.height(i) >= height_floor {
            best = i;
        }
    }
    if best != index {
        debug!("Refined release frame {} -> {}", index, best);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series_from(speeds: Vec<f64>, heights: Vec<f64>) -> TimeSeries {
        let n = speeds.len();
        let times = (0..n).map(|i| 0.01 * (i + 1) as f64).collect();
        let positions = heights.iter().map(|&z| [0.1, 0.2, z]).collect();
        let velocities = speeds.iter().map(|&s| [s * 0.8, 0.0, s * 0.6]).collect();
        TimeSeries::from_parts(times, positions, velocities, speeds)
    }

    fn lerp(from: f64, to: f64, steps: usize, k: usize) -> f64 {
        from + (to - from) * k as f64 / steps as f64
    }

    // 0 -> 25 m/s at frame 100, crest symmetric over the smoothing span,
    // down to 10 m/s by 110, back up to 20 m/s by 150, easing to 15 at the end.
    fn double_peak_speeds() -> Vec<f64> {
        (0..200)
            .map(|i| match i {
                0..=100 => lerp(0.0, 25.0, 100, i),
                101..=103 => 25.0 - 0.25 * (i - 100) as f64,
                104..=110 => lerp(24.25, 10.0, 7, i - 103),
                111..=150 => lerp(10.0, 20.0, 40, i - 110),
                _ => lerp(20.0, 15.0, 49, i - 150),
            })
            .collect()
    }

    #[test]
    fn window_excludes_edges() {
        let config = ReleaseConfig::default();
        assert_eq!(search_window(200, &config).unwrap(), SearchWindow { start: 20, end: 196 });
        assert_eq!(search_window(20, &config).unwrap(), SearchWindow { start: 5, end: 17 });
        assert_eq!(search_window(11, &config).unwrap(), SearchWindow { start: 5, end: 8 });
    }

    #[test]
    fn degenerate_window_is_an_error() {
        let config = ReleaseConfig::default();
        for n in [0, 3, 8, 10] {
            assert!(matches!(
                search_window(n, &config),
                Err(AnalysisError::DegenerateWindow { .. })
            ));
        }
        let series = series_from(vec![1.0; 8], vec![1.5; 8]);
        assert!(matches!(
            find_release_point(&series, &config),
            Err(AnalysisError::DegenerateWindow { len: 8, .. })
        ));
    }

    #[test]
    fn mismatched_series_is_rejected() {
        let mut series = series_from(vec![1.0; 50], vec![1.5; 50]);
        series.speeds.pop();
        assert!(matches!(
            find_release_point(&series, &ReleaseConfig::default()),
            Err(AnalysisError::InvalidSeries(_))
        ));
    }

    #[test]
    fn first_significant_peak_is_release_not_later_peak() {
        let series = series_from(double_peak_speeds(), vec![1.5; 200]);
        let event = find_release_point(&series, &ReleaseConfig::default()).unwrap();
        assert_eq!(event.index, 100);
        assert_eq!(event.method, ReleaseMethod::LocalPeak);
        assert_eq!(event.implement, ImplementKind::Discus);
        assert_eq!(event.min_height, 1.2);
        assert!(!event.refined);
        assert!((event.speed - 25.0).abs() < 1e-9);
        assert!((event.time - 1.01).abs() < 1e-9);
    }

    #[test]
    fn detection_is_idempotent() {
        let series = series_from(double_peak_speeds(), vec![1.5; 200]);
        let config = ReleaseConfig::default();
        let first = find_release_point(&series, &config).unwrap();
        let second = find_release_point(&series, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn low_crest_is_skipped_in_favour_of_height_qualified_max() {
        // Hand below release height through the first crest; the second crest
        // eases off too slowly to pass the drop test.
        let heights: Vec<f64> = (0..200).map(|i| if i < 130 { 1.0 } else { 1.5 }).collect();
        let series = series_from(double_peak_speeds(), heights);
        let event = find_release_point(&series, &ReleaseConfig::default()).unwrap();
        assert_eq!(event.method, ReleaseMethod::HeightQualifiedMax);
        assert_eq!(event.index, 150);
        assert!(!event.refined);
    }

    #[test]
    fn all_frames_low_uses_global_max() {
        let speeds: Vec<f64> = (0..200)
            .map(|i| 25.0 - (i as f64 - 120.0).abs() * 0.1)
            .collect();
        let series = series_from(speeds, vec![0.5; 200]);
        let event = find_release_point(&series, &ReleaseConfig::default()).unwrap();
        assert_eq!(event.method, ReleaseMethod::GlobalMax);
        assert_eq!(event.index, 120);
        assert!(!event.refined);
    }

    #[test]
    fn flat_series_picks_first_height_qualified_frame() {
        let series = series_from(vec![10.0; 100], vec![2.0; 100]);
        let event = find_release_point(&series, &ReleaseConfig::default()).unwrap();
        // 10 m/s is below the implement threshold: shot put, 1.6 m floor.
        assert_eq!(event.implement, ImplementKind::ShotPut);
        assert_eq!(event.method, ReleaseMethod::HeightQualifiedMax);
        assert_eq!(event.index, 10);
        assert!(!event.refined);
    }

    #[test]
    fn height_qualified_max_is_refined_within_radius() {
        let n = 100;
        let mut speeds = vec![8.0; n];
        let mut heights = vec![1.0; n];
        // Only frame 50 is above the 1.6 m shot put floor.
        speeds[50] = 12.0;
        heights[50] = 1.7;
        // Faster neighbours: 53 is high enough for refinement, 48 is not.
        speeds[53] = 13.0;
        heights[53] = 1.55;
        speeds[48] = 14.0;
        heights[48] = 1.4;
        let series = series_from(speeds, heights);
        let event = find_release_point(&series, &ReleaseConfig::default()).unwrap();
        assert_eq!(event.method, ReleaseMethod::HeightQualifiedMax);
        assert_eq!(event.index, 53);
        assert!(event.refined);
    }

    #[test]
    fn implement_threshold_is_configurable() {
        let series = series_from(double_peak_speeds(), vec![1.5; 200]);
        let config = ReleaseConfig {
            implement_speed_threshold: 30.0,
            ..ReleaseConfig::default()
        };
        let event = find_release_point(&series, &config).unwrap();
        assert_eq!(event.implement, ImplementKind::ShotPut);
        // Shot put floor of 1.6 m is above every frame: global fallback.
        assert_eq!(event.method, ReleaseMethod::GlobalMax);
    }

    #[test]
    fn oversized_frame_counts_from_json_do_not_overflow() {
        let config = crate::config::AnalysisConfig::from_json_str(
            r#"{ "release": { "peak_lookahead_frames": 18446744073709551615 } }"#,
        )
        .unwrap()
        .release;
        let series = series_from(double_peak_speeds(), vec![1.5; 200]);
        let event = find_release_point(&series, &config).unwrap();
        assert_eq!((event.index, event.method), (100, ReleaseMethod::LocalPeak));

        let config = ReleaseConfig {
            refine_radius_frames: usize::MAX,
            ..ReleaseConfig::default()
        };
        let speeds: Vec<f64> = (0..200).map(|i| 25.0 - (i as f64 - 120.0).abs() * 0.1).collect();
        let event = find_release_point(&series_from(speeds, vec![0.5; 200]), &config).unwrap();
        assert_eq!((event.index, event.method), (120, ReleaseMethod::GlobalMax));

        // One window-wide average leaves no smoothed peak; the fallback still answers.
        let config = ReleaseConfig {
            smoothing_radius: usize::MAX,
            ..ReleaseConfig::default()
        };
        let event = find_release_point(&series, &config).unwrap();
        assert_eq!((event.index, event.method), (100, ReleaseMethod::HeightQualifiedMax));

        let config = ReleaseConfig {
            leading_skip_min_frames: usize::MAX,
            ..ReleaseConfig::default()
        };
        assert!(matches!(
            find_release_point(&series, &config),
            Err(AnalysisError::DegenerateWindow { .. })
        ));
    }

    #[test]
    fn release_angle_from_velocity() {
        assert!((release_angle_deg(&[3.0, 4.0, 5.0]) - 45.0).abs() < 1e-9);
        assert!((release_angle_deg(&[1.0, 0.0, -1.0]) + 45.0).abs() < 1e-9);
        assert_eq!(release_angle_deg(&[0.0, 0.0, 7.0]), 0.0);
    }

    #[test]
    fn event_angle_matches_velocity_at_release() {
        let series = series_from(double_peak_speeds(), vec![1.5; 200]);
        let event = find_release_point(&series, &ReleaseConfig::default()).unwrap();
        // Velocity is (0.8 s, 0, 0.6 s): atan2(0.6, 0.8).
        assert!((event.angle_deg - 0.6_f64.atan2(0.8).to_degrees()).abs() < 1e-9);
    }
}

// src/data_analysis/release_point.rs
