// src/data_analysis/release_metrics.rs

use serde::Serialize;
use std::f64::consts::{PI, TAU};

use crate::constants::{GRAVITY_MPS2, ROTATION_MIN_FRAMES, TRIPLET_Z_OFFSET};
use crate::data_analysis::release_point::ReleaseEvent;
use crate::data_analysis::time_series::TimeSeries;
use crate::data_input::field_patterns::{JOINT_ELBOW_R, JOINT_SHOULDER_R, JOINT_WRIST_R};
use crate::data_input::log_data::CaptureTable;
use crate::data_input::row_classifier::parse_cell_or_zero;
use crate::data_input::schema_detector::DetectionResult;
use crate::types::{norm, Vec3};

/// Horizontal range of a projectile released at `height` metres with `speed`
/// m/s at `angle_deg` above horizontal, landing at ground level.
/// No air resistance. `None` for a non-positive speed, or when the
/// trajectory never reaches ground level (release below ground on a
/// downward throw).
pub fn estimate_flight_distance(height: f64, speed: f64, angle_deg: f64) -> Option<f64> {
    if !(speed > 0.0) {
        return None;
    }
    let (sin_a, cos_a) = angle_deg.to_radians().sin_cos();
    let discriminant = sin_a * sin_a + 2.0 * GRAVITY_MPS2 * height / (speed * speed);
    if !(discriminant >= 0.0) {
        return None;
    }
    let term1 = speed * speed * cos_a / GRAVITY_MPS2;
    let distance = term1 * (sin_a + discriminant.sqrt());
    distance.is_finite().then_some(distance)
}

/// Whole-throw figures around the release frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseSummary {
    /// Turns of the hand about the centroid of its pre-release XY path.
    /// `None` when too few frames precede release.
    pub rotation_count: Option<f64>,
    /// Hand path length from the first frame to the release frame.
    pub trajectory_length_m: f64,
    pub total_time_s: f64,
    pub max_speed: f64,
    /// Heading of the horizontal release velocity, degrees from +X toward +Y.
    pub horizontal_direction_deg: f64,
}

// Sum of absolute wrapped angle steps about the path centroid, in turns.
fn rotation_turns(path: &[Vec3]) -> Option<f64> {
    if path.len() <= ROTATION_MIN_FRAMES {
        return None;
    }
    let count = path.len() as f64;
    let cx = path.iter().map(|p| p[0]).sum::<f64>() / count;
    let cy = path.iter().map(|p| p[1]).sum::<f64>() / count;
    let angles: Vec<f64> = path.iter().map(|p| (p[1] - cy).atan2(p[0] - cx)).collect();
    let total: f64 = angles
        .windows(2)
        .map(|w| {
            let step = (w[1] - w[0] + PI).rem_euclid(TAU) - PI;
            step.abs()
        })
        .sum();
    Some(total / TAU)
}

pub fn release_summary(series: &TimeSeries, event: &ReleaseEvent) -> ReleaseSummary {
    let through_release = &series.positions[..event.index.saturating_add(1).min(series.positions.len())];
    let before_release = &through_release[..through_release.len().saturating_sub(1)];
    let trajectory_length_m = through_release
        .windows(2)
        .map(|w| norm(&[w[1][0] - w[0][0], w[1][1] - w[0][1], w[1][2] - w[0][2]]))
        .sum();
    let total_time_s = match (series.times.first(), series.times.get(event.index)) {
        (Some(first), Some(release)) => release - first,
        _ => 0.0,
    };
    let max_speed = series.speeds.iter().fold(0.0_f64, |max, &s| max.max(s));

    ReleaseSummary {
        rotation_count: rotation_turns(before_release),
        trajectory_length_m,
        total_time_s,
        max_speed,
        horizontal_direction_deg: event.velocity[1].atan2(event.velocity[0]).to_degrees(),
    }
}

/// Angle in degrees at `vertex` between the segments to `p1` and `p3`.
/// 180 means the three points are collinear (a fully straight limb).
pub fn joint_angle(p1: &Vec3, vertex: &Vec3, p3: &Vec3) -> f64 {
    let v1 = [p1[0] - vertex[0], p1[1] - vertex[1], p1[2] - vertex[2]];
    let v2 = [p3[0] - vertex[0], p3[1] - vertex[1], p3[2] - vertex[2]];
    let n1 = norm(&v1);
    let n2 = norm(&v2);
    if n1 == 0.0 || n2 == 0.0 {
        return 0.0;
    }
    let dot = v1[0] * v2[0] + v1[1] * v2[1] + v1[2] * v2[2];
    (dot / (n1 * n2)).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Reads the joint triplet starting at `x_column` from the capture row behind `frame`.
pub fn joint_position_at(table: &CaptureTable, series: &TimeSeries, x_column: usize, frame: usize) -> Option<Vec3> {
    let row_index = *series.row_indices.get(frame)?;
    let row = table.row(row_index)?;
    if row.len() <= x_column + TRIPLET_Z_OFFSET {
        return None;
    }
    Some([
        parse_cell_or_zero(&row[x_column]),
        parse_cell_or_zero(&row[x_column + 1]),
        parse_cell_or_zero(&row[x_column + TRIPLET_Z_OFFSET]),
    ])
}

/// Right elbow angle (shoulder, elbow, wrist) at `frame`; `None` if any of the
/// three joints was not detected or the frame has no source row.
pub fn arm_extension_at(
    table: &CaptureTable,
    detection: &DetectionResult,
    series: &TimeSeries,
    frame: usize,
) -> Option<f64> {
    let joints = &detection.skeleton_joints;
    let shoulder = joint_position_at(table, series, joints.get(JOINT_SHOULDER_R)?, frame)?;
    let elbow = joint_position_at(table, series, joints.get(JOINT_ELBOW_R)?, frame)?;
    let wrist = joint_position_at(table, series, joints.get(JOINT_WRIST_R)?, frame)?;
    Some(joint_angle(&shoulder, &elbow, &wrist))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_analysis::release_point::ReleaseMethod;
    use crate::data_input::schema_detector::FieldMap;
    use crate::types::ImplementKind;

    #[test]
    fn distance_from_ground_at_45_degrees() {
        // h = 0 reduces to v^2 sin(2a) / g.
        let d = estimate_flight_distance(0.0, 10.0, 45.0).unwrap();
        assert!((d - 100.0 / GRAVITY_MPS2).abs() < 1e-9);
    }

    #[test]
    fn release_height_adds_distance() {
        let ground = estimate_flight_distance(0.0, 13.0, 38.0).unwrap();
        let raised = estimate_flight_distance(2.0, 13.0, 38.0).unwrap();
        assert!(raised > ground);
        // Typical shot put release: roughly 19 m.
        assert!((18.0..21.0).contains(&raised));
    }

    #[test]
    fn distance_needs_positive_speed() {
        assert_eq!(estimate_flight_distance(2.0, 0.0, 40.0), None);
        assert_eq!(estimate_flight_distance(2.0, -3.0, 40.0), None);
        assert_eq!(estimate_flight_distance(2.0, f64::NAN, 40.0), None);
    }

    #[test]
    fn distance_is_none_when_ground_is_never_reached() {
        // Below ground and moving down: sin^2 + 2gh/v^2 < 0.
        assert_eq!(estimate_flight_distance(-3.0, 5.0, -10.0), None);
        assert_eq!(estimate_flight_distance(f64::INFINITY, 5.0, 30.0), None);
    }

    fn event_at(index: usize, velocity: Vec3) -> ReleaseEvent {
        ReleaseEvent {
            index,
            time: 0.0,
            position: [0.0; 3],
            velocity,
            speed: norm(&velocity),
            angle_deg: 0.0,
            implement: ImplementKind::Discus,
            method: ReleaseMethod::LocalPeak,
            min_height: 1.2,
            global_max_speed: 0.0,
            refined: false,
        }
    }

    // Hand circling the origin twice in the 40 frames before release.
    fn circling_series() -> TimeSeries {
        let n = 60;
        let times = (0..n).map(|i| 0.01 * (i + 1) as f64).collect();
        let positions = (0..n)
            .map(|i| {
                let a = TAU * 2.0 * i as f64 / 40.0;
                [a.cos(), a.sin(), 1.4]
            })
            .collect();
        let speeds = (0..n).map(|i| i as f64 * 0.5).collect();
        TimeSeries::from_parts(times, positions, vec![[0.0; 3]; n], speeds)
    }

    #[test]
    fn summary_counts_turns_and_path_to_release() {
        let series = circling_series();
        let summary = release_summary(&series, &event_at(40, [0.0, 2.0, 1.0]));
        // 39 steps of a twentieth of a turn between frames 0..40.
        assert!((summary.rotation_count.unwrap() - 1.95).abs() < 1e-9);
        // 40 equal chords up to and including the release frame.
        let chord = 2.0 * (PI / 20.0).sin();
        assert!((summary.trajectory_length_m - 40.0 * chord).abs() < 1e-9);
        assert!((summary.total_time_s - 0.40).abs() < 1e-9);
        assert!((summary.max_speed - 29.5).abs() < 1e-12);
        assert!((summary.horizontal_direction_deg - 90.0).abs() < 1e-9);
    }

    #[test]
    fn summary_without_enough_frames_skips_rotation() {
        let series = circling_series();
        let summary = release_summary(&series, &event_at(10, [-1.0, 0.0, 0.0]));
        assert_eq!(summary.rotation_count, None);
        assert!((summary.horizontal_direction_deg - 180.0).abs() < 1e-9);

        let empty = release_summary(&TimeSeries::default(), &event_at(5, [1.0, 0.0, 0.0]));
        assert_eq!(empty.trajectory_length_m, 0.0);
        assert_eq!(empty.total_time_s, 0.0);
        assert_eq!(empty.max_speed, 0.0);
    }

    #[test]
    fn joint_angle_cases() {
        let straight = joint_angle(&[0.0, 0.0, 0.0], &[1.0, 0.0, 0.0], &[2.0, 0.0, 0.0]);
        assert!((straight - 180.0).abs() < 1e-9);
        let right = joint_angle(&[1.0, 0.0, 0.0], &[0.0, 0.0, 0.0], &[0.0, 0.0, 1.0]);
        assert!((right - 90.0).abs() < 1e-9);
        assert_eq!(joint_angle(&[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0], &[0.0, 0.0, 1.0]), 0.0);
    }

    fn arm_table() -> CaptureTable {
        // Shoulder at column 1, elbow at 4, wrist at 7.
        let frame = |wrist_z: &str| -> Vec<String> {
            ["0.1", "0", "0", "1.5", "0.3", "0", "1.5", "0.6", "0", wrist_z]
                .iter()
                .map(|s| s.to_string())
                .collect()
        };
        CaptureTable::new(vec![vec!["Time".to_string()], vec![], frame("1.5"), frame("1.8")])
    }

    fn arm_detection() -> DetectionResult {
        let mut joints = FieldMap::default();
        joints.insert(JOINT_SHOULDER_R, Some(1));
        joints.insert(JOINT_ELBOW_R, Some(4));
        joints.insert(JOINT_WRIST_R, Some(7));
        DetectionResult {
            success: true,
            fields: FieldMap::default(),
            skeleton_joints: joints,
            missing: Vec::new(),
            found: Vec::new(),
        }
    }

    fn two_frame_series() -> TimeSeries {
        let mut series = TimeSeries::from_parts(vec![0.1, 0.2], vec![[0.0; 3]; 2], vec![[0.0; 3]; 2], vec![0.0; 2]);
        series.row_indices = vec![2, 3];
        series
    }

    #[test]
    fn arm_extension_reads_joint_rows() {
        let table = arm_table();
        let detection = arm_detection();
        let series = two_frame_series();
        let straight = arm_extension_at(&table, &detection, &series, 0).unwrap();
        assert!((straight - 180.0).abs() < 1e-9);
        // Wrist raised 0.3 m over a 0.3 m forearm: 135 degrees at the elbow.
        let bent = arm_extension_at(&table, &detection, &series, 1).unwrap();
        assert!((bent - 135.0).abs() < 1e-9);
        assert_eq!(arm_extension_at(&table, &detection, &series, 2), None);
    }

    #[test]
    fn arm_extension_needs_all_joints() {
        let table = arm_table();
        let mut detection = arm_detection();
        detection.skeleton_joints.insert(JOINT_ELBOW_R, None);
        assert_eq!(arm_extension_at(&table, &detection, &two_frame_series(), 0), None);
    }

    #[test]
    fn joint_position_rejects_short_rows() {
        let table = arm_table();
        let series = two_frame_series();
        assert_eq!(joint_position_at(&table, &series, 7, 0), Some([0.6, 0.0, 1.5]));
        assert_eq!(joint_position_at(&table, &series, 8, 0), None);
    }
}

// src/data_analysis/release_metrics.rs
