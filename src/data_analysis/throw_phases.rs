// src/data_analysis/throw_phases.rs

use serde::Serialize;
use tracing::debug;

use crate::constants::{
    FOOT_CONTACT_THRESHOLD_M, FOOT_PHASE_MIN_GAP_FRAMES, FOOT_PHASE_MISSING_ADVANCE_FRAMES,
    FOOT_PHASE_STABLE_FRAMES,
};
use crate::data_analysis::release_metrics::joint_position_at;
use crate::data_analysis::time_series::TimeSeries;
use crate::data_input::field_patterns::{JOINT_ANKLE_L, JOINT_ANKLE_R};
use crate::data_input::log_data::CaptureTable;
use crate::data_input::schema_detector::DetectionResult;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseEvent {
    pub index: usize,
    pub time: f64,
}

/// Foot contact events of the glide/turn before release, in throwing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FootPhases {
    pub right_foot_off: Option<PhaseEvent>,
    pub left_foot_off: Option<PhaseEvent>,
    pub right_foot_land: Option<PhaseEvent>,
    pub left_foot_land: Option<PhaseEvent>,
}

fn ankle_heights(table: &CaptureTable, series: &TimeSeries, x_column: usize) -> Option<Vec<f64>> {
    (0..series.len())
        .map(|frame| joint_position_at(table, series, x_column, frame).map(|p| p[2]))
        .collect()
}

// First frame in `from..until` where `condition` holds for it and the
// following stable frames (as far as the track goes).
fn first_stable<F>(heights: &[f64], from: usize, until: usize, condition: F) -> Option<usize>
where
    F: Fn(f64) -> bool,
{
    let until = until.min(heights.len());
    (from..until).find(|&i| {
        let end = (i + FOOT_PHASE_STABLE_FRAMES).min(heights.len());
        heights[i..end].iter().all(|&z| condition(z))
    })
}

/// Searches the ankle height tracks for the four foot events before
/// `release_index`. Each event is searched after the previous one; when an
/// event is missing the next search starts a fixed number of frames later.
/// Returns `None` if either ankle was not detected or the series has no
/// source rows.
pub fn detect_foot_phases(
    series: &TimeSeries,
    table: &CaptureTable,
    detection: &DetectionResult,
    release_index: usize,
) -> Option<FootPhases> {
    let joints = &detection.skeleton_joints;
    let right = ankle_heights(table, series, joints.get(JOINT_ANKLE_R)?)?;
    let left = ankle_heights(table, series, joints.get(JOINT_ANKLE_L)?)?;
    let airborne = |z: f64| z > FOOT_CONTACT_THRESHOLD_M;
    let grounded = |z: f64| z < FOOT_CONTACT_THRESHOLD_M;

    let right_off = first_stable(&right, 0, release_index, airborne);
    let mut search_from = right_off.unwrap_or(0);

    let left_off = first_stable(&left, search_from + FOOT_PHASE_MIN_GAP_FRAMES, release_index, airborne);
    search_from = left_off.unwrap_or(search_from + FOOT_PHASE_MISSING_ADVANCE_FRAMES);

    let right_land = first_stable(&right, search_from + FOOT_PHASE_MIN_GAP_FRAMES, release_index, grounded);
    search_from = right_land.unwrap_or(search_from + FOOT_PHASE_MISSING_ADVANCE_FRAMES);

    let left_land = first_stable(&left, search_from + FOOT_PHASE_MIN_GAP_FRAMES, release_index, grounded);

    let event = |index: Option<usize>| index.map(|i| PhaseEvent { index: i, time: series.times[i] });
    let phases = FootPhases {
        right_foot_off: event(right_off),
        left_foot_off: event(left_off),
        right_foot_land: event(right_land),
        left_foot_land: event(left_land),
    };
    debug!("Foot phases before frame {}: {:?}", release_index, phases);
    Some(phases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::schema_detector::FieldMap;

    const FRAMES: usize = 60;

    // Right ankle triplet at columns 1..=3, left at 4..=6.
    fn capture(right_high: std::ops::Range<usize>, left_high: std::ops::Range<usize>) -> (CaptureTable, TimeSeries) {
        let mut rows = vec![vec!["Time".to_string()], vec![]];
        let mut row_indices = Vec::new();
        for frame in 0..FRAMES {
            let rz = if right_high.contains(&frame) { 0.3 } else { 0.05 };
            let lz = if left_high.contains(&frame) { 0.25 } else { 0.08 };
            let t = 0.01 * (frame + 1) as f64;
            rows.push(
                [t, 0.2, 0.1, rz, -0.2, 0.1, lz]
                    .iter()
                    .map(|v| v.to_string())
                    .collect(),
            );
            row_indices.push(frame + 2);
        }
        let times = (0..FRAMES).map(|f| 0.01 * (f + 1) as f64).collect();
        let mut series = TimeSeries::from_parts(times, vec![[0.0; 3]; FRAMES], vec![[0.0; 3]; FRAMES], vec![0.0; FRAMES]);
        series.row_indices = row_indices;
        (CaptureTable::new(rows), series)
    }

    fn detection() -> DetectionResult {
        let mut joints = FieldMap::default();
        joints.insert(JOINT_ANKLE_R, Some(1));
        joints.insert(JOINT_ANKLE_L, Some(4));
        DetectionResult {
            success: true,
            skeleton_joints: joints,
            ..DetectionResult::default()
        }
    }

    fn indices(phases: &FootPhases) -> [Option<usize>; 4] {
        [
            phases.right_foot_off,
            phases.left_foot_off,
            phases.right_foot_land,
            phases.left_foot_land,
        ]
        .map(|e| e.map(|e| e.index))
    }

    #[test]
    fn finds_events_in_order() {
        let (table, series) = capture(10..30, 20..40);
        let phases = detect_foot_phases(&series, &table, &detection(), 50).unwrap();
        assert_eq!(indices(&phases), [Some(10), Some(20), Some(30), Some(40)]);
        assert!((phases.left_foot_off.unwrap().time - 0.21).abs() < 1e-12);
    }

    #[test]
    fn short_lift_is_not_stable() {
        // Right foot up for three frames only, then properly from 12.
        let (mut table, series) = capture(12..30, 20..40);
        for frame in 3..6 {
            table.rows[frame + 2][3] = "0.3".to_string();
        }
        let phases = detect_foot_phases(&series, &table, &detection(), 50).unwrap();
        assert_eq!(phases.right_foot_off.map(|e| e.index), Some(12));
    }

    #[test]
    fn missing_event_advances_search() {
        let (table, series) = capture(0..0, 20..40);
        let phases = detect_foot_phases(&series, &table, &detection(), 50).unwrap();
        // Right foot never leaves the ground, so it "lands" as soon as it is searched.
        assert_eq!(indices(&phases), [None, Some(20), Some(25), Some(40)]);
    }

    #[test]
    fn events_after_release_are_not_reported() {
        let (table, series) = capture(10..30, 20..40);
        let phases = detect_foot_phases(&series, &table, &detection(), 15).unwrap();
        assert_eq!(indices(&phases), [Some(10), None, None, None]);
    }

    #[test]
    fn requires_both_ankles_and_source_rows() {
        let (table, series) = capture(10..30, 20..40);
        let mut no_left = detection();
        no_left.skeleton_joints.insert(JOINT_ANKLE_L, None);
        assert_eq!(detect_foot_phases(&series, &table, &no_left, 50), None);

        let mut detached = series.clone();
        detached.row_indices.clear();
        assert_eq!(detect_foot_phases(&detached, &table, &detection(), 50), None);
    }
}

// src/data_analysis/throw_phases.rs
