// src/data_analysis/smoothing.rs

use ndarray::{s, Array1};

/// Centered moving average over `2 * radius + 1` samples. Near the ends the
/// window is clamped to the available samples instead of zero-padded, so every
/// output is a true mean of real data.
pub fn centered_moving_average(data: &Array1<f64>, radius: usize) -> Array1<f64> {
    if radius == 0 || data.is_empty() {
        return data.to_owned(); // No smoothing needed or possible.
    }

    let n = data.len();
    let mut smoothed_data = Array1::<f64>::zeros(n);
    for i in 0..n {
        let lo = i.saturating_sub(radius);
        let hi = i.saturating_add(radius).min(n - 1);
        let window = data.slice(s![lo..=hi]);
        smoothed_data[i] = window.sum() / window.len() as f64;
    }
    smoothed_data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_points_use_full_window() {
        let data = Array1::from(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let smoothed = centered_moving_average(&data, 2);
        assert!((smoothed[3] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn edges_are_clamped_not_padded() {
        let data = Array1::from(vec![4.0, 4.0, 4.0, 4.0]);
        let smoothed = centered_moving_average(&data, 2);
        for v in smoothed.iter() {
            assert!((v - 4.0).abs() < 1e-12);
        }

        let data = Array1::from(vec![0.0, 3.0, 6.0, 9.0, 12.0]);
        let smoothed = centered_moving_average(&data, 2);
        // First point averages samples 0..=2.
        assert!((smoothed[0] - 3.0).abs() < 1e-12);
        // Last point averages samples 2..=4.
        assert!((smoothed[4] - 9.0).abs() < 1e-12);
    }

    #[test]
    fn huge_radius_averages_everything() {
        let data = Array1::from(vec![1.0, 2.0, 6.0]);
        let smoothed = centered_moving_average(&data, usize::MAX);
        for v in smoothed.iter() {
            assert!((v - 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn zero_radius_and_empty_input_pass_through() {
        let data = Array1::from(vec![1.0, 5.0]);
        assert_eq!(centered_moving_average(&data, 0), data);
        assert!(centered_moving_average(&Array1::<f64>::zeros(0), 2).is_empty());
    }
}

// src/data_analysis/smoothing.rs
