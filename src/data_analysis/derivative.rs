// src/data_analysis/derivative.rs

use crate::types::Vec3;

/// Discrete derivative of a sampled signal over (possibly uneven) time stamps.
/// Forward difference at the first point, central differences in the middle,
/// backward difference at the last point.
/// Returns an empty vector if the inputs are too short, mismatched, or the
/// time stamps are not strictly increasing.
pub fn calculate_derivative(data: &[f64], times: &[f64]) -> Vec<f64> {
    if data.len() < 2 || data.len() != times.len() {
        return Vec::new();
    }
    if times.windows(2).any(|w| !(w[1] > w[0])) {
        return Vec::new();
    }

    let n = data.len() - 1;
    let mut derivative = Vec::with_capacity(data.len());

    derivative.push((data[1] - data[0]) / (times[1] - times[0]));
    for i in 1..n {
        derivative.push((data[i + 1] - data[i - 1]) / (times[i + 1] - times[i - 1]));
    }
    derivative.push((data[n] - data[n - 1]) / (times[n] - times[n - 1]));

    derivative
}

/// Per-axis velocity of a position track. Tracks too short to differentiate
/// come back as zero vectors so the output always matches the input length.
pub fn velocities_from_positions(positions: &[Vec3], times: &[f64]) -> Vec<Vec3> {
    let mut velocities = vec![[0.0; 3]; positions.len()];
    for axis in 0..3 {
        let component: Vec<f64> = positions.iter().map(|p| p[axis]).collect();
        let derivative = calculate_derivative(&component, times);
        for (velocity, value) in velocities.iter_mut().zip(derivative) {
            velocity[axis] = value;
        }
    }
    velocities
}


// src/data_analysis/derivative.rs
