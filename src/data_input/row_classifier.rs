// src/data_input/row_classifier.rs

use crate::constants::{
    UNIFORM_MIN_PARSED_VALUES, UNIFORM_SAME_FRACTION, UNIFORM_SAMPLE_SIZE,
    UNIFORM_VALUE_TOLERANCE,
};

/// Parses one raw cell. Returns `None` for empty, malformed or non-finite cells.
pub fn parse_numeric(cell: &str) -> Option<f64> {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Lenient cell parse used for data rows: anything unparseable reads as 0.0.
pub fn parse_cell_or_zero(cell: &str) -> f64 {
    parse_numeric(cell).unwrap_or(0.0)
}

/// Uniform-artifact test over already parsed values.
///
/// Samples the first 50 values. With fewer than 10 there is not enough
/// evidence and the row is never uniform. Otherwise the row is uniform when
/// more than 80% of the sample sits within 0.001 of the first sampled value
/// (freeze frames, calibration and padding rows).
pub fn is_uniform_values<I>(values: I) -> bool
where
    I: IntoIterator<Item = f64>,
{
    let sample: Vec<f64> = values
        .into_iter()
        .filter(|v| v.is_finite())
        .take(UNIFORM_SAMPLE_SIZE)
        .collect();
    if sample.len() < UNIFORM_MIN_PARSED_VALUES {
        return false;
    }
    let first = sample[0];
    let same_count = sample
        .iter()
        .filter(|v| (*v - first).abs() < UNIFORM_VALUE_TOLERANCE)
        .count();
    same_count as f64 > sample.len() as f64 * UNIFORM_SAME_FRACTION
}

/// Uniform-artifact test over raw string cells; unparseable cells are ignored
/// rather than counted as zero.
pub fn is_uniform_row<S: AsRef<str>>(row: &[S]) -> bool {
    is_uniform_values(row.iter().filter_map(|cell| parse_numeric(cell.as_ref())))
}


// src/data_input/row_classifier.rs
