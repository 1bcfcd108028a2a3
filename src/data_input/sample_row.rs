// src/data_input/sample_row.rs

use crate::constants::{FIRST_DATA_ROW_INDEX, SAMPLE_ROW_MIN_COLUMNS, TIME_COLUMN_INDEX};
use crate::data_input::row_classifier::{is_uniform_row, parse_numeric};

/// Finds a representative data row for disambiguating header matches.
///
/// Rows `2..max_search` are scanned (row 0 is the header, row 1 the units line).
/// The first row with more than 10 cells, a positive timestamp and
/// non-uniform values wins. `None` means disambiguation falls back to
/// first-match.
pub fn find_valid_sample_row(rows: &[Vec<String>], max_search: usize) -> Option<&[String]> {
    let end = rows.len().min(max_search);
    (FIRST_DATA_ROW_INDEX..end)
        .map(|i| rows[i].as_slice())
        .find(|row| is_valid_sample(row))
}

fn is_valid_sample(row: &[String]) -> bool {
    if row.len() <= SAMPLE_ROW_MIN_COLUMNS {
        return false;
    }
    let has_timestamp = row
        .get(TIME_COLUMN_INDEX)
        .and_then(|cell| parse_numeric(cell))
        .is_some_and(|t| t > 0.0);
    has_timestamp && !is_uniform_row(row)
}


// src/data_input/sample_row.rs
