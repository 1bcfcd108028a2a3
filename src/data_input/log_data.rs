// src/data_input/log_data.rs

use crate::constants::{FIRST_DATA_ROW_INDEX, HEADER_ROW_INDEX};

/// Raw cells of a tab-delimited capture export, one `Vec<String>` per line.
/// Row 0 is the header, row 1 the units/metadata line, rows 2.. are samples.
#[derive(Debug, Default, Clone)]
pub struct CaptureTable {
    pub rows: Vec<Vec<String>>,
}

impl CaptureTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Column labels. Empty if the table has no rows.
    pub fn header(&self) -> &[String] {
        self.rows
            .get(HEADER_ROW_INDEX)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sample rows (row 2 onwards), paired with their row index in the table.
    pub fn data_rows(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.rows
            .iter()
            .enumerate()
            .skip(FIRST_DATA_ROW_INDEX)
            .map(|(i, row)| (i, row.as_slice()))
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}


// src/data_input/log_data.rs
