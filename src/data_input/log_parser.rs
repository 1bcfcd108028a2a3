// src/data_input/log_parser.rs

use csv::ReaderBuilder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

use crate::data_input::log_data::CaptureTable;
use crate::error::{AnalysisError, Result};

/// Loads a tab-delimited capture export from disk.
pub fn load_capture(input_file_path: &Path) -> Result<CaptureTable> {
    let file = File::open(input_file_path)?;
    let table = read_capture(BufReader::new(file))?;
    info!(
        "Loaded {} rows ({} header columns) from {}",
        table.len(),
        table.header().len(),
        input_file_path.display()
    );
    Ok(table)
}

/// Parses capture text already held in memory.
pub fn parse_capture_str(content: &str) -> Result<CaptureTable> {
    read_capture(content.as_bytes())
}

/// Splits every non-blank line on tabs. Lines are trimmed first, so a trailing
/// newline or stray `\r` never produces a phantom cell. Ragged rows are kept
/// as-is; column-count checks belong to the consumers.
fn read_capture<R: Read>(reader: R) -> Result<CaptureTable> {
    let mut cleaned = String::new();
    let mut blank_lines = 0usize;
    for line_result in BufReader::new(reader).lines() {
        let line = line_result?;
        let trimmed_line = line.trim();
        if trimmed_line.is_empty() {
            blank_lines += 1;
            continue;
        }
        cleaned.push_str(trimmed_line);
        cleaned.push('\n');
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(cleaned.as_bytes());

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    if rows.is_empty() {
        return Err(AnalysisError::EmptyCapture);
    }
    debug!("Read {} rows, skipped {} blank lines", rows.len(), blank_lines);
    Ok(CaptureTable::new(rows))
}


// src/data_input/log_parser.rs
