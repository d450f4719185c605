//! Reader for Studer Xcom-LAN datalogger CSV exports.
//!
//! A log file starts with three header rows that jointly encode the column
//! schema, followed by one day of minute-resolution samples and a trailing
//! block of device parameters. The reader reconstructs one field name per
//! column and splits the data rows into the telemetry and attribute windows.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

pub mod coerce;
pub mod header;
pub mod parse;

/// One day of minute-resolution samples; data rows past this offset hold
/// device parameters rather than time series.
pub const TELEMETRY_WINDOW_ROWS: usize = 1440;

const SEPARATOR: char = ',';

pub type RawRow = Vec<String>;

#[derive(Error, Debug)]
pub enum CsvFileError {
    #[error("file has fewer than 3 rows; cannot synthesize header")]
    MissingHeaderRows,
    #[error(transparent)]
    FileRead(#[from] std::io::Error),
}

/// A log file split into its synthesized field names and the two data windows.
#[derive(Debug)]
pub struct LogFile {
    pub fieldnames: Vec<String>,
    pub telemetry_rows: Vec<RawRow>,
    pub attribute_rows: Vec<RawRow>,
}

pub fn load_file(path: &Path) -> Result<LogFile, CsvFileError> {
    let reader = BufReader::new(File::open(path)?);
    let mut rows = Vec::new();
    for line in reader.lines() {
        rows.push(split_row(&line?));
    }
    partition_rows(rows)
}

fn split_row(line: &str) -> RawRow {
    line.split(SEPARATOR).map(str::to_owned).collect()
}

/// Synthesizes the header from the first three rows and splits the remaining
/// rows at the telemetry-window boundary.
pub fn partition_rows(mut rows: Vec<RawRow>) -> Result<LogFile, CsvFileError> {
    if rows.len() < 3 {
        return Err(CsvFileError::MissingHeaderRows);
    }
    let data_rows = rows.split_off(3);
    let fieldnames = header::synthesize_fieldnames(&rows[0], &rows[1], &rows[2]);

    let boundary = data_rows.len().min(TELEMETRY_WINDOW_ROWS);
    let mut telemetry_rows = data_rows;
    let attribute_rows = telemetry_rows.split_off(boundary);

    Ok(LogFile {
        fieldnames,
        telemetry_rows,
        attribute_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_rows() -> Vec<RawRow> {
        vec![
            vec!["".into(), "XT".into(), "XT".into()],
            vec!["".into(), "U".into(), "I".into()],
            vec!["".into(), "1".into(), "1".into()],
        ]
    }

    fn data_row(n: usize) -> RawRow {
        vec![format!("01.01.2023 {:02}:{:02}", n / 60, n % 60), "1".into(), "2".into()]
    }

    #[test]
    fn too_few_rows_is_a_header_error() {
        let rows = vec![vec!["a".into()], vec!["b".into()]];
        assert!(matches!(
            partition_rows(rows),
            Err(CsvFileError::MissingHeaderRows)
        ));
    }

    #[test]
    fn rows_past_the_window_cap_become_attributes() {
        let mut rows = header_rows();
        rows.extend((0..1450).map(data_row));
        let file = partition_rows(rows).unwrap();
        assert_eq!(file.telemetry_rows.len(), 1440);
        assert_eq!(file.attribute_rows.len(), 10);
        assert_eq!(file.telemetry_rows[0], data_row(0));
        assert_eq!(file.attribute_rows[0], data_row(1440));
    }

    #[test]
    fn short_file_has_empty_attribute_window() {
        let mut rows = header_rows();
        rows.extend((0..5).map(data_row));
        let file = partition_rows(rows).unwrap();
        assert_eq!(file.telemetry_rows.len(), 5);
        assert!(file.attribute_rows.is_empty());
    }
}
