use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::data_mgmt::models::{AttributeMap, TelemetryRecord};

use super::coerce::coerce;
use super::RawRow;

const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

#[derive(Error, Debug)]
pub enum RowError {
    #[error("row has no cells")]
    Empty,
    #[error("cannot read value for {0}")]
    MissingCell(String),
    #[error(transparent)]
    Timestamp(#[from] chrono::ParseError),
}

/// Builds one telemetry record from a row in the telemetry window.
///
/// Column 0 must hold a `DD.MM.YYYY HH:MM` timestamp, read as UTC; the
/// remaining cells are coerced and keyed by their field names. Any failure is
/// row-local: the caller logs it and moves on to the next row.
pub fn telemetry_record(row: &RawRow, fieldnames: &[String]) -> Result<TelemetryRecord, RowError> {
    let raw_ts = row.first().ok_or(RowError::Empty)?;
    let ts = parse_timestamp(raw_ts)?;

    let mut record = TelemetryRecord::new(ts);
    for (i, name) in fieldnames.iter().enumerate().skip(1) {
        let cell = row
            .get(i)
            .ok_or_else(|| RowError::MissingCell(name.clone()))?;
        record.set_value(name.clone(), coerce(cell));
    }
    Ok(record)
}

fn parse_timestamp(raw: &str) -> Result<i64, chrono::ParseError> {
    Ok(NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)?
        .and_utc()
        .timestamp_millis())
}

/// Folds the attribute window into a single key-value mapping.
///
/// Only rows keyed like a `P`/`I` parameter reference (`P12`, `I3`) are kept;
/// the key match is a prefix match, and duplicate keys overwrite in file
/// order.
pub fn accumulate_attributes(rows: &[RawRow]) -> AttributeMap {
    let mut attributes = BTreeMap::new();
    for row in rows {
        let Some(key) = row.first().filter(|k| is_attribute_key(k)) else {
            continue;
        };
        match row.get(1) {
            Some(value) => {
                attributes.insert(key.clone(), coerce(value));
            }
            None => log::warn!("Attribute row {key:?} has no value cell; dropping"),
        }
    }
    attributes
}

fn is_attribute_key(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some('P' | 'I')) && chars.next().is_some_and(|c| c.is_ascii_digit())
}
