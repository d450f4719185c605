use std::collections::BTreeMap;

use serde::Serialize;

/// A single coerced CSV cell.
///
/// Serializes untagged, so payloads carry bare JSON numbers and strings.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    String(String),
}

/// One time-series sample: an epoch-milliseconds timestamp plus the coerced
/// cells of a telemetry-window row, keyed by their synthesized field names.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TelemetryRecord {
    pub ts: i64,
    pub values: BTreeMap<String, CellValue>,
}

impl TelemetryRecord {
    pub fn new(ts: i64) -> Self {
        TelemetryRecord {
            ts,
            values: BTreeMap::new(),
        }
    }

    pub fn set_value(&mut self, key: String, value: CellValue) {
        self.values.insert(key, value);
    }

    pub fn get_value(&self, key: &str) -> Option<&CellValue> {
        self.values.get(key)
    }
}

/// Key-value metadata accumulated from the attribute window of one file.
pub type AttributeMap = BTreeMap<String, CellValue>;
