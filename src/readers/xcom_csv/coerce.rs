use crate::data_mgmt::models::CellValue;

/// Infers the semantic type of one raw CSV cell.
///
/// Plain or signed digit runs become integers, digit runs with a single
/// decimal point become floats, everything else passes through as a string.
/// The grammar is a best-effort heuristic carried over from the original log
/// consumers; its known gaps (a bare `+` or `.` passes through, `.5` is a
/// float) are kept as reference behavior rather than tightened.
pub fn coerce(raw: &str) -> CellValue {
    if is_all_digits(raw) {
        return int_or_passthrough(raw);
    }
    if raw.len() > 1 && has_sign(raw) && is_all_digits(&raw[1..]) {
        return int_or_passthrough(raw);
    }
    if is_all_digits(&remove_first_dot(raw)) {
        return float_or_passthrough(raw);
    }
    if raw.len() > 1 && has_sign(raw) {
        let without_dot = remove_first_dot(raw);
        if is_all_digits(&without_dot[1..]) {
            return float_or_passthrough(raw);
        }
    }
    CellValue::String(raw.to_string())
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

// Sign characters are ASCII, so byte-slicing past them is safe.
fn has_sign(s: &str) -> bool {
    s.starts_with('+') || s.starts_with('-')
}

fn remove_first_dot(s: &str) -> String {
    s.replacen('.', "", 1)
}

// An out-of-range value (e.g. a digit run overflowing i64) falls back to
// string passthrough rather than failing the row.
fn int_or_passthrough(raw: &str) -> CellValue {
    raw.parse::<i64>()
        .map(CellValue::Int)
        .unwrap_or_else(|_| CellValue::String(raw.to_string()))
}

fn float_or_passthrough(raw: &str) -> CellValue {
    raw.parse::<f64>()
        .map(CellValue::Float)
        .unwrap_or_else(|_| CellValue::String(raw.to_string()))
}
