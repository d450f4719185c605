use std::collections::HashSet;

use itertools::izip;

/// Reserved field name for the timestamp column.
pub const TS_FIELD: &str = "ts";

/// Reconstructs one logical field name per column from the three header rows.
///
/// Row 1 carries the device/category label (a blank cell inherits the label to
/// its left), row 2 the sub-label and row 3 the device index. The first
/// element is always `"ts"` for the timestamp column.
pub fn synthesize_fieldnames(row1: &[String], row2: &[String], row3: &[String]) -> Vec<String> {
    // Forward-fill device labels on a working copy; the raw rows stay untouched.
    let mut labels = row1.to_vec();
    for i in 1..labels.len() {
        if labels[i].is_empty() {
            labels[i] = labels[i - 1].clone();
        }
    }

    let mut fieldnames = vec![TS_FIELD.to_string()];
    for (label, sub, idx) in izip!(&labels, row2, row3).skip(1) {
        fieldnames.push(fieldname_for_column(label, sub, idx));
    }
    warn_on_duplicates(&fieldnames);
    fieldnames
}

// Per-prefix naming rules; first match wins. The compound "DEV XT" style
// labels must be routed to their device rule ahead of the generic DEV rule.
fn fieldname_for_column(label: &str, sub: &str, idx: &str) -> String {
    if label.starts_with("XT") || label.starts_with("DEV XT") {
        format!("XT1{sub}")
    } else if label.starts_with("VS") || label.starts_with("DEV VS") {
        format!("VS{idx}{sub}")
    } else if label.starts_with("VT") || label.starts_with("DEV VT") {
        format!("VT{idx}{sub}")
    } else if label.starts_with("BSP") {
        format!("BSP{sub}")
    } else if label.starts_with("DEV") {
        format!("DEV{sub}")
    } else if label == "Solar power (ALL) [kW]" {
        format!("SolarPowerALL{sub}")
    } else {
        let stripped: String = label.chars().filter(char::is_ascii_alphanumeric).collect();
        format!("{stripped}{idx}{sub}")
    }
}

// Collisions are not fenced off; downstream maps keep the last column.
fn warn_on_duplicates(fieldnames: &[String]) {
    let mut seen = HashSet::new();
    for name in fieldnames {
        if !seen.insert(name.as_str()) {
            log::warn!("Duplicate field name {name:?}; later columns overwrite earlier ones");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn one_fieldname_per_column_with_ts_first() {
        let fieldnames = synthesize_fieldnames(
            &row(&["", "XT [V]", "BSP [A]", "Other"]),
            &row(&["", "U", "I", "x"]),
            &row(&["", "1", "1", "2"]),
        );
        assert_eq!(fieldnames.len(), 4);
        assert_eq!(fieldnames[0], TS_FIELD);
    }

    #[test]
    fn blank_labels_are_forward_filled() {
        let fieldnames = synthesize_fieldnames(
            &row(&["A", "", "B"]),
            &row(&["", "U", "I"]),
            &row(&["", "1", "2"]),
        );
        // Column 1 resolves with label "A" carried from column 0.
        assert_eq!(fieldnames[1], "A1U");
        assert_eq!(fieldnames[2], "B2I");
    }

    #[test]
    fn dev_xt_routes_to_the_xt_rule() {
        let fieldnames = synthesize_fieldnames(
            &row(&["", "DEV XT [kWh]"]),
            &row(&["", "E"]),
            &row(&["", "3"]),
        );
        assert_eq!(fieldnames[1], "XT1E");
    }

    #[test]
    fn vs_and_vt_include_the_device_index() {
        let fieldnames = synthesize_fieldnames(
            &row(&["", "VS [kW]", "DEV VT [A]"]),
            &row(&["", "P", "I"]),
            &row(&["", "2", "5"]),
        );
        assert_eq!(fieldnames[1], "VS2P");
        assert_eq!(fieldnames[2], "VT5I");
    }

    #[test]
    fn solar_power_total_gets_its_own_name() {
        let fieldnames = synthesize_fieldnames(
            &row(&["", "Solar power (ALL) [kW]"]),
            &row(&["", "P"]),
            &row(&["", ""]),
        );
        assert_eq!(fieldnames[1], "SolarPowerALLP");
    }

    #[test]
    fn unknown_labels_are_stripped_to_alphanumerics() {
        let fieldnames = synthesize_fieldnames(
            &row(&["", "Battery voltage [V]"]),
            &row(&["", "U"]),
            &row(&["", "1"]),
        );
        assert_eq!(fieldnames[1], "BatteryvoltageV1U");
    }

    #[test]
    fn compound_device_label_with_forward_fill() {
        let fieldnames = synthesize_fieldnames(
            &row(&["DEV XT", "", "XT..."]),
            &row(&["", "U", "I"]),
            &row(&["", "1", "1"]),
        );
        assert_eq!(fieldnames, vec!["ts", "XT1U", "XT1I"]);
    }
}
