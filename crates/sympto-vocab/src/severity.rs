//! Severity cell parsing.

use regex::Regex;
use std::sync::OnceLock;

fn numeric_token() -> &'static Regex {
    static NUMERIC: OnceLock<Regex> = OnceLock::new();
    NUMERIC.get_or_init(|| Regex::new(r"[-+]?\d*\.?\d+").expect("static regex"))
}

/// Parse a severity cell: a plain number, else the first numeric token in
/// the cell, else `None` (unknown).
pub fn parse_severity(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<f64>() {
        if value.is_finite() {
            return Some(value);
        }
    }
    numeric_token()
        .find(trimmed)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}
