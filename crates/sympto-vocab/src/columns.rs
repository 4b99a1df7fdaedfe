//! Column role and column mode detection for the disease/symptom table.
//!
//! A disease table comes in one of two shapes:
//!
//! | Mode | Header | Cell |
//! |------|--------|------|
//! | indicator | symptom name | `0`/`1` (or `true`/`yes`...) |
//! | text | `symptom_1`, `symptom_2`... | free-text symptom(s) |
//!
//! Classification is an explicit pass over observed values: a column is an
//! indicator column iff every non-empty value, trimmed and lowercased, is in
//! [`INDICATOR_VALUES`]. The table is indicator-mode only if every symptom
//! column is.

use crate::raw::RawTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Values an indicator column may hold. `0.0`/`1.0` cover matrices
/// exported through a float dtype.
pub const INDICATOR_VALUES: [&str; 8] = ["0", "1", "true", "false", "yes", "no", "0.0", "1.0"];

/// Indicator values that mean "symptom present".
pub const PRESENT_VALUES: [&str; 4] = ["1", "true", "yes", "1.0"];

/// Header fragments that identify the disease column.
pub const DISEASE_COLUMN_HINTS: [&str; 4] = ["prognosis", "disease", "diagnosis", "disorder"];

/// Header fragments that identify the description column.
pub const DESCRIPTION_COLUMN_HINTS: [&str; 4] = ["desc", "description", "explain", "text"];

/// Header fragments that identify the severity column.
pub const SEVERITY_COLUMN_HINTS: [&str; 4] = ["sev", "weight", "score", "value"];

/// How symptom cells are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnMode {
    /// Column name is the symptom, cell says present/absent.
    Indicator,
    /// Cells hold symptom text, possibly several per cell.
    Text,
}

impl fmt::Display for ColumnMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnMode::Indicator => write!(f, "indicator"),
            ColumnMode::Text => write!(f, "text"),
        }
    }
}

/// Disease column, symptom columns and mode of a disease/symptom table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLayout {
    pub disease_column: usize,
    pub symptom_columns: Vec<usize>,
    pub mode: ColumnMode,
}

impl DatasetLayout {
    /// Detect the layout of a disease/symptom table.
    pub fn detect(table: &RawTable) -> Self {
        let disease_column = disease_column(table.columns());
        let symptom_columns: Vec<usize> = (0..table.columns().len())
            .filter(|&i| i != disease_column)
            .collect();
        let mode = detect_mode(table, &symptom_columns);

        Self {
            disease_column,
            symptom_columns,
            mode,
        }
    }
}

/// First column whose name carries a disease hint, else the first column.
pub fn disease_column(columns: &[String]) -> usize {
    columns
        .iter()
        .position(|c| DISEASE_COLUMN_HINTS.iter().any(|h| c.contains(h)))
        .unwrap_or(0)
}

/// Whether a column's observed values all belong to [`INDICATOR_VALUES`].
/// Empty cells are not observations.
pub fn classify_column<'a>(values: impl IntoIterator<Item = &'a str>) -> ColumnMode {
    let observed: BTreeSet<String> = values
        .into_iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect();

    if observed.iter().all(|v| INDICATOR_VALUES.contains(&v.as_str())) {
        ColumnMode::Indicator
    } else {
        ColumnMode::Text
    }
}

/// Indicator mode iff every symptom column classifies as indicator.
pub fn detect_mode(table: &RawTable, symptom_columns: &[usize]) -> ColumnMode {
    let all_indicator = symptom_columns
        .iter()
        .all(|&i| classify_column(table.column_values(i)) == ColumnMode::Indicator);

    if all_indicator {
        ColumnMode::Indicator
    } else {
        ColumnMode::Text
    }
}

/// Whether an indicator cell marks the symptom as present.
pub fn is_present(cell: &str) -> bool {
    PRESENT_VALUES.contains(&cell.trim().to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_values_classify_as_indicator() {
        assert_eq!(classify_column(["0", "1", " TRUE ", "no", ""]), ColumnMode::Indicator);
        assert_eq!(classify_column(["1.0", "0.0"]), ColumnMode::Indicator);
    }

    #[test]
    fn any_other_value_makes_text() {
        assert_eq!(classify_column(["0", "itching"]), ColumnMode::Text);
        assert_eq!(classify_column(["2"]), ColumnMode::Text);
    }

    #[test]
    fn one_text_column_makes_the_table_text_mode() {
        let table = RawTable::from_rows(
            &["Prognosis", "itching", "Symptom_2"],
            &[&["Fungal infection", "1", "skin_rash"], &["Allergy", "0", ""]],
        )
        .unwrap();
        let layout = DatasetLayout::detect(&table);
        assert_eq!(layout.disease_column, 0);
        assert_eq!(layout.symptom_columns, vec![1, 2]);
        assert_eq!(layout.mode, ColumnMode::Text);
    }

    #[test]
    fn disease_column_found_anywhere() {
        let table =
            RawTable::from_rows(&["itching", "fatigue", "Diagnosis"], &[&["1", "0", "flu"]]).unwrap();
        let layout = DatasetLayout::detect(&table);
        assert_eq!(layout.disease_column, 2);
        assert_eq!(layout.symptom_columns, vec![0, 1]);
        assert_eq!(layout.mode, ColumnMode::Indicator);
    }

    #[test]
    fn presence_is_case_insensitive() {
        assert!(is_present(" Yes"));
        assert!(is_present("1.0"));
        assert!(!is_present("0"));
        assert!(!is_present("false"));
    }
}
