//! Raw delimited tables as read from disk.
//!
//! Headers are normalized on read and every row is padded to the header
//! width, so downstream code can index cells without bounds juggling. A row
//! wider than the header is rejected unless the extra cells are blank.

use std::path::{Path, PathBuf};
use sympto_core::error::{BuildError, Result, SymptoError};
use sympto_core::text::normalize_column_name;

/// A header row plus string cells. Missing cells read as "".
#[derive(Debug, Clone)]
pub struct RawTable {
    path: PathBuf,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Read a CSV file with a header row.
    ///
    /// A missing file is a [`BuildError::MissingSource`]; anything the CSV
    /// reader rejects, or a row with more non-blank cells than the header, is
    /// `Unreadable`.
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SymptoError::missing_source(path));
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(|e| SymptoError::unreadable(path, e.to_string()))?;

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| SymptoError::unreadable(path, e.to_string()))?
            .iter()
            .map(normalize_column_name)
            .collect();

        if columns.is_empty() {
            return Err(SymptoError::Build(BuildError::NoColumns(path.to_path_buf())));
        }

        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record.map_err(|e| SymptoError::unreadable(path, e.to_string()))?;
            let line = record.position().map_or(i as u64 + 2, |p| p.line());
            let row = fit_row(record.iter().map(str::to_string).collect(), columns.len())
                .map_err(|reason| SymptoError::unreadable(path, format!("line {}: {}", line, reason)))?;
            rows.push(row);
        }

        Ok(Self {
            path: path.to_path_buf(),
            columns,
            rows,
        })
    }

    /// Build a table in memory. Headers and row widths are checked like on read.
    pub fn from_rows(columns: &[&str], rows: &[&[&str]]) -> Result<Self> {
        let path = PathBuf::from("<memory>");
        let columns: Vec<String> = columns.iter().map(|c| normalize_column_name(c)).collect();
        let rows = rows
            .iter()
            .enumerate()
            .map(|(i, r)| {
                fit_row(r.iter().map(|c| c.to_string()).collect(), columns.len())
                    .map_err(|reason| SymptoError::unreadable(&path, format!("row {}: {}", i + 1, reason)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            path,
            columns,
            rows,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All cells of one column, in row order.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows.iter().map(move |row| row[index].as_str())
    }

    /// First column after the key column whose name contains any of `hints`,
    /// falling back to the second column.
    pub fn find_value_column(&self, hints: &[&str]) -> Option<usize> {
        self.columns
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, name)| hints.iter().any(|h| name.contains(h)))
            .map(|(i, _)| i)
            .or(if self.columns.len() > 1 { Some(1) } else { None })
    }
}

/// Pad `row` to `width`, dropping blank overflow cells. Non-blank overflow
/// is an error naming both widths.
fn fit_row(mut row: Vec<String>, width: usize) -> std::result::Result<Vec<String>, String> {
    if row.len() > width {
        let filled = row.iter().rposition(|c| !c.trim().is_empty()).map_or(0, |i| i + 1);
        if filled > width {
            return Err(format!("expected {} cells, found {}", width, filled));
        }
        row.truncate(width);
    }
    row.resize(width, String::new());
    Ok(row)
}
