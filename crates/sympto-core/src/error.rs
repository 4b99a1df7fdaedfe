//! Error types for Sympto operations.
//!
//! Only the offline build and the knowledge load can fail. Query-time
//! outcomes (no input, no matches, too few symptoms) are ordinary values.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Result type for Sympto operations.
pub type Result<T> = std::result::Result<T, SymptoError>;

/// Errors that can occur during Sympto operations.
#[derive(Debug, Clone)]
pub enum SymptoError {
    /// Raw knowledge-table build errors.
    Build(BuildError),
    /// Cleaned knowledge load errors.
    Load(LoadError),
    /// Configuration errors.
    Config(ConfigError),
    /// I/O errors (wrapped).
    Io(String),
    /// CSV read/write errors.
    Csv(String),
    /// Serialization errors.
    Serialization(String),
}

impl fmt::Display for SymptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymptoError::Build(e) => write!(f, "Build error: {}", e),
            SymptoError::Load(e) => write!(f, "Load error: {}", e),
            SymptoError::Config(e) => write!(f, "Config error: {}", e),
            SymptoError::Io(msg) => write!(f, "I/O error: {}", msg),
            SymptoError::Csv(msg) => write!(f, "CSV error: {}", msg),
            SymptoError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl Error for SymptoError {}

impl From<std::io::Error> for SymptoError {
    fn from(e: std::io::Error) -> Self {
        SymptoError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for SymptoError {
    fn from(e: serde_json::Error) -> Self {
        SymptoError::Serialization(e.to_string())
    }
}

impl From<csv::Error> for SymptoError {
    fn from(e: csv::Error) -> Self {
        SymptoError::Csv(e.to_string())
    }
}

/// Raw table build errors. All of them abort the build.
#[derive(Debug, Clone)]
pub enum BuildError {
    /// A required raw file does not exist.
    MissingSource(PathBuf),
    /// A raw file exists but could not be parsed.
    Unreadable { path: PathBuf, reason: String },
    /// A raw table has no columns to work with.
    NoColumns(PathBuf),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::MissingSource(path) => write!(f, "Missing file: {}", path.display()),
            BuildError::Unreadable { path, reason } => {
                write!(f, "Unreadable file {}: {}", path.display(), reason)
            }
            BuildError::NoColumns(path) => write!(f, "No columns in {}", path.display()),
        }
    }
}

/// Cleaned knowledge load errors.
#[derive(Debug, Clone)]
pub enum LoadError {
    /// A builder artifact is missing from the knowledge directory.
    MissingArtifact(PathBuf),
    /// An artifact is present but malformed.
    Corrupt { path: PathBuf, reason: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::MissingArtifact(path) => {
                write!(f, "Knowledge artifact not found: {}", path.display())
            }
            LoadError::Corrupt { path, reason } => {
                write!(f, "Knowledge artifact corrupt {}: {}", path.display(), reason)
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Invalid value.
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
    /// Out of range.
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue {
                field,
                value,
                reason,
            } => {
                write!(f, "Invalid value for {}: {} ({})", field, value, reason)
            }
            ConfigError::OutOfRange {
                field,
                min,
                max,
                value,
            } => {
                write!(
                    f,
                    "{} out of range: {} (must be {}-{})",
                    field, value, min, max
                )
            }
        }
    }
}

// Convenience constructors
impl SymptoError {
    pub fn missing_source(path: impl Into<PathBuf>) -> Self {
        SymptoError::Build(BuildError::MissingSource(path.into()))
    }

    pub fn unreadable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        SymptoError::Build(BuildError::Unreadable {
            path: path.into(),
            reason: reason.into(),
        })
    }

    pub fn missing_artifact(path: impl Into<PathBuf>) -> Self {
        SymptoError::Load(LoadError::MissingArtifact(path.into()))
    }

    pub fn corrupt_artifact(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        SymptoError::Load(LoadError::Corrupt {
            path: path.into(),
            reason: reason.into(),
        })
    }

    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, value: f64) -> Self {
        SymptoError::Config(ConfigError::OutOfRange {
            field: field.into(),
            min,
            max,
            value,
        })
    }

    pub fn invalid_config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SymptoError::Config(ConfigError::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_source_mentions_path() {
        let err = SymptoError::missing_source("data/dataset.csv");
        assert_eq!(err.to_string(), "Build error: Missing file: data/dataset.csv");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: SymptoError = io.into();
        assert!(matches!(err, SymptoError::Io(ref m) if m == "gone"));
    }

    #[test]
    fn out_of_range_formats_bounds() {
        let err = SymptoError::out_of_range("triage_threshold", 0.0, 1.0, 1.5);
        assert_eq!(
            err.to_string(),
            "Config error: triage_threshold out of range: 1.5 (must be 0-1)"
        );
    }
}
