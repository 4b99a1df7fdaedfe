//! Sympto Core Prelude: convenient imports for common usage.
//!
//! ```rust
//! use sympto_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::types::{
    Disease, DiseaseCandidate, MatchResult, Symptom, SymptomId, SymptomVocabulary,
};

// Re-export text normalization
pub use crate::text::{clean_text, normalize_column_name, split_symptom_cell, title_case};

// Re-export the Responder trait
pub use crate::responder::Responder;

// Re-export error types
pub use crate::error::{SymptoError, Result};
