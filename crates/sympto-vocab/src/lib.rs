//! # Sympto Vocab
//!
//! Turns raw medical knowledge tables into the cleaned vocabulary and lookup
//! tables the matcher and scorer load at startup.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sympto_vocab::{VocabularyBuilder, save_knowledge, load_knowledge};
//! use std::path::Path;
//!
//! let output = VocabularyBuilder::from_dir(Path::new("data")).build()?;
//! save_knowledge(&output.knowledge, Path::new("knowledge"))?;
//!
//! let knowledge = load_knowledge(Path::new("knowledge"))?;
//! assert_eq!(knowledge.vocabulary().len(), output.summary.vocabulary_size);
//! ```

pub mod builder;
pub mod columns;
pub mod knowledge;
pub mod raw;
pub mod severity;
pub mod store;

pub use builder::{build_from_tables, BuildOutput, BuildSummary, RawSources, VocabularyBuilder};
pub use columns::{classify_column, detect_mode, ColumnMode, DatasetLayout, INDICATOR_VALUES};
pub use knowledge::{DescriptionEntry, KnowledgeBase, LookupTables};
pub use raw::RawTable;
pub use severity::parse_severity;
pub use store::{load_knowledge, save_knowledge};

/// Separator between precautions in stored and rendered text.
pub const PRECAUTION_SEPARATOR: &str = "; ";
