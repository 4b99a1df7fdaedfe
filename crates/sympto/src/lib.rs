//! # Sympto
//!
//! Symptom-based health advisory engine.
//!
//! Raw medical knowledge tables are normalized into a symptom vocabulary and
//! lookup tables; free-text messages are matched against that vocabulary
//! with TF-IDF cosine similarity, candidate diseases are ranked from the
//! matches, and the result is composed into a triage advisory.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sympto::prelude::*;
//! use std::path::Path;
//!
//! // Build the knowledge base from the raw CSV tables
//! let output = VocabularyBuilder::from_dir(Path::new("data")).build()?;
//! save_knowledge(&output.knowledge, Path::new("knowledge"))?;
//!
//! // Serve queries
//! let engine = TriageEngine::load(Path::new("knowledge"), TriageConfig::default())?;
//! println!("{}", engine.triage("I have itching and a skin rash"));
//! ```
//!
//! ## Architecture
//!
//! - [`sympto_core`] - Shared types, text normalization, errors, the `Responder` trait
//! - [`sympto_vocab`] - Raw table ingestion, column detection, stored artifacts
//! - [`sympto_index`] - TF-IDF vectorizer and symptom matcher
//! - [`sympto_rag`] - Disease scoring, triage composition, engine handle
//!
//! ## Scoring Policies
//!
//! | Policy | Formula |
//! |--------|---------|
//! | `coverage-severity` | `overlap / symptoms * 100 + 0.1 * Σ severity` |
//! | `overlap-ratio` | `overlap / (symptoms + 1e-6) * 100` |
//!
//! Both require at least two matched symptoms shared with a disease.

// Re-export all subcrates
pub use sympto_core as core;
pub use sympto_index as index;
pub use sympto_rag as rag;
pub use sympto_vocab as vocab;

/// Prelude module for convenient imports.
///
/// ```rust
/// use sympto::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use sympto_core::types::{
        Disease, DiseaseCandidate, MatchResult, Symptom, SymptomId, SymptomVocabulary,
    };
    pub use sympto_core::responder::Responder;
    pub use sympto_core::text::clean_text;

    // Error types
    pub use sympto_core::error::{Result, SymptoError};

    // Vocabulary building
    pub use sympto_vocab::{
        load_knowledge, save_knowledge, BuildOutput, BuildSummary, ColumnMode, KnowledgeBase,
        RawSources, VocabularyBuilder,
    };

    // Matching
    pub use sympto_index::{Embedder, SymptomIndex, TfidfVectorizer};

    // Scoring and triage
    pub use sympto_rag::{
        DiseaseScorer, EngineHandle, EngineStats, Prediction, Ranking, ScoringPolicy,
        TriageConfig, TriageEngine, TriageOutcome, TriageResponse,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
