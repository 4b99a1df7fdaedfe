//! Sympto RAG Prelude: convenient imports for common usage.
//!
//! ```rust
//! use sympto_rag::prelude::*;
//! ```

// Engine and query types
pub use crate::engine::{EngineHandle, EngineStats, Prediction, TriageEngine};
pub use crate::scoring::{DiseaseScorer, Ranking, ScoringPolicy};
pub use crate::triage::{
    Assessment, ConditionLine, SymptomPrecaution, TriageComposer, TriageConfig, TriageOutcome,
    TriageResponse, DISCLAIMER,
};

// Re-export from the lower layers
pub use sympto_core::prelude::*;
pub use sympto_index::SymptomIndex;
pub use sympto_vocab::{KnowledgeBase, VocabularyBuilder};
