//! # Sympto RAG
//!
//! Retrieval over the symptom knowledge base: free text is matched to
//! canonical symptoms, candidate diseases are ranked from those matches and
//! the result is composed into a triage advisory.
//!
//! ## Query paths
//!
//! | Path | Matching | Scoring |
//! |------|----------|---------|
//! | `triage` | threshold 0.3, whole vocabulary | `overlap-ratio` (configurable) |
//! | `predict` | threshold 0.4, top 7 | `coverage-severity` |
//!
//! A message naming a known disease short-circuits triage entirely.

pub mod engine;
pub mod prelude;
pub mod scoring;
pub mod triage;

pub use engine::{EngineHandle, EngineStats, Prediction, TriageEngine};
pub use scoring::{DiseaseScorer, Ranking, ScoringPolicy};
pub use triage::{find_direct_match, TriageComposer, TriageConfig, TriageOutcome, TriageResponse};
