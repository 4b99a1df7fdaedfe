//! # Sympto Core
//!
//! Core types and shared plumbing for the Sympto triage engine:
//!
//! - **types**: symptoms, diseases, the symptom vocabulary, per-query match
//!   and ranking values
//! - **text**: the single normalization transform used at build time and at
//!   query time
//! - **responder**: the `get_response(text) -> String` contract consumed by
//!   outer layers
//! - **error**: structured errors for the offline build and knowledge load
//!
//! ## Quick Start
//!
//! ```rust
//! use sympto_core::prelude::*;
//!
//! let vocab = SymptomVocabulary::from_names(["skin rash", "itching"]);
//! assert_eq!(vocab.id("itching"), Some(1));
//! assert_eq!(clean_text("Skin_Rash"), "skin rash");
//! ```

pub mod types;
pub mod text;
pub mod responder;
pub mod error;
pub mod prelude;
