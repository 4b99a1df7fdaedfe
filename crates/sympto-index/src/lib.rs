//! # Sympto Index
//!
//! Maps free text onto the canonical symptom vocabulary.
//!
//! Every vocabulary entry is embedded once with a TF-IDF model fitted on the
//! vocabulary itself; queries are projected into the same space and compared
//! by cosine similarity.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sympto_index::SymptomIndex;
//!
//! let index = SymptomIndex::build(knowledge.vocabulary());
//! for m in index.match_symptoms("itchy skin and a rash", 5, 0.3) {
//!     println!("{} ({:.2})", m.symptom, m.score);
//! }
//! ```

mod embedder;
mod matcher;
mod sparse;
mod tfidf;

pub use embedder::{Embedder, IndexError, IndexResult};
pub use matcher::SymptomIndex;
pub use sparse::{cosine_similarity, SparseVector};
pub use tfidf::{tokenize, TfidfVectorizer};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{cosine_similarity, Embedder, IndexError, IndexResult};
    pub use crate::{SparseVector, SymptomIndex, TfidfVectorizer};
}
