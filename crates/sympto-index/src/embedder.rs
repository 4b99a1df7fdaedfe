//! Core embedder trait and types.

use crate::sparse::{cosine_similarity, SparseVector};
use thiserror::Error;

/// Index error types.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

/// Result type for index operations.
pub type IndexResult<T> = Result<T, IndexError>;

/// Anything that projects text into a fitted term space.
///
/// Out-of-vocabulary terms simply contribute nothing, so embedding never
/// fails; text with no known terms becomes the zero vector.
pub trait Embedder: Send + Sync {
    /// Embed a single text string.
    fn embed(&self, text: &str) -> SparseVector;

    /// Embed multiple texts.
    fn embed_batch(&self, texts: &[&str]) -> Vec<SparseVector> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// Get the embedding dimension.
    fn dimension(&self) -> usize;

    /// Get the model name/identifier.
    fn model_name(&self) -> &str;

    /// Compute cosine similarity between two vectors of this space.
    fn similarity(&self, a: &SparseVector, b: &SparseVector) -> IndexResult<f64> {
        for v in [a, b] {
            if v.dimension() != self.dimension() {
                return Err(IndexError::DimensionMismatch {
                    expected: self.dimension(),
                    got: v.dimension(),
                });
            }
        }
        Ok(cosine_similarity(a, b))
    }
}
