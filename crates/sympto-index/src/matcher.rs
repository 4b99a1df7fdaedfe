//! Free-text to canonical symptom matching.

use crate::embedder::Embedder;
use crate::sparse::SparseVector;
use crate::tfidf::TfidfVectorizer;
use sympto_core::text::clean_text;
use sympto_core::types::{MatchResult, SymptomVocabulary};
use tracing::debug;

/// Precomputed vectors for every vocabulary entry.
///
/// Built once per vocabulary and never mutated, so a shared reference can
/// serve any number of concurrent queries.
#[derive(Debug, Clone)]
pub struct SymptomIndex {
    vocabulary: SymptomVocabulary,
    vectorizer: TfidfVectorizer,
    vectors: Vec<SparseVector>,
}

impl SymptomIndex {
    /// Fit the vectorizer over the vocabulary and embed every entry.
    pub fn build(vocabulary: &SymptomVocabulary) -> Self {
        let vectorizer = TfidfVectorizer::fit(vocabulary.names());
        let entries: Vec<&str> = vocabulary.iter().collect();
        let vectors = vectorizer.embed_batch(&entries);

        debug!(
            entries = vectors.len(),
            terms = vectorizer.dimension(),
            "Symptom index built"
        );

        Self {
            vocabulary: vocabulary.clone(),
            vectorizer,
            vectors,
        }
    }

    /// Closest vocabulary entries to `text`.
    ///
    /// Results are ordered by score descending (ties in vocabulary order),
    /// cut to `top_k`, and then only scores strictly above `threshold` are
    /// kept. Unrecognizable input yields an empty list.
    pub fn match_symptoms(&self, text: &str, top_k: usize, threshold: f64) -> Vec<MatchResult> {
        if top_k == 0 || self.vectors.is_empty() {
            return Vec::new();
        }

        let query = self.vectorizer.embed(&clean_text(text));
        if query.is_zero() {
            debug!(text, "No known terms in query");
            return Vec::new();
        }

        let mut scored: Vec<(usize, f64)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let sim = self.vectorizer.similarity(&query, v).unwrap_or(0.0);
                (i, sim.clamp(0.0, 1.0))
            })
            .collect();

        // Stable sort keeps vocabulary order among equal scores
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let results: Vec<MatchResult> = scored
            .into_iter()
            .take(top_k)
            .filter(|(_, score)| *score > threshold)
            .filter_map(|(i, score)| {
                self.vocabulary
                    .get(i)
                    .map(|name| MatchResult::new(name, score))
            })
            .collect();

        debug!(matches = results.len(), threshold, top_k, "Matched symptoms");
        results
    }

    pub fn vocabulary(&self) -> &SymptomVocabulary {
        &self.vocabulary
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fungal_index() -> SymptomIndex {
        SymptomIndex::build(&SymptomVocabulary::from_names([
            "itching",
            "skin rash",
            "fatigue",
        ]))
    }

    #[test]
    fn matches_itching_and_skin_rash() {
        let index = fungal_index();
        let results = index.match_symptoms("I have itching and a skin rash", 3, 0.4);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].symptom, "skin rash");
        assert!((results[0].score - 0.816).abs() < 1e-3);
        assert_eq!(results[1].symptom, "itching");
        assert!((results[1].score - 0.577).abs() < 1e-3);
    }

    #[test]
    fn unknown_words_match_nothing() {
        let index = fungal_index();
        assert!(index.match_symptoms("bananas are yellow", 3, 0.3).is_empty());
        assert!(index.match_symptoms("", 3, 0.3).is_empty());
        assert!(index.match_symptoms("!!! ???", 3, 0.0).is_empty());
    }

    #[test]
    fn top_k_zero_is_empty() {
        let index = fungal_index();
        assert!(index.match_symptoms("itching", 0, 0.0).is_empty());
    }

    #[test]
    fn top_k_applies_before_threshold() {
        let index = fungal_index();
        let results = index.match_symptoms("itching skin rash", 1, 0.0);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].symptom, "skin rash");
    }

    #[test]
    fn raising_threshold_never_adds_matches() {
        let index = fungal_index();
        let text = "itching skin rash and fatigue";
        let mut previous = usize::MAX;
        for threshold in [0.0, 0.2, 0.3, 0.4, 0.5, 0.7, 0.9, 1.0] {
            let n = index.match_symptoms(text, 3, threshold).len();
            assert!(n <= previous, "threshold {} grew matches", threshold);
            previous = n;
        }
        assert!(index.match_symptoms(text, 3, 1.0).is_empty());
    }

    #[test]
    fn exact_entry_scores_one() {
        let index = fungal_index();
        let results = index.match_symptoms("Fatigue!", 3, 0.3);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].symptom, "fatigue");
        assert!((results[0].score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn equal_scores_keep_vocabulary_order() {
        let index = SymptomIndex::build(&SymptomVocabulary::from_names([
            "mild fever",
            "high fever",
        ]));
        let results = index.match_symptoms("fever", 2, 0.0);
        let names: Vec<&str> = results.iter().map(|r| r.symptom.as_str()).collect();
        assert_eq!(names, vec!["high fever", "mild fever"]);
    }

    #[test]
    fn empty_vocabulary_is_harmless() {
        let index = SymptomIndex::build(&SymptomVocabulary::default());
        assert!(index.is_empty());
        assert!(index.match_symptoms("itching", 5, 0.0).is_empty());
    }
}
