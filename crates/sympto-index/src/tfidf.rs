//! TF-IDF vectorizer fitted over the symptom vocabulary.
//!
//! Each vocabulary entry is one document. Weighting:
//!
//! - tf: raw term count in the document
//! - idf: `ln((1 + n) / (1 + df)) + 1` (smoothed, so no term gets zero weight)
//! - vectors are L2-normalized
//!
//! Terms are maximal alphanumeric runs of at least two characters, and the
//! term dictionary is sorted, so a refit over the same vocabulary yields the
//! same vectors.

use crate::embedder::Embedder;
use crate::sparse::SparseVector;
use std::collections::{BTreeMap, BTreeSet};

/// Shortest token kept.
const MIN_TOKEN_LEN: usize = 2;

/// Fitted TF-IDF model.
#[derive(Debug, Clone, PartialEq)]
pub struct TfidfVectorizer {
    terms: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Fit the term dictionary and idf weights over `documents`.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let mut df: BTreeMap<String, usize> = BTreeMap::new();
        for doc in documents {
            let unique: BTreeSet<String> = tokenize(doc.as_ref()).into_iter().collect();
            for term in unique {
                *df.entry(term).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let mut terms = BTreeMap::new();
        let mut idf = Vec::with_capacity(df.len());
        for (index, (term, count)) in df.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + count as f64)).ln() + 1.0);
            terms.insert(term, index);
        }

        Self { terms, idf }
    }

    /// Project text into the fitted space. Unknown terms are ignored.
    pub fn transform(&self, text: &str) -> SparseVector {
        let entries: Vec<(usize, f64)> = tokenize(text)
            .iter()
            .filter_map(|t| self.terms.get(t).copied())
            .map(|index| (index, self.idf[index]))
            .collect();

        // Each occurrence contributes idf once, so summed duplicates give tf * idf.
        let mut vector = SparseVector::from_entries(self.idf.len(), entries);
        vector.normalize_l2();
        vector
    }

    /// Fitted idf weight of a term.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.terms.get(term).map(|&i| self.idf[i])
    }

    /// The fitted terms in index order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }
}

impl Embedder for TfidfVectorizer {
    fn embed(&self, text: &str) -> SparseVector {
        self.transform(text)
    }

    fn dimension(&self) -> usize {
        self.idf.len()
    }

    fn model_name(&self) -> &str {
        "tfidf"
    }
}

/// Lowercased ASCII alphanumeric runs of at least [`MIN_TOKEN_LEN`] characters.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| w.chars().count() >= MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_drops_single_characters() {
        assert_eq!(
            tokenize("I have a skin-rash, 2 days"),
            vec!["have", "skin", "rash", "days"]
        );
    }

    #[test]
    fn idf_is_smoothed() {
        let tfidf = TfidfVectorizer::fit(&["skin rash", "skin peeling", "fatigue"]);
        // n = 3: "skin" in 2 docs, "rash" in 1
        let skin = tfidf.idf("skin").unwrap();
        let rash = tfidf.idf("rash").unwrap();
        assert!((skin - ((4.0f64 / 3.0).ln() + 1.0)).abs() < 1e-12);
        assert!((rash - ((4.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
        assert!(rash > skin);
    }

    #[test]
    fn terms_are_sorted() {
        let tfidf = TfidfVectorizer::fit(&["vomiting", "chills", "high fever"]);
        let terms: Vec<&str> = tfidf.terms().collect();
        assert_eq!(terms, vec!["chills", "fever", "high", "vomiting"]);
        assert_eq!(tfidf.dimension(), 4);
    }

    #[test]
    fn transform_is_unit_length_and_ignores_unknown_terms() {
        let tfidf = TfidfVectorizer::fit(&["skin rash", "fatigue"]);
        let v = tfidf.transform("bananas and skin rash rash");
        assert!((v.norm() - 1.0).abs() < 1e-9);
        assert_eq!(v.entries().len(), 2);

        let oov = tfidf.transform("bananas are yellow");
        assert!(oov.is_zero());
    }

    #[test]
    fn identical_text_has_similarity_one() {
        let tfidf = TfidfVectorizer::fit(&["skin rash", "fatigue"]);
        let a = tfidf.embed("skin rash");
        let b = tfidf.embed("Skin Rash");
        assert!((tfidf.similarity(&a, &b).unwrap() - 1.0).abs() < 1e-9);
    }
}
