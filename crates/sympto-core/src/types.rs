//! Shared types used across all Sympto crates.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Integer id of a vocabulary entry. Ids start at 1.
pub type SymptomId = u32;

/// A canonical symptom with its severity weight, if one is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symptom {
    pub name: String,
    pub severity: Option<f64>,
}

impl Symptom {
    pub fn new(name: impl Into<String>, severity: Option<f64>) -> Self {
        Self {
            name: name.into(),
            severity,
        }
    }
}

/// A disease and everything known about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disease {
    pub name: String,
    pub symptoms: BTreeSet<String>,
    pub description: Option<String>,
    pub precautions: Vec<String>,
}

impl Disease {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symptoms: BTreeSet::new(),
            description: None,
            precautions: Vec::new(),
        }
    }

    /// Number of matched symptoms this disease explains.
    pub fn overlap(&self, matched: &BTreeSet<String>) -> usize {
        self.symptoms.intersection(matched).count()
    }
}

/// Ordered, deduplicated symptom names with a stable name -> id map.
///
/// Entries are sorted, so insertion order and sort order coincide and ids
/// are reproducible across builds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymptomVocabulary {
    names: Vec<String>,
    ids: BTreeMap<String, SymptomId>,
}

impl SymptomVocabulary {
    /// Build from any collection of names. Empty names are dropped.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let unique: BTreeSet<String> = names
            .into_iter()
            .map(Into::into)
            .filter(|s| !s.is_empty())
            .collect();
        let names: Vec<String> = unique.into_iter().collect();
        let ids = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i as SymptomId + 1))
            .collect();
        Self { names, ids }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    pub fn id(&self, name: &str) -> Option<SymptomId> {
        self.ids.get(name).copied()
    }

    /// Name at a zero-based position in sort order.
    pub fn get(&self, position: usize) -> Option<&str> {
        self.names.get(position).map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn id_map(&self) -> &BTreeMap<String, SymptomId> {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// One vocabulary entry matched against free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub symptom: String,
    /// Cosine similarity in [0, 1].
    pub score: f64,
}

impl MatchResult {
    pub fn new(symptom: impl Into<String>, score: f64) -> Self {
        Self {
            symptom: symptom.into(),
            score,
        }
    }
}

/// A ranked disease for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseCandidate {
    pub disease: String,
    pub score: f64,
    /// Matched symptoms shared with the disease.
    pub overlap: usize,
    /// `overlap / |disease.symptoms|`, always within [0, 1].
    pub coverage_ratio: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_sorts_dedups_and_numbers_from_one() {
        let vocab = SymptomVocabulary::from_names(["skin rash", "itching", "", "fatigue", "itching"]);
        assert_eq!(vocab.names(), &["fatigue", "itching", "skin rash"]);
        assert_eq!(vocab.id("fatigue"), Some(1));
        assert_eq!(vocab.id("skin rash"), Some(3));
        assert_eq!(vocab.id("cough"), None);
        assert_eq!(vocab.get(1), Some("itching"));
    }

    #[test]
    fn disease_overlap_counts_shared_symptoms() {
        let mut disease = Disease::new("fungal infection");
        disease.symptoms.extend(["itching".to_string(), "skin rash".to_string(), "fatigue".to_string()]);
        let matched: BTreeSet<String> = ["itching", "skin rash", "cough"].iter().map(|s| s.to_string()).collect();
        assert_eq!(disease.overlap(&matched), 2);
    }
}
