//! The cleaned knowledge base: disease-symptom pairs, the symptom
//! vocabulary and the severity, precaution and description lookups.
//!
//! Built once (by [`VocabularyBuilder`](crate::VocabularyBuilder) or by
//! loading stored artifacts) and read-only afterwards.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use sympto_core::types::{Disease, Symptom, SymptomVocabulary};

/// A description cell, raw and cleaned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptionEntry {
    pub description: String,
    pub description_processed: String,
}

/// Lookup tables keyed by cleaned name. Keys may name a symptom or a
/// disease; the raw tables do not distinguish.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupTables {
    pub severity: BTreeMap<String, Option<f64>>,
    pub precautions: BTreeMap<String, Vec<String>>,
    pub descriptions: BTreeMap<String, DescriptionEntry>,
}

/// Everything the matcher, scorer and composer need.
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeBase {
    pairs: Vec<(String, String)>,
    diseases: BTreeMap<String, BTreeSet<String>>,
    vocabulary: SymptomVocabulary,
    lookups: LookupTables,
}

impl KnowledgeBase {
    /// Assemble from deduplicated pairs and lookups. The vocabulary is
    /// seeded from pair symptoms plus every lookup key.
    pub fn from_parts(pairs: Vec<(String, String)>, lookups: LookupTables) -> Self {
        let mut diseases: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (disease, symptom) in &pairs {
            diseases
                .entry(disease.clone())
                .or_default()
                .insert(symptom.clone());
        }

        let vocabulary = SymptomVocabulary::from_names(
            pairs
                .iter()
                .map(|(_, s)| s.as_str())
                .chain(lookups.descriptions.keys().map(String::as_str))
                .chain(lookups.precautions.keys().map(String::as_str))
                .chain(lookups.severity.keys().map(String::as_str)),
        );

        Self {
            pairs,
            diseases,
            vocabulary,
            lookups,
        }
    }

    /// Disease-symptom pairs in first-seen order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn vocabulary(&self) -> &SymptomVocabulary {
        &self.vocabulary
    }

    pub fn lookups(&self) -> &LookupTables {
        &self.lookups
    }

    /// Disease name -> its symptom set.
    pub fn disease_symptoms(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.diseases
    }

    /// Known disease names, sorted.
    pub fn disease_names(&self) -> impl Iterator<Item = &str> {
        self.diseases.keys().map(String::as_str)
    }

    pub fn disease_count(&self) -> usize {
        self.diseases.len()
    }

    /// Full disease record with its description and precautions.
    pub fn disease(&self, name: &str) -> Option<Disease> {
        let symptoms = self.diseases.get(name)?;
        Some(Disease {
            name: name.to_string(),
            symptoms: symptoms.clone(),
            description: self.description(name).map(str::to_string),
            precautions: self.precautions(name).to_vec(),
        })
    }

    /// Severity weight; `None` when missing or unparseable.
    pub fn severity(&self, name: &str) -> Option<f64> {
        self.lookups.severity.get(name).copied().flatten()
    }

    pub fn precautions(&self, name: &str) -> &[String] {
        self.lookups
            .precautions
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Precautions joined the way they are stored.
    pub fn precaution_text(&self, name: &str) -> Option<String> {
        let list = self.precautions(name);
        if list.is_empty() {
            None
        } else {
            Some(list.join(crate::PRECAUTION_SEPARATOR))
        }
    }

    /// Raw description text.
    pub fn description(&self, name: &str) -> Option<&str> {
        self.lookups
            .descriptions
            .get(name)
            .map(|d| d.description.as_str())
    }

    /// Vocabulary entry with its severity.
    pub fn symptom(&self, name: &str) -> Option<Symptom> {
        if self.vocabulary.contains(name) {
            Some(Symptom::new(name, self.severity(name)))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(d: &str, s: &str) -> (String, String) {
        (d.to_string(), s.to_string())
    }

    fn sample() -> KnowledgeBase {
        let mut lookups = LookupTables::default();
        lookups.severity.insert("itching".into(), Some(1.0));
        lookups.severity.insert("chest pain".into(), Some(7.0));
        lookups.severity.insert("odd".into(), None);
        lookups.precautions.insert(
            "malaria".into(),
            vec!["consult nearest hospital".into(), "avoid oily food".into()],
        );
        lookups.descriptions.insert(
            "malaria".into(),
            DescriptionEntry {
                description: "A mosquito-borne disease.".into(),
                description_processed: "a mosquito-borne disease".into(),
            },
        );
        KnowledgeBase::from_parts(
            vec![
                pair("fungal infection", "itching"),
                pair("fungal infection", "skin rash"),
                pair("malaria", "chills"),
            ],
            lookups,
        )
    }

    #[test]
    fn vocabulary_includes_lookup_keys() {
        let kb = sample();
        let names: Vec<&str> = kb.vocabulary().iter().collect();
        assert_eq!(
            names,
            vec!["chest pain", "chills", "itching", "malaria", "odd", "skin rash"]
        );
    }

    #[test]
    fn diseases_group_their_symptoms() {
        let kb = sample();
        assert_eq!(kb.disease_count(), 2);
        let fungal = kb.disease("fungal infection").unwrap();
        assert_eq!(fungal.symptoms.len(), 2);
        assert!(fungal.description.is_none());

        let malaria = kb.disease("malaria").unwrap();
        assert_eq!(malaria.description.as_deref(), Some("A mosquito-borne disease."));
        assert_eq!(
            kb.precaution_text("malaria").as_deref(),
            Some("consult nearest hospital; avoid oily food")
        );
    }

    #[test]
    fn unknown_severity_is_none() {
        let kb = sample();
        assert_eq!(kb.severity("chest pain"), Some(7.0));
        assert_eq!(kb.severity("odd"), None);
        assert_eq!(kb.severity("missing"), None);
        assert_eq!(kb.symptom("odd"), Some(Symptom::new("odd", None)));
        assert!(kb.symptom("missing").is_none());
    }
}
