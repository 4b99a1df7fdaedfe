//! Builder artifacts on disk.
//!
//! | File | Content |
//! |------|---------|
//! | `cleaned_disease_symptoms.csv` | `disease,symptom` |
//! | `symptom_vocab.txt` | one symptom per line |
//! | `symptom2id.json` | symptom -> id |
//! | `cleaned_symptom_descriptions.csv` | `symptom,description,description_processed` |
//! | `cleaned_symptom_precautions.csv` | `symptom,precautions` |
//! | `cleaned_symptom_severity.csv` | `symptom,severity` |
//!
//! Precautions are stored joined with `"; "`; the builder already splits
//! cells on that separator, so the list reads back unchanged.
//!
//! The vocabulary listing and id map are derivable from the other files;
//! they are written for consumers outside this workspace and checked
//! against the derived vocabulary on load.

use crate::knowledge::{DescriptionEntry, KnowledgeBase, LookupTables};
use crate::PRECAUTION_SEPARATOR;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use sympto_core::error::{Result, SymptoError};
use sympto_core::types::SymptomId;
use tracing::info;

pub const PAIRS_FILE: &str = "cleaned_disease_symptoms.csv";
pub const VOCAB_FILE: &str = "symptom_vocab.txt";
pub const SYMPTOM_IDS_FILE: &str = "symptom2id.json";
pub const DESCRIPTIONS_FILE: &str = "cleaned_symptom_descriptions.csv";
pub const PRECAUTIONS_FILE: &str = "cleaned_symptom_precautions.csv";
pub const SEVERITY_FILE: &str = "cleaned_symptom_severity.csv";

#[derive(Debug, Serialize, Deserialize)]
struct PairRecord {
    disease: String,
    symptom: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct DescriptionRecord {
    symptom: String,
    description: String,
    description_processed: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct PrecautionRecord {
    symptom: String,
    precautions: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct SeverityRecord {
    symptom: String,
    severity: Option<f64>,
}

/// Write every artifact into `dir`, creating it if needed.
pub fn save_knowledge(knowledge: &KnowledgeBase, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;

    let mut writer = csv::Writer::from_path(dir.join(PAIRS_FILE))?;
    for (disease, symptom) in knowledge.pairs() {
        writer.serialize(PairRecord {
            disease: disease.clone(),
            symptom: symptom.clone(),
        })?;
    }
    writer.flush()?;

    std::fs::write(
        dir.join(VOCAB_FILE),
        knowledge.vocabulary().names().join("\n"),
    )?;

    let ids = serde_json::to_string_pretty(knowledge.vocabulary().id_map())?;
    std::fs::write(dir.join(SYMPTOM_IDS_FILE), ids)?;

    let lookups = knowledge.lookups();

    let mut writer = csv::Writer::from_path(dir.join(DESCRIPTIONS_FILE))?;
    for (symptom, entry) in &lookups.descriptions {
        writer.serialize(DescriptionRecord {
            symptom: symptom.clone(),
            description: entry.description.clone(),
            description_processed: entry.description_processed.clone(),
        })?;
    }
    writer.flush()?;

    let mut writer = csv::Writer::from_path(dir.join(PRECAUTIONS_FILE))?;
    for (symptom, list) in &lookups.precautions {
        writer.serialize(PrecautionRecord {
            symptom: symptom.clone(),
            precautions: list.join(PRECAUTION_SEPARATOR),
        })?;
    }
    writer.flush()?;

    let mut writer = csv::Writer::from_path(dir.join(SEVERITY_FILE))?;
    for (symptom, severity) in &lookups.severity {
        writer.serialize(SeverityRecord {
            symptom: symptom.clone(),
            severity: *severity,
        })?;
    }
    writer.flush()?;

    info!(dir = %dir.display(), "knowledge artifacts written");
    Ok(())
}

/// Load a knowledge base previously written by [`save_knowledge`].
pub fn load_knowledge(dir: &Path) -> Result<KnowledgeBase> {
    let pairs: Vec<(String, String)> = read_records::<PairRecord>(&dir.join(PAIRS_FILE))?
        .into_iter()
        .map(|r| (r.disease, r.symptom))
        .collect();

    let descriptions = read_records::<DescriptionRecord>(&dir.join(DESCRIPTIONS_FILE))?
        .into_iter()
        .map(|r| {
            (
                r.symptom,
                DescriptionEntry {
                    description: r.description,
                    description_processed: r.description_processed,
                },
            )
        })
        .collect();

    let precautions = read_records::<PrecautionRecord>(&dir.join(PRECAUTIONS_FILE))?
        .into_iter()
        .map(|r| {
            let list = r
                .precautions
                .split(PRECAUTION_SEPARATOR)
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect();
            (r.symptom, list)
        })
        .collect();

    let severity = read_records::<SeverityRecord>(&dir.join(SEVERITY_FILE))?
        .into_iter()
        .map(|r| (r.symptom, r.severity))
        .collect();

    let knowledge = KnowledgeBase::from_parts(
        pairs,
        LookupTables {
            severity,
            precautions,
            descriptions,
        },
    );

    verify_symptom_ids(&knowledge, &dir.join(SYMPTOM_IDS_FILE))?;

    info!(
        dir = %dir.display(),
        diseases = knowledge.disease_count(),
        vocabulary = knowledge.vocabulary().len(),
        "knowledge base loaded"
    );
    Ok(knowledge)
}

fn read_records<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Err(SymptoError::missing_artifact(path));
    }
    let mut reader = csv::Reader::from_path(path)?;
    reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, _>>()
        .map_err(|e| SymptoError::corrupt_artifact(path, e.to_string()))
}

/// The stored id map must agree with the vocabulary derived from the tables.
fn verify_symptom_ids(knowledge: &KnowledgeBase, path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(SymptoError::missing_artifact(path));
    }
    let content = std::fs::read_to_string(path)?;
    let stored: BTreeMap<String, SymptomId> = serde_json::from_str(&content)
        .map_err(|e| SymptoError::corrupt_artifact(path, e.to_string()))?;

    if &stored != knowledge.vocabulary().id_map() {
        return Err(SymptoError::corrupt_artifact(
            path,
            "symptom ids disagree with the cleaned tables",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sympto_core::error::LoadError;

    fn sample() -> KnowledgeBase {
        let mut lookups = LookupTables::default();
        lookups.severity.insert("itching".into(), Some(1.0));
        lookups.severity.insert("mystery".into(), None);
        lookups.precautions.insert(
            "fungal infection".into(),
            vec!["bath twice".into(), "keep, infected area dry".into()],
        );
        lookups.descriptions.insert(
            "fungal infection".into(),
            DescriptionEntry {
                description: "In humans, \"fungal\" infections occur...".into(),
                description_processed: "in humans, fungal infections occur".into(),
            },
        );
        KnowledgeBase::from_parts(
            vec![
                ("fungal infection".into(), "itching".into()),
                ("fungal infection".into(), "skin rash".into()),
            ],
            lookups,
        )
    }

    #[test]
    fn save_then_load_preserves_everything() {
        let dir = tempfile::tempdir().unwrap();
        let kb = sample();
        save_knowledge(&kb, dir.path()).unwrap();

        let loaded = load_knowledge(dir.path()).unwrap();
        assert_eq!(loaded, kb);
    }

    #[test]
    fn vocab_listing_has_one_symptom_per_line() {
        let dir = tempfile::tempdir().unwrap();
        save_knowledge(&sample(), dir.path()).unwrap();

        let listing = std::fs::read_to_string(dir.path().join(VOCAB_FILE)).unwrap();
        assert_eq!(listing, "fungal infection\nitching\nmystery\nskin rash");

        let ids = std::fs::read_to_string(dir.path().join(SYMPTOM_IDS_FILE)).unwrap();
        assert!(ids.contains("\"fungal infection\": 1"));
    }

    #[test]
    fn unknown_severity_is_written_empty() {
        let dir = tempfile::tempdir().unwrap();
        save_knowledge(&sample(), dir.path()).unwrap();

        let severity = std::fs::read_to_string(dir.path().join(SEVERITY_FILE)).unwrap();
        assert!(severity.contains("mystery,\n"));
    }

    #[test]
    fn missing_artifact_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        save_knowledge(&sample(), dir.path()).unwrap();
        std::fs::remove_file(dir.path().join(PRECAUTIONS_FILE)).unwrap();

        let err = load_knowledge(dir.path()).unwrap_err();
        assert!(matches!(err, SymptoError::Load(LoadError::MissingArtifact(_))));
    }

    #[test]
    fn tampered_ids_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        save_knowledge(&sample(), dir.path()).unwrap();
        std::fs::write(dir.path().join(SYMPTOM_IDS_FILE), "{\"itching\": 9}").unwrap();

        let err = load_knowledge(dir.path()).unwrap_err();
        assert!(matches!(err, SymptoError::Load(LoadError::Corrupt { .. })));
    }

    #[test]
    fn precaution_cells_with_the_separator_round_trip() {
        use crate::builder::build_from_tables;
        use crate::raw::RawTable;

        let dataset = RawTable::from_rows(
            &["Disease", "Symptom_1", "Symptom_2"],
            &[&["Malaria", "chills", "vomiting"]],
        )
        .unwrap();
        let precautions = RawTable::from_rows(
            &["Disease", "Precaution_1", "Precaution_2"],
            &[&["Malaria", "rest; drink water", "see doctor"]],
        )
        .unwrap();
        let descriptions = RawTable::from_rows(&["Disease", "Description"], &[]).unwrap();
        let severity = RawTable::from_rows(&["Symptom", "weight"], &[]).unwrap();
        let kb = build_from_tables(&dataset, &descriptions, &precautions, &severity).knowledge;
        assert_eq!(kb.precautions("malaria"), &["rest", "drink water", "see doctor"]);

        let dir = tempfile::tempdir().unwrap();
        save_knowledge(&kb, dir.path()).unwrap();
        let loaded = load_knowledge(dir.path()).unwrap();
        assert_eq!(loaded, kb);
        assert_eq!(
            loaded.precaution_text("malaria").as_deref(),
            Some("rest; drink water; see doctor")
        );
    }
}
