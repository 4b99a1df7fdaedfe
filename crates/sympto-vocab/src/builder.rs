//! VocabularyBuilder: raw tables in, [`KnowledgeBase`] out.
//!
//! Steps:
//! 1. Read all four raw tables (any missing file aborts the build)
//! 2. Detect the disease/symptom table layout and extract pairs
//! 3. Clean the description, precaution and severity tables
//! 4. Seed the vocabulary from pairs and lookup keys
//!
//! The result depends only on the raw inputs: every intermediate collection
//! is ordered, so two builds over the same files write identical artifacts.

use crate::columns::{
    is_present, ColumnMode, DatasetLayout, DESCRIPTION_COLUMN_HINTS, SEVERITY_COLUMN_HINTS,
};
use crate::knowledge::{DescriptionEntry, KnowledgeBase, LookupTables};
use crate::raw::RawTable;
use crate::severity::parse_severity;
use crate::PRECAUTION_SEPARATOR;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use sympto_core::error::Result;
use sympto_core::text::{clean_text, split_symptom_cell};
use tracing::{debug, info};

/// Default raw file names.
pub const DEFAULT_DATASET: &str = "dataset.csv";
pub const DEFAULT_DESCRIPTIONS: &str = "symptom_Description.csv";
pub const DEFAULT_PRECAUTIONS: &str = "symptom_precaution.csv";
pub const DEFAULT_SEVERITY: &str = "Symptom-severity.csv";

/// Number of vocabulary entries echoed in a [`BuildSummary`].
const SUMMARY_SAMPLE: usize = 20;

/// Locations of the four raw tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSources {
    pub dataset: PathBuf,
    pub descriptions: PathBuf,
    pub precautions: PathBuf,
    pub severity: PathBuf,
}

impl RawSources {
    /// The default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            dataset: dir.join(DEFAULT_DATASET),
            descriptions: dir.join(DEFAULT_DESCRIPTIONS),
            precautions: dir.join(DEFAULT_PRECAUTIONS),
            severity: dir.join(DEFAULT_SEVERITY),
        }
    }
}

/// What a build found, for operators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildSummary {
    pub mode: ColumnMode,
    pub disease_column: String,
    pub symptom_columns: usize,
    pub pairs: usize,
    pub diseases: usize,
    pub vocabulary_size: usize,
    pub unknown_severity: usize,
    pub sample: Vec<String>,
}

/// Result of a successful build.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub knowledge: KnowledgeBase,
    pub summary: BuildSummary,
}

/// Normalizes raw knowledge tables.
#[derive(Debug, Clone)]
pub struct VocabularyBuilder {
    sources: RawSources,
}

impl VocabularyBuilder {
    pub fn new(sources: RawSources) -> Self {
        Self { sources }
    }

    /// Builder over the default file names in `dir`.
    pub fn from_dir(dir: &Path) -> Self {
        Self::new(RawSources::in_dir(dir))
    }

    pub fn sources(&self) -> &RawSources {
        &self.sources
    }

    /// Read the raw files and build the knowledge base.
    pub fn build(&self) -> Result<BuildOutput> {
        info!(dataset = %self.sources.dataset.display(), "loading raw knowledge tables");

        let dataset = RawTable::read(&self.sources.dataset)?;
        let descriptions = RawTable::read(&self.sources.descriptions)?;
        let precautions = RawTable::read(&self.sources.precautions)?;
        let severity = RawTable::read(&self.sources.severity)?;

        Ok(build_from_tables(&dataset, &descriptions, &precautions, &severity))
    }
}

/// Build from tables already in memory.
pub fn build_from_tables(
    dataset: &RawTable,
    descriptions: &RawTable,
    precautions: &RawTable,
    severity: &RawTable,
) -> BuildOutput {
    let layout = DatasetLayout::detect(dataset);
    let disease_column = dataset.columns()[layout.disease_column].clone();
    info!(
        disease_column = %disease_column,
        symptom_columns = layout.symptom_columns.len(),
        mode = %layout.mode,
        "detected dataset layout"
    );

    let pairs = extract_pairs(dataset, &layout);
    let lookups = LookupTables {
        severity: clean_severity(severity),
        precautions: clean_precautions(precautions),
        descriptions: clean_descriptions(descriptions),
    };
    let unknown_severity = lookups.severity.values().filter(|v| v.is_none()).count();
    let knowledge = KnowledgeBase::from_parts(pairs, lookups);

    let summary = BuildSummary {
        mode: layout.mode,
        disease_column,
        symptom_columns: layout.symptom_columns.len(),
        pairs: knowledge.pairs().len(),
        diseases: knowledge.disease_count(),
        vocabulary_size: knowledge.vocabulary().len(),
        unknown_severity,
        sample: knowledge
            .vocabulary()
            .iter()
            .take(SUMMARY_SAMPLE)
            .map(str::to_string)
            .collect(),
    };
    info!(
        pairs = summary.pairs,
        diseases = summary.diseases,
        vocabulary = summary.vocabulary_size,
        unknown_severity = summary.unknown_severity,
        "knowledge base built"
    );

    BuildOutput { knowledge, summary }
}

/// Deduplicated (disease, symptom) pairs in first-seen order.
fn extract_pairs(dataset: &RawTable, layout: &DatasetLayout) -> Vec<(String, String)> {
    let columns = dataset.columns();
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut pairs = Vec::new();

    for row in dataset.rows() {
        let disease = clean_text(&row[layout.disease_column]);
        if disease.is_empty() {
            continue;
        }

        let symptoms: Vec<String> = match layout.mode {
            ColumnMode::Indicator => layout
                .symptom_columns
                .iter()
                .filter(|&&i| is_present(&row[i]))
                .map(|&i| clean_text(&columns[i]))
                .collect(),
            ColumnMode::Text => layout
                .symptom_columns
                .iter()
                .map(|&i| row[i].trim())
                .filter(|cell| !cell.is_empty() && !cell.eq_ignore_ascii_case("nan"))
                .flat_map(split_symptom_cell)
                .collect(),
        };

        for symptom in symptoms.into_iter().filter(|s| !s.is_empty()) {
            let pair = (disease.clone(), symptom);
            if seen.insert(pair.clone()) {
                pairs.push(pair);
            }
        }
    }

    debug!(pairs = pairs.len(), "extracted disease-symptom pairs");
    pairs
}

/// Key -> raw description, first row per key wins.
fn clean_descriptions(table: &RawTable) -> BTreeMap<String, DescriptionEntry> {
    let value_column = table.find_value_column(&DESCRIPTION_COLUMN_HINTS);
    let mut out = BTreeMap::new();

    for row in table.rows() {
        let key = clean_text(&row[0]);
        if key.is_empty() {
            continue;
        }
        let description = value_column
            .map(|i| row[i].trim().to_string())
            .unwrap_or_default();
        out.entry(key).or_insert_with(|| DescriptionEntry {
            description_processed: clean_text(&description),
            description,
        });
    }
    out
}

/// Key -> non-empty precaution cells, first row per key wins. A cell that
/// already holds the stored separator contributes one entry per part, so the
/// list reads back unchanged from the joined artifact.
fn clean_precautions(table: &RawTable) -> BTreeMap<String, Vec<String>> {
    let mut out = BTreeMap::new();

    for row in table.rows() {
        let key = clean_text(&row[0]);
        if key.is_empty() {
            continue;
        }
        let list: Vec<String> = row
            .iter()
            .skip(1)
            .flat_map(|cell| cell.split(PRECAUTION_SEPARATOR))
            .map(str::trim)
            .filter(|cell| !cell.is_empty() && !cell.eq_ignore_ascii_case("nan"))
            .map(str::to_string)
            .collect();
        out.entry(key).or_insert(list);
    }
    out
}

/// Key -> severity weight, unparseable cells recorded as unknown.
fn clean_severity(table: &RawTable) -> BTreeMap<String, Option<f64>> {
    let value_column = table.find_value_column(&SEVERITY_COLUMN_HINTS);
    let mut out = BTreeMap::new();

    for row in table.rows() {
        let key = clean_text(&row[0]);
        if key.is_empty() {
            continue;
        }
        let raw = value_column.map(|i| row[i].as_str()).unwrap_or("");
        let value = parse_severity(raw);
        if value.is_none() {
            debug!(symptom = %key, raw, "severity unparseable, recorded as unknown");
        }
        out.entry(key).or_insert(value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookups() -> (RawTable, RawTable, RawTable) {
        let descriptions = RawTable::from_rows(
            &["Disease", "Description"],
            &[
                &["Fungal infection", "In humans, fungal infections occur when..."],
                &["Fungal infection", "a duplicate that must be ignored"],
            ],
        )
        .unwrap();
        let precautions = RawTable::from_rows(
            &["Disease", "Precaution_1", "Precaution_2", "Precaution_3"],
            &[&["Fungal infection", "bath twice", " use detol or neem in bathing water", ""]],
        )
        .unwrap();
        let severity = RawTable::from_rows(
            &["Symptom", "weight"],
            &[&["itching", "1"], &["skin_rash", "3"], &["chest_pain", "high"]],
        )
        .unwrap();
        (descriptions, precautions, severity)
    }

    #[test]
    fn text_mode_splits_and_cleans_cells() {
        let dataset = RawTable::from_rows(
            &["Disease", "Symptom_1", "Symptom_2"],
            &[
                &["Fungal infection", " itching", " skin_rash"],
                &["Fungal infection", "itching", "nodal_skin_eruptions; dischromic _patches"],
                &["Allergy", "continuous_sneezing", ""],
            ],
        )
        .unwrap();
        let (d, p, s) = lookups();
        let out = build_from_tables(&dataset, &d, &p, &s);

        assert_eq!(out.summary.mode, ColumnMode::Text);
        assert_eq!(
            out.knowledge.pairs(),
            &[
                ("fungal infection".to_string(), "itching".to_string()),
                ("fungal infection".to_string(), "skin rash".to_string()),
                ("fungal infection".to_string(), "nodal skin eruptions".to_string()),
                ("fungal infection".to_string(), "dischromic patches".to_string()),
                ("allergy".to_string(), "continuous sneezing".to_string()),
            ]
        );
    }

    #[test]
    fn indicator_mode_uses_column_names() {
        let dataset = RawTable::from_rows(
            &["itching", "skin_rash", "continuous_sneezing", "prognosis"],
            &[
                &["1", "1", "0", "Fungal infection"],
                &["0", "0", "1", "Allergy"],
                &["1", "1", "0", "Fungal infection"],
            ],
        )
        .unwrap();
        let (d, p, s) = lookups();
        let out = build_from_tables(&dataset, &d, &p, &s);

        assert_eq!(out.summary.mode, ColumnMode::Indicator);
        assert_eq!(out.summary.disease_column, "prognosis");
        assert_eq!(out.knowledge.pairs().len(), 3);
        assert_eq!(
            out.knowledge.disease_symptoms()["fungal infection"].len(),
            2
        );
    }

    #[test]
    fn lookups_are_cleaned_and_seed_the_vocabulary() {
        let dataset =
            RawTable::from_rows(&["Disease", "Symptom_1"], &[&["Allergy", "shivering"]]).unwrap();
        let (d, p, s) = lookups();
        let out = build_from_tables(&dataset, &d, &p, &s);
        let kb = &out.knowledge;

        assert_eq!(
            kb.description("fungal infection"),
            Some("In humans, fungal infections occur when...")
        );
        assert_eq!(
            kb.precaution_text("fungal infection").as_deref(),
            Some("bath twice; use detol or neem in bathing water")
        );
        assert_eq!(kb.severity("skin rash"), Some(3.0));
        assert_eq!(kb.severity("chest pain"), None);
        assert_eq!(out.summary.unknown_severity, 1);

        for name in ["shivering", "fungal infection", "itching", "skin rash", "chest pain"] {
            assert!(kb.vocabulary().contains(name), "{} missing from vocabulary", name);
        }
        assert_eq!(kb.vocabulary().id("chest pain"), Some(1));
    }

    #[test]
    fn missing_source_aborts_the_build() {
        let dir = tempfile::tempdir().unwrap();
        let err = VocabularyBuilder::from_dir(dir.path()).build().unwrap_err();
        assert!(err.to_string().contains("dataset.csv"));
    }
}
