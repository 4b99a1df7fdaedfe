//! The triage engine and its hot-swappable handle.
//!
//! A [`TriageEngine`] owns the knowledge base, the symptom index and the
//! configuration. It never changes after construction; to pick up a rebuilt
//! knowledge base, construct a new engine and [`EngineHandle::swap`] it in.
//! Queries already running keep the snapshot they started with.

use crate::scoring::{DiseaseScorer, Ranking, ScoringPolicy};
use crate::triage::{TriageComposer, TriageConfig, TriageResponse};
use parking_lot::RwLock;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use sympto_core::error::Result;
use sympto_core::responder::Responder;
use sympto_core::types::MatchResult;
use sympto_index::{Embedder, SymptomIndex};
use sympto_vocab::{load_knowledge, BuildSummary, KnowledgeBase, RawSources, VocabularyBuilder};
use tracing::{debug, info};

/// Result of the prediction call site.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Prediction {
    /// No symptom cleared the prediction threshold.
    NoMatch,
    Ranking {
        matched: Vec<MatchResult>,
        ranking: Ranking,
    },
}

/// Size of the loaded knowledge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineStats {
    pub diseases: usize,
    pub pairs: usize,
    pub vocabulary_size: usize,
    pub index_terms: usize,
    pub known_severity: usize,
    pub precaution_entries: usize,
    pub description_entries: usize,
    pub policy: ScoringPolicy,
}

/// Immutable query engine over one knowledge base.
#[derive(Debug, Clone)]
pub struct TriageEngine {
    knowledge: KnowledgeBase,
    index: SymptomIndex,
    config: TriageConfig,
}

impl TriageEngine {
    /// Index an in-memory knowledge base. The config is validated first.
    pub fn from_knowledge(knowledge: KnowledgeBase, config: TriageConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(knowledge, config))
    }

    /// Load stored knowledge artifacts from `dir`.
    pub fn load(dir: &Path, config: TriageConfig) -> Result<Self> {
        config.validate()?;
        let knowledge = load_knowledge(dir)?;
        Ok(Self::assemble(knowledge, config))
    }

    /// Build straight from raw tables without touching the disk.
    pub fn build_from_raw(sources: RawSources, config: TriageConfig) -> Result<(Self, BuildSummary)> {
        config.validate()?;
        let output = VocabularyBuilder::new(sources).build()?;
        Ok((Self::assemble(output.knowledge, config), output.summary))
    }

    fn assemble(knowledge: KnowledgeBase, config: TriageConfig) -> Self {
        let index = SymptomIndex::build(knowledge.vocabulary());
        info!(
            diseases = knowledge.disease_count(),
            vocabulary = index.len(),
            policy = %config.policy,
            "Triage engine ready"
        );
        Self {
            knowledge,
            index,
            config,
        }
    }

    pub fn triage(&self, text: &str) -> TriageResponse {
        let response = TriageComposer::new(&self.knowledge, &self.index, &self.config).triage(text);
        debug!(kind = response.kind(), "Triage complete");
        response
    }

    pub fn match_symptoms(&self, text: &str, top_k: usize, threshold: f64) -> Vec<MatchResult> {
        self.index.match_symptoms(text, top_k, threshold)
    }

    pub fn rank_diseases<S: AsRef<str>>(
        &self,
        matched: &[S],
        top_k: usize,
        policy: ScoringPolicy,
    ) -> Ranking {
        DiseaseScorer::new(&self.knowledge).rank(matched, top_k, policy)
    }

    /// Prediction call site: stricter matching, coverage-severity scoring.
    pub fn predict(&self, text: &str) -> Prediction {
        let matched = self.match_symptoms(
            text,
            self.config.predict_top_k,
            self.config.predict_threshold,
        );
        if matched.is_empty() {
            return Prediction::NoMatch;
        }

        let names: Vec<&str> = matched.iter().map(|m| m.symptom.as_str()).collect();
        let ranking = self.rank_diseases(
            names.as_slice(),
            self.config.rank_top_k,
            ScoringPolicy::coverage_severity(),
        );
        Prediction::Ranking { matched, ranking }
    }

    pub fn stats(&self) -> EngineStats {
        let lookups = self.knowledge.lookups();
        EngineStats {
            diseases: self.knowledge.disease_count(),
            pairs: self.knowledge.pairs().len(),
            vocabulary_size: self.knowledge.vocabulary().len(),
            index_terms: self.index.vectorizer().dimension(),
            known_severity: lookups.severity.values().filter(|v| v.is_some()).count(),
            precaution_entries: lookups.precautions.len(),
            description_entries: lookups.descriptions.len(),
            policy: self.config.policy,
        }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn index(&self) -> &SymptomIndex {
        &self.index
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }
}

impl Responder for TriageEngine {
    fn get_response(&self, text: &str) -> String {
        self.triage(text).to_string()
    }
}

/// Shared, swappable reference to the current engine.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    current: Arc<RwLock<Arc<TriageEngine>>>,
}

impl EngineHandle {
    pub fn new(engine: TriageEngine) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(engine))),
        }
    }

    /// The engine in effect right now. Holding the snapshot does not block swaps.
    pub fn snapshot(&self) -> Arc<TriageEngine> {
        self.current.read().clone()
    }

    /// Replace the engine, returning the previous one.
    pub fn swap(&self, engine: TriageEngine) -> Arc<TriageEngine> {
        let next = Arc::new(engine);
        let previous = std::mem::replace(&mut *self.current.write(), next);
        info!(
            vocabulary = self.snapshot().knowledge().vocabulary().len(),
            "Swapped triage engine"
        );
        previous
    }
}

impl Responder for EngineHandle {
    fn get_response(&self, text: &str) -> String {
        self.snapshot().get_response(text)
    }
}
