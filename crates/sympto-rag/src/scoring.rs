//! Disease scoring: ranks candidate diseases from a set of matched symptoms.
//!
//! Two scoring formulas exist and callers pick one explicitly:
//!
//! - `coverage-severity`: `overlap / |symptoms| * 100 + w * Σ severity(overlap)`,
//!   unknown severities counting as 1
//! - `overlap-ratio`: `overlap / (|symptoms| + ε) * 100`
//!
//! Both share the same floor: at least two distinct matched symptoms overall
//! and at least two shared with a disease for it to be ranked.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use sympto_core::types::DiseaseCandidate;
use sympto_vocab::KnowledgeBase;
use tracing::debug;

/// Fewest shared symptoms a disease needs to be ranked.
pub const MIN_OVERLAP: usize = 2;

/// Weight of an overlapping symptom whose severity is unknown.
pub const DEFAULT_SEVERITY_WEIGHT: f64 = 1.0;

/// How a disease is scored against the matched symptoms.
///
/// Serialized by name (`coverage-severity`, `overlap-ratio`); deserializing
/// a name yields the default parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ScoringPolicy {
    /// Coverage percentage plus a severity boost.
    CoverageSeverity { severity_weight: f64 },
    /// Coverage percentage with a smoothed denominator, no boost.
    OverlapRatio { epsilon: f64 },
}

impl ScoringPolicy {
    pub fn coverage_severity() -> Self {
        ScoringPolicy::CoverageSeverity {
            severity_weight: 0.1,
        }
    }

    pub fn overlap_ratio() -> Self {
        ScoringPolicy::OverlapRatio { epsilon: 1e-6 }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScoringPolicy::CoverageSeverity { .. } => "coverage-severity",
            ScoringPolicy::OverlapRatio { .. } => "overlap-ratio",
        }
    }
}

impl fmt::Display for ScoringPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScoringPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "coverage-severity" => Ok(Self::coverage_severity()),
            "overlap-ratio" => Ok(Self::overlap_ratio()),
            other => Err(format!(
                "unknown scoring policy '{}' (expected coverage-severity or overlap-ratio)",
                other
            )),
        }
    }
}

impl TryFrom<String> for ScoringPolicy {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ScoringPolicy> for String {
    fn from(policy: ScoringPolicy) -> Self {
        policy.name().to_string()
    }
}

/// Outcome of ranking. The two sentinels are ordinary values, not errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "candidates", rename_all = "snake_case")]
pub enum Ranking {
    Ranked(Vec<DiseaseCandidate>),
    /// Fewer than two distinct matched symptoms.
    InsufficientSymptoms,
    /// No disease shares at least two matched symptoms.
    NoReliablePrediction,
}

impl Ranking {
    pub fn candidates(&self) -> &[DiseaseCandidate] {
        match self {
            Ranking::Ranked(c) => c,
            _ => &[],
        }
    }

    pub fn is_ranked(&self) -> bool {
        matches!(self, Ranking::Ranked(_))
    }
}

/// Scores diseases of a knowledge base.
#[derive(Debug, Clone, Copy)]
pub struct DiseaseScorer<'a> {
    knowledge: &'a KnowledgeBase,
}

impl<'a> DiseaseScorer<'a> {
    pub fn new(knowledge: &'a KnowledgeBase) -> Self {
        Self { knowledge }
    }

    /// Rank diseases for `matched` symptom names, best first, at most `top_k`.
    /// A `top_k` of 0 is treated as 1, so `Ranked` never holds an empty list.
    pub fn rank<S: AsRef<str>>(&self, matched: &[S], top_k: usize, policy: ScoringPolicy) -> Ranking {
        let matched: BTreeSet<String> = matched.iter().map(|s| s.as_ref().to_string()).collect();
        if matched.len() < MIN_OVERLAP {
            debug!(matched = matched.len(), "Too few symptoms to rank");
            return Ranking::InsufficientSymptoms;
        }

        let mut candidates: Vec<DiseaseCandidate> = Vec::new();
        for (disease, symptoms) in self.knowledge.disease_symptoms() {
            if symptoms.is_empty() {
                continue;
            }
            let overlap: Vec<&String> = symptoms.intersection(&matched).collect();
            if overlap.len() < MIN_OVERLAP {
                continue;
            }

            let coverage_ratio = overlap.len() as f64 / symptoms.len() as f64;
            let score = match policy {
                ScoringPolicy::CoverageSeverity { severity_weight } => {
                    let severity: f64 = overlap
                        .iter()
                        .map(|s| self.knowledge.severity(s).unwrap_or(DEFAULT_SEVERITY_WEIGHT))
                        .sum();
                    coverage_ratio * 100.0 + severity_weight * severity
                }
                ScoringPolicy::OverlapRatio { epsilon } => {
                    overlap.len() as f64 / (symptoms.len() as f64 + epsilon) * 100.0
                }
            };

            candidates.push(DiseaseCandidate {
                disease: disease.clone(),
                score,
                overlap: overlap.len(),
                coverage_ratio,
            });
        }

        if candidates.is_empty() {
            return Ranking::NoReliablePrediction;
        }

        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.disease.cmp(&b.disease))
        });
        candidates.truncate(top_k.max(1));

        debug!(
            policy = %policy,
            ranked = candidates.len(),
            top = candidates.first().map(|c| c.disease.as_str()).unwrap_or(""),
            "Ranked diseases"
        );

        Ranking::Ranked(candidates)
    }
}
