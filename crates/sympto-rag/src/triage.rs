//! Triage composition: turns one free-text message into an advisory.
//!
//! The flow is a fixed state machine:
//! 1. blank input
//! 2. direct match on a known disease name
//! 3. symptom inference (match, then rank)
//! 4. composition of conditions, severity warnings and precautions
//!
//! Every outcome carries the disclaimer.

use crate::scoring::{DiseaseScorer, Ranking, ScoringPolicy};
use serde::{Deserialize, Serialize};
use std::fmt;
use sympto_core::error::{Result, SymptoError};
use sympto_core::text::{clean_text, is_blank, title_case};
use sympto_core::types::{MatchResult, Symptom};
use sympto_index::SymptomIndex;
use sympto_vocab::KnowledgeBase;
use tracing::debug;

pub const DISCLAIMER: &str =
    "I\u{2019}m not a doctor. Please consult a medical professional for diagnosis.";
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a message.";
pub const UNRECOGNIZED_MESSAGE: &str = "I couldn\u{2019}t recognize any symptoms. Please try again.";
pub const NOT_ENOUGH_SYMPTOMS_MESSAGE: &str = "Not enough symptoms for reliable prediction.";
pub const NO_PRECAUTIONS: &str = "No precautions available";
pub const URGENT_CARE_ADVICE: &str = "Please consider urgent medical attention.";

/// Thresholds and limits for triage and prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageConfig {
    /// Similarity a symptom must exceed during triage.
    #[serde(default = "default_triage_threshold")]
    pub triage_threshold: f64,
    /// Matches considered during triage; `None` scans the whole vocabulary.
    #[serde(default)]
    pub triage_top_k: Option<usize>,
    #[serde(default = "default_predict_threshold")]
    pub predict_threshold: f64,
    #[serde(default = "default_predict_top_k")]
    pub predict_top_k: usize,
    /// Conditions reported per response.
    #[serde(default = "default_rank_top_k")]
    pub rank_top_k: usize,
    /// Severity at or above which a symptom triggers the urgent-care block.
    #[serde(default = "default_high_severity")]
    pub high_severity: f64,
    /// Scoring used by triage. Prediction always uses coverage-severity.
    #[serde(default = "default_policy")]
    pub policy: ScoringPolicy,
}

fn default_triage_threshold() -> f64 { 0.3 }
fn default_predict_threshold() -> f64 { 0.4 }
fn default_predict_top_k() -> usize { 7 }
fn default_rank_top_k() -> usize { 3 }
fn default_high_severity() -> f64 { 6.0 }
fn default_policy() -> ScoringPolicy { ScoringPolicy::overlap_ratio() }

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            triage_threshold: default_triage_threshold(),
            triage_top_k: None,
            predict_threshold: default_predict_threshold(),
            predict_top_k: default_predict_top_k(),
            rank_top_k: default_rank_top_k(),
            high_severity: default_high_severity(),
            policy: default_policy(),
        }
    }
}

impl TriageConfig {
    /// Reject thresholds outside [0, 1] and empty result limits.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("triage_threshold", self.triage_threshold),
            ("predict_threshold", self.predict_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SymptoError::out_of_range(field, 0.0, 1.0, value));
            }
        }
        if self.rank_top_k == 0 {
            return Err(SymptoError::invalid_config("rank_top_k", "0", "must be at least 1"));
        }
        if self.predict_top_k == 0 {
            return Err(SymptoError::invalid_config("predict_top_k", "0", "must be at least 1"));
        }
        if self.triage_top_k == Some(0) {
            return Err(SymptoError::invalid_config("triage_top_k", "0", "must be at least 1"));
        }
        if !self.high_severity.is_finite() || self.high_severity < 0.0 {
            return Err(SymptoError::invalid_config(
                "high_severity",
                self.high_severity.to_string(),
                "must be a non-negative number",
            ));
        }
        Ok(())
    }
}

/// One ranked condition as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionLine {
    pub rank: usize,
    pub disease: String,
    pub score: f64,
    /// Score rounded to a whole percentage, see [`percent_of`].
    pub percent: i64,
    pub description: Option<String>,
}

/// Precaution text attached to one matched symptom.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymptomPrecaution {
    pub symptom: String,
    pub precautions: String,
}

/// A full symptom-inference advisory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub matched: Vec<MatchResult>,
    pub conditions: Vec<ConditionLine>,
    /// Matched symptoms at or above the high-severity threshold.
    pub severe_symptoms: Vec<Symptom>,
    pub precautions: Vec<SymptomPrecaution>,
}

/// Which state of the triage flow produced the response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriageOutcome {
    EmptyInput,
    DirectMatch {
        disease: String,
        description: Option<String>,
        precautions: Vec<String>,
    },
    CouldNotRecognizeSymptoms,
    InsufficientSymptoms { matched: Vec<MatchResult> },
    NoReliablePrediction { matched: Vec<MatchResult> },
    Assessment(Assessment),
}

/// The advisory returned for one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriageResponse {
    #[serde(flatten)]
    pub outcome: TriageOutcome,
    /// Fixed user-facing message for the sentinel outcomes.
    pub message: Option<&'static str>,
    pub disclaimer: &'static str,
}

impl TriageResponse {
    pub fn new(outcome: TriageOutcome) -> Self {
        let message = match &outcome {
            TriageOutcome::EmptyInput => Some(EMPTY_INPUT_MESSAGE),
            TriageOutcome::CouldNotRecognizeSymptoms => Some(UNRECOGNIZED_MESSAGE),
            TriageOutcome::InsufficientSymptoms { .. }
            | TriageOutcome::NoReliablePrediction { .. } => Some(NOT_ENOUGH_SYMPTOMS_MESSAGE),
            TriageOutcome::DirectMatch { .. } | TriageOutcome::Assessment(_) => None,
        };
        Self {
            outcome,
            message,
            disclaimer: DISCLAIMER,
        }
    }

    /// Short machine-friendly name of the outcome.
    pub fn kind(&self) -> &'static str {
        match self.outcome {
            TriageOutcome::EmptyInput => "empty_input",
            TriageOutcome::DirectMatch { .. } => "direct_match",
            TriageOutcome::CouldNotRecognizeSymptoms => "could_not_recognize_symptoms",
            TriageOutcome::InsufficientSymptoms { .. } => "insufficient_symptoms",
            TriageOutcome::NoReliablePrediction { .. } => "no_reliable_prediction",
            TriageOutcome::Assessment(_) => "assessment",
        }
    }
}

impl fmt::Display for TriageResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(message) = self.message {
            writeln!(f, "{}", message)?;
        }

        match &self.outcome {
            TriageOutcome::DirectMatch {
                disease,
                description,
                precautions,
            } => {
                writeln!(f, "{}", title_case(disease))?;
                if let Some(desc) = description {
                    writeln!(f, "{}", desc)?;
                }
                writeln!(f)?;
                writeln!(f, "Suggested precautions:")?;
                if precautions.is_empty() {
                    writeln!(f, "{}", NO_PRECAUTIONS)?;
                } else {
                    writeln!(f, "{}", precautions.join(sympto_vocab::PRECAUTION_SEPARATOR))?;
                }
            }
            TriageOutcome::Assessment(a) => {
                writeln!(f, "Possible conditions:")?;
                for c in &a.conditions {
                    writeln!(f, "{}. {} - {}% match", c.rank, title_case(&c.disease), c.percent)?;
                    if let Some(desc) = &c.description {
                        writeln!(f, "   {}", desc)?;
                    }
                }

                if !a.severe_symptoms.is_empty() {
                    let names: Vec<&str> = a.severe_symptoms.iter().map(|s| s.name.as_str()).collect();
                    writeln!(f)?;
                    writeln!(f, "Severe symptoms detected: {}", names.join(", "))?;
                    writeln!(f, "{}", URGENT_CARE_ADVICE)?;
                }

                if !a.precautions.is_empty() {
                    writeln!(f)?;
                    writeln!(f, "Suggested precautions:")?;
                    for p in &a.precautions {
                        writeln!(f, "For {}: {}", p.symptom, p.precautions)?;
                    }
                }
            }
            _ => {}
        }

        writeln!(f)?;
        write!(f, "Disclaimer: {}", self.disclaimer)
    }
}

/// Whole percentage shown for a score. Halves round away from zero
/// (`f64::round`), so 62.5 shows as 63 and 0.5 as 1.
pub fn percent_of(score: f64) -> i64 {
    score.round() as i64
}

/// Known disease named in the message, if any. The longest name wins;
/// equal lengths resolve alphabetically.
pub fn find_direct_match<'k>(knowledge: &'k KnowledgeBase, text: &str) -> Option<&'k str> {
    let lowered = text.to_lowercase();
    let cleaned = clean_text(text);
    knowledge
        .disease_names()
        .filter(|name| lowered.contains(name) || cleaned.contains(name))
        .fold(None, |best: Option<&str>, name| match best {
            Some(b) if b.len() >= name.len() => Some(b),
            _ => Some(name),
        })
}

/// Borrowing view that runs the triage flow.
#[derive(Debug, Clone, Copy)]
pub struct TriageComposer<'a> {
    knowledge: &'a KnowledgeBase,
    index: &'a SymptomIndex,
    config: &'a TriageConfig,
}

impl<'a> TriageComposer<'a> {
    pub fn new(knowledge: &'a KnowledgeBase, index: &'a SymptomIndex, config: &'a TriageConfig) -> Self {
        Self {
            knowledge,
            index,
            config,
        }
    }

    pub fn triage(&self, text: &str) -> TriageResponse {
        if is_blank(text) {
            return TriageResponse::new(TriageOutcome::EmptyInput);
        }

        if let Some(disease) = find_direct_match(self.knowledge, text) {
            debug!(disease, "Direct disease match");
            return TriageResponse::new(TriageOutcome::DirectMatch {
                disease: disease.to_string(),
                description: self.knowledge.description(disease).map(str::to_string),
                precautions: self.knowledge.precautions(disease).to_vec(),
            });
        }

        let top_k = self.config.triage_top_k.unwrap_or(self.index.len());
        let matched = self
            .index
            .match_symptoms(text, top_k, self.config.triage_threshold);
        if matched.is_empty() {
            return TriageResponse::new(TriageOutcome::CouldNotRecognizeSymptoms);
        }

        let names: Vec<&str> = matched.iter().map(|m| m.symptom.as_str()).collect();
        let ranking = DiseaseScorer::new(self.knowledge).rank(
            names.as_slice(),
            self.config.rank_top_k,
            self.config.policy,
        );

        match ranking {
            Ranking::InsufficientSymptoms => {
                TriageResponse::new(TriageOutcome::InsufficientSymptoms { matched })
            }
            Ranking::NoReliablePrediction => {
                TriageResponse::new(TriageOutcome::NoReliablePrediction { matched })
            }
            Ranking::Ranked(candidates) => {
                let conditions = candidates
                    .into_iter()
                    .enumerate()
                    .map(|(i, c)| ConditionLine {
                        rank: i + 1,
                        description: self.knowledge.description(&c.disease).map(str::to_string),
                        percent: percent_of(c.score),
                        score: c.score,
                        disease: c.disease,
                    })
                    .collect();
                TriageResponse::new(TriageOutcome::Assessment(self.compose(matched, conditions)))
            }
        }
    }

    fn compose(&self, matched: Vec<MatchResult>, conditions: Vec<ConditionLine>) -> Assessment {
        let severe_symptoms = matched
            .iter()
            .filter_map(|m| {
                let severity = self.knowledge.severity(&m.symptom)?;
                (severity >= self.config.high_severity)
                    .then(|| Symptom::new(m.symptom.clone(), Some(severity)))
            })
            .collect();

        let precautions = matched
            .iter()
            .filter_map(|m| {
                self.knowledge
                    .precaution_text(&m.symptom)
                    .map(|text| SymptomPrecaution {
                        symptom: m.symptom.clone(),
                        precautions: text,
                    })
            })
            .collect();

        Assessment {
            matched,
            conditions,
            severe_symptoms,
            precautions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = TriageConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.policy, ScoringPolicy::overlap_ratio());
        assert_eq!(config.triage_top_k, None);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = TriageConfig {
            triage_threshold: 1.5,
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("triage_threshold"));

        let config = TriageConfig {
            rank_top_k: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_fills_missing_fields() {
        let config: TriageConfig =
            serde_json::from_str(r#"{"policy": "coverage-severity", "rank_top_k": 5}"#).unwrap();
        assert_eq!(config.policy, ScoringPolicy::coverage_severity());
        assert_eq!(config.rank_top_k, 5);
        assert_eq!(config.triage_threshold, 0.3);
    }

    #[test]
    fn sentinel_responses_render_message_and_disclaimer() {
        let response = TriageResponse::new(TriageOutcome::EmptyInput);
        let text = response.to_string();
        assert!(text.starts_with(EMPTY_INPUT_MESSAGE));
        assert!(text.ends_with(DISCLAIMER));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["kind"], "empty_input");
        assert_eq!(json["message"], EMPTY_INPUT_MESSAGE);
        assert_eq!(json["disclaimer"], DISCLAIMER);
    }

    #[test]
    fn percentages_round_halves_up() {
        assert_eq!(percent_of(62.5), 63);
        assert_eq!(percent_of(0.5), 1);
        assert_eq!(percent_of(200.0 / 3.0), 67);
        assert_eq!(percent_of(2.0 / (4.0 + 1e-6) * 100.0), 50);
    }

    #[test]
    fn direct_match_without_precautions_says_so() {
        let response = TriageResponse::new(TriageOutcome::DirectMatch {
            disease: "common cold".to_string(),
            description: None,
            precautions: Vec::new(),
        });
        let text = response.to_string();
        assert!(text.starts_with("Common Cold"));
        assert!(text.contains(NO_PRECAUTIONS));
        assert!(response.message.is_none());
    }
}
