//! REST API endpoints.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use sympto::prelude::*;
use std::result::Result;
use tracing::{debug, warn};

/// Liveness response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: sympto::VERSION,
    })
}

/// Get knowledge base statistics.
pub async fn get_stats(State(state): State<AppState>) -> Json<EngineStats> {
    Json(state.engine().stats())
}

/// Triage request body.
#[derive(Debug, Deserialize)]
pub struct TriageRequest {
    pub message: String,
}

/// Structured advisory plus its plain-text rendering.
#[derive(Debug, Serialize)]
pub struct TriageReply {
    #[serde(flatten)]
    pub response: TriageResponse,
    pub text: String,
}

/// Triage one message.
pub async fn triage(
    State(state): State<AppState>,
    Json(req): Json<TriageRequest>,
) -> Json<TriageReply> {
    let response = state.engine().triage(&req.message);
    debug!(kind = response.kind(), "Triage request");
    let text = response.to_string();
    Json(TriageReply { response, text })
}

/// Match request body.
#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub text: String,
    #[serde(default = "default_match_top_k")]
    pub top_k: usize,
    /// Defaults to the configured triage threshold.
    #[serde(default)]
    pub threshold: Option<f64>,
}

fn default_match_top_k() -> usize {
    5
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub matches: Vec<MatchResult>,
}

/// Closest vocabulary entries for free text.
pub async fn match_symptoms(
    State(state): State<AppState>,
    Json(req): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, (StatusCode, String)> {
    let engine = state.engine();
    let threshold = req.threshold.unwrap_or(engine.config().triage_threshold);
    if !(0.0..=1.0).contains(&threshold) {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("threshold must be within 0-1, got {}", threshold),
        ));
    }

    Ok(Json(MatchResponse {
        matches: engine.match_symptoms(&req.text, req.top_k, threshold),
    }))
}

/// Predict request body.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub text: String,
}

/// Disease prediction from free text.
pub async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> Json<Prediction> {
    Json(state.engine().predict(&req.text))
}

/// Rank request body.
#[derive(Debug, Deserialize)]
pub struct RankRequest {
    pub symptoms: Vec<String>,
    #[serde(default = "default_rank_policy")]
    pub policy: ScoringPolicy,
    /// Defaults to the configured number of conditions.
    #[serde(default)]
    pub top_k: Option<usize>,
}

fn default_rank_policy() -> ScoringPolicy {
    ScoringPolicy::coverage_severity()
}

/// Rank diseases for explicit symptom names.
pub async fn rank(
    State(state): State<AppState>,
    Json(req): Json<RankRequest>,
) -> Result<Json<Ranking>, (StatusCode, String)> {
    let engine = state.engine();
    let top_k = req.top_k.unwrap_or(engine.config().rank_top_k);
    if top_k == 0 {
        return Err((StatusCode::BAD_REQUEST, "top_k must be at least 1".to_string()));
    }
    let symptoms: Vec<String> = req.symptoms.iter().map(|s| clean_text(s)).collect();
    Ok(Json(engine.rank_diseases(symptoms.as_slice(), top_k, req.policy)))
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub status: &'static str,
    pub stats: EngineStats,
}

/// Reload the knowledge base from disk.
pub async fn reload(
    State(state): State<AppState>,
) -> Result<Json<ReloadResponse>, (StatusCode, String)> {
    match state.reload().await {
        Ok(stats) => Ok(Json(ReloadResponse {
            status: "reloaded",
            stats,
        })),
        Err(e) => {
            warn!(error = %format!("{:#}", e), "Reload failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", e)))
        }
    }
}
