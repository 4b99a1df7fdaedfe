//! Application state for the web server.
//!
//! Handlers take a snapshot of the current engine per request; a reload
//! builds the replacement on the blocking pool and swaps it in.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use sympto::prelude::*;
use tracing::info;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    engine: EngineHandle,
    knowledge_dir: Arc<PathBuf>,
}

impl AppState {
    /// Load the knowledge base stored in `knowledge_dir`.
    pub fn load(knowledge_dir: &Path, config: TriageConfig) -> Result<Self> {
        let engine = TriageEngine::load(knowledge_dir, config).with_context(|| {
            format!("Failed to load knowledge base from {}", knowledge_dir.display())
        })?;
        Ok(Self::from_engine(engine, knowledge_dir))
    }

    pub fn from_engine(engine: TriageEngine, knowledge_dir: &Path) -> Self {
        Self {
            engine: EngineHandle::new(engine),
            knowledge_dir: Arc::new(knowledge_dir.to_path_buf()),
        }
    }

    /// The engine currently serving requests.
    pub fn engine(&self) -> Arc<TriageEngine> {
        self.engine.snapshot()
    }

    pub fn knowledge_dir(&self) -> &Path {
        &self.knowledge_dir
    }

    /// Re-read the knowledge directory and swap the new engine in.
    /// On failure the current engine stays in place.
    pub async fn reload(&self) -> Result<EngineStats> {
        let dir = self.knowledge_dir.clone();
        let config = self.engine().config().clone();

        let engine = tokio::task::spawn_blocking(move || TriageEngine::load(&dir, config))
            .await
            .context("Reload task failed")?
            .with_context(|| format!("Failed to reload from {}", self.knowledge_dir.display()))?;

        let stats = engine.stats();
        self.engine.swap(engine);
        info!(diseases = stats.diseases, vocabulary = stats.vocabulary_size, "Knowledge base reloaded");
        Ok(stats)
    }
}
