//! CLI command implementations.

pub mod build;
pub mod init;
pub mod query;
pub mod stats;
pub mod triage;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use sympto::prelude::*;

use crate::config::Config;

/// Load config and the stored knowledge base it points at.
pub fn load_engine() -> Result<(Config, TriageEngine)> {
    let config = Config::load()?;
    let dir = config.knowledge_dir();
    if !dir.exists() {
        bail!(
            "No knowledge base at {}. Run {} first.",
            dir.display(),
            "sympto build".cyan()
        );
    }
    let engine = TriageEngine::load(&dir, config.triage.clone())
        .with_context(|| format!("Failed to load knowledge base from {}", dir.display()))?;
    Ok((config, engine))
}
