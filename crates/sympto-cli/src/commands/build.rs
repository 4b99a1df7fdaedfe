//! Build the knowledge base from the raw tables.

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use sympto::prelude::*;
use tracing::info;

use crate::config::Config;

pub fn run(raw: Option<&str>, out: Option<&str>, json: bool) -> Result<()> {
    let config = Config::load()?;
    let sources = config.raw_sources(raw.map(Path::new));
    let out_dir = out.map(PathBuf::from).unwrap_or_else(|| config.knowledge_dir());

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("Invalid progress template")?,
    );
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(format!("Reading {}", sources.dataset.display()));

    let output = match VocabularyBuilder::new(sources).build() {
        Ok(output) => output,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e).context("Knowledge base build failed");
        }
    };

    spinner.set_message(format!("Writing {}", out_dir.display()));
    save_knowledge(&output.knowledge, &out_dir)
        .with_context(|| format!("Failed to write knowledge base to {}", out_dir.display()))?;
    spinner.finish_and_clear();
    info!(dir = %out_dir.display(), "Knowledge base written");

    let summary = &output.summary;
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!("{} Knowledge base built!", "✓".green().bold());
    println!("  Layout: {} (disease column: {})", summary.mode.to_string().cyan(), summary.disease_column.cyan());
    println!("  Symptom columns: {}", summary.symptom_columns.to_string().cyan());
    println!("  Diseases: {}", summary.diseases.to_string().cyan());
    println!("  Disease-symptom pairs: {}", summary.pairs.to_string().cyan());
    println!("  Vocabulary: {}", summary.vocabulary_size.to_string().cyan());
    if summary.unknown_severity > 0 {
        println!(
            "  {} {} severity values could not be parsed",
            "•".yellow(),
            summary.unknown_severity
        );
    }
    println!("  Sample: {}", summary.sample.join(", ").dimmed());
    println!();
    println!("  Written to {}", out_dir.display());

    Ok(())
}
