//! Show knowledge base statistics.

use anyhow::Result;
use colored::Colorize;

use super::load_engine;

pub fn run() -> Result<()> {
    let (config, engine) = load_engine()?;
    let stats = engine.stats();

    println!("{}", "Sympto Knowledge Base".white().bold());
    println!("{}", "═".repeat(40).dimmed());
    println!();

    println!("{}", "Knowledge".blue().bold());
    println!("  Location:     {}", config.knowledge_dir().display());
    println!("  Diseases:     {}", stats.diseases.to_string().cyan());
    println!("  Pairs:        {}", stats.pairs.to_string().cyan());
    println!("  Vocabulary:   {}", stats.vocabulary_size.to_string().cyan());
    println!("  Index terms:  {}", stats.index_terms.to_string().cyan());
    println!();
    println!("{}", "Lookups".blue().bold());
    println!("  Severity:     {}", stats.known_severity.to_string().cyan());
    println!("  Precautions:  {}", stats.precaution_entries.to_string().cyan());
    println!("  Descriptions: {}", stats.description_entries.to_string().cyan());
    println!();
    println!("{}", "Triage".blue().bold());
    println!("  Policy:       {}", stats.policy.to_string().cyan());
    println!("  Threshold:    {}", config.triage.triage_threshold);
    println!("  High severity: {}", config.triage.high_severity);

    Ok(())
}
