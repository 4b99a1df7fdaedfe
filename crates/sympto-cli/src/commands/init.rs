//! Initialize a new Sympto project.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{Config, CONFIG_FILE};

pub fn run(path: Option<String>) -> Result<()> {
    let base_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    println!("{} Initializing Sympto project...", "→".blue());

    let config = Config::default();

    // Raw tables go here
    let raw_dir = base_path.join(&config.data.raw_dir);
    std::fs::create_dir_all(&raw_dir)
        .with_context(|| format!("Failed to create {}", raw_dir.display()))?;
    println!("  {} Created {}", "✓".green(), raw_dir.display());

    let knowledge_dir = base_path.join(&config.data.knowledge_dir);
    std::fs::create_dir_all(&knowledge_dir)
        .with_context(|| format!("Failed to create {}", knowledge_dir.display()))?;
    println!("  {} Created {}", "✓".green(), knowledge_dir.display());

    let config_path = base_path.join(CONFIG_FILE);
    if !config_path.exists() {
        config.save(&config_path)?;
        println!("  {} Created {}", "✓".green(), config_path.display());
    } else {
        println!("  {} {} already exists", "•".yellow(), config_path.display());
    }

    println!();
    println!("{} Sympto project initialized!", "✓".green().bold());
    println!();
    println!("Next steps:");
    println!(
        "  {} copy {}, {}, {} and {} into {}",
        "1.".blue(),
        config.data.dataset,
        config.data.descriptions,
        config.data.precautions,
        config.data.severity,
        raw_dir.display()
    );
    println!("  {} sympto build", "2.".blue());
    println!("  {} sympto triage \"I have itching and a skin rash\"", "3.".blue());

    Ok(())
}
