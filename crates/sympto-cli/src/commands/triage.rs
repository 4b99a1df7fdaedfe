//! One-shot triage and the interactive chat loop.

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use sympto::prelude::*;

use super::load_engine;

/// Words that end a chat session.
const EXIT_WORDS: [&str; 3] = ["exit", "quit", "bye"];

pub fn run(text: &str, json: bool) -> Result<()> {
    let (_, engine) = load_engine()?;
    let response = engine.triage(text);

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", response);
    }
    Ok(())
}

pub fn chat() -> Result<()> {
    let (_, engine) = load_engine()?;
    let stats = engine.stats();

    println!(
        "{} Sympto ready ({} diseases, {} symptoms). Type {} to leave.",
        "✓".green().bold(),
        stats.diseases.to_string().cyan(),
        stats.vocabulary_size.to_string().cyan(),
        "exit".cyan()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();
    loop {
        print!("{} ", "You:".blue().bold());
        stdout.flush().context("Failed to flush stdout")?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if EXIT_WORDS.contains(&line.trim().to_lowercase().as_str()) {
            break;
        }

        println!("{}", "Bot:".green().bold());
        println!("{}", engine.get_response(&line));
        println!();
    }

    println!("Take care!");
    Ok(())
}
