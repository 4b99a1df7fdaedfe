//! Matching, prediction and ranking commands.

use anyhow::{anyhow, Result};
use colored::Colorize;
use sympto::core::text::title_case;
use sympto::prelude::*;

use super::load_engine;

pub fn match_symptoms(text: &str, top_k: usize, threshold: Option<f64>) -> Result<()> {
    let (config, engine) = load_engine()?;
    let threshold = threshold.unwrap_or(config.triage.triage_threshold);

    let results = engine.match_symptoms(text, top_k, threshold);
    if results.is_empty() {
        println!("{} No symptoms recognized in: {}", "•".yellow(), text.cyan());
        return Ok(());
    }

    println!("{} Did you mean:", "→".blue());
    println!();
    for (i, m) in results.iter().enumerate() {
        println!(
            "  {} {} {}",
            format!("{}.", i + 1).blue(),
            m.symptom.white().bold(),
            format!("({:.3})", m.score).dimmed()
        );
    }

    Ok(())
}

pub fn predict(text: &str, json: bool) -> Result<()> {
    let (_, engine) = load_engine()?;
    let prediction = engine.predict(text);

    if json {
        println!("{}", serde_json::to_string_pretty(&prediction)?);
        return Ok(());
    }

    match prediction {
        Prediction::NoMatch => {
            println!("{} No clear match", "•".yellow());
        }
        Prediction::Ranking { matched, ranking } => {
            let names: Vec<&str> = matched.iter().map(|m| m.symptom.as_str()).collect();
            println!("{} Matched: {}", "→".blue(), names.join(", ").cyan());
            println!();
            print_ranking(&ranking);
        }
    }

    Ok(())
}

pub fn rank(symptoms: &[String], policy: &str, top_k: Option<usize>) -> Result<()> {
    let (config, engine) = load_engine()?;
    let policy: ScoringPolicy = policy.parse().map_err(|e: String| anyhow!(e))?;
    let top_k = top_k.unwrap_or(config.triage.rank_top_k);

    let symptoms: Vec<String> = symptoms.iter().map(|s| clean_text(s)).collect();
    for s in &symptoms {
        if !engine.knowledge().vocabulary().contains(s) {
            println!("  {} unknown symptom: {}", "•".yellow(), s);
        }
    }

    println!("{} Ranking with {}", "→".blue(), policy.to_string().cyan());
    println!();
    print_ranking(&engine.rank_diseases(symptoms.as_slice(), top_k, policy));
    Ok(())
}

fn print_ranking(ranking: &Ranking) {
    match ranking {
        Ranking::InsufficientSymptoms | Ranking::NoReliablePrediction => {
            println!("{} Not enough symptoms for reliable prediction.", "•".yellow());
        }
        Ranking::Ranked(candidates) => {
            for (i, c) in candidates.iter().enumerate() {
                println!(
                    "  {} {} {}",
                    format!("{}.", i + 1).blue(),
                    title_case(&c.disease).white().bold(),
                    format!("({:.2})", c.score).dimmed()
                );
                println!(
                    "      Overlap: {}  Coverage: {:.0}%",
                    c.overlap,
                    c.coverage_ratio * 100.0
                );
            }
        }
    }
}
