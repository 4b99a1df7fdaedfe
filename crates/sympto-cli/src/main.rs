//! Sympto CLI - Command-line interface for the health advisory engine.

mod commands;
mod config;

use anyhow::Result;
use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sympto")]
#[command(author, version, about = "Sympto - Symptom-based health advisory engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new Sympto project
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Build the knowledge base from the raw tables
    Build {
        /// Directory holding the raw CSV tables (default: from config)
        #[arg(short, long)]
        raw: Option<String>,

        /// Output directory for the knowledge artifacts (default: from config)
        #[arg(short, long)]
        out: Option<String>,

        /// Print the build summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the vocabulary entries closest to some text
    Match {
        /// Free-text description of symptoms
        text: String,

        /// Maximum matches to show
        #[arg(
            short = 'k',
            long,
            default_value = "5",
            value_parser = RangedU64ValueParser::<usize>::new().range(1..)
        )]
        top_k: usize,

        /// Minimum similarity (default: the triage threshold)
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// Predict likely diseases from free text
    Predict {
        /// Free-text description of symptoms
        text: String,

        /// Print the prediction as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rank diseases for an explicit list of symptoms
    Rank {
        /// Canonical symptom names
        #[arg(required = true)]
        symptoms: Vec<String>,

        /// Scoring policy: coverage-severity or overlap-ratio
        #[arg(short, long, default_value = "coverage-severity")]
        policy: String,

        /// Maximum diseases to show (default: from config)
        #[arg(
            short = 'k',
            long,
            value_parser = RangedU64ValueParser::<usize>::new().range(1..)
        )]
        top_k: Option<usize>,
    },

    /// Triage one message
    Triage {
        /// The message to triage
        text: String,

        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive triage session
    Chat,

    /// Show knowledge base statistics
    Stats,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Build { raw, out, json } => {
            commands::build::run(raw.as_deref(), out.as_deref(), json)
        }
        Commands::Match { text, top_k, threshold } => {
            commands::query::match_symptoms(&text, top_k, threshold)
        }
        Commands::Predict { text, json } => commands::query::predict(&text, json),
        Commands::Rank { symptoms, policy, top_k } => {
            commands::query::rank(&symptoms, &policy, top_k)
        }
        Commands::Triage { text, json } => commands::triage::run(&text, json),
        Commands::Chat => commands::triage::chat(),
        Commands::Stats => commands::stats::run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_limits_are_rejected() {
        assert!(Cli::try_parse_from(["sympto", "rank", "itching", "chills", "-k", "0"]).is_err());
        assert!(Cli::try_parse_from(["sympto", "match", "itching", "-k", "0"]).is_err());

        let cli = Cli::try_parse_from(["sympto", "rank", "itching", "chills", "-k", "2"]).unwrap();
        match cli.command {
            Commands::Rank { top_k, .. } => assert_eq!(top_k, Some(2)),
            _ => panic!("expected rank"),
        }
    }
}
