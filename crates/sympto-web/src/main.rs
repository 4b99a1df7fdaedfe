//! Sympto Web - HTTP API for the health advisory engine.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use sympto_web::{create_router, AppState, Settings};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sympto-web")]
#[command(about = "Sympto Web - HTTP API for symptom triage")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Knowledge directory (overrides the config file)
    #[arg(short, long)]
    knowledge: Option<PathBuf>,

    /// Path to sympto.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let addr = format!("{}:{}", cli.host, cli.port);

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    let knowledge_dir = cli.knowledge.unwrap_or(settings.data.knowledge_dir);

    let state = AppState::load(&knowledge_dir, settings.triage)?;
    let stats = state.engine().stats();
    info!(
        diseases = stats.diseases,
        vocabulary = stats.vocabulary_size,
        dir = %knowledge_dir.display(),
        "Knowledge base loaded"
    );

    let app = create_router(state);

    info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
