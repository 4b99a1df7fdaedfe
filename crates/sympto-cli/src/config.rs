//! Configuration management for the Sympto CLI.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use sympto::prelude::*;
use sympto::vocab::builder::{
    DEFAULT_DATASET, DEFAULT_DESCRIPTIONS, DEFAULT_PRECAUTIONS, DEFAULT_SEVERITY,
};

pub const CONFIG_FILE: &str = "sympto.toml";

/// Sympto project configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub triage: TriageConfig,
    /// Directory relative paths resolve against (the config file's directory).
    #[serde(skip)]
    root: Option<PathBuf>,
}

/// Where the raw tables and the built knowledge live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_raw_dir")]
    pub raw_dir: PathBuf,
    #[serde(default = "default_knowledge_dir")]
    pub knowledge_dir: PathBuf,
    #[serde(default = "default_dataset")]
    pub dataset: String,
    #[serde(default = "default_descriptions")]
    pub descriptions: String,
    #[serde(default = "default_precautions")]
    pub precautions: String,
    #[serde(default = "default_severity")]
    pub severity: String,
}

// Default value functions
fn default_raw_dir() -> PathBuf { PathBuf::from("data") }
fn default_knowledge_dir() -> PathBuf { PathBuf::from("knowledge") }
fn default_dataset() -> String { DEFAULT_DATASET.to_string() }
fn default_descriptions() -> String { DEFAULT_DESCRIPTIONS.to_string() }
fn default_precautions() -> String { DEFAULT_PRECAUTIONS.to_string() }
fn default_severity() -> String { DEFAULT_SEVERITY.to_string() }

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            raw_dir: default_raw_dir(),
            knowledge_dir: default_knowledge_dir(),
            dataset: default_dataset(),
            descriptions: default_descriptions(),
            precautions: default_precautions(),
            severity: default_severity(),
        }
    }
}

impl Config {
    /// Load config from sympto.toml in the current or parent directories.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::from_file(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load a specific config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config
            .triage
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        config.root = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }

    pub fn raw_dir(&self) -> PathBuf {
        self.resolve(&self.data.raw_dir)
    }

    pub fn knowledge_dir(&self) -> PathBuf {
        self.resolve(&self.data.knowledge_dir)
    }

    /// Raw table paths, optionally read from another directory.
    pub fn raw_sources(&self, raw_dir: Option<&Path>) -> RawSources {
        let dir = raw_dir.map(Path::to_path_buf).unwrap_or_else(|| self.raw_dir());
        RawSources {
            dataset: dir.join(&self.data.dataset),
            descriptions: dir.join(&self.data.descriptions),
            precautions: dir.join(&self.data.precautions),
            severity: dir.join(&self.data.severity),
        }
    }
}

/// Find sympto.toml in current or parent directories.
fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}
