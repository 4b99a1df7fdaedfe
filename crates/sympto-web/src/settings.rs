//! Server settings read from the shared `sympto.toml`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use sympto::prelude::TriageConfig;

/// The parts of `sympto.toml` the server needs. Other keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub triage: TriageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_knowledge_dir")]
    pub knowledge_dir: PathBuf,
}

fn default_knowledge_dir() -> PathBuf {
    PathBuf::from("knowledge")
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            knowledge_dir: default_knowledge_dir(),
        }
    }
}

impl Settings {
    /// Read and validate a config file. Relative paths resolve against its directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let mut settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        settings
            .triage
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;

        if settings.data.knowledge_dir.is_relative() {
            if let Some(root) = path.parent() {
                settings.data.knowledge_dir = root.join(&settings.data.knowledge_dir);
            }
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_knowledge_dir_and_triage_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sympto.toml");
        std::fs::write(
            &path,
            "[data]\nraw_dir = \"raw\"\nknowledge_dir = \"kb\"\n\n[triage]\nrank_top_k = 4\n",
        )
        .unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.data.knowledge_dir, dir.path().join("kb"));
        assert_eq!(settings.triage.rank_top_k, 4);
    }
}
