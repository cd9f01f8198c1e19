//! relcat configuration
//!
//! Read from `config.yaml` in the platform config directory. A missing file
//! means defaults.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::artifact::PathScheme;
use crate::catalog::LoadPolicy;

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Loader settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadConfig {
    /// Policy for paths that do not follow the scheme
    #[serde(default)]
    pub on_invalid_path: LoadPolicy,
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelcatConfig {
    #[serde(default)]
    pub scheme: PathScheme,

    #[serde(default)]
    pub load: LoadConfig,
}

impl RelcatConfig {
    /// Load from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load from a specific path; a missing file yields defaults
    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config: {}", config_path.display()))
    }

    /// Parse and validate YAML content
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml_ng::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.scheme.architectures.is_empty() {
            bail!("scheme.architectures must list at least one architecture");
        }
        if let Some(blank) = self.scheme.architectures.iter().find(|a| a.trim().is_empty()) {
            bail!("scheme.architectures contains an empty entry: {blank:?}");
        }
        Ok(())
    }

    /// `<config dir>/config.yaml`
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = directories::ProjectDirs::from("io", "relcat", "relcat")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .or_else(|| dirs::config_dir().map(|d| d.join("relcat")))
            .context("Could not determine config directory")?;
        Ok(config_dir.join(CONFIG_FILE_NAME))
    }
}
