//! Configuration file support for Jellypack.
//!
//! Settings live in `.jellypack/config.toml` inside the working tree and
//! override descriptor defaults. CLI flags override the config file in turn.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::descriptor::BuildType;

/// Jellypack configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build settings
    pub build: BuildConfig,
}

/// Build section of the configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Build type override (debug, release, relwithdebinfo)
    pub build_type: Option<BuildType>,

    /// Build a shared library instead of a static one
    pub shared: Option<bool>,

    /// Parallel job count for the build step
    pub jobs: Option<usize>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing
    /// or unparsable.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }
}

/// Path of the project-local config file under a working tree root.
pub fn config_path(root: &Path) -> std::path::PathBuf {
    root.join(".jellypack").join("config.toml")
}
