//! Configuration management with environment variable support.
//!
//! This module provides [`Config`] for loading and validating filex CLI
//! settings from JSON files and environment variables.
//!
//! ## Environment Variables
//!
//! - `FILEX_ALGORITHM`: Override the default hash algorithm (md5, sha256, sha512)
//! - `FILEX_TEMP_DIR`: Override the temporary-file directory
//! - `FILEX_CONFIG`: Override config file path

use crate::hash::HashAlgorithm;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Environment variable names for configuration overrides
pub const ENV_ALGORITHM: &str = "FILEX_ALGORITHM";
pub const ENV_TEMP_DIR: &str = "FILEX_TEMP_DIR";
pub const ENV_CONFIG_PATH: &str = "FILEX_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Algorithm used when a command does not name one explicitly
    pub default_algorithm: HashAlgorithm,
    /// Optional override for the temporary-file directory
    #[serde(default)]
    pub temp_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_algorithm: HashAlgorithm::Sha256,
            temp_dir: None,
        }
    }
}

impl Config {
    /// Load config from file path
    pub fn load(path: &str) -> Result<Self> {
        let s =
            fs::read_to_string(path).with_context(|| format!("reading config file {}", path))?;
        let mut config: Config = serde_json::from_str(&s)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load config with environment variable overrides
    /// Priority: ENV vars > config file > defaults
    pub fn load_with_env(path: Option<&str>) -> Result<Self> {
        // Check for config path from environment
        let config_path = path
            .map(String::from)
            .or_else(|| env::var(ENV_CONFIG_PATH).ok());

        let mut config = match config_path {
            Some(ref p) if Path::new(p).exists() => {
                info!(path = p, "loading config from file");
                let s = fs::read_to_string(p)
                    .with_context(|| format!("reading config file {}", p))?;
                serde_json::from_str(&s)?
            }
            _ => {
                debug!("using default configuration");
                Config::default()
            }
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides to config
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(algorithm) = env::var(ENV_ALGORITHM) {
            debug!(algorithm = %algorithm, "overriding default_algorithm from environment");
            self.default_algorithm = match algorithm.to_lowercase().as_str() {
                "md5" => HashAlgorithm::Md5,
                "sha256" => HashAlgorithm::Sha256,
                "sha512" => HashAlgorithm::Sha512,
                other => anyhow::bail!("unknown hash algorithm in {}: {}", ENV_ALGORITHM, other),
            };
        }

        if let Ok(temp_dir) = env::var(ENV_TEMP_DIR) {
            debug!(temp_dir = %temp_dir, "overriding temp_dir from environment");
            self.temp_dir = Some(temp_dir);
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.default_algorithm == HashAlgorithm::None {
            anyhow::bail!("default_algorithm cannot be 'none'");
        }

        if let Some(dir) = &self.temp_dir {
            if dir.trim().is_empty() {
                anyhow::bail!("temp_dir cannot be empty when set");
            }
            if !Path::new(dir).is_dir() {
                warn!(path = %dir, "configured temp_dir does not exist");
            }
        }

        Ok(())
    }

    /// Create a new config with explicit values
    pub fn new(default_algorithm: HashAlgorithm, temp_dir: Option<String>) -> Self {
        Self {
            default_algorithm,
            temp_dir,
        }
    }
}
