//! Configuration module for sdaf-hosts
//!
//! Handles loading and merging configuration from multiple sources:
//! - Default values
//! - System configuration (/etc/sdaf-hosts/sdaf-hosts.toml)
//! - User configuration (~/.sdaf-hosts.toml)
//! - Project configuration (./sdaf-hosts.toml)
//! - Environment variables

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default settings
    pub defaults: Defaults,

    /// Colors and output settings
    pub colors: ColorsConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Default configuration values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Variables file used when none is given on the command line
    pub vars_file: Option<PathBuf>,

    /// Host to render the hosts block for
    pub host: Option<String>,

    /// Deployment stage for `validate-stage`
    pub stage: Option<String>,
}

/// Colors configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    /// Enable colored output
    pub enabled: bool,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log filter used when neither `-v` nor `RUST_LOG` is given
    /// (e.g. `info` or `sdaf_hosts=debug`)
    pub level: Option<String>,
}

impl Config {
    /// Load configuration from all sources
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Config::default();

        for path in Self::get_config_paths(config_path) {
            if path.exists() {
                config = config.merge_from_file(&path)?;
            }
        }

        config.apply_env_overrides();

        Ok(config)
    }

    /// Get the list of configuration file paths to check
    fn get_config_paths(explicit_path: Option<&PathBuf>) -> Vec<PathBuf> {
        // Explicit path takes priority
        if let Some(path) = explicit_path {
            return vec![path.clone()];
        }

        let mut paths = vec![PathBuf::from("/etc/sdaf-hosts/sdaf-hosts.toml")];

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".sdaf-hosts.toml"));
        }

        paths.push(PathBuf::from("sdaf-hosts.toml"));
        paths
    }

    /// Merge configuration from a file
    fn merge_from_file(&self, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let file_config: Config = match extension {
            "yml" | "yaml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            "toml" => toml::from_str(&content)?,
            _ => toml::from_str(&content)
                .or_else(|_| serde_yaml::from_str(&content))
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?,
        };

        Ok(self.merge(file_config))
    }

    /// Merge another config into this one; values set in `other` win
    fn merge(&self, other: Config) -> Config {
        Config {
            defaults: Defaults {
                vars_file: other
                    .defaults
                    .vars_file
                    .or_else(|| self.defaults.vars_file.clone()),
                host: other.defaults.host.or_else(|| self.defaults.host.clone()),
                stage: other.defaults.stage.or_else(|| self.defaults.stage.clone()),
            },
            colors: other.colors,
            logging: LoggingConfig {
                level: other.logging.level.or_else(|| self.logging.level.clone()),
            },
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // SDAF_HOSTS_VARS
        if let Ok(path) = std::env::var("SDAF_HOSTS_VARS") {
            self.defaults.vars_file = Some(PathBuf::from(path));
        }

        // SDAF_HOSTS_HOST
        if let Ok(host) = std::env::var("SDAF_HOSTS_HOST") {
            self.defaults.host = Some(host);
        }

        // SDAF_HOSTS_STAGE
        if let Ok(stage) = std::env::var("SDAF_HOSTS_STAGE") {
            self.defaults.stage = Some(stage);
        }

        // NO_COLOR
        if std::env::var("NO_COLOR").is_ok() || std::env::var("SDAF_HOSTS_NO_COLOR").is_ok() {
            self.colors.enabled = false;
        }

        // SDAF_HOSTS_LOG_LEVEL
        if let Ok(level) = std::env::var("SDAF_HOSTS_LOG_LEVEL") {
            self.logging.level = Some(level);
        }
    }
}
