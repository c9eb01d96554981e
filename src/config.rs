// src/config.rs - Host configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Main configuration struct for the spooler host.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub spool: SpoolConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spool: SpoolConfig::default(),
        }
    }
}

/// Spooler configuration: where copies land and how fast they are produced.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpoolConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_copy_interval_ms")]
    pub copy_interval_ms: u64,
    #[serde(default = "default_status_buffer")]
    pub status_buffer: usize,
}

impl Default for SpoolConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            copy_interval_ms: default_copy_interval_ms(),
            status_buffer: default_status_buffer(),
        }
    }
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_copy_interval_ms() -> u64 {
    1000
}

fn default_status_buffer() -> usize {
    16
}

pub fn load_config(path: &str) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    Ok(config)
}
