// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conductor configuration stored as TOML

use anyhow::{Context, Result};
use directories::ProjectDirs;
use dots_core::board::{Board, DEFAULT_BOARD_SIZE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConductorConfig {
    /// Dots per side for newly created games
    #[serde(default = "default_board_size")]
    pub board_size: u8,
    /// Capacity of the event broadcast channel
    #[serde(default = "default_event_buffer_size")]
    pub event_buffer_size: usize,
    /// `tracing_subscriber::EnvFilter` directive used by the binaries
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Agents started with the conductor
    #[serde(default = "default_agents")]
    pub agents: Vec<String>,
}

fn default_board_size() -> u8 {
    DEFAULT_BOARD_SIZE
}

fn default_event_buffer_size() -> usize {
    100
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_agents() -> Vec<String> {
    vec!["alice".to_string(), "bob".to_string()]
}

impl Default for ConductorConfig {
    fn default() -> Self {
        Self {
            board_size: default_board_size(),
            event_buffer_size: default_event_buffer_size(),
            log_filter: default_log_filter(),
            agents: default_agents(),
        }
    }
}

impl ConductorConfig {
    /// Reject values the conductor cannot run with
    pub fn validate(&self) -> Result<()> {
        if !Board::is_supported_size(self.board_size) {
            anyhow::bail!("Unsupported board size: {}", self.board_size);
        }
        if self.event_buffer_size == 0 {
            anyhow::bail!("event_buffer_size must be at least 1");
        }
        for (i, name) in self.agents.iter().enumerate() {
            if name.trim().is_empty() {
                anyhow::bail!("Agent names must not be empty");
            }
            if self.agents[..i].contains(name) {
                anyhow::bail!("Duplicate agent name: {}", name);
            }
        }
        Ok(())
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("io", "dots-and-boxes", "dots-and-boxes")
        .context("Failed to determine config directory")?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Load the config from the default location, writing defaults if it is missing
pub fn load_config() -> Result<ConductorConfig> {
    let config_path = get_config_path().context("Failed to determine config path")?;
    load_config_from(&config_path)
}

/// Load the config from `config_path`, writing defaults if it is missing
pub fn load_config_from(config_path: &Path) -> Result<ConductorConfig> {
    if !config_path.exists() {
        tracing::info!("Config file not found, creating default at: {}", config_path.display());

        let default_config = ConductorConfig::default();
        save_config_to(&default_config, config_path)?;
        return Ok(default_config);
    }

    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

    let config = toml::from_str::<ConductorConfig>(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config file: {}", config_path.display()))?;

    Ok(config)
}

pub fn save_config(config: &ConductorConfig) -> Result<()> {
    let config_path = get_config_path().context("Failed to determine config path")?;
    save_config_to(config, &config_path)
}

pub fn save_config_to(config: &ConductorConfig, config_path: &Path) -> Result<()> {
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let toml_content = toml::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(config_path, toml_content)
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    tracing::info!("Saved config to: {}", config_path.display());
    Ok(())
}
