//! # NetAddr Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module implements the configuration system for netaddr, handling
//! loading, merging and validation. It combines defaults, user settings, and
//! project-specific overrides.
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.netaddr.toml` in current directory or ancestors
//! 2. User-specific `config.toml` in the platform config directory
//!    (e.g. `~/.config/netaddr/config.toml` on Linux)
//! 3. Default values defined in the code
//!
//! ## Format
//!
//! ```toml
//! [endpoint]
//! port = 2466
//!
//! [discovery]
//! ipv4 = true
//! ipv6 = false
//! ```
//!
//! ## Examples
//!
//! ```rust,no_run
//! # fn run() -> netaddr::core::error::Result<()> {
//! let cfg = netaddr::core::config::load_config()?;
//! println!("default port: {}", cfg.endpoint.port);
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::{NetAddrError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Port used by `netaddr endpoint` when neither the CLI nor a config file sets one.
pub const DEFAULT_PORT: u16 = 2466;

const PROJECT_CONFIG_FILENAME: &str = ".netaddr.toml";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

/// Settings for endpoint construction (`netaddr endpoint`).
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EndpointConfig {
    /// Port used when `--port` is not given.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Which address families discovery keeps.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DiscoveryConfig {
    #[serde(default = "default_true")]
    pub ipv4: bool,
    #[serde(default = "default_true")]
    pub ipv6: bool,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            ipv4: true,
            ipv6: true,
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_true() -> bool {
    true
}

/// Partially specified configuration as read from one file. Missing keys stay
/// `None` so that merging can tell "unset" from "set to the default".
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    endpoint: FileEndpoint,
    #[serde(default)]
    discovery: FileDiscovery,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct FileEndpoint {
    port: Option<u16>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct FileDiscovery {
    ipv4: Option<bool>,
    ipv6: Option<bool>,
}

/// # Load Configuration (`load_config`)
///
/// Loads the user and project configuration files (if present), merges them
/// over the defaults and validates the result.
pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let merged_config = merge_configs(user_config, project_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<FileConfig>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "NetAddr", "netaddr") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<FileConfig>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!(
            "No project configuration file ({}) found in current directory or ancestors.",
            PROJECT_CONFIG_FILENAME
        );
        Ok(None)
    }
}

/// Looks for `.netaddr.toml` in `start` and its ancestors, stopping at the
/// first directory that contains `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Option<FileConfig>, project: Option<FileConfig>) -> Config {
    let user = user.unwrap_or_default();
    let project = project.unwrap_or_default();
    let defaults = Config::default();

    Config {
        endpoint: EndpointConfig {
            port: project
                .endpoint
                .port
                .or(user.endpoint.port)
                .unwrap_or(defaults.endpoint.port),
        },
        discovery: DiscoveryConfig {
            ipv4: project
                .discovery
                .ipv4
                .or(user.discovery.ipv4)
                .unwrap_or(defaults.discovery.ipv4),
            ipv6: project
                .discovery
                .ipv6
                .or(user.discovery.ipv6)
                .unwrap_or(defaults.discovery.ipv6),
        },
    }
}

fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating final configuration...");
    if !config.discovery.ipv4 && !config.discovery.ipv6 {
        return Err(anyhow!(NetAddrError::Config(
            "discovery.ipv4 and discovery.ipv6 cannot both be disabled.".to_string()
        )));
    }
    Ok(())
}
