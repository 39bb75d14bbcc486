//! Layered application configuration.
//!
//! Values are resolved from built-in defaults, then an optional JSON file in
//! the user's config directory, then `MONOLEDGER_*` environment variables.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Directory under the platform config dir holding `config.json`.
pub const CONFIG_DIR: &str = "monoledger";
const CONFIG_FILE: &str = "config.json";
const ENV_PREFIX: &str = "MONOLEDGER";

/// Money amounts and limits used by the transaction engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Cash every player starts with.
    pub starting_cash: i64,
    /// Credit for passing Go.
    pub pass_go: i64,
    /// Credit for landing exactly on Go. Set independently of `pass_go`.
    pub land_go: i64,
    /// Fare for a single railroad; doubles per additional railroad owned.
    pub transit_base_fare: i64,
    /// Dice multiplier for a utility bill.
    pub utility_multiplier: i64,
    /// Dice multiplier when the owner holds every utility.
    pub utility_monopoly_multiplier: i64,
    /// Highest house count; the top tier is a hotel.
    pub max_houses: u8,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            starting_cash: 2000,
            pass_go: 200,
            land_go: 400,
            transit_base_fare: 25,
            utility_multiplier: 4,
            utility_monopoly_multiplier: 10,
            max_houses: 5,
        }
    }
}

/// Top-level configuration for a ledger session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// CSV file holding the property catalog.
    pub catalog_path: PathBuf,
    /// Directory receiving the session log file.
    pub log_dir: PathBuf,
    /// Game economics.
    pub rules: Rules,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("Properties.csv"),
            log_dir: PathBuf::from("logs"),
            rules: Rules::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file location.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load configuration layering `path` (if present) and the environment over defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let defaults =
            Config::try_from(&AppConfig::default()).context("failed to encode config defaults")?;

        let settings = Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).format(FileFormat::Json).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("failed to parse config {}", path.display()))
    }
}

/// Location of the user's config file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

/// Write a default config file if none exists yet.
pub fn ensure_default_config() -> Result<()> {
    ensure_config_at(default_config_path())
}

/// Write default settings to `path` unless the file already exists.
pub fn ensure_config_at(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }

    let serialized = serde_json::to_string_pretty(&AppConfig::default())
        .context("failed to serialize default config")?;
    fs::write(path, serialized)
        .with_context(|| format!("failed to write config {}", path.display()))?;
    info!(path = %path.display(), "Default config written");
    Ok(())
}
