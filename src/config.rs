//! Configuration loading from TOML.
//!
//! Reads `bet_tracker.toml` (or the file named by `BET_TRACKER_CONFIG`)
//! and deserializes into strongly-typed structs. Every section and field
//! has a default, so a missing file or a partial file is fine.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::analytics::Category;
use crate::types::Odds;

/// Default config file path, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "bet_tracker.toml";

/// Environment variable that overrides the config file path.
pub const CONFIG_PATH_ENV: &str = "BET_TRACKER_CONFIG";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub form: FormConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// Suggestion lists and defaults for the bet entry form.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FormConfig {
    pub sports: Vec<String>,
    pub leagues: Vec<String>,
    pub bet_types: Vec<String>,
    pub default_amount: String,
    /// Signed, e.g. `+110`.
    pub default_odds: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            sports: owned(&["Football", "Basketball", "Hockey", "Baseball", "Soccer", "MMA", "Tennis"]),
            leagues: owned(&["NFL", "NBA", "NHL", "MLB", "EPL", "UFC", "ATP"]),
            bet_types: owned(&[
                "Moneyline", "Spread", "Over/Under", "Prop Bet", "Parlay", "Futures", "Live Bet",
            ]),
            default_amount: "50".to_string(),
            default_odds: "+110".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DisplayConfig {
    pub currency_symbol: String,
    /// `sport`, `league` or `bet_type`.
    pub group_by: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            group_by: "sport".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "bet_tracker=warn".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::from_toml(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            info!(path, "No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Config path from `BET_TRACKER_CONFIG`, or the default file name.
    pub fn resolve_path() -> String {
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string())
    }

    /// Reject settings the form or analytics screen cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.form.sports.is_empty() {
            bail!("form.sports must list at least one sport");
        }
        if self.form.leagues.is_empty() {
            bail!("form.leagues must list at least one league");
        }
        if self.form.bet_types.is_empty() {
            bail!("form.bet_types must list at least one bet type");
        }
        self.form
            .default_odds
            .parse::<Odds>()
            .with_context(|| format!("form.default_odds is invalid: {}", self.form.default_odds))?;
        self.group_by()?;
        Ok(())
    }

    /// The configured profit grouping.
    pub fn group_by(&self) -> Result<Category> {
        self.display
            .group_by
            .parse::<Category>()
            .with_context(|| format!("display.group_by is invalid: {}", self.display.group_by))
    }
}
