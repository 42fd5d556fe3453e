//! Shop configuration: stored settings defaults and rate-book overrides.
//!
//! ```toml
//! [defaults]
//! crew_hourly_cost = 42
//! tax_rate = 8.25
//!
//! [rates]
//! walls = { roll = 180, spray = 250 }
//! prep = { caulk_rate = 100 }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use estimate_core::rates::RateBook;
use estimate_core::settings::SettingsOverrides;
use serde::Deserialize;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "COATWISE_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Stored defaults, the middle layer between a request and the built-ins
    pub defaults: SettingsOverrides,
    pub rates: RateBook,
}

impl Config {
    pub fn parse(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text).context("invalid configuration")?;
        config.rates.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("loading config {}", path.display()))
    }

    /// Load an explicitly named file, or the default location if it exists.
    ///
    /// A missing file is only an error when it was named explicitly.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => {
                tracing::debug!("no config file, using built-in defaults");
                Ok(Config::default())
            }
        }
    }
}

/// `<OS config dir>/coatwise/config.toml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("coatwise").join("config.toml"))
}
