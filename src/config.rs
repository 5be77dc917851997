//! Application configuration loaded from YAML

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::countries::{CountrySource, FlagFeed, StaticCountries, WithFallback, COUNTRIES_NOW_URL};
use crate::report::NumberLocale;
use crate::simulator::DEFAULT_MAX_PERIODS;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub countries: CountriesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_max_periods")]
    pub max_periods: u32,
}

fn default_max_periods() -> u32 {
    DEFAULT_MAX_PERIODS
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_periods: default_max_periods(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub locale: NumberLocale,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountriesConfig {
    /// Flag feed URL or file path. `null` uses the built-in list only; the
    /// built-in list also stands in when the feed cannot be loaded.
    #[serde(default = "default_feed")]
    pub feed: Option<String>,
}

fn default_feed() -> Option<String> {
    Some(COUNTRIES_NOW_URL.to_string())
}

impl Default for CountriesConfig {
    fn default() -> Self {
        Self {
            feed: default_feed(),
        }
    }
}

impl CountriesConfig {
    pub fn source(&self) -> Box<dyn CountrySource + Send + Sync> {
        match &self.feed {
            Some(location) => Box::new(WithFallback::new(
                FlagFeed::from_location(location),
                StaticCountries,
            )),
            None => Box::new(StaticCountries),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_yaml(path),
            None => Ok(Self::default()),
        }
    }
}
