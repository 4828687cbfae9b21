use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::core::MatcherSettings;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub catalog: CatalogSettings,
    pub cache: CacheSettings,
    pub matching: MatchingSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Where the location catalog comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    /// Seed data compiled into the binary
    Embedded,
    /// JSON file on disk
    File,
    /// JSON document served over HTTP
    Http,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    pub source: CatalogSource,
    pub path: Option<String>,
    pub url: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub ttl_secs: u64,
    pub max_results: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    pub default_limit: usize,
    pub max_limit: usize,
    pub min_match_percentage: f64,
}

impl From<&MatchingSettings> for MatcherSettings {
    fn from(value: &MatchingSettings) -> Self {
        MatcherSettings {
            min_match_percentage: value.min_match_percentage,
            default_limit: value.default_limit,
            max_limit: value.max_limit,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub format: String,
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Built-in defaults
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with NOMAD__)
    pub fn load() -> Result<Self, ConfigError> {
        with_defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., NOMAD__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        with_defaults()?
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080_i64)?
        .set_default("catalog.source", "embedded")?
        .set_default("catalog.timeout_secs", 10_i64)?
        .set_default("cache.ttl_secs", 300_i64)?
        .set_default("cache.max_results", 1000_i64)?
        .set_default("matching.default_limit", 20_i64)?
        .set_default("matching.max_limit", 100_i64)?
        .set_default("matching.min_match_percentage", 0.0_f64)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "json")
}

fn environment() -> Environment {
    Environment::with_prefix("NOMAD")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
