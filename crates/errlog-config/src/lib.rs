use std::path::Path;

use errlog_core::{Severity, StatsOrder};
use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// TOML data model
// ---------------------------------------------------------------------------

/// Top-level TOML config file (`errlog.toml`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrlogConfig {
    /// Error-stat aggregation settings.
    #[serde(default)]
    pub stats: StatsConfig,
}

/// Settings for message normalization and the error-stat table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatsConfig {
    /// Token substituted for filenames (default: "{}").
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    /// Table row order (default: first-seen).
    #[serde(default)]
    pub order: StatsOrder,
    /// Skip records below this severity.
    #[serde(default)]
    pub min_level: Option<Severity>,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            order: StatsOrder::default(),
            min_level: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde defaults
// ---------------------------------------------------------------------------

fn default_placeholder() -> String {
    "{}".to_string()
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file.
pub fn load(path: &Path) -> Result<ErrlogConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

/// Load `path` if given, otherwise fall back to defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<ErrlogConfig> {
    match path {
        Some(p) => load(p),
        None => Ok(ErrlogConfig::default()),
    }
}

/// Parse TOML string into an ErrlogConfig.
pub fn parse(toml_str: &str) -> Result<ErrlogConfig> {
    let config: ErrlogConfig = toml::from_str(toml_str)?;
    validate_stats(&config.stats)?;
    Ok(config)
}

fn validate_stats(stats: &StatsConfig) -> Result<()> {
    let p = &stats.placeholder;
    if p.is_empty() {
        return Err(ConfigError::Validation(
            "placeholder must not be empty".into(),
        ));
    }
    // Anything the filename pattern could match would break re-normalization.
    if p
        .chars()
        .any(|c| c == '/' || c == '"' || c == '\'' || c.is_whitespace())
    {
        return Err(ConfigError::Validation(format!(
            "placeholder '{}' must not contain '/', quotes or whitespace",
            p
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI merge
// ---------------------------------------------------------------------------

/// CLI override values (None = use config value).
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub placeholder: Option<String>,
    pub order: Option<StatsOrder>,
    pub min_level: Option<Severity>,
}

/// Apply CLI overrides on top of the config file values.
pub fn merge_with_cli(stats: &StatsConfig, cli: &CliOverrides) -> Result<StatsConfig> {
    let merged = StatsConfig {
        placeholder: cli
            .placeholder
            .clone()
            .unwrap_or_else(|| stats.placeholder.clone()),
        order: cli.order.unwrap_or(stats.order),
        min_level: cli.min_level.or(stats.min_level),
    };
    validate_stats(&merged)?;
    Ok(merged)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
