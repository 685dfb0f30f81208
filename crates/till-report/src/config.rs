//! # Report Configuration
//!
//! Parser keyword tables plus output settings for the command-line tool.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority, applied by main)             │
//! │     --format text                                                      │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     TILL_OUTPUT_FORMAT=text                                            │
//! │     TILL_STRICT_HEADERS=true                                           │
//! │     TILL_SKIP_PREAMBLE=false                                           │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/report/till-report.toml (Linux)                          │
//! │     ~/Library/Application Support/com.till.report/till-report.toml     │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [parser]
//! strict_headers = false
//! trailers = ["hst 5%", "total taxes"]
//!
//! [parser.headers]
//! "eat in" = "eat in"
//! "dine in" = "eat in"
//! "delivery" = "delivery"
//! "take out" = "take out"
//!
//! [output]
//! format = "json"  # json | text
//! pretty = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use till_core::ParserConfig;
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

const CONFIG_FILE_NAME: &str = "till-report.toml";

// =============================================================================
// Output Format
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Section → ledger JSON object.
    #[default]
    Json,

    /// Human-readable listing with section totals.
    Text,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" | "plain" | "txt" => Ok(OutputFormat::Text),
            other => Err(CliError::InvalidConfig(format!(
                "Unknown output format: '{}'. Valid options: json, text",
                other
            ))),
        }
    }
}

// =============================================================================
// Output Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,

    /// Indent JSON output.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            format: OutputFormat::default(),
            pretty: default_true(),
        }
    }
}

// =============================================================================
// Main Report Configuration
// =============================================================================

/// Complete configuration for one `till-report` run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub parser: ParserConfig,

    #[serde(default)]
    pub output: OutputSettings,
}

impl ReportConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, else the platform config dir)
    /// 3. Environment variables
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file is not.
    pub fn load(config_path: Option<&Path>) -> CliResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<&Path>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load report config: {}. Using defaults.", e);
            Self::default()
        })
    }

    fn from_file(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading report config from file");
        let contents = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        self.parser.validate()?;
        Ok(())
    }

    /// Applies `TILL_*` overrides read through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(format) = lookup("TILL_OUTPUT_FORMAT") {
            match format.parse() {
                Ok(parsed) => {
                    debug!(format = %format, "Overriding output format from environment");
                    self.output.format = parsed;
                }
                Err(e) => warn!(error = %e, "Ignoring TILL_OUTPUT_FORMAT"),
            }
        }

        if let Some(strict) = lookup("TILL_STRICT_HEADERS") {
            match parse_flag(&strict) {
                Some(flag) => self.parser.strict_headers = flag,
                None => warn!(value = %strict, "Ignoring TILL_STRICT_HEADERS"),
            }
        }

        if let Some(skip) = lookup("TILL_SKIP_PREAMBLE") {
            match parse_flag(&skip) {
                Some(flag) => self.parser.skip_preamble = flag,
                None => warn!(value = %skip, "Ignoring TILL_SKIP_PREAMBLE"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "till", "report")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use till_core::Section;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("plain".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.pretty);
        assert!(config.parser.skip_preamble);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = ReportConfig::default();
        config.parser.headers.insert("dine in".into(), Section::EatIn);
        config.output.format = OutputFormat::Text;

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[parser"));
        assert!(toml_str.contains("[output]"));

        let back: ReportConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ReportConfig = toml::from_str("[output]\nformat = \"text\"\n").unwrap();
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.output.pretty);
        assert_eq!(config.parser, ParserConfig::default());
    }

    #[test]
    fn test_header_alias_from_toml() {
        let config: ReportConfig =
            toml::from_str("[parser.headers]\n\"dine in\" = \"eat in\"\n").unwrap();
        assert_eq!(config.parser.header_section("dine in"), Some(Section::EatIn));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ReportConfig::default();
        config.apply_overrides(env(&[
            ("TILL_OUTPUT_FORMAT", "text"),
            ("TILL_STRICT_HEADERS", "yes"),
            ("TILL_SKIP_PREAMBLE", "0"),
        ]));

        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.parser.strict_headers);
        assert!(!config.parser.skip_preamble);
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let mut config = ReportConfig::default();
        config.apply_overrides(env(&[
            ("TILL_OUTPUT_FORMAT", "xml"),
            ("TILL_STRICT_HEADERS", "maybe"),
        ]));
        assert_eq!(config, ReportConfig::default());
    }

    #[test]
    fn test_invalid_parser_config_rejected() {
        let mut config = ReportConfig::default();
        config.parser.headers.clear();
        assert!(config.validate().unwrap_err().is_config_error());
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let config = ReportConfig::load_or_default(Some(Path::new("/nonexistent/till-report.toml")));
        assert_eq!(config, ReportConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = ReportConfig::load(Some(Path::new("/nonexistent/till-report.toml"))).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
