//! # Parser Configuration
//!
//! Keyword tables and strictness switches for [`crate::parser::ReportParser`].
//!
//! This is plain data: loading it from a file or the environment is the
//! binary's job (`till-report`), so the core stays free of I/O.
//!
//! ## TOML Shape
//! ```toml
//! [parser]
//! skip_preamble = true
//! strict_headers = false
//! trailers = ["hst 5%", "total taxes"]
//!
//! [parser.headers]
//! "eat in" = "eat in"
//! "dine in" = "eat in"
//! "delivery" = "delivery"
//! "take out" = "take out"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ReportResult, ValidationError};
use crate::types::Section;
use crate::validation::validate_keyword;

/// Keyword tables and parse switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Header line → section it opens. Matched against the whole label.
    #[serde(default = "default_headers")]
    pub headers: BTreeMap<String, Section>,

    /// Any label containing one of these opens the `end` section (first time only).
    #[serde(default = "default_trailers")]
    pub trailers: Vec<String>,

    /// Drop everything before the first header line and read it as metadata.
    #[serde(default = "default_true")]
    pub skip_preamble: bool,

    /// Reject a header that reopens a section after another section followed it.
    #[serde(default)]
    pub strict_headers: bool,
}

fn default_headers() -> BTreeMap<String, Section> {
    [
        ("eat in", Section::EatIn),
        ("delivery", Section::Delivery),
        ("take out", Section::TakeOut),
    ]
    .into_iter()
    .map(|(keyword, section)| (keyword.to_string(), section))
    .collect()
}

fn default_trailers() -> Vec<String> {
    vec!["hst 5%".to_string(), "total taxes".to_string()]
}

fn default_true() -> bool {
    true
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            headers: default_headers(),
            trailers: default_trailers(),
            skip_preamble: default_true(),
            strict_headers: false,
        }
    }
}

impl ParserConfig {
    /// Returns the section opened by `label`, if it is a header keyword.
    pub fn header_section(&self, label: &str) -> Option<Section> {
        self.headers.get(label).copied()
    }

    /// Returns true if `label` contains a trailer keyword.
    pub fn is_trailer(&self, label: &str) -> bool {
        self.trailers.iter().any(|keyword| label.contains(keyword.as_str()))
    }

    /// Validates the keyword tables.
    ///
    /// ## Rules
    /// - At least one header keyword
    /// - Every keyword is normalized (lowercase, single spaces, trimmed)
    /// - No keyword contains the `$` currency marker
    /// - No header doubles as a trailer
    /// - Headers never map to the synthesized `end` section
    pub fn validate(&self) -> ReportResult<()> {
        if self.headers.is_empty() {
            return Err(ValidationError::Required {
                field: "headers".to_string(),
            }
            .into());
        }

        for (keyword, section) in &self.headers {
            validate_keyword("headers", keyword)?;
            if *section == Section::End {
                return Err(ValidationError::InvalidFormat {
                    field: "headers".to_string(),
                    reason: format!("'{}' cannot open the end section", keyword),
                }
                .into());
            }
        }

        for keyword in &self.trailers {
            validate_keyword("trailers", keyword)?;
            if self.headers.contains_key(keyword) {
                return Err(ValidationError::Duplicate {
                    field: "trailers".to_string(),
                    value: keyword.clone(),
                }
                .into());
            }
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;

    #[test]
    fn test_default_config() {
        let config = ParserConfig::default();
        assert_eq!(config.header_section("eat in"), Some(Section::EatIn));
        assert_eq!(config.header_section("take out"), Some(Section::TakeOut));
        assert_eq!(config.header_section("cash"), None);
        assert!(config.skip_preamble);
        assert!(!config.strict_headers);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_trailer_matches_by_containment() {
        let config = ParserConfig::default();
        assert!(config.is_trailer("hst 5%"));
        assert!(config.is_trailer("hst 5% on food"));
        assert!(config.is_trailer("total taxes"));
        assert!(!config.is_trailer("hst 8%"));
    }

    #[test]
    fn test_config_validation() {
        let mut config = ParserConfig::default();
        config.headers.clear();
        assert!(config.validate().is_err());

        let mut config = ParserConfig::default();
        config.headers.insert("Dine In".to_string(), Section::EatIn);
        assert!(config.validate().is_err());

        let mut config = ParserConfig::default();
        config.trailers.push("delivery".to_string());
        assert!(matches!(
            config.validate(),
            Err(ReportError::Validation(ValidationError::Duplicate { .. }))
        ));

        let mut config = ParserConfig::default();
        config.headers.insert("totals".to_string(), Section::End);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ParserConfig = serde_json::from_str(r#"{"strict_headers": true}"#).unwrap();
        assert!(config.strict_headers);
        assert_eq!(config.headers, default_headers());
        assert_eq!(config.trailers, default_trailers());
    }
}
