//! # Validation Module
//!
//! Checks applied to parser keywords before any report is read.
//!
//! ## Why Validate Keywords?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Report lines are normalized before matching:                           │
//! │                                                                         │
//! │    "  Eat   In " ──► "eat in"                                           │
//! │                                                                         │
//! │  A configured keyword "Eat In" could therefore never match, and a       │
//! │  keyword "$" would turn every amount into a header. Both are rejected   │
//! │  up front instead of silently producing an empty report.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::classify::normalize;
use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates one header or trailer keyword.
///
/// ## Rules
/// - Must not be empty
/// - Must already be normalized (lowercase, trimmed, single spaces)
/// - Must not contain the `$` currency marker
///
/// ## Example
/// ```rust
/// use till_core::validation::validate_keyword;
///
/// assert!(validate_keyword("headers", "eat in").is_ok());
/// assert!(validate_keyword("headers", "").is_err());
/// assert!(validate_keyword("headers", "Eat In").is_err());
/// ```
pub fn validate_keyword(field: &str, keyword: &str) -> ValidationResult<()> {
    if keyword.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if keyword.contains('$') {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("'{}' contains the currency marker", keyword),
        });
    }

    if normalize(keyword) != keyword {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("'{}' must be lowercase with single spaces", keyword),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_keyword() {
        assert!(validate_keyword("headers", "eat in").is_ok());
        assert!(validate_keyword("trailers", "hst 5%").is_ok());

        assert!(validate_keyword("headers", "").is_err());
        assert!(validate_keyword("headers", "   ").is_err());
        assert!(validate_keyword("headers", "eat  in").is_err());
        assert!(validate_keyword("headers", " eat in").is_err());
        assert!(validate_keyword("headers", "EAT IN").is_err());
        assert!(validate_keyword("trailers", "tax $").is_err());
    }

    #[test]
    fn test_error_names_field() {
        let err = validate_keyword("trailers", "").unwrap_err();
        assert_eq!(err.to_string(), "trailers is required");
    }
}
