//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── ReportError      - A report could not be reconstructed            │
//! │  └── ValidationError  - Parser configuration is unusable               │
//! │                                                                         │
//! │  till-report errors (binary crate)                                     │
//! │  └── CliError         - File, config and output failures               │
//! │                                                                         │
//! │  Flow: ValidationError → ReportError → CliError → exit code            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every parse error names the 1-based source line (or block) it came from
//! 3. Nothing is defaulted to zero: a bad amount is an error, never `$0.00`

use thiserror::Error;

use crate::types::Section;

// =============================================================================
// Report Error
// =============================================================================

/// Errors raised while turning report text into a [`crate::SectionMap`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// A line has a currency marker but no readable amount.
    ///
    /// ## When This Occurs
    /// - `cash $12.3x` (non-numeric remainder)
    /// - `cash $1.00 $2.00` (more than one marker)
    /// - `rounded ($0.35` (unbalanced parentheses)
    #[error("Line {line}: cannot read '{text}': {reason}")]
    MalformedLine {
        line: usize,
        text: String,
        reason: String,
    },

    /// A line item appeared before any section header opened a section.
    #[error("Line {line}: '{label}' appears before any section header")]
    UnassignedSection { line: usize, label: String },

    /// A block's labels and amounts do not pair up.
    ///
    /// ## Example
    /// ```text
    /// Block 2 (starting line 14)
    ///   labels:  delivery, uber eats, skip dishes   (3 labels, 1 header)
    ///   amounts: $191.19                            (1 amount, expected 2)
    ///      │
    ///      ▼
    /// Alignment { block: 2, line: 14, labels: 3, headers: 1, amounts: 1 }
    /// ```
    #[error(
        "Block {block} (line {line}): {labels} labels with {headers} section headers \
         need {} amounts, found {amounts}",
        .labels - .headers
    )]
    Alignment {
        block: usize,
        line: usize,
        labels: usize,
        headers: usize,
        amounts: usize,
    },

    /// A section header reopened a section out of document order.
    ///
    /// Only raised when `strict_headers` is enabled.
    #[error("Line {line}: section '{section}' was already closed by a later section")]
    DuplicateSectionHeader { line: usize, section: Section },

    /// The report mixes the single-line and parallel-run layouts.
    #[error("Line {line}: '{text}' does not fit the report layout")]
    MixedLayout { line: usize, text: String },

    /// A total does not fit in i64 cents.
    #[error("Total of {what} is too large to represent")]
    AmountOverflow { what: String },

    /// A figure required by the daily summary is not on the report.
    #[error("Report has no '{label}' line in section '{section}'")]
    MissingLineItem { section: Section, label: String },

    /// Configuration rejected before parsing.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl ReportError {
    /// Returns the source line the error points at, when there is one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ReportError::MalformedLine { line, .. }
            | ReportError::UnassignedSection { line, .. }
            | ReportError::Alignment { line, .. }
            | ReportError::DuplicateSectionHeader { line, .. }
            | ReportError::MixedLayout { line, .. } => Some(*line),
            ReportError::AmountOverflow { .. }
            | ReportError::MissingLineItem { .. }
            | ReportError::Validation(_) => None,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Parser configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g., keyword containing the currency marker).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., keyword listed as header and trailer).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with ReportError.
pub type ReportResult<T> = Result<T, ReportError>;

// =============================================================================
// Unit Tests
// =============================================================================
