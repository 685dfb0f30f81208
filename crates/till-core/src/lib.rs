//! # till-core: Sales Report Reconstruction
//!
//! Rebuilds per-section line items from the plaintext "sales by order type"
//! report a point-of-sale terminal prints at close-out.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Till Report Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                till-report (binary)                             │   │
//! │  │    read file ──► load config ──► parse ──► print JSON / text    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   classify ──► segment ──► align ──► assign ──► merge           │   │
//! │  │                                                                 │   │
//! │  │   money · types · header · summary · config · validation        │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO ENVIRONMENT • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`classify`] - Line Classifier (label / amount / labeled amount)
//! - [`segment`] - Block Segmenter for the parallel-run layout
//! - [`align`] - Label-Value Aligner, both layouts into tagged lines
//! - [`assign`] - Section Assigner (headers, synthesized `end`)
//! - [`merge`] - Merger with duplicate-label renaming
//! - [`parser`] - The whole pipeline
//! - [`header`] - Report preamble metadata
//! - [`summary`] - Close-out sheet figures
//! - [`money`] - Integer-cents `Money`
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::{parse_report, Money, Section};
//!
//! let report = parse_report("Eat In\nRounded ($0.35)\nRounded $0.45").unwrap();
//! let eat_in = report.sections.get(Section::EatIn).unwrap();
//!
//! assert_eq!(eat_in.get("rounded"), Some(Money::from_cents(-35)));
//! assert_eq!(eat_in.get("rounded2"), Some(Money::from_cents(45)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod align;
pub mod assign;
pub mod classify;
pub mod config;
pub mod error;
pub mod header;
pub mod merge;
pub mod money;
pub mod parser;
pub mod segment;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::ParserConfig;
pub use error::{ReportError, ReportResult, ValidationError};
pub use header::ReportHeader;
pub use money::Money;
pub use parser::{parse_report, ParsedReport, ReportParser};
pub use summary::{DailySummary, ManualEntries};
pub use types::*;
