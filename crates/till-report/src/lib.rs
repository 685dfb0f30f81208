//! # till-report
//!
//! Command-line front end for [`till_core`]: loads configuration, reads a
//! printed sales report and renders the reconstructed sections.
//!
//! ```text
//! report.txt ──► ReportConfig ──► ReportParser ──► render ──► stdout
//!                (TOML + env)     (till-core)      (JSON / text)
//! ```

pub mod config;
pub mod error;
pub mod render;

pub use config::{OutputFormat, OutputSettings, ReportConfig};
pub use error::{CliError, CliResult};
