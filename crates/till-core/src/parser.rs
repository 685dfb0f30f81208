//! # Report Parser
//!
//! Runs the whole pipeline over one report.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  text ──► split preamble ──► classify ──► detect layout                 │
//! │              │                                 │                        │
//! │              ▼                  ┌──────────────┴──────────────┐         │
//! │         ReportHeader            ▼                             ▼         │
//! │                          single-line                    parallel runs   │
//! │                          tag_single_line                segment         │
//! │                          (one block)                    align_block ×N  │
//! │                                 └──────────────┬──────────────┘         │
//! │                                                ▼                        │
//! │                            SectionAssigner::assign_block (per block)    │
//! │                                                ▼                        │
//! │                                 merge_block ──► SectionMap              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each call owns all of its intermediate state; parsers can be shared
//! freely between threads.

use serde::Serialize;
use tracing::{debug, info_span};

use crate::align::{align_block, tag_single_line};
use crate::assign::SectionAssigner;
use crate::classify::{classify_lines, normalize};
use crate::config::ParserConfig;
use crate::error::ReportResult;
use crate::header::ReportHeader;
use crate::merge::merge_block;
use crate::segment::segment;
use crate::types::{ClassifiedLine, Layout, SectionMap, Token};

/// Everything recovered from one report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedReport {
    pub header: ReportHeader,
    /// `None` when the report had no lines after the preamble.
    pub layout: Option<Layout>,
    pub sections: SectionMap,
}

/// Report parser holding a validated [`ParserConfig`].
#[derive(Debug, Clone)]
pub struct ReportParser {
    config: ParserConfig,
}

impl ReportParser {
    /// Creates a parser, rejecting an unusable configuration.
    pub fn new(config: ParserConfig) -> ReportResult<Self> {
        config.validate()?;
        Ok(ReportParser { config })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses one report.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::{Money, ReportParser, ParserConfig, Section};
    ///
    /// let parser = ReportParser::new(ParserConfig::default()).unwrap();
    /// let report = parser.parse("Eat In\nCASH $821.95\nRounded ($0.35)").unwrap();
    ///
    /// assert_eq!(report.sections.amount(Section::EatIn, "rounded"), Some(Money::from_cents(-35)));
    /// ```
    pub fn parse(&self, text: &str) -> ReportResult<ParsedReport> {
        let _span = info_span!("parse_report", bytes = text.len()).entered();

        let numbered: Vec<(usize, &str)> = text.lines().enumerate().map(|(i, l)| (i + 1, l)).collect();
        let start = if self.config.skip_preamble {
            numbered
                .iter()
                .position(|(_, raw)| self.config.header_section(&normalize(raw)).is_some())
                .unwrap_or(0)
        } else {
            0
        };

        let preamble: Vec<&str> = numbered[..start].iter().map(|(_, raw)| *raw).collect();
        let header = ReportHeader::from_preamble(&preamble);
        debug!(preamble_lines = start, "split report preamble");

        let lines = classify_lines(numbered[start..].iter().copied())?;
        let layout = detect_layout(&lines);

        let sections = match layout {
            None => SectionMap::new(),
            Some(Layout::SingleLine) => self.parse_single_line(&lines)?,
            Some(Layout::ParallelRuns) => self.parse_parallel_runs(&lines)?,
        };

        debug!(?layout, sections = sections.len(), "report parsed");
        Ok(ParsedReport {
            header,
            layout,
            sections,
        })
    }

    fn parse_single_line(&self, lines: &[ClassifiedLine]) -> ReportResult<SectionMap> {
        let tagged = tag_single_line(lines, &self.config)?;
        let mut assigner = SectionAssigner::new(&self.config);
        let mut map = SectionMap::new();
        merge_block(&mut map, assigner.assign_block(&tagged)?);
        Ok(map)
    }

    fn parse_parallel_runs(&self, lines: &[ClassifiedLine]) -> ReportResult<SectionMap> {
        let mut assigner = SectionAssigner::new(&self.config);
        let mut map = SectionMap::new();

        for block in segment(lines)? {
            let tagged = align_block(&block, &self.config)?;
            merge_block(&mut map, assigner.assign_block(&tagged)?);
        }

        Ok(map)
    }
}

impl Default for ReportParser {
    fn default() -> Self {
        ReportParser {
            config: ParserConfig::default(),
        }
    }
}

/// Parses a report with the default keyword tables.
pub fn parse_report(text: &str) -> ReportResult<ParsedReport> {
    ReportParser::default().parse(text)
}

/// Single-line layout as soon as any line carries its own amount.
fn detect_layout(lines: &[ClassifiedLine]) -> Option<Layout> {
    if lines.is_empty() {
        return None;
    }

    let single = lines
        .iter()
        .any(|l| matches!(l.token, Token::LabeledAmount { .. }));
    Some(if single {
        Layout::SingleLine
    } else {
        Layout::ParallelRuns
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use crate::money::Money;
    use crate::types::Section;

    const SINGLE_LINE: &str = "Eat In
CASH $821.95
DEBIT $1,899.11
Rounded ($0.35)
Rounded $0.45
Sales $3,326.02
- Tax $2,943.69
Net $2,943.69
Delivery
DOORDASH $181.96
Sales $586.04
- Tax $518.58
Net $518.58
HST 5% $172.87
Total Taxes $449.79";

    const PARALLEL_WITH_PREAMBLE: &str = "4
Clearview POS Sales By Order Type Report
Intercity Mall, Thunder Bay, Ont.
Requested by DHRUVI
Run on 05-24-2024 At 20:56:43
During Shift: 1
For the day of 05-24-2024
# of Checks
248
Eat In
CASH
DEBIT
VISA
MASTERCARD
AMEX
GIVEX
Rounded
Rounded
Sales
- Tax
Net
$881.90
$1,711.19
$323.32
$155.18
$15.53
($23.91)
($0.45)
$0.39
$3,063.15
$2,711.18
$2,711.18
Delivery
UBER EATS
SKIP DISHES
Sales
- Tax
Net
$191.19
$385.00
$576.19
$509.86
$509.86
HST 5%
HST 8%
$161.05
$257.25
Total Taxes
Gross Sales
- Tax
Net
$418.30
$3,639.34
$3,221.04
$3,221.04";

    fn cents(c: i64) -> Option<Money> {
        Some(Money::from_cents(c))
    }

    #[test]
    fn test_single_line_scenario() {
        let report = parse_report(SINGLE_LINE).unwrap();
        let map = &report.sections;

        assert_eq!(report.layout, Some(Layout::SingleLine));
        assert_eq!(map.sections(), vec![Section::EatIn, Section::Delivery, Section::End]);

        assert_eq!(
            map.display_order(Section::EatIn),
            vec!["cash", "debit", "rounded", "rounded2", "sales", "- tax", "net"]
        );
        assert_eq!(map.amount(Section::EatIn, "cash"), cents(82195));
        assert_eq!(map.amount(Section::EatIn, "debit"), cents(189911));
        assert_eq!(map.amount(Section::EatIn, "rounded"), cents(-35));
        assert_eq!(map.amount(Section::EatIn, "rounded2"), cents(45));
        assert_eq!(map.amount(Section::EatIn, "sales"), cents(332602));
        assert_eq!(map.amount(Section::EatIn, "- tax"), cents(294369));
        assert_eq!(map.amount(Section::EatIn, "net"), cents(294369));

        assert_eq!(
            map.display_order(Section::Delivery),
            vec!["doordash", "sales", "- tax", "net"]
        );
        assert_eq!(map.amount(Section::Delivery, "doordash"), cents(18196));
        assert_eq!(map.amount(Section::Delivery, "net"), cents(51858));

        assert_eq!(map.display_order(Section::End), vec!["hst 5%", "total taxes"]);
        assert_eq!(map.amount(Section::End, "hst 5%"), cents(17287));
        assert_eq!(map.amount(Section::End, "total taxes"), cents(44979));
    }

    #[test]
    fn test_parallel_runs_with_preamble() {
        let report = parse_report(PARALLEL_WITH_PREAMBLE).unwrap();
        let map = &report.sections;

        assert_eq!(report.layout, Some(Layout::ParallelRuns));
        assert_eq!(report.header.check_count, Some(248));
        assert_eq!(report.header.requested_by.as_deref(), Some("DHRUVI"));

        assert_eq!(map.amount(Section::EatIn, "givex"), cents(-2391));
        assert_eq!(map.amount(Section::EatIn, "rounded"), cents(-45));
        assert_eq!(map.amount(Section::EatIn, "rounded2"), cents(39));
        assert_eq!(map.amount(Section::EatIn, "net"), cents(271118));

        assert_eq!(
            map.display_order(Section::Delivery),
            vec!["uber eats", "skip dishes", "sales", "- tax", "net"]
        );
        assert_eq!(map.amount(Section::Delivery, "skip dishes"), cents(38500));

        assert_eq!(
            map.display_order(Section::End),
            vec!["hst 5%", "hst 8%", "total taxes", "gross sales", "- tax", "net"]
        );
        assert_eq!(map.amount(Section::End, "hst 8%"), cents(25725));
        assert_eq!(map.amount(Section::End, "total taxes"), cents(41830));
        assert_eq!(map.amount(Section::End, "net"), cents(322104));
    }

    #[test]
    fn test_parallel_runs_match_single_line() {
        let parallel = "Eat In\nCASH\nRounded\nRounded\n$821.95\n($0.35)\n$0.45\nHST 5%\n$172.87";
        let single = "Eat In\nCASH $821.95\nRounded ($0.35)\nRounded $0.45\nHST 5% $172.87";

        assert_eq!(
            parse_report(parallel).unwrap().sections,
            parse_report(single).unwrap().sections
        );
    }

    #[test]
    fn test_misaligned_block() {
        let text = "Eat In\nCASH\nDEBIT\n$821.95";
        let err = parse_report(text).unwrap_err();
        assert_eq!(
            err,
            ReportError::Alignment {
                block: 1,
                line: 1,
                labels: 3,
                headers: 1,
                amounts: 1,
            }
        );
    }

    #[test]
    fn test_no_header() {
        let err = parse_report("CASH $821.95").unwrap_err();
        assert!(matches!(err, ReportError::UnassignedSection { line: 1, .. }));
    }

    #[test]
    fn test_leading_amount_is_rejected() {
        let err = parse_report("$5.00\nCASH\n$1.00").unwrap_err();
        assert!(matches!(err, ReportError::Alignment { labels: 0, amounts: 1, .. }));
    }

    #[test]
    fn test_empty_input() {
        let report = parse_report("\n\n").unwrap();
        assert!(report.sections.is_empty());
        assert_eq!(report.layout, None);
    }

    #[test]
    fn test_mixed_layout() {
        let err = parse_report("Eat In\nCASH $821.95\n$1.00").unwrap_err();
        assert!(matches!(err, ReportError::MixedLayout { line: 3, .. }));
    }

    #[test]
    fn test_malformed_amount_reports_source_line() {
        let err = parse_report("Report\nEat In\nCASH $82x.95").unwrap_err();
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_oversized_amounts_are_rejected() {
        let err = parse_report("Eat In\nA $90,000,000,000,000,000.00\nB $90,000,000,000,000,000.00")
            .unwrap_err();
        assert!(matches!(err, ReportError::MalformedLine { line: 2, .. }));
    }

    #[test]
    fn test_minus_sign_amounts_are_rejected() {
        let err = parse_report("Eat In\nRounded -$0.35").unwrap_err();
        assert!(matches!(err, ReportError::MalformedLine { line: 2, .. }));

        let err = parse_report("Eat In\nCASH\n-$0.35").unwrap_err();
        assert!(matches!(err, ReportError::MalformedLine { line: 3, .. }));
    }

    #[test]
    fn test_preamble_kept_when_disabled() {
        let parser = ReportParser::new(ParserConfig {
            skip_preamble: false,
            ..ParserConfig::default()
        })
        .unwrap();

        let err = parser.parse("Sales Report\nEat In\nCASH $1.00").unwrap_err();
        assert!(matches!(err, ReportError::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn test_header_alias() {
        let mut config = ParserConfig::default();
        config.headers.insert("dine in".to_string(), Section::EatIn);
        let parser = ReportParser::new(config).unwrap();

        let report = parser.parse("Dine In\nCASH $1.00").unwrap();
        assert_eq!(report.sections.amount(Section::EatIn, "cash"), cents(100));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = ParserConfig::default();
        config.trailers.push(String::new());
        assert!(matches!(ReportParser::new(config), Err(ReportError::Validation(_))));
    }
}
