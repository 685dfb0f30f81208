//! Output rendering for parsed reports and close-out summaries.

use std::fmt::Write;
use till_core::{DailySummary, Money, ParsedReport, ReportError};

use crate::config::{OutputFormat, OutputSettings};
use crate::error::CliResult;

const LABEL_WIDTH: usize = 28;

/// Renders the section map in the configured format.
pub fn render_report(report: &ParsedReport, output: &OutputSettings) -> CliResult<String> {
    match output.format {
        OutputFormat::Json => to_json(report, output.pretty),
        OutputFormat::Text => report_text(report),
    }
}

/// Renders the close-out figures in the configured format.
pub fn render_summary(summary: &DailySummary, output: &OutputSettings) -> CliResult<String> {
    match output.format {
        OutputFormat::Json => to_json(summary, output.pretty),
        OutputFormat::Text => summary_text(summary),
    }
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> CliResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn report_text(report: &ParsedReport) -> CliResult<String> {
    let mut out = String::new();

    if let Some(title) = &report.header.title {
        writeln!(out, "{}", title)?;
    }
    if let Some(date) = report.header.business_date {
        writeln!(out, "Business date: {}", date.format("%Y-%m-%d"))?;
    }
    if !report.header.is_empty() {
        writeln!(out)?;
    }

    for (section, ledger) in report.sections.iter() {
        writeln!(out, "[{}]", section)?;
        for item in ledger.items() {
            line(&mut out, &item.label, item.amount)?;
        }
        let total = ledger.total().ok_or_else(|| ReportError::AmountOverflow {
            what: format!("section '{}'", section),
        })?;
        line(&mut out, "Total", total)?;
        writeln!(out)?;
    }

    Ok(out)
}

fn summary_text(summary: &DailySummary) -> CliResult<String> {
    let mut out = String::new();

    writeln!(out, "[section a]")?;
    line(&mut out, "net sales", summary.net_sales)?;
    optional(&mut out, "fry loads", summary.fry_loads)?;
    line(&mut out, "gst & hst", summary.gst_hst)?;
    optional(&mut out, "manitoba pst", summary.manitoba_pst)?;
    line(&mut out, "Total A", summary.total_a)?;
    writeln!(out)?;

    writeln!(out, "[section b]")?;
    for (label, amount) in [
        ("cash float +/-", summary.cash_float_delta),
        ("aggregators", summary.aggregators),
        ("payouts", summary.payouts),
        ("gst on payouts", summary.gst_on_payouts),
        ("visa", summary.visa),
        ("mastercard", summary.mastercard),
        ("amex", summary.amex),
        ("debit", summary.debit),
        ("bank deposit", summary.bank_deposit),
        ("fry payments", summary.fry_payments),
        ("non-cash coupons", summary.non_cash),
        ("givex", summary.givex),
    ] {
        optional(&mut out, label, amount)?;
    }
    line(&mut out, "Total B", summary.total_b)?;
    writeln!(out)?;

    line(&mut out, "Cash difference", summary.cash_difference)?;
    Ok(out)
}

fn line(out: &mut String, label: &str, amount: Money) -> std::fmt::Result {
    writeln!(out, "  {:<width$}{:>14}", label, amount.to_report_string(), width = LABEL_WIDTH)
}

fn optional(out: &mut String, label: &str, amount: Option<Money>) -> std::fmt::Result {
    match amount {
        Some(amount) => line(out, label, amount),
        None => writeln!(out, "  {:<width$}{:>14}", label, "-", width = LABEL_WIDTH),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::{parse_report, ManualEntries};

    const REPORT: &str = "Eat In\nCASH $100.00\nVISA $50.00\nTotal Taxes $12.00\nNet $200.00";

    fn text() -> OutputSettings {
        OutputSettings {
            format: OutputFormat::Text,
            pretty: false,
        }
    }

    #[test]
    fn test_text_lists_sections_with_totals() {
        let report = parse_report(REPORT).unwrap();
        let out = render_report(&report, &text()).unwrap();

        assert!(out.contains("[eat in]"));
        assert!(out.contains("[end]"));
        assert!(out.contains("$150.00"));
        assert!(out.contains("$212.00"));
        let eat_in = out.find("[eat in]").unwrap();
        let end = out.find("[end]").unwrap();
        assert!(eat_in < end);
    }

    #[test]
    fn test_json_shape() {
        let report = parse_report(REPORT).unwrap();
        let settings = OutputSettings {
            format: OutputFormat::Json,
            pretty: false,
        };
        let out = render_report(&report, &settings).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["sections"]["eat in"]["values"]["cash"], 10000);
        assert_eq!(value["sections"]["end"]["display_order"][1], "net");
    }

    #[test]
    fn test_summary_text() {
        let report = parse_report(REPORT).unwrap();
        let summary = DailySummary::from_sections(&report.sections, &ManualEntries::default()).unwrap();
        let out = render_summary(&summary, &text()).unwrap();

        assert!(out.contains("Total A"));
        assert!(out.contains("$212.00"));
        assert!(out.contains("Cash difference"));
        assert!(out.contains("($62.00)"));
    }
}
