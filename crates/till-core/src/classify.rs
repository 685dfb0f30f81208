//! # Line Classifier
//!
//! Turns one raw report line into a [`Token`].
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  raw line              normalized           token                       │
//! │  ───────────────────   ─────────────────    ──────────────────────────  │
//! │  "Eat In"              "eat in"             Label("eat in")             │
//! │  "$1,899.11"           "$1,899.11"          Amount(189911)              │
//! │  "($0.35)"             "($0.35)"            Amount(-35)                 │
//! │  "CASH $821.95"        "cash $821.95"       LabeledAmount(cash, 82195)  │
//! │  "Rounded ($0.35)"     "rounded ($0.35)"    LabeledAmount(rounded, -35) │
//! │  "cash $12.3x"         -                    MalformedLine               │
//! │  "rounded -$0.35"      -                    MalformedLine               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::trace;

use crate::error::{ReportError, ReportResult};
use crate::money::Money;
use crate::types::{ClassifiedLine, Token};

/// The only currency marker the terminal prints.
pub const CURRENCY_MARKER: char = '$';

/// Lowercases, trims and collapses internal whitespace runs to one space.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Classifies a single non-blank line.
///
/// `line` is the 1-based line number used in error messages.
///
/// ## Example
/// ```rust
/// use till_core::classify::classify_line;
/// use till_core::{Money, Token};
///
/// let token = classify_line(3, "Rounded ($0.35)").unwrap();
/// assert_eq!(
///     token,
///     Token::LabeledAmount { label: "rounded".into(), amount: Money::from_cents(-35) }
/// );
/// ```
pub fn classify_line(line: usize, raw: &str) -> ReportResult<Token> {
    let text = normalize(raw);
    let malformed = |reason: &str| ReportError::MalformedLine {
        line,
        text: raw.trim().to_string(),
        reason: reason.to_string(),
    };

    let (head, tail) = match text.split_once(CURRENCY_MARKER) {
        Some(parts) => parts,
        None => return Ok(Token::Label(text)),
    };

    if tail.contains(CURRENCY_MARKER) {
        return Err(malformed("more than one currency marker"));
    }

    let head = head.trim_end();
    let (label, opens) = match head.strip_suffix('(') {
        Some(label) => (label.trim_end(), true),
        None => (head, false),
    };
    let (body, closes) = match tail.trim_end().strip_suffix(')') {
        Some(body) => (body.trim(), true),
        None => (tail.trim(), false),
    };

    if opens != closes {
        return Err(malformed("unbalanced parentheses"));
    }
    if label.ends_with('-') {
        return Err(malformed("sign outside parentheses"));
    }

    let amount = Money::parse_report_digits(body).ok_or_else(|| malformed("amount is not a number"))?;
    if !amount.within_report_limit() {
        return Err(malformed("amount exceeds the report limit"));
    }
    let amount = if opens { -amount } else { amount };

    trace!(line, label, cents = amount.cents(), "classified amount line");

    if label.is_empty() {
        Ok(Token::Amount(amount))
    } else {
        Ok(Token::LabeledAmount {
            label: label.to_string(),
            amount,
        })
    }
}

/// Classifies numbered lines, skipping blank ones.
pub fn classify_lines<'a, I>(lines: I) -> ReportResult<Vec<ClassifiedLine>>
where
    I: IntoIterator<Item = (usize, &'a str)>,
{
    lines
        .into_iter()
        .filter(|(_, raw)| !raw.trim().is_empty())
        .map(|(line, raw)| {
            classify_line(line, raw).map(|token| ClassifiedLine { line, token })
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
