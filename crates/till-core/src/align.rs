//! # Label-Value Aligner
//!
//! Converts both report layouts into the same tagged form
//! ([`TaggedLine`]) so section assignment never sees positional pairing.
//!
//! ## Offset Pairing (parallel-run layout)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  i  label        header?  offset   amount index (i + offset)            │
//! │  ─  ──────────   ───────  ──────   ─────────────────────────            │
//! │  0  eat in       yes      -1       -                                    │
//! │  1  cash         no       -1       0  → $821.95                         │
//! │  2  debit        no       -1       1  → $1,899.11                       │
//! │  3  delivery     yes      -2       -                                    │
//! │  4  doordash     no       -2       2  → $181.96                         │
//! │                                                                         │
//! │  labels 5, headers 2  ⇒  exactly 3 amounts, otherwise Alignment error   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Trailer lines (`hst 5%`, `total taxes`) carry an amount, so only section
//! headers move the offset.

use tracing::debug;

use crate::config::ParserConfig;
use crate::error::{ReportError, ReportResult};
use crate::types::{Block, ClassifiedLine, TaggedLine, Token};

/// Pairs each non-header label of `block` with its amount.
///
/// ## Errors
/// - [`ReportError::Alignment`] unless the block holds exactly one amount per
///   non-header label. Blocks are never truncated or padded.
pub fn align_block(block: &Block, config: &ParserConfig) -> ReportResult<Vec<TaggedLine>> {
    let headers = block
        .labels
        .iter()
        .filter(|l| config.header_section(&l.label).is_some())
        .count();

    let mismatch = || ReportError::Alignment {
        block: block.index,
        line: block.line,
        labels: block.labels.len(),
        headers,
        amounts: block.amounts.len(),
    };

    if block.amounts.len() != block.labels.len() - headers {
        return Err(mismatch());
    }

    let mut tagged = Vec::with_capacity(block.labels.len());
    let mut offset: isize = 0;

    for (i, label) in block.labels.iter().enumerate() {
        if let Some(section) = config.header_section(&label.label) {
            offset -= 1;
            tagged.push(TaggedLine::Header {
                line: label.line,
                section,
            });
            continue;
        }

        let amount = i
            .checked_add_signed(offset)
            .and_then(|idx| block.amounts.get(idx))
            .ok_or_else(mismatch)?;

        tagged.push(TaggedLine::Item {
            line: label.line,
            label: label.label.clone(),
            amount: amount.amount,
        });
    }

    debug!(
        block = block.index,
        labels = block.labels.len(),
        headers,
        "aligned block"
    );
    Ok(tagged)
}

/// Converts a single-line layout report into tagged lines.
///
/// ## Errors
/// - [`ReportError::MalformedLine`] for a bare label that is not a header
///   (every item line must carry its amount)
/// - [`ReportError::MixedLayout`] for a bare amount line
pub fn tag_single_line(
    lines: &[ClassifiedLine],
    config: &ParserConfig,
) -> ReportResult<Vec<TaggedLine>> {
    lines
        .iter()
        .map(|classified| match &classified.token {
            Token::Label(label) => match config.header_section(label) {
                Some(section) => Ok(TaggedLine::Header {
                    line: classified.line,
                    section,
                }),
                None => Err(ReportError::MalformedLine {
                    line: classified.line,
                    text: label.clone(),
                    reason: "line has no amount".to_string(),
                }),
            },
            Token::LabeledAmount { label, amount } => Ok(TaggedLine::Item {
                line: classified.line,
                label: label.clone(),
                amount: *amount,
            }),
            Token::Amount(amount) => Err(ReportError::MixedLayout {
                line: classified.line,
                text: amount.to_report_string(),
            }),
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
