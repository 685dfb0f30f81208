//! # Block Segmenter
//!
//! Splits a parallel-run report into `(label-run, value-run)` blocks.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Label ──► collecting labels ──Amount──► collecting values             │
//! │                    ▲                              │                     │
//! │                    └──────── Label ───────────────┘                     │
//! │                          (close current block)                          │
//! │                                                                         │
//! │   end of input: whatever is open is closed as the last block            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```text
//! eat in, cash, debit, $1, $2, delivery, uber eats, $3, hst 5%, $4
//!
//! block 1: [eat in, cash, debit]   [$1, $2]
//! block 2: [delivery, uber eats]   [$3]
//! block 3: [hst 5%]                [$4]
//! ```
//!
//! Amounts that arrive before any label form a block with an empty label
//! run. The aligner rejects such a block, so nothing is silently paired.

use tracing::debug;

use crate::error::{ReportError, ReportResult};
use crate::types::{AmountLine, Block, ClassifiedLine, LabelLine, Token};

/// Partitions classified lines into blocks.
///
/// Every label and amount lands in exactly one block, in input order.
///
/// ## Errors
/// - [`ReportError::MixedLayout`] for a `label $amount` line, which belongs to
///   the single-line layout.
pub fn segment(lines: &[ClassifiedLine]) -> ReportResult<Vec<Block>> {
    let mut blocks = Vec::new();
    let mut open = OpenBlock::default();

    for classified in lines {
        match &classified.token {
            Token::Label(label) => {
                if !open.amounts.is_empty() {
                    blocks.push(open.close(blocks.len() + 1));
                }
                open.start_at(classified.line);
                open.labels.push(LabelLine {
                    line: classified.line,
                    label: label.clone(),
                });
            }
            Token::Amount(amount) => {
                open.start_at(classified.line);
                open.amounts.push(AmountLine {
                    line: classified.line,
                    amount: *amount,
                });
            }
            Token::LabeledAmount { label, amount } => {
                return Err(ReportError::MixedLayout {
                    line: classified.line,
                    text: format!("{} {}", label, amount.to_report_string()),
                });
            }
        }
    }

    if !open.is_empty() {
        blocks.push(open.close(blocks.len() + 1));
    }

    debug!(blocks = blocks.len(), "segmented parallel-run report");
    Ok(blocks)
}

#[derive(Default)]
struct OpenBlock {
    line: Option<usize>,
    labels: Vec<LabelLine>,
    amounts: Vec<AmountLine>,
}

impl OpenBlock {
    fn start_at(&mut self, line: usize) {
        self.line.get_or_insert(line);
    }

    fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.amounts.is_empty()
    }

    fn close(&mut self, index: usize) -> Block {
        let taken = std::mem::take(self);
        Block {
            index,
            line: taken.line.unwrap_or_default(),
            labels: taken.labels,
            amounts: taken.amounts,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
