//! # Merger
//!
//! Folds per-block section assignments into one report-wide [`SectionMap`].
//!
//! ## Merge Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. A section seen again in a later block gets its items APPENDED.      │
//! │     Existing items are never replaced.                                  │
//! │                                                                         │
//! │  2. A label already present in the section is renamed with the first    │
//! │     free numeric suffix:                                                │
//! │                                                                         │
//! │       rounded ($0.35)   ──►  rounded  = -0.35                           │
//! │       rounded  $0.45    ──►  rounded2 =  0.45                           │
//! │       rounded  $0.10    ──►  rounded3 =  0.10                           │
//! │                                                                         │
//! │  3. Display order follows insertion, renamed labels included.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use crate::types::{BlockSections, SectionLedger, SectionMap};

/// Merges one block into `target`.
///
/// Merging an empty block leaves `target` unchanged.
pub fn merge_block(target: &mut SectionMap, block: BlockSections) {
    for (section, items) in block.into_entries() {
        let ledger = target.ledger_mut(section);
        for (label, amount) in items {
            let unique = unique_label(ledger, &label);
            if unique != label {
                debug!(%section, label = %label, renamed = %unique, "renamed repeated label");
            }
            ledger.push_unique(unique, amount);
        }
    }
}

/// Merges every block, in order, into a fresh [`SectionMap`].
pub fn merge_blocks<I>(blocks: I) -> SectionMap
where
    I: IntoIterator<Item = BlockSections>,
{
    let mut map = SectionMap::new();
    for block in blocks {
        merge_block(&mut map, block);
    }
    map
}

/// Returns `label`, or `label` + the first free suffix starting at 2.
fn unique_label(ledger: &SectionLedger, label: &str) -> String {
    if !ledger.contains(label) {
        return label.to_string();
    }

    (2..)
        .map(|n| format!("{}{}", label, n))
        .find(|candidate| !ledger.contains(candidate))
        .unwrap_or_else(|| label.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
