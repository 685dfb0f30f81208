//! # Domain Types
//!
//! Types shared by every stage of report reconstruction.
//!
//! ## Type Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  raw line ──► ClassifiedLine ──► Block ──► TaggedLine ──► BlockSections │
//! │               (Token + line no)  (labels,  (Header |      (per block)   │
//! │                                   amounts)  Item)              │        │
//! │                                                                ▼        │
//! │                                               SectionMap ◄── merge      │
//! │                                               Section → SectionLedger   │
//! │                                               (LineItem in order)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Section
// =============================================================================

/// A named grouping of line items on the report.
///
/// `EatIn`, `Delivery` and `TakeOut` are opened by their header lines. `End`
/// is synthesized when the first tax/summary line is seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Section {
    #[serde(rename = "eat in")]
    EatIn,
    #[serde(rename = "delivery")]
    Delivery,
    #[serde(rename = "take out")]
    TakeOut,
    #[serde(rename = "end")]
    End,
}

impl Section {
    /// Returns the section name as printed on the report.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Section::EatIn => "eat in",
            Section::Delivery => "delivery",
            Section::TakeOut => "take out",
            Section::End => "end",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Classified Lines
// =============================================================================

/// One report line after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A line with no currency marker (`eat in`, `cash`, `- tax`).
    Label(String),
    /// A bare amount (`$821.95`, `($0.35)`), parallel-run layout.
    Amount(Money),
    /// Label and amount on one line (`cash $821.95`), single-line layout.
    LabeledAmount { label: String, amount: Money },
}

/// A [`Token`] together with its 1-based line number in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub line: usize,
    pub token: Token,
}

/// Which of the two supported layouts a report uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// `label $amount` on every line.
    SingleLine,
    /// Runs of bare labels followed by runs of bare amounts.
    ParallelRuns,
}

// =============================================================================
// Blocks
// =============================================================================

/// A label with the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelLine {
    pub line: usize,
    pub label: String,
}

/// An amount with the line it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountLine {
    pub line: usize,
    pub amount: Money,
}

/// A contiguous label-run / value-run pair from a parallel-run report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// 1-based position of the block in the report.
    pub index: usize,
    /// First source line covered by the block.
    pub line: usize,
    pub labels: Vec<LabelLine>,
    pub amounts: Vec<AmountLine>,
}

/// The canonical tagged form both layouts are converted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaggedLine {
    /// A section header. Occupies a label slot but carries no amount.
    Header { line: usize, section: Section },
    /// A label paired with its amount.
    Item {
        line: usize,
        label: String,
        amount: Money,
    },
}

/// Section assignment result for a single block, before merging.
///
/// Duplicate labels are kept as-is here; the merger renames them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockSections {
    entries: Vec<(Section, Vec<(String, Money)>)>,
}

impl BlockSections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes sure `section` exists, even if no item follows its header.
    pub fn open(&mut self, section: Section) {
        self.slot(section);
    }

    /// Appends an item to `section`, opening it if needed.
    pub fn push(&mut self, section: Section, label: impl Into<String>, amount: Money) {
        self.slot(section).push((label.into(), amount));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sections in first-appearance order with their raw items.
    pub fn iter(&self) -> impl Iterator<Item = (Section, &[(String, Money)])> {
        self.entries
            .iter()
            .map(|(section, items)| (*section, items.as_slice()))
    }

    pub(crate) fn into_entries(self) -> Vec<(Section, Vec<(String, Money)>)> {
        self.entries
    }

    fn slot(&mut self, section: Section) -> &mut Vec<(String, Money)> {
        let idx = match self.entries.iter().position(|(s, _)| *s == section) {
            Some(idx) => idx,
            None => {
                self.entries.push((section, Vec::new()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx].1
    }
}

// =============================================================================
// Line Items & Section Map
// =============================================================================

/// A single labeled amount within a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    /// Unique within its section (repeats are renamed `label2`, `label3`...).
    pub label: String,
    pub amount: Money,
    /// Order of appearance within the section, starting at 0.
    pub position: usize,
}

/// The ordered line items of one section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionLedger {
    items: Vec<LineItem>,
}

impl SectionLedger {
    /// Looks up an amount by (possibly renamed) label.
    pub fn get(&self, label: &str) -> Option<Money> {
        self.items
            .iter()
            .find(|item| item.label == label)
            .map(|item| item.amount)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.items.iter().any(|item| item.label == label)
    }

    /// Labels in original document order.
    pub fn display_order(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.label.as_str()).collect()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Sum of every itemized amount in the section, `None` on overflow.
    pub fn total(&self) -> Option<Money> {
        Money::checked_sum(self.items.iter().map(|item| item.amount))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends an item. The caller guarantees `label` is not taken yet.
    pub(crate) fn push_unique(&mut self, label: String, amount: Money) {
        debug_assert!(!self.contains(&label));
        let position = self.items.len();
        self.items.push(LineItem {
            label,
            amount,
            position,
        });
    }
}

/// Per-section label → amount mapping for a whole report, plus display order.
///
/// Sections are kept in the order they first appear in the report.
///
/// ## JSON Shape
/// ```text
/// {
///   "eat in": {
///     "values":        { "cash": 82195, "rounded": -35, "rounded2": 45 },
///     "display_order": [ "cash", "rounded", "rounded2" ]
///   },
///   "end": { ... }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    sections: Vec<(Section, SectionLedger)>,
}

impl SectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, section: Section) -> Option<&SectionLedger> {
        self.sections
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, ledger)| ledger)
    }

    /// Convenience lookup of one line item's amount.
    pub fn amount(&self, section: Section, label: &str) -> Option<Money> {
        self.get(section).and_then(|ledger| ledger.get(label))
    }

    /// Labels of `section` in document order (empty if the section is absent).
    pub fn display_order(&self, section: Section) -> Vec<&str> {
        self.get(section)
            .map(SectionLedger::display_order)
            .unwrap_or_default()
    }

    pub fn contains(&self, section: Section) -> bool {
        self.get(section).is_some()
    }

    /// Sections in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (Section, &SectionLedger)> {
        self.sections.iter().map(|(section, ledger)| (*section, ledger))
    }

    pub fn sections(&self) -> Vec<Section> {
        self.sections.iter().map(|(section, _)| *section).collect()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Returns the ledger for `section`, creating an empty one at the end.
    pub(crate) fn ledger_mut(&mut self, section: Section) -> &mut SectionLedger {
        let idx = match self.sections.iter().position(|(s, _)| *s == section) {
            Some(idx) => idx,
            None => {
                self.sections.push((section, SectionLedger::default()));
                self.sections.len() - 1
            }
        };
        &mut self.sections[idx].1
    }
}

impl Serialize for SectionLedger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Values<'a>(&'a [LineItem]);

        impl Serialize for Values<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for item in self.0 {
                    map.serialize_entry(&item.label, &item.amount)?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("values", &Values(&self.items))?;
        map.serialize_entry("display_order", &self.display_order())?;
        map.end()
    }
}

impl Serialize for SectionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for (section, ledger) in &self.sections {
            map.serialize_entry(section, ledger)?;
        }
        map.end()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
