//! # Section Assigner
//!
//! Walks tagged lines and decides which section each line item belongs to.
//!
//! The assigner is an explicit cursor owned by one parse. It carries the
//! current section and whether `end` has been opened from one block to the
//! next, so a block that starts without a header continues the section the
//! previous block left open.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  line                      current before   current after   item?       │
//! │  ────────────────────────  ──────────────   ─────────────   ─────       │
//! │  Header(eat in)            -                eat in          no          │
//! │  Item(cash)                eat in           eat in          yes         │
//! │  Item(hst 5%) first time   eat in           end             yes         │
//! │  Item(total taxes)         end              end             yes         │
//! │  Item(cash) before header  -                -               Unassigned  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, trace};

use crate::config::ParserConfig;
use crate::error::{ReportError, ReportResult};
use crate::types::{BlockSections, Section, TaggedLine};

/// Report-wide section cursor.
#[derive(Debug)]
pub struct SectionAssigner<'a> {
    config: &'a ParserConfig,
    current: Option<Section>,
    end_opened: bool,
    opened: Vec<Section>,
}

impl<'a> SectionAssigner<'a> {
    pub fn new(config: &'a ParserConfig) -> Self {
        SectionAssigner {
            config,
            current: None,
            end_opened: false,
            opened: Vec::new(),
        }
    }

    /// The section line items currently go to.
    pub fn current(&self) -> Option<Section> {
        self.current
    }

    /// Assigns one block's tagged lines to sections.
    ///
    /// ## Errors
    /// - [`ReportError::UnassignedSection`] for an item before any section opened
    /// - [`ReportError::DuplicateSectionHeader`] when `strict_headers` is set and
    ///   a header reopens a section out of document order
    pub fn assign_block(&mut self, lines: &[TaggedLine]) -> ReportResult<BlockSections> {
        let mut sections = BlockSections::new();

        for tagged in lines {
            match tagged {
                TaggedLine::Header { line, section } => {
                    self.open_header(*line, *section)?;
                    sections.open(*section);
                }
                TaggedLine::Item {
                    line,
                    label,
                    amount,
                } => {
                    if !self.end_opened && self.config.is_trailer(label) {
                        debug!(line, label = %label, "trailer keyword opens end section");
                        self.end_opened = true;
                        self.enter(Section::End);
                    }

                    let section = self.current.ok_or_else(|| ReportError::UnassignedSection {
                        line: *line,
                        label: label.clone(),
                    })?;

                    trace!(line, %section, label = %label, "assigned line item");
                    sections.push(section, label.clone(), *amount);
                }
            }
        }

        Ok(sections)
    }

    fn open_header(&mut self, line: usize, section: Section) -> ReportResult<()> {
        let reopened = self.opened.contains(&section) && self.current != Some(section);
        if self.config.strict_headers && (reopened || self.end_opened) {
            return Err(ReportError::DuplicateSectionHeader { line, section });
        }

        debug!(line, %section, reopened, "section header");
        self.enter(section);
        Ok(())
    }

    fn enter(&mut self, section: Section) {
        self.current = Some(section);
        if !self.opened.contains(&section) {
            self.opened.push(section);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
