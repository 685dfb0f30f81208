//! # Daily Sales Summary
//!
//! Reduces a parsed report to the figures of the end-of-day close-out sheet.
//!
//! ## Close-out Sheet
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SECTION A (what the store owes)      SECTION B (what the store holds)  │
//! │  ────────────────────────────────     ────────────────────────────────  │
//! │  net sales       end / net            cash float +/-     manual         │
//! │  fry loads       manual               aggregators        delivery/sales │
//! │  gst & hst       end / total taxes    payouts            manual         │
//! │  manitoba pst    manual               gst on payouts     manual         │
//! │                                       visa, mastercard,  eat in +       │
//! │                                       amex, debit,       take out       │
//! │                                       bank deposit(cash),               │
//! │                                       givex                             │
//! │                                       fry payments       manual         │
//! │                                       non-cash coupons   manual         │
//! │  ─────────────                        ─────────────                     │
//! │  TOTAL A                              TOTAL B                           │
//! │                                                                         │
//! │  CASH DIFFERENCE = TOTAL B − TOTAL A                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! "manual" figures are not on the terminal report; the operator supplies
//! them through [`ManualEntries`].

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};
use crate::money::Money;
use crate::types::{Section, SectionMap};

/// Operator-entered figures that do not appear on the terminal report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualEntries {
    pub fry_loads: Option<Money>,
    pub manitoba_pst: Option<Money>,
    pub cash_float_delta: Option<Money>,
    pub payouts: Option<Money>,
    pub gst_on_payouts: Option<Money>,
    pub fry_payments: Option<Money>,
    pub non_cash: Option<Money>,
}

/// The close-out sheet figures. `None` means "not on the report".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySummary {
    // Section A
    pub net_sales: Money,
    pub fry_loads: Option<Money>,
    pub gst_hst: Money,
    pub manitoba_pst: Option<Money>,
    pub total_a: Money,

    // Section B
    pub cash_float_delta: Option<Money>,
    pub aggregators: Option<Money>,
    pub payouts: Option<Money>,
    pub gst_on_payouts: Option<Money>,
    pub visa: Option<Money>,
    pub mastercard: Option<Money>,
    pub amex: Option<Money>,
    pub debit: Option<Money>,
    pub bank_deposit: Option<Money>,
    pub fry_payments: Option<Money>,
    pub non_cash: Option<Money>,
    pub givex: Option<Money>,
    pub total_b: Money,

    pub cash_difference: Money,
}

impl DailySummary {
    /// Builds the close-out figures from a parsed report.
    ///
    /// ## Errors
    /// - [`ReportError::MissingLineItem`] if `end` has no `net` or no
    ///   `total taxes` line
    /// - [`ReportError::AmountOverflow`] if a total does not fit in i64 cents
    pub fn from_sections(sections: &SectionMap, manual: &ManualEntries) -> ReportResult<Self> {
        let required = |label: &str| {
            sections
                .amount(Section::End, label)
                .ok_or_else(|| ReportError::MissingLineItem {
                    section: Section::End,
                    label: label.to_string(),
                })
        };
        let counter_tender = |label: &str| {
            add_present(
                sections.amount(Section::EatIn, label),
                sections.amount(Section::TakeOut, label),
            )
            .ok_or_else(|| overflow(label))
        };

        let net_sales = required("net")?;
        let gst_hst = required("total taxes")?;

        let total_a = Money::checked_sum(
            [Some(net_sales), manual.fry_loads, Some(gst_hst), manual.manitoba_pst]
                .into_iter()
                .flatten(),
        )
        .ok_or_else(|| overflow("total a"))?;

        let aggregators = sections.amount(Section::Delivery, "sales");
        let visa = counter_tender("visa")?;
        let mastercard = counter_tender("mastercard")?;
        let amex = counter_tender("amex")?;
        let debit = counter_tender("debit")?;
        let bank_deposit = counter_tender("cash")?;
        let givex = counter_tender("givex")?;

        let total_b = Money::checked_sum(
            [
                manual.cash_float_delta,
                aggregators,
                manual.payouts,
                manual.gst_on_payouts,
                visa,
                mastercard,
                amex,
                debit,
                bank_deposit,
                manual.fry_payments,
                manual.non_cash,
                givex,
            ]
            .into_iter()
            .flatten(),
        )
        .ok_or_else(|| overflow("total b"))?;
        let cash_difference = total_b
            .checked_sub(total_a)
            .ok_or_else(|| overflow("cash difference"))?;

        Ok(DailySummary {
            net_sales,
            fry_loads: manual.fry_loads,
            gst_hst,
            manitoba_pst: manual.manitoba_pst,
            total_a,
            cash_float_delta: manual.cash_float_delta,
            aggregators,
            payouts: manual.payouts,
            gst_on_payouts: manual.gst_on_payouts,
            visa,
            mastercard,
            amex,
            debit,
            bank_deposit,
            fry_payments: manual.fry_payments,
            non_cash: manual.non_cash,
            givex,
            total_b,
            cash_difference,
        })
    }
}

/// Adds two optional amounts, staying `None` only if both are absent.
///
/// The outer `None` means the sum overflowed.
fn add_present(a: Option<Money>, b: Option<Money>) -> Option<Option<Money>> {
    match (a, b) {
        (None, None) => Some(None),
        (a, b) => a
            .unwrap_or_default()
            .checked_add(b.unwrap_or_default())
            .map(Some),
    }
}

fn overflow(what: &str) -> ReportError {
    ReportError::AmountOverflow {
        what: what.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
