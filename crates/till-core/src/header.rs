//! # Report Header
//!
//! Metadata printed above the first section of a sales-by-order-type report.
//!
//! ```text
//! 4
//! Clearview POS Sales By Order Type Report     ← title
//! Intercity Mall, Thunder Bay, Ont.
//! Requested by DHRUVI                          ← requested_by
//! Run on 05-24-2024 At 20:56:43                ← run_at
//! During Shift: 1                              ← shift
//! For the day of 05-24-2024                    ← business_date
//! # of Checks                                  ┐
//! 248                                          ┘ check_count
//! Eat In                                       ← sections start here
//! ```
//!
//! Lines that match none of these shapes are ignored.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

static RUN_AT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^run on (\d{2}-\d{2}-\d{4}) at (\d{2}:\d{2}:\d{2})$").expect("valid run regex")
});
static BUSINESS_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^for the day of (\d{2}-\d{2}-\d{4})$").expect("valid date regex")
});
static SHIFT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^during shift:\s*(\d+)$").expect("valid shift regex"));
static REQUESTED_BY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^requested by\s+(.+)$").expect("valid requester regex"));

const DATE_FORMAT: &str = "%m-%d-%Y";

/// Metadata recovered from the report preamble.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportHeader {
    pub title: Option<String>,
    pub requested_by: Option<String>,
    pub run_at: Option<NaiveDateTime>,
    pub shift: Option<u32>,
    pub business_date: Option<NaiveDate>,
    pub check_count: Option<u32>,
}

impl ReportHeader {
    /// Scans preamble lines for known metadata.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::header::ReportHeader;
    ///
    /// let header = ReportHeader::from_preamble(&["During Shift: 2", "# of Checks", "248"]);
    /// assert_eq!(header.shift, Some(2));
    /// assert_eq!(header.check_count, Some(248));
    /// ```
    pub fn from_preamble(lines: &[&str]) -> Self {
        let mut header = ReportHeader::default();
        let mut expect_checks = false;

        for raw in lines {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if expect_checks {
                expect_checks = false;
                if let Ok(count) = line.parse() {
                    header.check_count = Some(count);
                    continue;
                }
            }

            if line.eq_ignore_ascii_case("# of checks") {
                expect_checks = true;
            } else if let Some(caps) = RUN_AT.captures(line) {
                let stamp = format!("{} {}", &caps[1], &caps[2]);
                header.run_at =
                    NaiveDateTime::parse_from_str(&stamp, &format!("{} %H:%M:%S", DATE_FORMAT))
                        .map_err(|e| debug!(line, error = %e, "unreadable run timestamp"))
                        .ok();
            } else if let Some(caps) = BUSINESS_DATE.captures(line) {
                header.business_date = NaiveDate::parse_from_str(&caps[1], DATE_FORMAT)
                    .map_err(|e| debug!(line, error = %e, "unreadable business date"))
                    .ok();
            } else if let Some(caps) = SHIFT.captures(line) {
                header.shift = caps[1].parse().ok();
            } else if let Some(caps) = REQUESTED_BY.captures(line) {
                header.requested_by = Some(caps[1].trim().to_string());
            } else if header.title.is_none() && line.to_lowercase().contains("report") {
                header.title = Some(line.to_string());
            }
        }

        header
    }

    /// Returns true if nothing was recognized.
    pub fn is_empty(&self) -> bool {
        *self == ReportHeader::default()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const PREAMBLE: &[&str] = &[
        "4",
        "Clearview POS Sales By Order Type Report",
        "Intercity Mall, Thunder Bay, Ont.",
        "Requested by DHRUVI",
        "Run on 05-24-2024 At 20:56:43",
        "During Shift: 1",
        "For the day of 05-24-2024",
        "# of Checks",
        "248",
    ];

    #[test]
    fn test_full_preamble() {
        let header = ReportHeader::from_preamble(PREAMBLE);

        assert_eq!(header.title.as_deref(), Some("Clearview POS Sales By Order Type Report"));
        assert_eq!(header.requested_by.as_deref(), Some("DHRUVI"));
        assert_eq!(
            header.run_at,
            NaiveDate::from_ymd_opt(2024, 5, 24).and_then(|d| d.and_hms_opt(20, 56, 43))
        );
        assert_eq!(header.shift, Some(1));
        assert_eq!(header.business_date, NaiveDate::from_ymd_opt(2024, 5, 24));
        assert_eq!(header.check_count, Some(248));
    }

    #[test]
    fn test_bad_date_is_ignored() {
        let header = ReportHeader::from_preamble(&["For the day of 13-45-2024"]);
        assert_eq!(header.business_date, None);
    }

    #[test]
    fn test_check_count_needs_number() {
        let header = ReportHeader::from_preamble(&["# of Checks", "Requested by SAM"]);
        assert_eq!(header.check_count, None);
        assert_eq!(header.requested_by.as_deref(), Some("SAM"));
    }

    #[test]
    fn test_empty_preamble() {
        assert!(ReportHeader::from_preamble(&[]).is_empty());
        assert!(ReportHeader::from_preamble(&["Intercity Mall"]).is_empty());
    }
}
