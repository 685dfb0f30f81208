//! # Money Module
//!
//! Provides the `Money` type for the amounts printed on a report.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing report lines as floats:                                        │
//! │    821.95 + 1899.11 + ... = 3326.0199999999995  ❌ WRONG!               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "$1,899.11" is read straight into 189911 cents.                      │
//! │    No float ever touches a report amount.                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::money::Money;
//!
//! let cash = Money::parse_report_digits("1,899.11").unwrap();
//! assert_eq!(cash.cents(), 189911);
//!
//! let rounded = -Money::from_cents(35);
//! assert_eq!(rounded.to_report_string(), "($0.35)");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Digits as the terminal prints them: optional thousands grouping, up to two
/// decimal places.
static AMOUNT_BODY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d{1,2})?$").expect("valid amount regex")
});

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: Report lines can be negative (`Rounded ($0.35)`)
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: serde support so parsed reports serialize to JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Largest magnitude a report line may carry: $99,999,999,999.99.
    ///
    /// Any sum of fewer than 90,000 such lines stays within i64 cents.
    pub const MAX_REPORT: Money = Money(9_999_999_999_999);

    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let net = Money::from_cents(294369); // $2,943.69
    /// assert_eq!(net.cents(), 294369);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses the numeric body of a report amount (no `$`, no parentheses).
    ///
    /// Accepts `1234`, `1234.5`, `1234.56` and grouped `1,234.56`. Returns
    /// `None` for anything else, including badly grouped digits (`12,34`) and
    /// values that do not fit in i64 cents.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::parse_report_digits("3,326.02"), Some(Money::from_cents(332602)));
    /// assert_eq!(Money::parse_report_digits("0.5"), Some(Money::from_cents(50)));
    /// assert_eq!(Money::parse_report_digits("12,34"), None);
    /// ```
    pub fn parse_report_digits(body: &str) -> Option<Money> {
        if !AMOUNT_BODY.is_match(body) {
            return None;
        }

        let digits = body.replace(',', "");
        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits.as_str(), ""),
        };

        let whole: i64 = whole.parse().ok()?;
        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().ok()? * 10,
            _ => fraction.parse().ok()?,
        };

        whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction))
            .map(Money)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).dollars(), 10);
    /// assert_eq!(Money::from_cents(-550).dollars(), -5);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Checked addition. Returns `None` on overflow.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on overflow.
    #[inline]
    pub const fn checked_sub(self, other: Money) -> Option<Money> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Sums `amounts`, or `None` if the total leaves the i64 range.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let lines = [Money::from_cents(-35), Money::from_cents(45)];
    /// assert_eq!(Money::checked_sum(lines), Some(Money::from_cents(10)));
    /// assert_eq!(Money::checked_sum([Money::from_cents(i64::MAX), Money::from_cents(1)]), None);
    /// ```
    pub fn checked_sum<I>(amounts: I) -> Option<Money>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::zero(), Money::checked_add)
    }

    /// Returns true if the terminal could have printed this amount.
    #[inline]
    pub const fn within_report_limit(&self) -> bool {
        self.0.unsigned_abs() <= Money::MAX_REPORT.0.unsigned_abs()
    }

    /// Formats the amount the way the terminal prints it.
    ///
    /// ## Example
    /// ```text
    ///   189911  →  "$1,899.11"
    ///      -35  →  "($0.35)"
    /// ```
    ///
    /// [`crate::classify::classify_line`] reads every string produced here
    /// back into the same value.
    pub fn to_report_string(&self) -> String {
        let dollars = self.0.unsigned_abs() / 100;
        let cents = self.0.unsigned_abs() % 100;

        let raw = dollars.to_string();
        let mut grouped = String::with_capacity(raw.len() + raw.len() / 3);
        for (i, ch) in raw.chars().enumerate() {
            if i > 0 && (raw.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        if self.is_negative() {
            format!("(${}.{:02})", grouped, cents)
        } else {
            format!("${}.{:02}", grouped, cents)
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Negation, used for parenthesised amounts.
impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_parse_report_digits() {
        assert_eq!(Money::parse_report_digits("821.95"), Some(Money::from_cents(82195)));
        assert_eq!(Money::parse_report_digits("1,899.11"), Some(Money::from_cents(189911)));
        assert_eq!(Money::parse_report_digits("1,234,567.00"), Some(Money::from_cents(123456700)));
        assert_eq!(Money::parse_report_digits("5"), Some(Money::from_cents(500)));
        assert_eq!(Money::parse_report_digits("0.5"), Some(Money::from_cents(50)));
        assert_eq!(Money::parse_report_digits("0.35"), Some(Money::from_cents(35)));
    }

    #[test]
    fn test_parse_report_digits_rejects_garbage() {
        assert_eq!(Money::parse_report_digits(""), None);
        assert_eq!(Money::parse_report_digits("abc"), None);
        assert_eq!(Money::parse_report_digits("12,34"), None);
        assert_eq!(Money::parse_report_digits("1,2345.00"), None);
        assert_eq!(Money::parse_report_digits("1.234"), None);
        assert_eq!(Money::parse_report_digits(".50"), None);
        assert_eq!(Money::parse_report_digits("-5.00"), None);
        assert_eq!(Money::parse_report_digits("99999999999999999999"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_to_report_string() {
        assert_eq!(Money::from_cents(82195).to_report_string(), "$821.95");
        assert_eq!(Money::from_cents(189911).to_report_string(), "$1,899.11");
        assert_eq!(Money::from_cents(-35).to_report_string(), "($0.35)");
        assert_eq!(Money::from_cents(123456700).to_report_string(), "$1,234,567.00");
        assert_eq!(Money::zero().to_report_string(), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
    }

    #[test]
    fn test_checked_sum() {
        let lines = [Money::from_cents(-35), Money::from_cents(45), Money::from_cents(100)];
        assert_eq!(Money::checked_sum(lines), Some(Money::from_cents(110)));
        assert_eq!(Money::checked_sum(std::iter::empty::<Money>()), Some(Money::zero()));

        let huge = Money::from_cents(9_000_000_000_000_000_000);
        assert_eq!(Money::checked_sum([huge, huge]), None);
        assert_eq!(Money::from_cents(i64::MIN).checked_sub(Money::from_cents(1)), None);
    }

    #[test]
    fn test_report_limit() {
        assert!(Money::MAX_REPORT.within_report_limit());
        assert!((-Money::MAX_REPORT).within_report_limit());
        assert!(!Money::from_cents(10_000_000_000_000).within_report_limit());
        assert!(!Money::from_cents(i64::MIN).within_report_limit());
        assert_eq!(Money::MAX_REPORT.to_report_string(), "$99,999,999,999.99");
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().cents(), 100);
    }
}
