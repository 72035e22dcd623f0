//! # Money Module
//!
//! Integer cents for showing computed amounts.
//!
//! ## Where Rounding Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  LineItem (f64) ──► totals engine (f64, unrounded) ──► DocumentTotals   │
//! │                                                            │            │
//! │                                         Money::from_amount │ display    │
//! │                                                            ▼            │
//! │                                                   "$103.50" on screen   │
//! │                                                                         │
//! │  The backend receives raw line items and computes its own totals, so   │
//! │  rounding here never affects what gets stored.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! let total = Money::from_amount(103.499);
//! assert_eq!(total.cents(), 10350);
//! assert_eq!(total.to_string(), "$103.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};
use ts_rs::TS;

/// A monetary value in the smallest currency unit (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds an amount in major units to the nearest cent, halves away
    /// from zero. Non-finite amounts become zero.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::from_amount(13.5).cents(), 1350);
    /// assert_eq!(Money::from_amount(0.125).cents(), 13);
    /// assert_eq!(Money::from_amount(-0.125).cents(), -13);
    /// assert_eq!(Money::from_amount(f64::NAN).cents(), 0);
    /// ```
    pub fn from_amount(amount: f64) -> Self {
        if !amount.is_finite() {
            return Money::zero();
        }
        Money((amount * 100.0).round() as i64)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole major units (dollars), truncated toward zero.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Minor units (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Back to major units, e.g. for a chart axis.
    #[inline]
    pub fn as_amount(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Formats with a currency symbol and `decimals` fraction digits.
    ///
    /// The value is kept in cents, so `decimals` above 2 pads with zeros and
    /// 0 drops the fraction (rounding half away from zero).
    pub fn format_with(&self, symbol: &str, decimals: u8) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        match decimals {
            0 => format!("{}{}{}", sign, symbol, (abs + 50) / 100),
            1 => format!("{}{}{}.{}", sign, symbol, (abs + 5) / 100, ((abs + 5) / 10) % 10),
            d => format!(
                "{}{}{}.{:02}{}",
                sign,
                symbol,
                abs / 100,
                abs % 100,
                "0".repeat(d as usize - 2)
            ),
        }
    }
}

/// Dollar formatting for logs and debugging; screens use the configured
/// currency via [`Money::format_with`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("$", 2))
    }
}

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

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}
