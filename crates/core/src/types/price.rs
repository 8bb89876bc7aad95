//! Type-safe price representation using decimal arithmetic.
//!
//! The store sells in a single display currency (US dollars); catalog prices
//! are taken at face value from the upstream sale info.

use core::fmt;
use core::iter::Sum;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

/// A non-negative price in the store currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Convert a floating point amount (as returned by JSON APIs), rounded to cents.
    ///
    /// Returns `None` for NaN, infinities and negative values.
    #[must_use]
    pub fn from_f64(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return None;
        }
        Decimal::from_f64(amount).map(|d| Self(d.round_dp(2)))
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether this price is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Price of `quantity` units.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Apply a percentage rate (e.g. `8` for 8%), rounded to cents.
    #[must_use]
    pub fn percent(&self, rate: u32) -> Self {
        Self((self.0 * Decimal::from(rate) / Decimal::ONE_HUNDRED).round_dp(2))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl core::ops::Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, p| acc + p)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::from_cents(999).to_string(), "$9.99");
        assert_eq!(Price::from_cents(1200).to_string(), "$12.00");
    }

    #[test]
    fn test_from_f64_rounds_to_cents() {
        assert_eq!(Price::from_f64(12.346).unwrap(), Price::from_cents(1235));
        assert!(Price::from_f64(-1.0).is_none());
        assert!(Price::from_f64(f64::NAN).is_none());
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [Price::from_cents(999).times(2), Price::from_cents(150)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(2148));
    }

    #[test]
    fn test_percent() {
        assert_eq!(Price::from_cents(2000).percent(8), Price::from_cents(160));
    }
}
