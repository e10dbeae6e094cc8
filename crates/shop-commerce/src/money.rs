//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Basis points in a whole (100%).
pub const BASIS_POINTS: i64 = 10_000;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::CAD => "CAD",
            Currency::JPY => "JPY",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::CAD => "CA$",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Minor units per major unit (100 for cents, 1 for yen).
    pub fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "CAD" => Some(Currency::CAD),
            "JPY" => Some(Currency::JPY),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., cents for USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub const fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from whole major units (dollars, euros, ...).
    ///
    /// ```
    /// use shop_commerce::money::{Money, Currency};
    /// assert_eq!(Money::from_major(40, Currency::USD).unwrap().amount_cents, 4000);
    /// ```
    pub fn from_major(amount: i64, currency: Currency) -> Result<Self, CommerceError> {
        amount
            .checked_mul(currency.minor_per_major())
            .map(|cents| Self::new(cents, currency))
            .ok_or(CommerceError::Overflow)
    }

    /// Create a zero amount in the given currency.
    pub const fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let minor = self.currency.minor_per_major();
        let abs = self.amount_cents.unsigned_abs();
        let whole = abs / minor as u64;
        let places = self.currency.decimal_places() as usize;
        if places == 0 {
            return format!("{sign}{whole}");
        }
        let frac = abs % minor as u64;
        format!("{sign}{whole}.{frac:0places$}")
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), CommerceError> {
        if self.currency != other.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: other.currency.code().to_string(),
            });
        }
        Ok(())
    }

    /// Add another Money value.
    pub fn checked_add(&self, other: &Money) -> Result<Money, CommerceError> {
        self.ensure_same_currency(other)?;
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(|cents| Money::new(cents, self.currency))
            .ok_or(CommerceError::Overflow)
    }

    /// Multiply by a quantity.
    pub fn checked_mul(&self, factor: i64) -> Result<Money, CommerceError> {
        self.amount_cents
            .checked_mul(factor)
            .map(|cents| Money::new(cents, self.currency))
            .ok_or(CommerceError::Overflow)
    }

    /// Apply a rate given in basis points (800 = 8%), rounding half away
    /// from zero to the nearest minor unit.
    pub fn apply_rate_bps(&self, bps: i64) -> Result<Money, CommerceError> {
        let scaled = i128::from(self.amount_cents) * i128::from(bps);
        let divisor = i128::from(BASIS_POINTS);
        let half = divisor / 2;
        let rounded = if scaled >= 0 {
            (scaled + half) / divisor
        } else {
            (scaled - half) / divisor
        };
        i64::try_from(rounded)
            .map(|cents| Money::new(cents, self.currency))
            .map_err(|_| CommerceError::Overflow)
    }

    /// Compare two amounts of the same currency.
    pub fn checked_cmp(&self, other: &Money) -> Result<std::cmp::Ordering, CommerceError> {
        self.ensure_same_currency(other)?;
        Ok(self.amount_cents.cmp(&other.amount_cents))
    }

    /// Sum an iterator of Money values.
    pub fn checked_sum(
        iter: impl IntoIterator<Item = Money>,
        currency: Currency,
    ) -> Result<Money, CommerceError> {
        iter.into_iter()
            .try_fold(Money::zero(currency), |acc, m| acc.checked_add(&m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_cents() {
        let m = Money::new(4999, Currency::USD);
        assert_eq!(m.amount_cents, 4999);
        assert_eq!(m.currency, Currency::USD);
    }

    #[test]
    fn test_money_from_major() {
        assert_eq!(Money::from_major(49, Currency::USD).unwrap().amount_cents, 4900);
        assert_eq!(Money::from_major(100, Currency::JPY).unwrap().amount_cents, 100);
        assert!(Money::from_major(i64::MAX, Currency::USD).is_err());
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
        assert_eq!(Money::new(640, Currency::USD).display(), "$6.40");
        assert_eq!(Money::new(5, Currency::USD).display(), "$0.05");
        assert_eq!(Money::new(-1050, Currency::EUR).display(), "\u{20ac}-10.50");
        assert_eq!(Money::new(100, Currency::JPY).display(), "\u{00a5}100");
    }

    #[test]
    fn test_money_addition() {
        let a = Money::new(1000, Currency::USD);
        let b = Money::new(500, Currency::USD);
        assert_eq!(a.checked_add(&b).unwrap().amount_cents, 1500);
    }

    #[test]
    fn test_money_currency_mismatch() {
        let usd = Money::new(1000, Currency::USD);
        let eur = Money::new(1000, Currency::EUR);
        assert!(matches!(
            usd.checked_add(&eur),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_money_overflow() {
        let m = Money::new(i64::MAX, Currency::USD);
        assert!(matches!(m.checked_mul(2), Err(CommerceError::Overflow)));
        assert!(matches!(
            m.checked_add(&Money::new(1, Currency::USD)),
            Err(CommerceError::Overflow)
        ));
    }

    #[test]
    fn test_apply_rate_rounds_half_up() {
        // 8% of $80.00
        assert_eq!(
            Money::new(8000, Currency::USD).apply_rate_bps(800).unwrap().amount_cents,
            640
        );
        // 8% of $0.06 = 0.48 cents -> 0
        assert_eq!(
            Money::new(6, Currency::USD).apply_rate_bps(800).unwrap().amount_cents,
            0
        );
        // 8% of $0.19 = 1.52 cents -> 2
        assert_eq!(
            Money::new(19, Currency::USD).apply_rate_bps(800).unwrap().amount_cents,
            2
        );
        // 8% of $0.25 = 2.0 cents exactly
        assert_eq!(
            Money::new(25, Currency::USD).apply_rate_bps(800).unwrap().amount_cents,
            2
        );
    }

    #[test]
    fn test_checked_sum() {
        let parts = vec![
            Money::new(100, Currency::USD),
            Money::new(250, Currency::USD),
        ];
        assert_eq!(
            Money::checked_sum(parts, Currency::USD).unwrap().amount_cents,
            350
        );
        assert!(Money::checked_sum(Vec::new(), Currency::USD).unwrap().is_zero());
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("USD"), Some(Currency::USD));
        assert_eq!(Currency::from_code("eur"), Some(Currency::EUR));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
