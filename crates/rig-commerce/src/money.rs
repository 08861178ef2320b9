//! Money type for representing monetary values.
//!
//! Uses minor-unit integer representation (cents/centavos) to avoid
//! floating-point precision issues in price calculations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Currencies the storefront sells in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    Ars,
    Usd,
    Mxn,
    Brl,
}

impl Currency {
    /// Get the currency code (e.g., "ARS").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Ars => "ARS",
            Currency::Usd => "USD",
            Currency::Mxn => "MXN",
            Currency::Brl => "BRL",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Ars => "$",
            Currency::Usd => "US$",
            Currency::Mxn => "MX$",
            Currency::Brl => "R$",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "ARS" => Some(Currency::Ars),
            "USD" => Some(Currency::Usd),
            "MXN" => Some(Currency::Mxn),
            "BRL" => Some(Currency::Brl),
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
/// Amounts are stored in the smallest unit of the currency (e.g., centavos).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
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

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        let decimal = self.to_decimal();
        let places = self.currency.decimal_places() as usize;
        format!("{}{:.places$}", self.currency.symbol(), decimal)
    }

    /// Try to add another Money value, returning None if currencies don't match
    /// or the addition overflows.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let amount = self.amount_cents.checked_add(other.amount_cents)?;
        Some(Money::new(amount, self.currency))
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let amount = self.amount_cents.checked_sub(other.amount_cents)?;
        Some(Money::new(amount, self.currency))
    }

    /// Try to multiply by a scalar, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        let amount = self.amount_cents.checked_mul(factor)?;
        Some(Money::new(amount, self.currency))
    }

    /// Try to sum an iterator of Money values, returning None on a currency
    /// mismatch or overflow.
    pub fn try_sum<'a>(
        iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        let mut acc = Money::zero(currency);
        for m in iter {
            acc = acc.try_add(m)?;
        }
        Some(acc)
    }
}

impl Add for Money {
    type Output = Money;

    /// # Panics
    /// Panics if currencies don't match or the addition overflows.
    /// Use `try_add` for fallible addition.
    fn add(self, other: Money) -> Money {
        self.try_add(&other).expect("Currency mismatch in addition")
    }
}

impl Sub for Money {
    type Output = Money;

    /// # Panics
    /// Panics if currencies don't match. Use `try_subtract` instead.
    fn sub(self, other: Money) -> Money {
        self.try_subtract(&other)
            .expect("Currency mismatch in subtraction")
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
        let m = Money::new(4999, Currency::Ars);
        assert_eq!(m.amount_cents, 4999);
        assert_eq!(m.currency, Currency::Ars);
    }

    #[test]
    fn test_money_display() {
        let m = Money::new(4999, Currency::Ars);
        assert_eq!(m.display(), "$49.99");

        let m = Money::new(100000, Currency::Usd);
        assert_eq!(m.display(), "US$1000.00");
    }

    #[test]
    fn test_money_addition() {
        let a = Money::new(1000, Currency::Ars);
        let b = Money::new(500, Currency::Ars);
        let c = a + b;
        assert_eq!(c.amount_cents, 1500);
    }

    #[test]
    fn test_money_try_multiply() {
        let m = Money::new(1000, Currency::Ars);
        assert_eq!(m.try_multiply(3).unwrap().amount_cents, 3000);
        assert!(Money::new(i64::MAX, Currency::Ars).try_multiply(2).is_none());
    }

    #[test]
    fn test_money_try_sum() {
        let values = [
            Money::new(1000, Currency::Ars),
            Money::new(2500, Currency::Ars),
        ];
        let sum = Money::try_sum(values.iter(), Currency::Ars).unwrap();
        assert_eq!(sum.amount_cents, 3500);
    }

    #[test]
    fn test_money_try_sum_mismatch() {
        let values = [
            Money::new(1000, Currency::Ars),
            Money::new(2500, Currency::Usd),
        ];
        assert!(Money::try_sum(values.iter(), Currency::Ars).is_none());
    }

    #[test]
    #[should_panic(expected = "Currency mismatch")]
    fn test_money_currency_mismatch() {
        let ars = Money::new(1000, Currency::Ars);
        let usd = Money::new(1000, Currency::Usd);
        let _ = ars + usd;
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("ARS"), Some(Currency::Ars));
        assert_eq!(Currency::from_code("usd"), Some(Currency::Usd));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
