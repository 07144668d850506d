use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

const CENTS_PER_UNIT: u64 = 100;

/// Non-negative monetary amount held in minor units (cents).
///
/// The canonical string form is a plain decimal with exactly two fractional
/// digits: no sign, no exponent, no grouping (`0.00`, `50.00`, `1234.05`).
/// Holding integer cents keeps that rendering exact regardless of how the
/// amount was entered.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Price(u64);

impl Price {
    /// The zero amount.
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Create from minor units.
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Amount in minor units.
    pub const fn cents(&self) -> u64 {
        self.0
    }

    /// Returns `true` for any amount above zero.
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Convert a floating-point amount, rounding half away from zero to the
    /// nearest cent.
    pub fn from_f64(amount: f64) -> Result<Self, TypeError> {
        if !amount.is_finite() {
            return Err(TypeError::InvalidPrice(amount.to_string()));
        }
        if amount < 0.0 {
            return Err(TypeError::NegativePrice);
        }
        let cents = (amount * CENTS_PER_UNIT as f64).round();
        if cents > u64::MAX as f64 {
            return Err(TypeError::PriceOverflow);
        }
        Ok(Self(cents as u64))
    }

    /// Parse a plain decimal string with at most two fractional digits.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        let text = s.trim();
        if text.starts_with('-') {
            return Err(TypeError::NegativePrice);
        }

        let (whole, fraction) = match text.split_once('.') {
            Some((w, f)) => (w, f),
            None => (text, ""),
        };
        let digits_only = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty())
            || !digits_only(whole)
            || !digits_only(fraction)
        {
            return Err(TypeError::InvalidPrice(s.to_string()));
        }
        if fraction.len() > 2 {
            return Err(TypeError::InvalidPrice(format!(
                "{s}: more than two fractional digits"
            )));
        }

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| TypeError::PriceOverflow)?
        };
        let fraction: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().unwrap_or_default() * 10,
            _ => fraction.parse::<u64>().unwrap_or_default(),
        };

        whole
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|c| c.checked_add(fraction))
            .map(Self)
            .ok_or(TypeError::PriceOverflow)
    }

    /// Canonical string form used as digest input.
    pub fn canonical(&self) -> String {
        format!("{}.{:02}", self.0 / CENTS_PER_UNIT, self.0 % CENTS_PER_UNIT)
    }
}

impl FromStr for Price {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Price {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Price> for String {
    fn from(value: Price) -> Self {
        value.canonical()
    }
}

impl fmt::Debug for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Price({})", self.canonical())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_uses_two_fraction_digits() {
        assert_eq!(Price::zero().canonical(), "0.00");
        assert_eq!(Price::from_cents(5000).canonical(), "50.00");
        assert_eq!(Price::from_cents(123_405).canonical(), "1234.05");
        assert_eq!(Price::from_cents(7).canonical(), "0.07");
    }

    #[test]
    fn parse_accepts_plain_decimals() {
        assert_eq!(Price::parse("50").unwrap(), Price::from_cents(5000));
        assert_eq!(Price::parse("50.5").unwrap(), Price::from_cents(5050));
        assert_eq!(Price::parse("50.05").unwrap(), Price::from_cents(5005));
        assert_eq!(Price::parse(".5").unwrap(), Price::from_cents(50));
        assert_eq!(Price::parse("12.").unwrap(), Price::from_cents(1200));
        assert_eq!(Price::parse(" 3.10 ").unwrap(), Price::from_cents(310));
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for bad in ["", ".", "abc", "1e3", "1.234", "1,50", "+5", "1.2.3"] {
            assert!(
                matches!(Price::parse(bad), Err(TypeError::InvalidPrice(_))),
                "{bad:?} should be rejected"
            );
        }
        assert_eq!(Price::parse("-1.00").unwrap_err(), TypeError::NegativePrice);
        assert_eq!(
            Price::parse("999999999999999999999").unwrap_err(),
            TypeError::PriceOverflow
        );
    }

    #[test]
    fn from_f64_rounds_to_cents() {
        assert_eq!(Price::from_f64(50.0).unwrap(), Price::from_cents(5000));
        assert_eq!(Price::from_f64(19.999).unwrap(), Price::from_cents(2000));
        assert_eq!(Price::from_f64(0.1 + 0.2).unwrap(), Price::from_cents(30));
        assert_eq!(Price::from_f64(-0.5).unwrap_err(), TypeError::NegativePrice);
        assert!(matches!(
            Price::from_f64(f64::NAN),
            Err(TypeError::InvalidPrice(_))
        ));
    }

    #[test]
    fn positivity() {
        assert!(!Price::zero().is_positive());
        assert!(Price::from_cents(1).is_positive());
    }

    #[test]
    fn serializes_as_canonical_string() {
        let json = serde_json::to_string(&Price::from_cents(4250)).unwrap();
        assert_eq!(json, "\"42.50\"");
        let parsed: Price = serde_json::from_str("\"42.5\"").unwrap();
        assert_eq!(parsed, Price::from_cents(4250));
    }
}
