//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A monetary amount in the store's display currency (USD).
///
/// Backed by [`Decimal`] so cart arithmetic stays exact, but serialized
/// as a plain JSON number because that is how prices appear in the
/// persisted records and in the catalog feed.
///
/// ```
/// use techedge_core::Price;
///
/// let unit = Price::from_cents(2_999);
/// assert_eq!((unit * 2).to_string(), "$59.98");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an integer number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

// Persisted records carry prices as JSON numbers, not strings.
impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(Self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let price = Price::from_cents(2_999);
        assert_eq!(price.amount(), Decimal::new(2999, 2));
    }

    #[test]
    fn test_display_two_decimal_places() {
        assert_eq!(Price::from_cents(500).to_string(), "$5.00");
        assert_eq!(Price::from_cents(2_999).to_string(), "$29.99");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_ordering_at_threshold() {
        let threshold = Price::from_cents(15_000);
        assert!(Price::from_cents(16_000) > threshold);
        assert!(Price::from_cents(15_000) == threshold);
        assert!(!(Price::from_cents(15_000) > threshold));
    }

    #[test]
    fn test_line_total_multiplication() {
        let unit = Price::from_cents(1_050);
        assert_eq!(unit * 3, Price::from_cents(3_150));
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from_cents(100), Price::from_cents(250)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(350));
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&Price::from_cents(2_999)).unwrap();
        assert_eq!(json, "29.99");
    }

    #[test]
    fn test_deserializes_integer_and_float() {
        let from_int: Price = serde_json::from_str("150").unwrap();
        assert_eq!(from_int, Price::from_cents(15_000));

        let from_float: Price = serde_json::from_str("5.0").unwrap();
        assert_eq!(from_float, Price::from_cents(500));
    }

    #[test]
    fn test_roundtrip() {
        let price = Price::from_cents(12_345);
        let json = serde_json::to_string(&price).unwrap();
        let parsed: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, price);
    }
}
