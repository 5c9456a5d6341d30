//! Fixed-scale decimal types for contract prices and quantities
//!
//! Uses rust_decimal for exact arithmetic (no floating-point drift).
//! Prices carry 4 fractional digits, quantities 6; both are normalized
//! on construction so equality and ordering ignore trailing zeros.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Number of fractional digits carried by a [`Price`].
pub const PRICE_SCALE: u32 = 4;

/// Number of fractional digits carried by a [`Quantity`].
pub const QUANTITY_SCALE: u32 = 6;

/// Contract price as a fixed-scale decimal
///
/// Always strictly positive. Serialized as a string to prevent JSON
/// number precision loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl Price {
    /// Create a new Price from a Decimal
    ///
    /// # Panics
    /// Panics if the price is zero or negative
    pub fn new(value: Decimal) -> Self {
        Self::try_new(value).expect("Price must be positive")
    }

    /// Try to create a Price, returning None if not strictly positive
    pub fn try_new(value: Decimal) -> Option<Self> {
        if value > Decimal::ZERO {
            Some(Self(value.round_dp_with_strategy(
                PRICE_SCALE,
                RoundingStrategy::MidpointAwayFromZero,
            )))
        } else {
            None
        }
    }

    /// Parse from a string such as "0.55"
    pub fn from_str(s: &str) -> Result<Self, rust_decimal::Error> {
        let decimal = Decimal::from_str(s)?;
        Ok(Self::new(decimal))
    }

    /// Get the inner decimal value
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let decimal = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::try_new(decimal).ok_or_else(|| serde::de::Error::custom("price must be positive"))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contract quantity as a fixed-scale decimal
///
/// Non-negative; zero is a first-class value (filled quantity of a fresh
/// order). Serialized as a string to prevent JSON number precision loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(Decimal);

impl Quantity {
    /// Create a new Quantity from a Decimal
    ///
    /// # Panics
    /// Panics if the quantity is negative
    pub fn new(value: Decimal) -> Self {
        Self::try_new(value).expect("Quantity must be non-negative")
    }

    /// Try to create a Quantity, returning None if negative
    pub fn try_new(value: Decimal) -> Option<Self> {
        if value >= Decimal::ZERO {
            Some(Self(value.round_dp_with_strategy(
                QUANTITY_SCALE,
                RoundingStrategy::MidpointAwayFromZero,
            )))
        } else {
            None
        }
    }

    /// Zero quantity
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Parse from a string such as "10.5"
    pub fn from_str(s: &str) -> Result<Self, rust_decimal::Error> {
        let decimal = Decimal::from_str(s)?;
        Ok(Self::new(decimal))
    }

    /// Get the inner decimal value
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Check if quantity is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// The smaller of two quantities
    pub fn min(self, other: Self) -> Self {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }

    /// Collateral value of this quantity at the given price
    pub fn notional(&self, price: Price) -> Decimal {
        self.0 * price.as_decimal()
    }
}

impl Add for Quantity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Quantity {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        assert!(self.0 >= rhs.0, "Quantity subtraction would go negative");
        Self(self.0 - rhs.0)
    }
}

impl Serialize for Quantity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let decimal = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::try_new(decimal)
            .ok_or_else(|| serde::de::Error::custom("quantity cannot be negative"))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_creation() {
        let price = Price::from_str("0.55").unwrap();
        assert_eq!(price.as_decimal(), Decimal::from_str("0.55").unwrap());
    }

    #[test]
    fn test_price_rejects_non_positive() {
        assert!(Price::try_new(Decimal::ZERO).is_none());
        assert!(Price::try_new(Decimal::from(-1)).is_none());
    }

    #[test]
    fn test_price_scale_normalization() {
        // 5 fractional digits rounds half-up to the 4-digit tick
        let price = Price::from_str("0.12345").unwrap();
        assert_eq!(price.to_string(), "0.1235");
    }

    #[test]
    fn test_price_equality_ignores_trailing_zeros() {
        let a = Price::from_str("0.5000").unwrap();
        let b = Price::from_str("0.5").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_price_ordering() {
        let low = Price::from_str("0.40").unwrap();
        let high = Price::from_str("0.60").unwrap();
        assert!(low < high);
    }

    #[test]
    fn test_price_serialization() {
        let price = Price::from_str("0.55").unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"0.55\"");

        let deserialized: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(price, deserialized);
    }

    #[test]
    fn test_quantity_zero() {
        let qty = Quantity::zero();
        assert!(qty.is_zero());
    }

    #[test]
    fn test_quantity_arithmetic() {
        let q1 = Quantity::from_str("2.5").unwrap();
        let q2 = Quantity::from_str("1.5").unwrap();

        assert_eq!((q1 + q2).as_decimal(), Decimal::from_str("4.0").unwrap());
        assert_eq!((q1 - q2).as_decimal(), Decimal::from_str("1.0").unwrap());
    }

    #[test]
    #[should_panic(expected = "Quantity subtraction would go negative")]
    fn test_quantity_sub_negative_panics() {
        let q1 = Quantity::from_str("1.0").unwrap();
        let q2 = Quantity::from_str("2.0").unwrap();
        let _ = q1 - q2;
    }

    #[test]
    fn test_quantity_min() {
        let q1 = Quantity::from_str("3.0").unwrap();
        let q2 = Quantity::from_str("5.0").unwrap();
        assert_eq!(q1.min(q2), q1);
        assert_eq!(q2.min(q1), q1);
    }

    #[test]
    fn test_notional() {
        let qty = Quantity::from_str("100").unwrap();
        let price = Price::from_str("0.50").unwrap();
        assert_eq!(qty.notional(price), Decimal::from(50));
    }

    #[test]
    fn test_quantity_deserializes_from_number_and_string() {
        let from_str: Quantity = serde_json::from_str("\"1.5\"").unwrap();
        let from_num: Quantity = serde_json::from_str("1.5").unwrap();
        assert_eq!(from_str, from_num);
    }
}
