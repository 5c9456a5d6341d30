//! Order lifecycle types

use crate::numeric::{Price, Quantity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Parse from the wire/database representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "buy" => Some(Side::Buy),
            "sell" => Some(Side::Sell),
            _ => None,
        }
    }

    /// Wire/database representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

/// Order status
///
/// An order starts open, moves to partial on its first fill, and ends
/// filled or cancelled. Cancellation is forbidden once fully filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Partial,
    Filled,
    Cancelled,
}

impl OrderStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(OrderStatus::Open),
            "partial" => Some(OrderStatus::Partial),
            "filled" => Some(OrderStatus::Filled),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Open => "open",
            OrderStatus::Partial => "partial",
            OrderStatus::Filled => "filled",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// A limit order on one (market, outcome) pair
///
/// Identity is assigned by the store at insert; a fresh order carries
/// id 0 until persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub market_id: i64,
    pub user_address: String,
    pub outcome: i16,
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
    pub filled_quantity: Quantity,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Create a new open order awaiting persistence
    pub fn new(
        market_id: i64,
        user_address: impl Into<String>,
        outcome: i16,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            market_id,
            user_address: user_address.into(),
            outcome,
            side,
            price,
            quantity,
            filled_quantity: Quantity::zero(),
            status: OrderStatus::Open,
            created_at: now,
            updated_at: now,
        }
    }

    /// Unfilled portion of the order
    pub fn remaining(&self) -> Quantity {
        self.quantity - self.filled_quantity
    }

    /// Apply a fill and recompute the status
    ///
    /// # Panics
    /// Panics if the fill exceeds the remaining quantity
    pub fn apply_fill(&mut self, quantity: Quantity) {
        assert!(
            quantity <= self.remaining(),
            "fill exceeds remaining quantity"
        );

        self.filled_quantity = self.filled_quantity + quantity;
        self.status = if self.remaining().is_zero() {
            OrderStatus::Filled
        } else if !self.filled_quantity.is_zero() {
            OrderStatus::Partial
        } else {
            OrderStatus::Open
        };
    }

    /// Only open and partially filled orders may be cancelled
    pub fn is_cancellable(&self) -> bool {
        matches!(self.status, OrderStatus::Open | OrderStatus::Partial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buy_order(price: &str, qty: &str) -> Order {
        Order::new(
            1,
            "0x00000000000000000000000000000000000000aa",
            1,
            Side::Buy,
            Price::from_str(price).unwrap(),
            Quantity::from_str(qty).unwrap(),
        )
    }

    #[test]
    fn test_side_round_trip() {
        assert_eq!(Side::parse("buy"), Some(Side::Buy));
        assert_eq!(Side::parse("sell"), Some(Side::Sell));
        assert_eq!(Side::parse("hold"), None);
        assert_eq!(Side::Buy.as_str(), "buy");
    }

    #[test]
    fn test_new_order_is_open() {
        let order = buy_order("0.40", "10");
        assert_eq!(order.status, OrderStatus::Open);
        assert_eq!(order.remaining(), Quantity::from_str("10").unwrap());
        assert!(order.is_cancellable());
    }

    #[test]
    fn test_fill_transitions() {
        let mut order = buy_order("0.40", "10");

        order.apply_fill(Quantity::from_str("3").unwrap());
        assert_eq!(order.status, OrderStatus::Partial);
        assert_eq!(order.remaining(), Quantity::from_str("7").unwrap());
        assert!(order.is_cancellable());

        order.apply_fill(Quantity::from_str("7").unwrap());
        assert_eq!(order.status, OrderStatus::Filled);
        assert!(order.remaining().is_zero());
        assert!(!order.is_cancellable());
    }

    #[test]
    #[should_panic(expected = "fill exceeds remaining quantity")]
    fn test_overfill_panics() {
        let mut order = buy_order("0.40", "10");
        order.apply_fill(Quantity::from_str("11").unwrap());
    }

    #[test]
    fn test_order_json_shape() {
        let order = buy_order("0.40", "10");
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["side"], "buy");
        assert_eq!(json["status"], "open");
        assert_eq!(json["price"], "0.40");
        assert_eq!(json["filled_quantity"], "0");
    }
}
