//! Trade records emitted by the matching engine

use crate::numeric::{Price, Quantity};
use crate::order::Order;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An executed match between a resting maker order and an incoming taker
///
/// The price is always the maker's resting price; the taker receives any
/// price improvement. `chain_settled` is flipped by the settlement worker,
/// never by the matching core. Identity is assigned by the store at insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: i64,
    pub market_id: i64,
    pub maker_order_id: i64,
    pub taker_order_id: i64,
    pub maker_address: String,
    pub taker_address: String,
    pub outcome: i16,
    pub price: Price,
    pub quantity: Quantity,
    pub chain_settled: bool,
    pub created_at: DateTime<Utc>,
}

impl Trade {
    /// Build the trade for a single fill between maker and taker
    pub fn from_match(maker: &Order, taker: &Order, quantity: Quantity) -> Self {
        Self {
            id: 0,
            market_id: taker.market_id,
            maker_order_id: maker.id,
            taker_order_id: taker.id,
            maker_address: maker.user_address.clone(),
            taker_address: taker.user_address.clone(),
            outcome: taker.outcome,
            price: maker.price,
            quantity,
            chain_settled: false,
            created_at: Utc::now(),
        }
    }
}
