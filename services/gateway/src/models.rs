//! Request and response bodies for the HTTP surface

use chrono::{DateTime, Utc};
use matching_engine::Depth;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::{Order, Price, Quantity, Trade};

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOrderRequest {
    pub market_id: i64,
    pub outcome: i16,
    pub side: String,
    pub price: Decimal,
    pub quantity: Decimal,
}

#[derive(Debug, Serialize)]
pub struct PlaceOrderResponse {
    pub order: Order,
    pub trades: Vec<Trade>,
}

#[derive(Debug, Serialize)]
pub struct PriceLevelResponse {
    pub price: Price,
    pub quantity: Quantity,
}

/// Aggregated book depth: buys price-descending, sells price-ascending
#[derive(Debug, Serialize)]
pub struct OrderBookResponse {
    pub buys: Vec<PriceLevelResponse>,
    pub sells: Vec<PriceLevelResponse>,
}

impl OrderBookResponse {
    pub fn empty() -> Self {
        Self {
            buys: Vec::new(),
            sells: Vec::new(),
        }
    }
}

impl From<Depth> for OrderBookResponse {
    fn from(depth: Depth) -> Self {
        let to_levels = |side: Vec<(Price, Quantity)>| {
            side.into_iter()
                .map(|(price, quantity)| PriceLevelResponse { price, quantity })
                .collect()
        };
        Self {
            buys: to_levels(depth.buys),
            sells: to_levels(depth.sells),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateMarketRequest {
    pub question: String,
    #[serde(default)]
    pub description: String,
    pub outcomes: Vec<String>,
    pub end_time: DateTime<Utc>,
    pub resolution_time: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ResolveMarketRequest {
    pub outcome: i16,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OutcomeQuery {
    pub outcome: Option<i16>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::*;

    #[test]
    fn test_place_order_request_accepts_string_numbers() {
        // wallets send price and quantity as strings
        let body = r#"{
            "market_id": 1,
            "outcome": 1,
            "side": "buy",
            "price": "0.40",
            "quantity": "10"
        }"#;

        let req: PlaceOrderRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.side, "buy");
        assert_eq!(req.price, Decimal::from_str("0.40").unwrap());
        assert_eq!(req.quantity, Decimal::from(10));
    }

    #[test]
    fn test_order_book_response_shape() {
        let response = OrderBookResponse {
            buys: vec![PriceLevelResponse {
                price: Price::from_str("0.40").unwrap(),
                quantity: Quantity::from_str("10").unwrap(),
            }],
            sells: vec![],
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["buys"][0]["price"], "0.40");
        assert_eq!(json["buys"][0]["quantity"], "10");
        assert!(json["sells"].as_array().unwrap().is_empty());
    }
}
