//! Trade persistence

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use types::{Price, Quantity, Trade};

use super::corrupt_row;
use crate::error::ApiError;

#[derive(Debug, sqlx::FromRow)]
struct TradeRow {
    id: i64,
    market_id: i64,
    maker_order_id: i64,
    taker_order_id: i64,
    maker_address: String,
    taker_address: String,
    outcome: i16,
    price: Decimal,
    quantity: Decimal,
    chain_settled: bool,
    created_at: DateTime<Utc>,
}

impl TradeRow {
    fn into_trade(self) -> Result<Trade, ApiError> {
        let id = self.id;
        let price = Price::try_new(self.price).ok_or_else(|| corrupt_row("trades", id))?;
        let quantity = Quantity::try_new(self.quantity).ok_or_else(|| corrupt_row("trades", id))?;

        Ok(Trade {
            id: self.id,
            market_id: self.market_id,
            maker_order_id: self.maker_order_id,
            taker_order_id: self.taker_order_id,
            maker_address: self.maker_address,
            taker_address: self.taker_address,
            outcome: self.outcome,
            price,
            quantity,
            chain_settled: self.chain_settled,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct InsertedTrade {
    id: i64,
    created_at: DateTime<Utc>,
}

/// Insert one emitted trade inside the placement transaction.
pub async fn insert_trade(
    tx: &mut Transaction<'_, Postgres>,
    trade: &Trade,
) -> Result<(i64, DateTime<Utc>), ApiError> {
    let row = sqlx::query_as::<_, InsertedTrade>(
        "INSERT INTO trades \
         (market_id, maker_order_id, taker_order_id, maker_address, taker_address, \
          outcome, price, quantity, chain_settled) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         RETURNING id, created_at",
    )
    .bind(trade.market_id)
    .bind(trade.maker_order_id)
    .bind(trade.taker_order_id)
    .bind(&trade.maker_address)
    .bind(&trade.taker_address)
    .bind(trade.outcome)
    .bind(trade.price.as_decimal())
    .bind(trade.quantity.as_decimal())
    .bind(trade.chain_settled)
    .fetch_one(&mut **tx)
    .await?;

    Ok((row.id, row.created_at))
}

/// The most recent trades for a market.
pub async fn list_market_trades(pool: &PgPool, market_id: i64) -> Result<Vec<Trade>, ApiError> {
    let rows = sqlx::query_as::<_, TradeRow>(
        "SELECT * FROM trades WHERE market_id = $1 ORDER BY created_at DESC LIMIT 100",
    )
    .bind(market_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(TradeRow::into_trade).collect()
}
