//! Order persistence
//!
//! Identity comes from the `orders` BIGSERIAL, which also defines
//! arrival priority inside the matching engine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use types::{Order, OrderStatus, Price, Quantity, Side};

use super::corrupt_row;
use crate::error::ApiError;

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    market_id: i64,
    user_address: String,
    outcome: i16,
    side: String,
    price: Decimal,
    quantity: Decimal,
    filled_quantity: Decimal,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self) -> Result<Order, ApiError> {
        let id = self.id;
        let parse = || -> Option<Order> {
            Some(Order {
                id: self.id,
                market_id: self.market_id,
                user_address: self.user_address,
                outcome: self.outcome,
                side: Side::parse(&self.side)?,
                price: Price::try_new(self.price)?,
                quantity: Quantity::try_new(self.quantity)?,
                filled_quantity: Quantity::try_new(self.filled_quantity)?,
                status: OrderStatus::parse(&self.status)?,
                created_at: self.created_at,
                updated_at: self.updated_at,
            })
        };
        parse().ok_or_else(|| corrupt_row("orders", id))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct InsertedOrder {
    id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Insert a fresh order inside the placement transaction.
///
/// Returns the assigned identity and store timestamps.
pub async fn insert_order(
    tx: &mut Transaction<'_, Postgres>,
    order: &Order,
) -> Result<(i64, DateTime<Utc>, DateTime<Utc>), ApiError> {
    let row = sqlx::query_as::<_, InsertedOrder>(
        "INSERT INTO orders \
         (market_id, user_address, outcome, side, price, quantity, filled_quantity, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         RETURNING id, created_at, updated_at",
    )
    .bind(order.market_id)
    .bind(&order.user_address)
    .bind(order.outcome)
    .bind(order.side.as_str())
    .bind(order.price.as_decimal())
    .bind(order.quantity.as_decimal())
    .bind(order.filled_quantity.as_decimal())
    .bind(order.status.as_str())
    .fetch_one(&mut **tx)
    .await?;

    Ok((row.id, row.created_at, row.updated_at))
}

/// Persist a new fill state for an order touched by matching.
pub async fn update_fill(
    tx: &mut Transaction<'_, Postgres>,
    order_id: i64,
    filled_quantity: Quantity,
    status: OrderStatus,
) -> Result<(), ApiError> {
    sqlx::query(
        "UPDATE orders SET filled_quantity = $1, status = $2, updated_at = NOW() WHERE id = $3",
    )
    .bind(filled_quantity.as_decimal())
    .bind(status.as_str())
    .bind(order_id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Mark an order cancelled inside the cancellation transaction.
pub async fn mark_cancelled(
    tx: &mut Transaction<'_, Postgres>,
    order_id: i64,
) -> Result<(), ApiError> {
    sqlx::query("UPDATE orders SET status = 'cancelled', updated_at = NOW() WHERE id = $1")
        .bind(order_id)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

pub async fn get_order(pool: &PgPool, order_id: i64) -> Result<Option<Order>, ApiError> {
    let row = sqlx::query_as::<_, OrderRow>("SELECT * FROM orders WHERE id = $1")
        .bind(order_id)
        .fetch_optional(pool)
        .await?;

    row.map(OrderRow::into_order).transpose()
}

/// A user's recent orders, optionally filtered by status.
pub async fn list_user_orders(
    pool: &PgPool,
    user_address: &str,
    status: Option<&str>,
) -> Result<Vec<Order>, ApiError> {
    let rows = match status {
        Some(status) => {
            sqlx::query_as::<_, OrderRow>(
                "SELECT * FROM orders WHERE user_address = $1 AND status = $2 \
                 ORDER BY created_at DESC LIMIT 100",
            )
            .bind(user_address)
            .bind(status)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, OrderRow>(
                "SELECT * FROM orders WHERE user_address = $1 \
                 ORDER BY created_at DESC LIMIT 100",
            )
            .bind(user_address)
            .fetch_all(pool)
            .await?
        }
    };

    rows.into_iter().map(OrderRow::into_order).collect()
}

/// Every open or partially filled order, oldest identity first.
///
/// Feeds the startup book rebuild; identity order reproduces arrival
/// priority.
pub async fn list_resting_orders(pool: &PgPool) -> Result<Vec<Order>, ApiError> {
    let rows = sqlx::query_as::<_, OrderRow>(
        "SELECT * FROM orders WHERE status IN ('open', 'partial') ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(OrderRow::into_order).collect()
}
