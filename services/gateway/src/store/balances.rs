//! Balance persistence and the collateral lock protocol
//!
//! The lock is a single conditional UPDATE: the `available >= amount`
//! guard runs in the same statement as the decrement, so a concurrent
//! placement can never drive `available` negative between a read and a
//! write. Zero rows affected means insufficient funds.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use types::{BalanceChange, UserBalance};

use crate::error::ApiError;

#[derive(Debug, sqlx::FromRow)]
struct BalanceRow {
    user_address: String,
    available: Decimal,
    locked: Decimal,
    updated_at: DateTime<Utc>,
}

impl From<BalanceRow> for UserBalance {
    fn from(row: BalanceRow) -> Self {
        UserBalance {
            user_address: row.user_address,
            available: row.available,
            locked: row.locked,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AvailableAfter {
    available: Decimal,
}

pub async fn get_balance(
    pool: &PgPool,
    user_address: &str,
) -> Result<Option<UserBalance>, ApiError> {
    let row = sqlx::query_as::<_, BalanceRow>(
        "SELECT user_address, available, locked, updated_at \
         FROM user_balances WHERE user_address = $1",
    )
    .bind(user_address)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(UserBalance::from))
}

/// Move collateral from available to locked, guarded against overdraw.
///
/// Returns the available balance after the move, or None when the guard
/// rejected the update (missing row or insufficient funds); the caller
/// must roll back.
pub async fn lock_collateral(
    tx: &mut Transaction<'_, Postgres>,
    user_address: &str,
    amount: Decimal,
) -> Result<Option<Decimal>, ApiError> {
    let row = sqlx::query_as::<_, AvailableAfter>(
        "UPDATE user_balances \
         SET available = available - $2, locked = locked + $2, updated_at = NOW() \
         WHERE user_address = $1 AND available >= $2 \
         RETURNING available",
    )
    .bind(user_address)
    .bind(amount)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(row.map(|r| r.available))
}

/// Move collateral back from locked to available on cancellation.
///
/// Returns the available balance after the move; None means the balance
/// row has vanished, which is an invariant violation upstream.
pub async fn unlock_collateral(
    tx: &mut Transaction<'_, Postgres>,
    user_address: &str,
    amount: Decimal,
) -> Result<Option<Decimal>, ApiError> {
    let row = sqlx::query_as::<_, AvailableAfter>(
        "UPDATE user_balances \
         SET available = available + $2, locked = locked - $2, updated_at = NOW() \
         WHERE user_address = $1 \
         RETURNING available",
    )
    .bind(user_address)
    .bind(amount)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(row.map(|r| r.available))
}

/// Append to the write-only balance audit trail.
pub async fn insert_balance_log(
    tx: &mut Transaction<'_, Postgres>,
    user_address: &str,
    change: BalanceChange,
    amount: Decimal,
    balance_after: Decimal,
    reference_id: Option<i64>,
) -> Result<(), ApiError> {
    sqlx::query(
        "INSERT INTO balance_logs (user_address, change_type, amount, balance_after, reference_id) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(user_address)
    .bind(change.as_str())
    .bind(amount)
    .bind(balance_after)
    .bind(reference_id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
