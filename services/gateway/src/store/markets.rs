//! Market persistence

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use types::{Market, MarketStatus};

use super::corrupt_row;
use crate::error::ApiError;

#[derive(Debug, sqlx::FromRow)]
struct MarketRow {
    id: i64,
    question: String,
    description: String,
    outcomes: serde_json::Value,
    end_time: DateTime<Utc>,
    resolution_time: DateTime<Utc>,
    resolved_outcome: Option<i16>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl MarketRow {
    fn into_market(self) -> Result<Market, ApiError> {
        let id = self.id;
        let outcomes: Vec<String> =
            serde_json::from_value(self.outcomes).map_err(|_| corrupt_row("markets", id))?;
        let status = MarketStatus::parse(&self.status).ok_or_else(|| corrupt_row("markets", id))?;

        Ok(Market {
            id: self.id,
            question: self.question,
            description: self.description,
            outcomes,
            end_time: self.end_time,
            resolution_time: self.resolution_time,
            resolved_outcome: self.resolved_outcome,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

pub async fn get_market(pool: &PgPool, market_id: i64) -> Result<Option<Market>, ApiError> {
    let row = sqlx::query_as::<_, MarketRow>("SELECT * FROM markets WHERE id = $1")
        .bind(market_id)
        .fetch_optional(pool)
        .await?;

    row.map(MarketRow::into_market).transpose()
}

/// All markets, newest first, optionally filtered by status.
pub async fn list_markets(pool: &PgPool, status: Option<&str>) -> Result<Vec<Market>, ApiError> {
    let rows = match status {
        Some(status) => {
            sqlx::query_as::<_, MarketRow>(
                "SELECT * FROM markets WHERE status = $1 ORDER BY created_at DESC",
            )
            .bind(status)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, MarketRow>("SELECT * FROM markets ORDER BY created_at DESC")
                .fetch_all(pool)
                .await?
        }
    };

    rows.into_iter().map(MarketRow::into_market).collect()
}

/// Create a market, active immediately.
pub async fn insert_market(
    pool: &PgPool,
    question: &str,
    description: &str,
    outcomes: &[String],
    end_time: DateTime<Utc>,
    resolution_time: DateTime<Utc>,
) -> Result<Market, ApiError> {
    let outcomes_json =
        serde_json::to_value(outcomes).map_err(|e| ApiError::Internal(e.into()))?;

    let row = sqlx::query_as::<_, MarketRow>(
        "INSERT INTO markets (question, description, outcomes, end_time, resolution_time, status) \
         VALUES ($1, $2, $3, $4, $5, 'active') \
         RETURNING *",
    )
    .bind(question)
    .bind(description)
    .bind(outcomes_json)
    .bind(end_time)
    .bind(resolution_time)
    .fetch_one(pool)
    .await?;

    row.into_market()
}

/// Record the winning outcome and flip the market to resolved.
pub async fn resolve_market(
    pool: &PgPool,
    market_id: i64,
    outcome: i16,
) -> Result<Market, ApiError> {
    let row = sqlx::query_as::<_, MarketRow>(
        "UPDATE markets SET resolved_outcome = $1, status = 'resolved', updated_at = NOW() \
         WHERE id = $2 \
         RETURNING *",
    )
    .bind(outcome)
    .bind(market_id)
    .fetch_one(pool)
    .await?;

    row.into_market()
}
