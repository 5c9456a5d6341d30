//! Durable store: the single source of truth
//!
//! Plain sqlx queries against Postgres. Row structs stay private to
//! each module and convert into the shared domain types; a row that
//! fails conversion means corrupted data and surfaces as an internal
//! error after rollback.

pub mod balances;
pub mod markets;
pub mod orders;
pub mod trades;

use crate::error::ApiError;

/// Internal error for a row that no longer parses into its domain type
pub(crate) fn corrupt_row(table: &str, id: i64) -> ApiError {
    ApiError::Internal(anyhow::anyhow!("corrupt {} row id={}", table, id))
}
