//! User collateral balances
//!
//! Each user holds one balance row: `available` is free collateral,
//! `locked` is reserved against open buy orders. Both are non-negative
//! at every observable instant; only the placement and cancellation
//! coordinators move value between them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserBalance {
    pub user_address: String,
    pub available: Decimal,
    pub locked: Decimal,
    pub updated_at: DateTime<Utc>,
}

impl UserBalance {
    /// Whether `available` covers the given collateral requirement
    pub fn can_cover(&self, amount: Decimal) -> bool {
        self.available >= amount
    }
}

/// Direction of a balance movement, for the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceChange {
    Lock,
    Unlock,
}

impl BalanceChange {
    pub fn as_str(&self) -> &'static str {
        match self {
            BalanceChange::Lock => "lock",
            BalanceChange::Unlock => "unlock",
        }
    }
}

/// Write-only audit record of a single balance movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceLog {
    pub id: i64,
    pub user_address: String,
    pub change_type: String,
    pub amount: Decimal,
    pub balance_after: Decimal,
    pub reference_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}
