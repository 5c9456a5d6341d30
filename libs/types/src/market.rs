//! Market metadata
//!
//! Markets are administered outside the matching core; the core only
//! reads them to validate incoming orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Market lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketStatus {
    Pending,
    Active,
    Resolved,
    Cancelled,
}

impl MarketStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(MarketStatus::Pending),
            "active" => Some(MarketStatus::Active),
            "resolved" => Some(MarketStatus::Resolved),
            "cancelled" => Some(MarketStatus::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarketStatus::Pending => "pending",
            MarketStatus::Active => "active",
            MarketStatus::Resolved => "resolved",
            MarketStatus::Cancelled => "cancelled",
        }
    }
}

/// A prediction market with an ordered list of outcome labels
///
/// Outcome indexes are 1-based everywhere: outcome `1` is
/// `outcomes[0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    pub id: i64,
    pub question: String,
    pub description: String,
    pub outcomes: Vec<String>,
    pub end_time: DateTime<Utc>,
    pub resolution_time: DateTime<Utc>,
    pub resolved_outcome: Option<i16>,
    pub status: MarketStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Market {
    /// Whether the 1-based outcome index refers to a real outcome
    pub fn has_outcome(&self, outcome: i16) -> bool {
        outcome >= 1 && (outcome as usize) <= self.outcomes.len()
    }
}
