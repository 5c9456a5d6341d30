//! In-memory matching core for the prediction-market venue
//!
//! One order book per (market, outcome) pair, held in a shared
//! registry. Books are caches over the durable store: they can always
//! be rebuilt from the open orders table.

pub mod book;
pub mod registry;

pub use book::{MatchResult, OrderBook};
pub use registry::{BookRegistry, Depth};
