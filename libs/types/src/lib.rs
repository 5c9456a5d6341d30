//! Shared domain types for the prediction-market venue
//!
//! Everything that crosses a crate boundary lives here: fixed-scale
//! decimals, market metadata, orders, trades, and user balances.

pub mod balance;
pub mod market;
pub mod numeric;
pub mod order;
pub mod trade;

pub use balance::{BalanceChange, BalanceLog, UserBalance};
pub use market::{Market, MarketStatus};
pub use numeric::{Price, Quantity, PRICE_SCALE, QUANTITY_SCALE};
pub use order::{Order, OrderStatus, Side};
pub use trade::Trade;
