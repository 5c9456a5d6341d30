//! Startup book recovery
//!
//! The in-memory books are caches over the orders table. On boot every
//! open and partially filled order is replayed into its book in
//! identity order, which reproduces arrival priority without
//! generating trades: resting orders were already matched against
//! everything that crossed them when they arrived.

use matching_engine::BookRegistry;
use sqlx::PgPool;

use crate::error::ApiError;
use crate::store;

pub async fn rebuild_books(pool: &PgPool, books: &BookRegistry) -> Result<usize, ApiError> {
    let orders = store::orders::list_resting_orders(pool).await?;
    let count = orders.len();

    for order in orders {
        let book_ref = books.get_or_create(order.market_id, order.outcome).await;
        let mut book = book_ref.lock().await;
        book.insert_resting(order);
    }

    if count > 0 {
        tracing::info!(orders = count, "rebuilt order books from store");
    }
    Ok(count)
}
