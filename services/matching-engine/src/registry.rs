//! Registry of order books, one per (market, outcome) pair
//!
//! The map itself sits behind a read/write lock; each book behind its
//! own async mutex so different books make progress in parallel while
//! all work on one book serializes. Book guards may be held across
//! database awaits by the coordinators.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use types::{Price, Quantity};

use crate::book::OrderBook;

/// Immutable aggregated copy of one book's two sides
///
/// Never aliases the live book; safe to hand to serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct Depth {
    pub buys: Vec<(Price, Quantity)>,
    pub sells: Vec<(Price, Quantity)>,
}

/// Shared map from (market id, outcome) to its order book
#[derive(Debug, Default)]
pub struct BookRegistry {
    books: RwLock<HashMap<(i64, i16), Arc<Mutex<OrderBook>>>>,
}

impl BookRegistry {
    pub fn new() -> Self {
        Self {
            books: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch the book for the pair, creating it on first reference
    ///
    /// Double-checks under the write lock so two concurrent creators
    /// end up sharing the same book.
    pub async fn get_or_create(&self, market_id: i64, outcome: i16) -> Arc<Mutex<OrderBook>> {
        let key = (market_id, outcome);

        {
            let books = self.books.read().await;
            if let Some(book) = books.get(&key) {
                return Arc::clone(book);
            }
        }

        let mut books = self.books.write().await;
        if let Some(book) = books.get(&key) {
            return Arc::clone(book);
        }

        let book = Arc::new(Mutex::new(OrderBook::new(market_id, outcome)));
        books.insert(key, Arc::clone(&book));
        book
    }

    /// Aggregated depth for the pair, or None if no book exists yet
    pub async fn snapshot_depth(&self, market_id: i64, outcome: i16) -> Option<Depth> {
        let book = {
            let books = self.books.read().await;
            books.get(&(market_id, outcome)).map(Arc::clone)
        }?;

        let book = book.lock().await;
        let (buys, sells) = book.depth();
        Some(Depth { buys, sells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{Order, Side};

    fn order(id: i64, side: Side, price: &str, qty: &str) -> Order {
        let mut order = Order::new(
            1,
            "0x00000000000000000000000000000000000000aa",
            1,
            side,
            Price::from_str(price).unwrap(),
            Quantity::from_str(qty).unwrap(),
        );
        order.id = id;
        order
    }

    #[tokio::test]
    async fn test_get_or_create_returns_same_book() {
        let registry = BookRegistry::new();

        let first = registry.get_or_create(1, 1).await;
        let second = registry.get_or_create(1, 1).await;

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_distinct_pairs_get_distinct_books() {
        let registry = BookRegistry::new();

        let yes = registry.get_or_create(1, 1).await;
        let no = registry.get_or_create(1, 2).await;

        assert!(!Arc::ptr_eq(&yes, &no));
    }

    #[tokio::test]
    async fn test_snapshot_depth_missing_pair_is_none() {
        let registry = BookRegistry::new();
        assert!(registry.snapshot_depth(42, 1).await.is_none());
    }

    #[tokio::test]
    async fn test_snapshot_depth_aggregates_levels() {
        let registry = BookRegistry::new();
        let book = registry.get_or_create(1, 1).await;

        {
            let mut book = book.lock().await;
            book.add_order(order(1, Side::Buy, "0.40", "10"));
            book.add_order(order(2, Side::Buy, "0.40", "5"));
            book.add_order(order(3, Side::Sell, "0.60", "3"));
        }

        let depth = registry.snapshot_depth(1, 1).await.unwrap();
        assert_eq!(
            depth.buys,
            vec![(
                Price::from_str("0.40").unwrap(),
                Quantity::from_str("15").unwrap()
            )]
        );
        assert_eq!(
            depth.sells,
            vec![(
                Price::from_str("0.60").unwrap(),
                Quantity::from_str("3").unwrap()
            )]
        );
    }
}
