//! Buy-side book: price levels sorted best (highest) first
//!
//! Backed by a BTreeMap keyed on price, so the best bid sits at the
//! map's upper end and iteration is deterministic.

use std::collections::BTreeMap;
use types::{Order, Price, Quantity};

use super::price_level::PriceLevel;

#[derive(Debug, Clone, Default)]
pub struct BidBook {
    levels: BTreeMap<Price, PriceLevel>,
}

impl BidBook {
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Rest an order at its price, creating the level on first use
    pub fn insert(&mut self, order: Order) {
        match self.levels.get_mut(&order.price) {
            Some(level) => level.push_back(order),
            None => {
                self.levels.insert(order.price, PriceLevel::new(order));
            }
        }
    }

    /// Remove an order by identity at the given price
    ///
    /// Returns true if the order was found; an emptied level is dropped.
    pub fn remove(&mut self, order_id: i64, price: Price) -> bool {
        if let Some(level) = self.levels.get_mut(&price) {
            if level.remove(order_id).is_some() {
                if level.is_empty() {
                    self.levels.remove(&price);
                }
                return true;
            }
        }
        false
    }

    /// Best (highest) bid price
    pub fn best_price(&self) -> Option<Price> {
        self.levels.keys().next_back().copied()
    }

    /// Mutable access to the best level, for matching
    pub(crate) fn best_level_mut(&mut self) -> Option<(Price, &mut PriceLevel)> {
        self.levels
            .iter_mut()
            .next_back()
            .map(|(price, level)| (*price, level))
    }

    /// Drop the level at the given price once its queue is empty
    pub(crate) fn prune(&mut self, price: Price) {
        self.levels.remove(&price);
    }

    /// Aggregated (price, quantity) per level, best first
    pub fn depth(&self) -> Vec<(Price, Quantity)> {
        self.levels
            .iter()
            .rev()
            .map(|(price, level)| (*price, level.quantity()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}
