//! Price level with a FIFO queue of resting orders
//!
//! One level holds every resting order at a single price on one side,
//! in arrival order. The aggregate quantity always equals the sum of
//! the queued orders' remaining quantities.

use std::collections::VecDeque;
use types::{Order, Price, Quantity};

/// All resting orders at one price, oldest first
#[derive(Debug, Clone)]
pub struct PriceLevel {
    price: Price,
    /// Sum of remaining quantities of the queued orders
    quantity: Quantity,
    orders: VecDeque<Order>,
}

impl PriceLevel {
    /// Create a level seeded with its first order
    pub fn new(order: Order) -> Self {
        let quantity = order.remaining();
        Self {
            price: order.price,
            quantity,
            orders: VecDeque::from([order]),
        }
    }

    pub fn price(&self) -> Price {
        self.price
    }

    /// Aggregate remaining quantity at this level
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Append an order at the back of the queue (time priority)
    pub fn push_back(&mut self, order: Order) {
        self.quantity = self.quantity + order.remaining();
        self.orders.push_back(order);
    }

    /// The oldest resting order, mutable so fills apply in place
    pub fn front_mut(&mut self) -> Option<&mut Order> {
        self.orders.front_mut()
    }

    /// Pop the oldest order, subtracting whatever it still had left
    pub fn pop_front(&mut self) -> Option<Order> {
        let order = self.orders.pop_front()?;
        self.quantity = self.quantity - order.remaining();
        Some(order)
    }

    /// Reduce the aggregate quantity after a fill against the front order
    pub fn reduce(&mut self, quantity: Quantity) {
        self.quantity = self.quantity - quantity;
    }

    /// Remove an order by identity
    ///
    /// Returns the removed order, or None if the identity is not queued.
    pub fn remove(&mut self, order_id: i64) -> Option<Order> {
        let position = self.orders.iter().position(|o| o.id == order_id)?;
        let order = self.orders.remove(position)?;
        self.quantity = self.quantity - order.remaining();
        Some(order)
    }
}
