//! A single price level: a FIFO queue of resting orders at one price.

use crate::types::Order;
use std::collections::VecDeque;

/// All resting orders at one price, in arrival order. Time priority within
/// a level is the queue order: earliest submission at the front.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    price: u64,
    orders: VecDeque<Order>,
    /// Cached sum of remaining quantities, kept in sync by every mutation.
    total_remaining: u64,
}

impl PriceLevel {
    /// Create an empty level at the given price
    pub fn new(price: u64) -> Self {
        Self {
            price,
            orders: VecDeque::new(),
            total_remaining: 0,
        }
    }

    /// The price of this level
    pub fn price(&self) -> u64 {
        self.price
    }

    /// Number of resting orders at this level
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Sum of remaining quantities across all resting orders
    pub fn total_remaining(&self) -> u64 {
        self.total_remaining
    }

    /// Append an order at the back of the queue
    pub fn push_order(&mut self, order: Order) {
        self.total_remaining = self.total_remaining.saturating_add(order.remaining());
        self.orders.push_back(order);
    }

    /// The order with the highest time priority, if any
    pub fn front(&self) -> Option<&Order> {
        self.orders.front()
    }

    pub(crate) fn front_mut(&mut self) -> Option<&mut Order> {
        self.orders.front_mut()
    }

    /// Remove and return the front order
    pub(crate) fn pop_front(&mut self) -> Option<Order> {
        let order = self.orders.pop_front();
        if let Some(ref o) = order {
            self.total_remaining = self.total_remaining.saturating_sub(o.remaining());
        }
        order
    }

    /// Reduce the cached remaining total after a fill against an order that
    /// stays in the queue.
    pub(crate) fn reduce_total(&mut self, quantity: u64) {
        self.total_remaining = self.total_remaining.saturating_sub(quantity);
    }

    /// Remove an order by id, preserving queue order of the rest
    pub(crate) fn remove_order(&mut self, order_id: crate::types::OrderId) -> Option<Order> {
        let index = self.orders.iter().position(|o| o.id == order_id)?;
        let order = self.orders.remove(index)?;
        self.total_remaining = self.total_remaining.saturating_sub(order.remaining());
        Some(order)
    }

    /// Find an order by id
    pub fn get_order(&self, order_id: crate::types::OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    pub(crate) fn get_order_mut(&mut self, order_id: crate::types::OrderId) -> Option<&mut Order> {
        self.orders.iter_mut().find(|o| o.id == order_id)
    }

    /// Iterate resting orders in priority order
    pub fn iter_orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }
}
