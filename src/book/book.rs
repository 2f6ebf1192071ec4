//! Core OrderBook implementation for managing price levels and orders

use super::level::PriceLevel;
use super::snapshot::{OrderBookSnapshot, PriceLevelSnapshot};
use crate::types::{Order, OrderId, Side};
use crate::utils::current_time_millis;
use std::collections::{BTreeMap, HashMap};
use tracing::trace;

/// The OrderBook manages sorted price levels for both bid and ask sides of
/// one trading pair. Bids match best-first from the highest price, asks
/// from the lowest; FIFO within a level gives price-time priority.
///
/// The book is a plain value; the engine serializes access per pair, so no
/// interior locking is needed here.
#[derive(Debug)]
pub struct OrderBook {
    /// The pair symbol for this order book
    symbol: String,

    /// Bid side price levels (buy orders), keyed by price
    pub(crate) bids: BTreeMap<u64, PriceLevel>,

    /// Ask side price levels (sell orders), keyed by price
    pub(crate) asks: BTreeMap<u64, PriceLevel>,

    /// Map from order ID to (price, side) for fast lookups without walking
    /// every price level
    pub(crate) order_locations: HashMap<OrderId, (u64, Side)>,

    /// The last price at which a trade occurred on this book
    last_trade_price: Option<u64>,
}

impl OrderBook {
    /// Create a new order book for the given pair symbol
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            order_locations: HashMap::new(),
            last_trade_price: None,
        }
    }

    /// Get the symbol of this order book
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Get the best bid price, if any
    pub fn best_bid(&self) -> Option<u64> {
        self.bids.keys().next_back().copied()
    }

    /// Get the best ask price, if any
    pub fn best_ask(&self) -> Option<u64> {
        self.asks.keys().next().copied()
    }

    /// Get the mid price (average of best bid and best ask)
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid as f64 + ask as f64) / 2.0),
            _ => None,
        }
    }

    /// Get the spread (best ask - best bid)
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask.saturating_sub(bid)),
            _ => None,
        }
    }

    /// Get the last trade price, if any
    pub fn last_trade_price(&self) -> Option<u64> {
        self.last_trade_price
    }

    pub(crate) fn set_last_trade_price(&mut self, price: u64) {
        self.last_trade_price = Some(price);
    }

    /// Number of resting orders across both sides
    pub fn order_count(&self) -> usize {
        self.order_locations.len()
    }

    /// Total remaining quantity resting on one side
    pub fn side_volume(&self, side: Side) -> u64 {
        let levels = match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        };
        levels.values().map(|level| level.total_remaining()).sum()
    }

    /// Insert a resting order at the given price, maintaining sort and FIFO
    /// invariants at insertion time.
    pub fn insert(&mut self, price: u64, order: Order) {
        trace!(
            "Order book {}: resting {} {} {} at {}",
            self.symbol, order.side, order.id, order.amount, price
        );
        let side = order.side;
        let levels = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        self.order_locations.insert(order.id, (price, side));
        levels
            .entry(price)
            .or_insert_with(|| PriceLevel::new(price))
            .push_order(order);
    }

    /// Remove an order by ID, returning it. Empty levels are dropped.
    pub fn remove(&mut self, order_id: OrderId) -> Option<Order> {
        let (price, side) = self.order_locations.remove(&order_id)?;
        let levels = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        let mut removed = None;
        let mut level_empty = false;
        if let Some(level) = levels.get_mut(&price) {
            removed = level.remove_order(order_id);
            level_empty = level.order_count() == 0;
        }
        if level_empty {
            levels.remove(&price);
        }
        if removed.is_some() {
            trace!("Order book {}: removed order {}", self.symbol, order_id);
        }
        removed
    }

    /// Get an order by ID
    pub fn get_order(&self, order_id: OrderId) -> Option<&Order> {
        let (price, side) = self.order_locations.get(&order_id)?;
        let levels = match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        };
        levels.get(price)?.get_order(order_id)
    }

    /// Reduce the amount of a resting order in place. The order keeps its
    /// time priority. Fails (returns `None`) if the order is unknown or the
    /// new amount would fall below what is already filled.
    pub fn reduce_amount(&mut self, order_id: OrderId, new_amount: u64) -> Option<Order> {
        let (price, side) = *self.order_locations.get(&order_id)?;
        let levels = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        let level = levels.get_mut(&price)?;
        let (delta, consumed, updated) = {
            let order = level.get_order_mut(order_id)?;
            if new_amount < order.filled_amount.max(1) || new_amount >= order.amount {
                return None;
            }
            let delta = order.amount - new_amount;
            order.amount = new_amount;
            let consumed = order.filled_amount == order.amount;
            if consumed {
                // Reduction consumed exactly the remainder; treat as filled.
                order.status = crate::types::OrderStatus::Filled;
            }
            (delta, consumed, order.clone())
        };
        level.reduce_total(delta);
        if consumed {
            let done = level.remove_order(order_id);
            if level.order_count() == 0 {
                levels.remove(&price);
            }
            self.order_locations.remove(&order_id);
            return done;
        }
        Some(updated)
    }

    /// Get all orders resting at a specific price level
    pub fn orders_at_price(&self, price: u64, side: Side) -> Vec<Order> {
        let levels = match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        };
        levels
            .get(&price)
            .map(|level| level.iter_orders().cloned().collect())
            .unwrap_or_default()
    }

    /// Get all resting orders in the book
    pub fn all_orders(&self) -> Vec<Order> {
        let mut result = Vec::with_capacity(self.order_locations.len());
        for level in self.bids.values().chain(self.asks.values()) {
            result.extend(level.iter_orders().cloned());
        }
        result
    }

    /// Create a depth-limited snapshot of the current book state
    pub fn snapshot(&self, depth: usize) -> OrderBookSnapshot {
        let bid_levels = self
            .bids
            .values()
            .rev()
            .take(depth)
            .map(PriceLevelSnapshot::from_level)
            .collect();
        let ask_levels = self
            .asks
            .values()
            .take(depth)
            .map(PriceLevelSnapshot::from_level)
            .collect();

        OrderBookSnapshot {
            symbol: self.symbol.clone(),
            timestamp: current_time_millis(),
            bids: bid_levels,
            asks: ask_levels,
        }
    }
}
