//! Conditional-order monitor: parked stop/take-profit/trailing orders and
//! OCO sibling links.
//!
//! Parked orders live outside the book until their trigger is reached
//! against the pair's reference price, then re-enter the engine as market
//! orders. The per-order state machine is parked → promoted →
//! matched/resting, with cancellation possible at any point before
//! promotion completes.

use crate::types::{Order, OrderId, OrderKind, Side};
use std::collections::HashMap;
use tracing::trace;

/// Per-pair set of parked conditional orders plus OCO sibling links.
#[derive(Debug, Default)]
pub(crate) struct ConditionalMonitor {
    parked: Vec<Order>,
    links: HashMap<OrderId, OrderId>,
}

impl ConditionalMonitor {
    /// Park an order until its trigger fires
    pub fn park(&mut self, order: Order) {
        trace!(
            "Parking conditional order {} ({:?}) on {}",
            order.id, order.kind, order.pair
        );
        self.parked.push(order);
    }

    /// Number of parked orders
    pub fn len(&self) -> usize {
        self.parked.len()
    }

    /// Find a parked order by id
    pub fn get(&self, order_id: OrderId) -> Option<&Order> {
        self.parked.iter().find(|o| o.id == order_id)
    }

    /// Remove a parked order by id
    pub fn remove(&mut self, order_id: OrderId) -> Option<Order> {
        let index = self.parked.iter().position(|o| o.id == order_id)?;
        Some(self.parked.swap_remove(index))
    }

    /// Snapshot of the parked orders
    pub fn orders(&self) -> Vec<Order> {
        self.parked.clone()
    }

    /// Register two orders as OCO siblings of each other
    pub fn link(&mut self, a: OrderId, b: OrderId) {
        self.links.insert(a, b);
        self.links.insert(b, a);
    }

    /// Dissolve the link involving `order_id`, returning the sibling's id.
    /// Both directions are removed so the link can fire only once.
    pub fn take_link(&mut self, order_id: OrderId) -> Option<OrderId> {
        let sibling = self.links.remove(&order_id)?;
        self.links.remove(&sibling);
        Some(sibling)
    }

    /// Ratchet trailing stops toward the reference price, then remove and
    /// return every parked order whose trigger has fired.
    pub fn drain_triggered(&mut self, reference_price: u64) -> Vec<Order> {
        for order in &mut self.parked {
            ratchet_trailing(&mut order.kind, order.side, reference_price);
        }
        let parked = std::mem::take(&mut self.parked);
        let (fired, kept): (Vec<Order>, Vec<Order>) = parked
            .into_iter()
            .partition(|order| is_triggered(order, reference_price));
        self.parked = kept;
        for order in &fired {
            trace!(
                "Conditional order {} triggered at reference price {}",
                order.id, reference_price
            );
        }
        fired
    }
}

/// Whether a parked order's trigger condition is met at the given
/// reference price.
///
/// Stop-loss protects a position: a sell fires when the price falls to the
/// stop, a buy when it rises to it. Take-profit uses the opposite
/// comparisons. Trailing stops trigger like stop-losses once ratcheted.
pub(crate) fn is_triggered(order: &Order, reference_price: u64) -> bool {
    match order.kind {
        OrderKind::StopLoss { stop_price } | OrderKind::TrailingStop { stop_price, .. } => {
            match order.side {
                Side::Sell => reference_price <= stop_price,
                Side::Buy => reference_price >= stop_price,
            }
        }
        OrderKind::TakeProfit { stop_price } => match order.side {
            Side::Sell => reference_price >= stop_price,
            Side::Buy => reference_price <= stop_price,
        },
        _ => false,
    }
}

/// Recompute a trailing stop's effective trigger from the reference price.
/// The stop only moves in the favourable direction: up for sells as the
/// price rises, down for buys as it falls.
pub(crate) fn ratchet_trailing(kind: &mut OrderKind, side: Side, reference_price: u64) {
    if let OrderKind::TrailingStop {
        trailing_percent,
        stop_price,
    } = kind
    {
        let distance = reference_price as f64 * (*trailing_percent / 100.0);
        match side {
            Side::Sell => {
                let candidate = (reference_price as f64 - distance).round().max(0.0) as u64;
                if candidate > *stop_price {
                    *stop_price = candidate;
                }
            }
            Side::Buy => {
                let candidate = (reference_price as f64 + distance).round() as u64;
                if *stop_price == 0 || candidate < *stop_price {
                    *stop_price = candidate;
                }
            }
        }
    }
}
