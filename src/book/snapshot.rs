//! Order book snapshot for market data

use super::level::PriceLevel;
use serde::{Deserialize, Serialize};

/// Aggregate view of one price level at snapshot time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevelSnapshot {
    /// Price of the level in ticks
    pub price: u64,
    /// Total remaining quantity at the level
    pub amount: u64,
    /// Number of resting orders at the level
    pub order_count: usize,
}

impl PriceLevelSnapshot {
    pub(crate) fn from_level(level: &PriceLevel) -> Self {
        Self {
            price: level.price(),
            amount: level.total_remaining(),
            order_count: level.order_count(),
        }
    }
}

/// A snapshot of the order book state at a specific point in time.
/// Bids are ordered best (highest) first, asks best (lowest) first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    /// The pair symbol for this order book
    pub symbol: String,

    /// Timestamp when the snapshot was created (milliseconds since epoch)
    pub timestamp: u64,

    /// Snapshot of bid price levels
    pub bids: Vec<PriceLevelSnapshot>,

    /// Snapshot of ask price levels
    pub asks: Vec<PriceLevelSnapshot>,
}

impl OrderBookSnapshot {
    /// Get the best bid price and quantity
    pub fn best_bid(&self) -> Option<(u64, u64)> {
        self.bids.first().map(|level| (level.price, level.amount))
    }

    /// Get the best ask price and quantity
    pub fn best_ask(&self) -> Option<(u64, u64)> {
        self.asks.first().map(|level| (level.price, level.amount))
    }

    /// Get the mid price (average of best bid and best ask)
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid_price, _)), Some((ask_price, _))) => {
                Some((bid_price as f64 + ask_price as f64) / 2.0)
            }
            _ => None,
        }
    }

    /// Get the spread (best ask - best bid)
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid_price, _)), Some((ask_price, _))) => {
                Some(ask_price.saturating_sub(bid_price))
            }
            _ => None,
        }
    }

    /// Calculate the total volume on the bid side
    pub fn total_bid_volume(&self) -> u64 {
        self.bids.iter().map(|level| level.amount).sum()
    }

    /// Calculate the total volume on the ask side
    pub fn total_ask_volume(&self) -> u64 {
        self.asks.iter().map(|level| level.amount).sum()
    }
}
