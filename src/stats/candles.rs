//! Fixed-interval OHLCV aggregation of the trade stream.

use crate::utils::align_to_interval;
use serde::{Deserialize, Serialize};

/// One OHLCV bar, keyed by its interval-aligned open timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    /// Interval-aligned open time, milliseconds since epoch
    pub timestamp: u64,
    /// First price of the interval (seeded from the previous close)
    pub open: u64,
    /// Highest trade price in the interval
    pub high: u64,
    /// Lowest trade price in the interval
    pub low: u64,
    /// Most recent trade price in the interval
    pub close: u64,
    /// Total traded quantity in the interval
    pub volume: u64,
}

/// Bounded history of candles for one pair.
///
/// The bar whose interval is current is updated in place; a trade in a
/// newer interval appends a bar seeded with `open = previous close`. History
/// beyond `max_len` is trimmed from the front.
#[derive(Debug, Clone)]
pub struct CandleSeries {
    interval_ms: u64,
    max_len: usize,
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Create an empty series with the given interval and history bound
    pub fn new(interval_ms: u64, max_len: usize) -> Self {
        Self {
            interval_ms,
            max_len: max_len.max(1),
            candles: Vec::new(),
        }
    }

    /// The candle interval in milliseconds
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Number of candles currently retained
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Whether no trade has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// The candle currently being built, if any
    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// The most recent `n` candles, oldest first
    pub fn recent(&self, n: usize) -> Vec<Candle> {
        let start = self.candles.len().saturating_sub(n);
        self.candles[start..].to_vec()
    }

    /// Fold one trade into the series.
    pub fn record(&mut self, timestamp: u64, price: u64, amount: u64) {
        let bucket = align_to_interval(timestamp, self.interval_ms);

        match self.candles.last_mut() {
            // Trades within the current interval (or late arrivals from an
            // already-closed one) update the open bar in place.
            Some(last) if bucket <= last.timestamp => {
                last.high = last.high.max(price);
                last.low = last.low.min(price);
                last.close = price;
                last.volume = last.volume.saturating_add(amount);
            }
            Some(last) => {
                let open = last.close;
                self.candles.push(Candle {
                    timestamp: bucket,
                    open,
                    high: open.max(price),
                    low: open.min(price),
                    close: price,
                    volume: amount,
                });
            }
            None => {
                self.candles.push(Candle {
                    timestamp: bucket,
                    open: price,
                    high: price,
                    low: price,
                    close: price,
                    volume: amount,
                });
            }
        }

        if self.candles.len() > self.max_len {
            let excess = self.candles.len() - self.max_len;
            self.candles.drain(..excess);
        }
    }
}
