//! Throughput, latency and trade retention for the whole venue.

use crate::types::Trade;
use crate::utils::current_time_millis;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Rolling venue statistics fed synchronously from `submit`.
///
/// Counters use atomics; the capped trade log sits behind its own short
/// lock. Nothing here ever holds a pair's book lock.
#[derive(Debug)]
pub struct StatsRecorder {
    trades: Mutex<VecDeque<Trade>>,
    retention: usize,

    /// Start of the current one-second throughput window (millis)
    window_start: AtomicU64,
    /// Operations counted in the current window
    window_count: AtomicU64,
    /// Operations counted in the last completed window
    last_window_count: AtomicU64,

    /// Wall-clock duration of the most recent submit, in microseconds
    last_latency_micros: AtomicU64,

    total_operations: AtomicU64,
    total_trades: AtomicU64,
}

impl StatsRecorder {
    /// Create a recorder retaining at most `retention` trades
    pub fn new(retention: usize) -> Self {
        Self {
            trades: Mutex::new(VecDeque::with_capacity(retention.min(1024))),
            retention: retention.max(1),
            window_start: AtomicU64::new(current_time_millis()),
            window_count: AtomicU64::new(0),
            last_window_count: AtomicU64::new(0),
            last_latency_micros: AtomicU64::new(0),
            total_operations: AtomicU64::new(0),
            total_trades: AtomicU64::new(0),
        }
    }

    /// Count one matched operation in the throughput window.
    pub fn record_operation(&self) {
        self.total_operations.fetch_add(1, Ordering::Relaxed);
        let now = current_time_millis();
        let window_start = self.window_start.load(Ordering::Relaxed);
        if now.saturating_sub(window_start) >= 1_000 {
            // A new window begins with this operation; the old count becomes
            // the last completed reading.
            let finished = self.window_count.swap(1, Ordering::Relaxed);
            self.last_window_count.store(finished, Ordering::Relaxed);
            self.window_start.store(now, Ordering::Relaxed);
        } else {
            self.window_count.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record the wall-clock duration of the most recent submit call.
    pub fn record_latency(&self, elapsed: Duration) {
        self.last_latency_micros
            .store(elapsed.as_micros() as u64, Ordering::Relaxed);
    }

    /// Append a trade to the capped log.
    pub fn record_trade(&self, trade: &Trade) {
        self.total_trades.fetch_add(1, Ordering::Relaxed);
        let mut trades = lock_or_recover(&self.trades);
        trades.push_back(trade.clone());
        while trades.len() > self.retention {
            trades.pop_front();
        }
    }

    /// Operations per second: the current window's count while the window
    /// is live, otherwise the last completed window.
    pub fn throughput_ops_per_sec(&self) -> u64 {
        let now = current_time_millis();
        let window_start = self.window_start.load(Ordering::Relaxed);
        if now.saturating_sub(window_start) < 1_000 {
            self.window_count.load(Ordering::Relaxed)
        } else {
            self.last_window_count.load(Ordering::Relaxed)
        }
    }

    /// Latency of the most recent submit in fractional milliseconds
    pub fn last_latency_ms(&self) -> f64 {
        self.last_latency_micros.load(Ordering::Relaxed) as f64 / 1_000.0
    }

    /// Total operations processed since startup
    pub fn total_operations(&self) -> u64 {
        self.total_operations.load(Ordering::Relaxed)
    }

    /// Total trades recorded since startup (including trimmed ones)
    pub fn total_trades(&self) -> u64 {
        self.total_trades.load(Ordering::Relaxed)
    }

    /// Number of trades currently retained
    pub fn retained_trades(&self) -> usize {
        lock_or_recover(&self.trades).len()
    }

    /// The most recent `n` trades, oldest first
    pub fn recent_trades(&self, n: usize) -> Vec<Trade> {
        let trades = lock_or_recover(&self.trades);
        let start = trades.len().saturating_sub(n);
        trades.iter().skip(start).cloned().collect()
    }
}

fn lock_or_recover<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
