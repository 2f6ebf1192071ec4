//! Trader leaderboard fed from the trade stream.
//!
//! The engine does not compute profit and loss itself; it routes each trade
//! fact through a caller-provided [`PnlModel`] and applies the returned
//! deltas. [`FlatPnl`] is the default when no accounting policy is supplied.

use crate::types::Trade;
use serde::Serialize;
use std::collections::HashMap;

/// Caller-provided realized-P&L accounting rule.
pub trait PnlModel: Send + Sync {
    /// Realized P&L deltas for one trade, in signed quote units:
    /// `(buyer_delta, seller_delta)`.
    fn pnl_deltas(&self, trade: &Trade) -> (i64, i64);
}

/// Default accounting rule: attributes zero P&L to both parties, so the
/// leaderboard still tracks trade counts and volume.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatPnl;

impl PnlModel for FlatPnl {
    fn pnl_deltas(&self, _trade: &Trade) -> (i64, i64) {
        (0, 0)
    }
}

/// One ranked leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    /// Trader identity
    pub trader: String,
    /// Cumulative realized P&L in signed quote units
    pub pnl: i64,
    /// Number of fills the trader participated in
    pub trades: u64,
    /// Total traded quantity
    pub volume: u64,
    /// Fraction of fills with a positive P&L delta
    pub win_rate: f64,
}

#[derive(Debug, Clone, Copy, Default)]
struct TraderTotals {
    pnl: i64,
    trades: u64,
    wins: u64,
    volume: u64,
}

/// Per-trader cumulative totals, ranked by P&L and truncated to top-N on
/// read.
#[derive(Debug)]
pub struct Leaderboard {
    totals: HashMap<String, TraderTotals>,
    top_n: usize,
}

impl Leaderboard {
    /// Create an empty leaderboard keeping the top `top_n` traders
    pub fn new(top_n: usize) -> Self {
        Self {
            totals: HashMap::new(),
            top_n: top_n.max(1),
        }
    }

    /// Upsert one trader's totals with a single fill's contribution.
    pub fn record(&mut self, trader: &str, pnl_delta: i64, volume: u64) {
        let entry = self.totals.entry(trader.to_string()).or_default();
        entry.pnl += pnl_delta;
        entry.trades += 1;
        if pnl_delta > 0 {
            entry.wins += 1;
        }
        entry.volume = entry.volume.saturating_add(volume);
    }

    /// Number of distinct traders seen
    pub fn trader_count(&self) -> usize {
        self.totals.len()
    }

    /// The top-N rows, sorted descending by P&L.
    pub fn top(&self) -> Vec<LeaderboardEntry> {
        let mut rows: Vec<LeaderboardEntry> = self
            .totals
            .iter()
            .map(|(trader, totals)| LeaderboardEntry {
                trader: trader.clone(),
                pnl: totals.pnl,
                trades: totals.trades,
                volume: totals.volume,
                win_rate: if totals.trades == 0 {
                    0.0
                } else {
                    totals.wins as f64 / totals.trades as f64
                },
            })
            .collect();
        rows.sort_by(|a, b| b.pnl.cmp(&a.pnl).then_with(|| b.volume.cmp(&a.volume)));
        rows.truncate(self.top_n);
        rows
    }
}
