//! Statistics derived from the trade stream: throughput, latency, OHLCV
//! candles and the trader leaderboard.

mod candles;
mod leaderboard;
mod recorder;

pub use candles::{Candle, CandleSeries};
pub use leaderboard::{FlatPnl, Leaderboard, LeaderboardEntry, PnlModel};
pub use recorder::StatsRecorder;
