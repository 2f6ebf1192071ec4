//! # Simulated Trading Venue for Demo DEX Dashboards
//!
//! A self-contained matching engine and market simulator written in Rust. This crate provides per-pair limit order books with price-time priority matching, a conditional order monitor, live market statistics, and synthetic order flow: everything a demo exchange dashboard needs behind a single library API, with no external market data or persistence.
//!
//! ## Key Features
//!
//! - **Price-Time Priority Matching**: Classic limit order book semantics per trading pair. Best price matches first, earliest order breaks ties, and fills always execute at the resting (maker) order's price.
//!
//! - **Multiple Order Types**: Market, limit, stop-loss, take-profit, trailing-stop and OCO (one-cancels-other) orders, modeled as an exhaustive sum type rather than runtime type tags.
//!
//! - **Conditional Order Monitor**: Stop-style orders park outside the book and promote to market orders when the pair's reference price crosses their trigger, including cascading promotions when a promoted order moves the price further.
//!
//! - **Per-Pair Concurrency**: Each pair's book sits behind its own lock inside a concurrent map, so submissions on one pair serialize while different pairs match in parallel.
//!
//! - **Market Statistics**: Throughput and latency tracking, a capped venue-wide trade log, per-pair OHLCV candles, and a trader leaderboard with pluggable P&L accounting.
//!
//! - **Synthetic Flow**: A continuous bot traffic generator with a live-adjustable rate, plus a burst stress benchmark reporting achieved throughput.
//!
//! ## Design Goals
//!
//! 1. **Correctness**: Book invariants (fill bounds, FIFO fairness, amount conservation) hold for every submission path, synthetic or real.
//! 2. **One Chokepoint**: All order flow (dashboard submissions, bots, promoted conditionals) enters through [`MatchingEngine::submit`], so invariants proven once hold everywhere.
//! 3. **Embeddability**: The engine is a plain library. Events stream to registered sinks as serde-serializable values; wire formats and persistence belong to the surrounding layers.
//!
//! ## Example
//!
//! ```
//! use dexsim::{MatchingEngine, OrderRequest, Side, VenueConfig};
//!
//! let engine = MatchingEngine::new(VenueConfig::default().with_pair("ETH/USDC", 2_500));
//!
//! engine
//!     .submit(OrderRequest::limit("ETH/USDC", Side::Sell, 2_505, 10, "alice"))
//!     .unwrap();
//! let result = engine
//!     .submit(OrderRequest::market("ETH/USDC", Side::Buy, 10, "bob"))
//!     .unwrap();
//!
//! assert_eq!(result.fills.len(), 1);
//! assert_eq!(result.fills[0].price, 2_505);
//! ```
//!
//! ## Status
//! This crate targets demo and simulation workloads; it is not an accounting-grade exchange core.

pub mod book;
pub mod engine;
pub mod sim;
pub mod stats;
pub mod types;

mod utils;

pub use book::{OrderBook, OrderBookSnapshot, PriceLevelSnapshot};
pub use engine::{
    EngineError, EngineEvent, EventSink, MatchingEngine, PairConfig, PairSnapshot, SubmitResult,
    VenueConfig,
};
pub use sim::{run_stress_test, FlowConfig, FlowGenerator, FlowHandle, StressConfig, StressReport};
pub use stats::{Candle, FlatPnl, LeaderboardEntry, PnlModel};
pub use types::{Order, OrderId, OrderKind, OrderRequest, OrderStatus, Side, Trade};
pub use utils::current_time_millis;
