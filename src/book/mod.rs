//! Per-pair order book state: sorted price levels with FIFO queues.

mod book;
mod level;
mod matching;
mod snapshot;

pub use book::OrderBook;
pub use level::PriceLevel;
pub use matching::{MakerFill, MatchOutcome};
pub use snapshot::{OrderBookSnapshot, PriceLevelSnapshot};
