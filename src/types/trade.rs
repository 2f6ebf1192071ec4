//! Immutable trade facts produced by the matching engine.

use super::order::{OrderId, Side};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single fill between an incoming (taker) order and a resting (maker)
/// order. Created only by the matching engine; append-only thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Unique id
    pub id: Uuid,
    /// Trading pair symbol
    pub pair: String,
    /// Execution price in ticks; always the resting (maker) order's price
    pub price: u64,
    /// Filled quantity in base units
    pub amount: u64,
    /// The side of the taker order that caused the match
    pub taker_side: Side,
    /// Identity of the buying trader
    pub buyer: String,
    /// Identity of the selling trader
    pub seller: String,
    /// Id of the resting order that was matched against
    pub maker_order_id: OrderId,
    /// Id of the incoming order
    pub taker_order_id: OrderId,
    /// Execution time in milliseconds
    pub timestamp: u64,
}

impl Trade {
    /// Notional value of the trade (price * amount), saturating on overflow.
    pub fn notional(&self) -> u64 {
        self.price.saturating_mul(self.amount)
    }
}
