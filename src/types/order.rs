//! Order identity, kind and lifecycle types.
//!
//! Prices and amounts are `u64` fixed-point integers (price ticks and base
//! units). The dispatch over order behaviour is a sum type over
//! [`OrderKind`], matched exhaustively by the engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Create a new random order ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an order ID from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Side of an order (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Buy side (bids)
    Buy,
    /// Sell side (asks)
    Sell,
}

impl Side {
    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

/// The behaviour of an order, with each variant carrying only the fields it
/// needs.
///
/// `Market` and `Limit` are immediately marketable. The conditional kinds
/// park in the conditional monitor until their trigger is reached, then
/// re-enter the engine as market orders. `Oco` is split at submission into a
/// resting limit leg and a parked stop leg which cancel each other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OrderKind {
    /// Execute immediately at the best available prices; remainders are
    /// discarded (market orders never rest).
    Market,
    /// Execute at `price` or better; remainders rest in the book.
    Limit {
        /// Limit price in ticks
        price: u64,
    },
    /// Parked until the reference price crosses `stop_price` against the
    /// position being protected, then promoted to a market order.
    StopLoss {
        /// Trigger price in ticks
        stop_price: u64,
    },
    /// Parked until the reference price crosses `stop_price` in the
    /// favourable direction, then promoted to a market order.
    TakeProfit {
        /// Trigger price in ticks
        stop_price: u64,
    },
    /// Stop-loss whose trigger ratchets with favourable price moves,
    /// staying `trailing_percent` away from the best reference price seen.
    TrailingStop {
        /// Distance from the reference price, in percent (0..100)
        trailing_percent: f64,
        /// Current effective trigger price in ticks
        stop_price: u64,
    },
    /// One-cancels-other: a limit leg and a stop leg created together;
    /// filling or cancelling one cancels the sibling.
    Oco {
        /// Limit price of the resting leg, in ticks
        limit_price: u64,
        /// Trigger price of the parked stop leg, in ticks
        stop_price: u64,
    },
}

impl OrderKind {
    /// The price a resting order of this kind sits at in the book, if any.
    pub fn limit_price(&self) -> Option<u64> {
        match self {
            OrderKind::Limit { price } => Some(*price),
            OrderKind::Oco { limit_price, .. } => Some(*limit_price),
            _ => None,
        }
    }

    /// The trigger price for conditional kinds.
    pub fn stop_price(&self) -> Option<u64> {
        match self {
            OrderKind::StopLoss { stop_price }
            | OrderKind::TakeProfit { stop_price }
            | OrderKind::TrailingStop { stop_price, .. }
            | OrderKind::Oco { stop_price, .. } => Some(*stop_price),
            _ => None,
        }
    }

    /// Whether this kind parks in the conditional monitor instead of
    /// matching immediately.
    pub fn is_conditional(&self) -> bool {
        matches!(
            self,
            OrderKind::StopLoss { .. }
                | OrderKind::TakeProfit { .. }
                | OrderKind::TrailingStop { .. }
        )
    }
}

/// Lifecycle status of an order.
///
/// Transitions are one-directional: `Open` → `Partial` → `Filled`.
/// `Cancelled` is terminal and reachable from any non-`Filled` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// No fills yet
    Open,
    /// Some quantity filled, some remaining
    Partial,
    /// Fully filled; removed from the book
    Filled,
    /// Explicitly cancelled; removed from the book
    Cancelled,
}

/// An order as tracked by the engine and the book.
///
/// Invariant: `filled_amount <= amount` at all times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique id
    pub id: OrderId,
    /// Trading pair symbol, e.g. `"ETH/USDC"`
    pub pair: String,
    /// Buy or sell
    pub side: Side,
    /// Behaviour of the order
    pub kind: OrderKind,
    /// Original quantity in base units, always positive
    pub amount: u64,
    /// Cumulative filled quantity, monotonically non-decreasing
    pub filled_amount: u64,
    /// Lifecycle status
    pub status: OrderStatus,
    /// Identity of the submitting trader
    pub trader: String,
    /// Submission time in milliseconds; tie-break for price priority
    pub timestamp: u64,
}

impl Order {
    /// Remaining unfilled quantity.
    pub fn remaining(&self) -> u64 {
        self.amount.saturating_sub(self.filled_amount)
    }

    /// The price this order rests at, if it is a resting kind.
    pub fn limit_price(&self) -> Option<u64> {
        self.kind.limit_price()
    }

    /// Advance `filled_amount` by `quantity` and move the status forward.
    ///
    /// The caller guarantees `quantity <= remaining()`; the amount is capped
    /// regardless so the `filled_amount <= amount` invariant cannot break.
    pub(crate) fn apply_fill(&mut self, quantity: u64) {
        self.filled_amount = self
            .filled_amount
            .saturating_add(quantity)
            .min(self.amount);
        self.status = if self.filled_amount == self.amount {
            OrderStatus::Filled
        } else if self.filled_amount > 0 {
            OrderStatus::Partial
        } else {
            self.status
        };
    }

    /// Mark the order cancelled. No-op for already-filled orders.
    pub(crate) fn mark_cancelled(&mut self) {
        if self.status != OrderStatus::Filled {
            self.status = OrderStatus::Cancelled;
        }
    }
}

/// Inbound order submission, before the engine assigns identity and a
/// timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Trading pair symbol
    pub pair: String,
    /// Buy or sell
    pub side: Side,
    /// Behaviour of the order
    pub kind: OrderKind,
    /// Quantity in base units
    pub amount: u64,
    /// Identity of the submitting trader
    pub trader: String,
}

impl OrderRequest {
    /// Market order request
    pub fn market(pair: &str, side: Side, amount: u64, trader: &str) -> Self {
        Self {
            pair: pair.to_string(),
            side,
            kind: OrderKind::Market,
            amount,
            trader: trader.to_string(),
        }
    }

    /// Limit order request
    pub fn limit(pair: &str, side: Side, price: u64, amount: u64, trader: &str) -> Self {
        Self {
            pair: pair.to_string(),
            side,
            kind: OrderKind::Limit { price },
            amount,
            trader: trader.to_string(),
        }
    }

    /// Stop-loss order request
    pub fn stop_loss(pair: &str, side: Side, stop_price: u64, amount: u64, trader: &str) -> Self {
        Self {
            pair: pair.to_string(),
            side,
            kind: OrderKind::StopLoss { stop_price },
            amount,
            trader: trader.to_string(),
        }
    }

    /// Take-profit order request
    pub fn take_profit(pair: &str, side: Side, stop_price: u64, amount: u64, trader: &str) -> Self {
        Self {
            pair: pair.to_string(),
            side,
            kind: OrderKind::TakeProfit { stop_price },
            amount,
            trader: trader.to_string(),
        }
    }

    /// Trailing-stop order request. The effective stop price is computed
    /// from the reference price at submission time.
    pub fn trailing_stop(
        pair: &str,
        side: Side,
        trailing_percent: f64,
        amount: u64,
        trader: &str,
    ) -> Self {
        Self {
            pair: pair.to_string(),
            side,
            kind: OrderKind::TrailingStop {
                trailing_percent,
                stop_price: 0,
            },
            amount,
            trader: trader.to_string(),
        }
    }

    /// One-cancels-other request: a limit leg at `limit_price` linked with a
    /// stop leg triggered at `stop_price`.
    pub fn oco(
        pair: &str,
        side: Side,
        limit_price: u64,
        stop_price: u64,
        amount: u64,
        trader: &str,
    ) -> Self {
        Self {
            pair: pair.to_string(),
            side,
            kind: OrderKind::Oco {
                limit_price,
                stop_price,
            },
            amount,
            trader: trader.to_string(),
        }
    }
}
