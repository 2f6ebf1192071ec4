//! Outbound event stream for broadcast layers.
//!
//! The engine pushes these to registered sinks after each mutation; a
//! surrounding WebSocket/notification layer forwards them to viewers. The
//! core owns no wire format; events are plain serde-serializable values.

use super::engine::PairSnapshot;
use crate::types::{Order, OrderId, OrderStatus, Trade};
use serde::Serialize;

/// Something a connected dashboard would want to hear about.
#[derive(Debug, Clone, Serialize)]
pub enum EngineEvent {
    /// A new trade fact
    Trade(Trade),
    /// An order started resting in the book or parked in the monitor
    OrderAdded {
        /// Trading pair
        pair: String,
        /// The full order as added
        order: Order,
    },
    /// A resting order was partially filled and remains in the book
    OrderPartiallyFilled {
        /// Trading pair
        pair: String,
        /// The affected resting order
        order_id: OrderId,
        /// Quantity still resting after the fill
        remaining: u64,
    },
    /// An order left the book or the monitor
    OrderRemoved {
        /// Trading pair
        pair: String,
        /// The removed order
        order_id: OrderId,
        /// Status at removal. `Filled` or `Cancelled` for terminal
        /// removals; the live status (`Open`/`Partial`) when the order
        /// was pulled for a price modification and resubmitted.
        status: OrderStatus,
    },
    /// Periodic aggregate snapshot of one pair
    Snapshot(PairSnapshot),
}

/// Receiver for the engine's outbound events.
///
/// Sinks are called synchronously after the pair lock is released;
/// implementations should hand off quickly (e.g. push into a channel).
pub trait EventSink: Send + Sync {
    /// Deliver one event
    fn on_event(&self, event: &EngineEvent);
}
