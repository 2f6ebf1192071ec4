//! Matching engine error types

use crate::types::OrderId;
use std::fmt;

/// Errors that can occur when submitting to or mutating the engine.
///
/// All variants are recoverable and synchronous; a failed call leaves the
/// engine's state exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Non-positive amount or malformed price/trigger parameters
    InvalidOrder(String),

    /// The trading pair is not configured on this venue
    UnknownPair(String),

    /// Cancel/modify referenced an id that is not resting or parked
    OrderNotFound(OrderId),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidOrder(reason) => write!(f, "Invalid order: {}", reason),
            EngineError::UnknownPair(pair) => write!(f, "Unknown trading pair: {}", pair),
            EngineError::OrderNotFound(id) => write!(f, "Order not found: {}", id),
        }
    }
}

impl std::error::Error for EngineError {}
