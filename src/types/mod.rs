//! Core domain types: orders, order lifecycle and trade facts.

mod order;
mod trade;

pub use order::{Order, OrderId, OrderKind, OrderRequest, OrderStatus, Side};
pub use trade::Trade;
