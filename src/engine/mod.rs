//! The matching engine: per-pair books behind a single `submit`
//! chokepoint, a conditional-order monitor, and the outbound event stream.

mod conditional;
mod engine;
mod error;
mod events;

pub use engine::{MatchingEngine, PairConfig, PairSnapshot, SubmitResult, VenueConfig};
pub use error::EngineError;
pub use events::{EngineEvent, EventSink};
