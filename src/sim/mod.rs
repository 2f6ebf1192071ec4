//! Synthetic order flow: continuous bot traffic and the burst stress test.
//!
//! Both modes go through [`MatchingEngine::submit`](crate::engine::MatchingEngine::submit),
//! the same chokepoint as real submissions, so book invariants hold for
//! generated traffic too.

mod flow;
mod stress;

pub use flow::{FlowConfig, FlowGenerator, FlowHandle};
pub use stress::{run_stress_test, run_stress_test_with, StressConfig, StressReport};
