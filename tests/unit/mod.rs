//! Integration tests exercising the public crate API end to end.

mod concurrency_tests;
mod engine_scenarios;
mod stress_scenarios;
