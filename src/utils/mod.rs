//! Small shared helpers.

mod time;

pub use time::{align_to_interval, current_time_millis};
