use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current time in milliseconds since UNIX epoch
pub fn current_time_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

/// Aligns a millisecond timestamp down to the start of its interval bucket.
/// Used for candle bucketing; an interval of zero returns the timestamp unchanged.
pub fn align_to_interval(timestamp: u64, interval_ms: u64) -> u64 {
    if interval_ms == 0 {
        return timestamp;
    }
    timestamp - (timestamp % interval_ms)
}
