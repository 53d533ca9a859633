//! Wall-clock helpers.
//!
//! Timestamps are client-side and advisory only; nothing guarantees they
//! are consistent across clients.

use chrono::{Local, TimeZone};

/// Get current Unix timestamp in milliseconds (local clock)
pub fn local_timestamp_millis() -> i64 {
    Local::now().timestamp_millis()
}

/// Format a Unix millisecond timestamp as local `HH:MM:SS`.
///
/// Out-of-range values render as `--:--:--` instead of panicking.
pub fn format_clock_time(timestamp_millis: i64) -> String {
    Local
        .timestamp_millis_opt(timestamp_millis)
        .earliest()
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string())
}
