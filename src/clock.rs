// src/clock.rs

/// Seconds since the Unix epoch, the unit every stored timestamp uses.
pub fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}
