use chrono::Utc;

/// Current wall-clock time as epoch milliseconds.
pub fn now_epoch_millis() -> i64 {
    Utc::now().timestamp_millis()
}
