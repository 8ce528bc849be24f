//! Time related utils.

use chrono::Utc;

/// DateTime is the alias for chrono::DateTime<Utc>.
pub type DateTime = chrono::DateTime<Utc>;

/// Create a new DateTime for now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Milliseconds since the unix epoch for the given time.
pub fn unix_millis(t: DateTime) -> i64 {
    t.timestamp_millis()
}
