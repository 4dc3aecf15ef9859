//! Human-readable "time ago" labels.
//!
//! Matches the client's bucketing: truncation, not rounding, so exactly 60
//! seconds is already "1m ago".

use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 3600;
const DAY: i64 = 86400;

/// Label for how long ago `date` was, relative to `now`.
///
/// Future dates clamp to "Just now".
pub fn time_ago(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let interval = (now - date).num_seconds().max(0);

    if interval < MINUTE {
        "Just now".to_string()
    } else if interval < HOUR {
        format!("{}m ago", interval / MINUTE)
    } else if interval < DAY {
        format!("{}h ago", interval / HOUR)
    } else {
        format!("{}d ago", interval / DAY)
    }
}
