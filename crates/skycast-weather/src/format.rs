//! Date and time labels shown next to the forecast.

use chrono::{FixedOffset, TimeZone, Utc};

use crate::types::DateKey;

/// Short day label, e.g. "Sat, Jun 1"
pub fn format_day_label(date: DateKey) -> String {
    date.date().format("%a, %b %-d").to_string()
}

/// 12-hour clock time of `timestamp` at a location `offset_secs` east of UTC,
/// e.g. "6:05 AM". Returns `None` if either value is out of range.
pub fn format_local_time(timestamp: i64, offset_secs: i32) -> Option<String> {
    let offset = FixedOffset::east_opt(offset_secs)?;
    let utc = Utc.timestamp_opt(timestamp, 0).single()?;
    Some(utc.with_timezone(&offset).format("%-I:%M %p").to_string())
}
