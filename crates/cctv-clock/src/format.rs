//! Display formats derived from one time value

use chrono::NaiveDateTime;

/// Header timestamp, e.g. `2024/03/09 07:05:02`
pub const HEADER_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Camera overlay time, e.g. `07:05:02`
pub const OVERLAY_FORMAT: &str = "%H:%M:%S";

pub fn header_timestamp(at: &NaiveDateTime) -> String {
    at.format(HEADER_FORMAT).to_string()
}

pub fn overlay_time(at: &NaiveDateTime) -> String {
    at.format(OVERLAY_FORMAT).to_string()
}
