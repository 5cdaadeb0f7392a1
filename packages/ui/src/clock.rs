//! Local wall-clock time and date formatting.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// The current time in the user's local offset.
#[cfg(target_arch = "wasm32")]
pub fn now_local() -> DateTime<FixedOffset> {
    let date = js_sys::Date::new_0();
    // Minutes *behind* UTC, so west of Greenwich is positive.
    let offset = FixedOffset::west_opt(date.get_timezone_offset() as i32 * 60);
    let now = DateTime::from_timestamp_millis(date.get_time() as i64);
    match (now, offset) {
        (Some(now), Some(offset)) => now.with_timezone(&offset),
        _ => Utc::now().fixed_offset(),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_local() -> DateTime<FixedOffset> {
    chrono::Local::now().fixed_offset()
}

pub fn today() -> NaiveDate {
    now_local().date_naive()
}

/// `Mar 5, 2024`
pub fn format_date(at: &DateTime<Utc>, offset: &FixedOffset) -> String {
    at.with_timezone(offset).format("%b %-d, %Y").to_string()
}

/// `Mar 5, 2024 09:30`
pub fn format_date_time(at: &DateTime<Utc>, offset: &FixedOffset) -> String {
    at.with_timezone(offset)
        .format("%b %-d, %Y %H:%M")
        .to_string()
}
