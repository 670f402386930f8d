//! Time utilities: parsing HH:MM, minutes-since-midnight arithmetic and
//! human-readable rendering.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveTime, Timelike};

pub const MINUTES_PER_DAY: i64 = 24 * 60;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

/// Parse `HH:MM` into minutes since midnight.
pub fn parse_hhmm(t: &str) -> AppResult<i64> {
    let time = parse_time(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))?;
    Ok(minutes_of(time))
}

pub fn minutes_of(t: NaiveTime) -> i64 {
    (t.hour() * 60 + t.minute()) as i64
}

/// Render minutes since midnight as `HH:MM`.
///
/// With `wrap` the value is folded into a single day (`24:30` → `00:30`).
/// Without it, exactly midnight at the end of the day renders as `24:00`.
pub fn format_hhmm(minutes: i64, wrap: bool) -> String {
    let m = if wrap {
        minutes.rem_euclid(MINUTES_PER_DAY)
    } else {
        minutes
    };
    format!("{:02}:{:02}", m / 60, m % 60)
}

/// `"07:00"` → `"7:00 AM"`, `"13:30"` → `"1:30 PM"`.
pub fn format_time_for_display(time: &str) -> AppResult<String> {
    let minutes = parse_hhmm(time)?;
    let hours = minutes / 60;
    let mins = minutes % 60;

    let period = if hours >= 12 { "PM" } else { "AM" };
    let display_hours = match hours {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };

    Ok(format!("{}:{:02} {}", display_hours, mins, period))
}

/// `45` → `"45 min"`, `120` → `"2 hr"`, `90` → `"1 hr 30 min"`.
pub fn format_duration(minutes: i64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;

    if hours == 0 {
        format!("{mins} min")
    } else if mins == 0 {
        format!("{hours} hr")
    } else {
        format!("{hours} hr {mins} min")
    }
}
