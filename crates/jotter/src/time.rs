//! Relative timestamp labels for note listings.

use chrono::{DateTime, Local, TimeZone};

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Describe `timestamp` relative to `now`, both in epoch milliseconds.
///
/// Absolute dates (a week or more back) are rendered in the local time zone.
#[must_use]
pub fn format_relative(timestamp: i64, now: i64) -> String {
    format_relative_in(timestamp, now, &Local)
}

/// Like [`format_relative`], rendering absolute dates in `tz`.
///
/// Counts are whole units of the elapsed milliseconds, rounded down:
///
/// - under a day: `Just now`, `{m}m ago` or `{h}h ago`
/// - one day: `Yesterday`
/// - two to six days: `{d}d ago`
/// - otherwise the short month and day, e.g. `Mar 4`
///
/// A timestamp ahead of `now` reads as `Just now`.
#[must_use]
pub fn format_relative_in<Tz: TimeZone>(timestamp: i64, now: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let diff = now.saturating_sub(timestamp).max(0);
    let days = diff / DAY_MS;

    match days {
        0 => {
            let hours = diff / HOUR_MS;
            if hours == 0 {
                let minutes = diff / MINUTE_MS;
                if minutes == 0 {
                    "Just now".to_string()
                } else {
                    format!("{minutes}m ago")
                }
            } else {
                format!("{hours}h ago")
            }
        }
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days}d ago"),
        _ => short_date(timestamp, tz),
    }
}

fn short_date<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match DateTime::from_timestamp_millis(timestamp) {
        Some(utc) => utc.with_timezone(tz).format("%b %-d").to_string(),
        None => String::new(),
    }
}
