//! Timestamp and calendar-key helpers.
//!
//! Order times are timezone-naive strings. The calendar-day key is the
//! literal `YYYY-MM-DD` prefix, and ordering uses the wall-clock time as
//! written. A trailing UTC offset (`Z`, `+00`, `+03:00`, `-0500`) is accepted
//! and ignored so that the sort key and the day key always agree.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Parse an order timestamp into its naive wall-clock value.
///
/// A bare `YYYY-MM-DD` parses as midnight.
pub fn parse_order_time(raw: &str) -> Option<NaiveDateTime> {
    let body = strip_offset(raw.trim());
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(body, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(body, DAY_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn strip_offset(s: &str) -> &str {
    if let Some(rest) = s.strip_suffix('Z') {
        return rest;
    }
    // Offsets only ever follow the time part, so ignore '-' inside the date.
    if let Some(pos) = s.rfind(['+', '-']) {
        if pos > 10 {
            let tail = &s[pos + 1..];
            let well_formed = !tail.is_empty()
                && tail.len() <= 5
                && tail.chars().all(|c| c.is_ascii_digit() || c == ':');
            if well_formed {
                return s[..pos].trim_end();
            }
        }
    }
    s
}

/// Parse an inclusive upper bound.
///
/// A bare `YYYY-MM-DD` means the whole day and resolves to its last
/// nanosecond; anything else parses like [`parse_order_time`].
pub fn parse_span_end(raw: &str) -> Option<NaiveDateTime> {
    let t = raw.trim();
    match NaiveDate::parse_from_str(t, DAY_FORMAT) {
        Ok(d) if t.len() == 10 => d.and_hms_nano_opt(23, 59, 59, 999_999_999),
        _ => parse_order_time(t),
    }
}

/// The `YYYY-MM-DD` prefix of `raw`, if it is a real calendar date.
pub fn day_key(raw: &str) -> Option<&str> {
    let prefix = raw.get(..10)?;
    NaiveDate::parse_from_str(prefix, DAY_FORMAT).ok()?;
    Some(prefix)
}

/// Parse the day-key prefix of `raw` into a date.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    day_key(raw).and_then(|d| NaiveDate::parse_from_str(d, DAY_FORMAT).ok())
}

/// Calendar month index 0..=11 of the date prefix. Years are ignored.
pub fn month_index(raw: &str) -> Option<u32> {
    parse_day(raw).map(|d| d.month0())
}

/// Render a date as a fixed-width day key.
pub fn fmt_day(d: NaiveDate) -> String {
    d.format(DAY_FORMAT).to_string()
}
