//! `DateCreated` values are kept verbatim on the parsed results; these
//! helpers offer a typed view when one is needed.
//!
//! - RFC 3339 strings (`2017-05-25T21:45:57.021Z`)
//! - Unix timestamps given as digit strings, seconds or milliseconds

use chrono::{DateTime, Utc};

/// Parse a `DateCreated` value. Returns `None` for anything unrecognised.
pub fn parse_created(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        return value.parse().ok().and_then(from_unix_timestamp);
    }
    None
}

/// Values above 10^11 are taken as milliseconds.
fn from_unix_timestamp(ts: i64) -> Option<DateTime<Utc>> {
    if ts > 100_000_000_000 {
        DateTime::from_timestamp_millis(ts)
    } else {
        DateTime::from_timestamp(ts, 0)
    }
}
