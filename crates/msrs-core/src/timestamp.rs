//! Review timestamp parsing and formatting
//!
//! Accepted forms:
//! - RFC 3339 (`2025-04-15T22:21:03Z`, `2025-04-15T22:21:03.250+02:00`)
//! - space-separated with a short offset (`2025-04-15 22:21:03+2`, `... -05:30`)
//! - space-separated without an offset, read as UTC
//! - a bare date (`2025-04-15`), read as midnight UTC

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Timelike, Utc};

/// Parse a stored review date
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    let (local, offset) = split_offset(value)?;
    let normalized = format!("{}{}", local, offset);
    DateTime::parse_from_str(&normalized, "%Y-%m-%d %H:%M:%S%.f%:z")
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Split `"<local><sign>H[H][:MM]"` and normalize the offset to `+HH:MM`
fn split_offset(value: &str) -> Option<(&str, String)> {
    // The date part contains '-', so only look past the time separator
    let time_start = value.find(' ')?;
    let sign_pos = time_start + value[time_start..].rfind(['+', '-'])?;
    let (local, offset) = value.split_at(sign_pos);
    let sign = &offset[..1];
    let (hours, minutes) = match offset[1..].split_once(':') {
        Some((h, m)) => (h, m),
        None => (&offset[1..], "00"),
    };

    let valid = |s: &str, max_len: usize| {
        !s.is_empty() && s.len() <= max_len && s.chars().all(|c| c.is_ascii_digit())
    };
    if !valid(hours, 2) || !valid(minutes, 2) || minutes.len() != 2 {
        return None;
    }

    Some((local, format!("{}{:0>2}:{}", sign, hours, minutes)))
}

/// Format a review date for storage
///
/// Exact UTC midnights are written as bare dates.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    let time = instant.time();
    if time.num_seconds_from_midnight() == 0 && time.nanosecond() == 0 {
        return instant.format("%Y-%m-%d").to_string();
    }
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

// ============================================================================
// TESTS
// ============================================================================
