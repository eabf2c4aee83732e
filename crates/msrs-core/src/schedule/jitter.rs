//! Deterministic due-date jitter
//!
//! Cards reviewed together with the same grades would otherwise come due at
//! the same instant. Each interval is stretched by up to ±10% using a value
//! derived from the card's question and memory state, so the spread is the
//! same on every run until the card or its history changes.
//!
//! The hash key is the JSON text `["<question>",{"stability":S,"difficulty":D,"lastDate":"<ISO>"}]`
//! with JavaScript number formatting, hashed as `h = h * 31 + unit` per code
//! point (the first UTF-16 unit of each, so a surrogate pair counts once) in
//! f64 arithmetic, and mapped through
//! `frac(sin(h) * 10000)`. Keeping these exact keeps schedules stable
//! across implementations.

use chrono::{DateTime, Utc};

use crate::fsrs::{add_days, due_date, elapsed_days, Memory, Rating};

/// Maximum relative stretch or shrink of an interval
pub const JITTER_RATIO: f64 = 0.1;

/// Minimum interval after a successful recall
pub const MIN_GAP_DAYS: f64 = 1.0;

/// Format a number the way JavaScript's `Number.prototype.toString` does for
/// the magnitudes memory states take
pub fn js_number(value: f64) -> String {
    if !value.is_finite() {
        return "null".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e21 {
        return format!("{:.0}", value);
    }
    format!("{}", value)
}

/// Text hashed for a card's jitter
pub fn hash_key(card_id: &str, memory: &Memory) -> String {
    // serde_json escapes strings the same way JSON.stringify does
    let question = serde_json::Value::String(card_id.to_string()).to_string();
    format!(
        "[{},{{\"stability\":{},\"difficulty\":{},\"lastDate\":\"{}\"}}]",
        question,
        js_number(memory.stability),
        js_number(memory.difficulty),
        memory.last_instant.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
    )
}

/// Polynomial string hash over code points, in f64
///
/// Each code point contributes its first UTF-16 unit only. Precision loss on
/// long keys is part of the value.
pub fn card_hash(card_id: &str, memory: &Memory) -> f64 {
    hash_key(card_id, memory).chars().fold(0.0, |hash, c| {
        let unit = c.encode_utf16(&mut [0u16; 2])[0];
        hash * 31.0 + f64::from(unit)
    })
}

/// Pseudo-uniform value in [-1, 1) from a hash
///
/// A hash that overflowed to infinity yields 0 (no jitter).
pub fn jitter_factor(hash: f64) -> f64 {
    let x = hash.sin() * 10000.0;
    if !x.is_finite() {
        return 0.0;
    }
    x - x.trunc()
}

/// Interval in days after jitter and the minimum-gap policy
///
/// Same-day re-study is allowed only when the last rating was Again.
pub fn adjusted_interval(interval_days: f64, factor: f64, last_rating: Rating) -> f64 {
    let jittered = interval_days * (1.0 + factor * JITTER_RATIO);
    if last_rating == Rating::Again {
        jittered
    } else {
        jittered.max(MIN_GAP_DAYS)
    }
}

/// Final due instant for a reviewed card
pub fn jittered_due(
    card_id: &str,
    memory: &Memory,
    last_rating: Rating,
    target_retention: f64,
) -> DateTime<Utc> {
    let raw_due = due_date(memory, target_retention);
    let interval = elapsed_days(memory.last_instant, raw_due);
    let factor = jitter_factor(card_hash(card_id, memory));

    add_days(
        memory.last_instant,
        adjusted_interval(interval, factor, last_rating),
    )
}

// ============================================================================
// TESTS
// ============================================================================
