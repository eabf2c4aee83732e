//! Memory state folded from a card's review history

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::algorithm;

/// Milliseconds in one day
pub const DAY_MS: f64 = 86_400_000.0;

// ============================================================================
// RATING
// ============================================================================

/// Recall quality of a single review
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    /// Forgot
    Again = 1,
    /// Recalled with serious difficulty
    Hard = 2,
    /// Recalled after some hesitation
    Good = 3,
    /// Recalled effortlessly
    Easy = 4,
}

impl Rating {
    /// All ratings, worst first
    pub const ALL: [Rating; 4] = [Rating::Again, Rating::Hard, Rating::Good, Rating::Easy];

    /// Numeric grade 1-4 as used by the formulas
    pub fn as_f64(self) -> f64 {
        self as i32 as f64
    }

    /// Create from a 1-4 grade
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            1 => Some(Rating::Again),
            2 => Some(Rating::Hard),
            3 => Some(Rating::Good),
            4 => Some(Rating::Easy),
            _ => None,
        }
    }

    /// Review label as stored in a deck
    pub fn label(self) -> &'static str {
        match self {
            Rating::Again => "again",
            Rating::Hard => "hard",
            Rating::Good => "good",
            Rating::Easy => "easy",
        }
    }

    /// Parse a stored review label. Labels are exact and lowercase.
    pub fn from_label(label: &str) -> Option<Self> {
        Rating::ALL.into_iter().find(|r| r.label() == label)
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// REVIEW / MEMORY
// ============================================================================

/// One graded review event. Never mutated once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub instant: DateTime<Utc>,
    pub rating: Rating,
}

impl Review {
    pub fn new(instant: DateTime<Utc>, rating: Rating) -> Self {
        Self { instant, rating }
    }
}

/// Quantitative memory state of one card
///
/// Always derived by folding reviews with [`add_review`]; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    /// Days until retention decays to 90%
    pub stability: f64,
    /// 1.0 (easy) to 10.0 (hard)
    pub difficulty: f64,
    /// Instant of the most recent folded review
    pub last_instant: DateTime<Utc>,
}

/// Fractional days from `from` to `to` at millisecond precision
pub fn elapsed_days(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / DAY_MS
}

/// Shift `instant` by a fractional number of days, truncated to whole milliseconds
///
/// Saturates at the representable range instead of overflowing.
pub fn add_days(instant: DateTime<Utc>, days: f64) -> DateTime<Utc> {
    let ms = (days * DAY_MS).trunc();
    let saturated = if ms >= 0.0 { DateTime::<Utc>::MAX_UTC } else { DateTime::<Utc>::MIN_UTC };
    if !ms.is_finite() || ms.abs() >= i64::MAX as f64 {
        return saturated;
    }
    Duration::try_milliseconds(ms as i64)
        .and_then(|d| instant.checked_add_signed(d))
        .unwrap_or(saturated)
}

/// Fold one review into a memory state
///
/// `None` means the card has never been reviewed. A review older than
/// `memory.last_instant` is treated as happening at `last_instant`: the
/// same-day branch applies and the later instant is kept.
pub fn add_review(memory: Option<Memory>, review: Review) -> Memory {
    let rating = review.rating.as_f64();

    let Some(memory) = memory else {
        return Memory {
            stability: algorithm::initial_stability(rating),
            difficulty: algorithm::initial_difficulty(rating),
            last_instant: review.instant,
        };
    };

    let mut elapsed = elapsed_days(memory.last_instant, review.instant);
    if elapsed < 0.0 {
        tracing::warn!(
            last = %memory.last_instant,
            review = %review.instant,
            "review precedes last folded review, treating as same-day"
        );
        elapsed = 0.0;
    }

    Memory {
        stability: algorithm::next_stability(memory.stability, memory.difficulty, elapsed, rating),
        difficulty: algorithm::next_difficulty(memory.difficulty, rating),
        last_instant: memory.last_instant.max(review.instant),
    }
}

/// Fold a review sequence, which must already be in ascending order
pub fn fold_reviews<'a>(reviews: impl IntoIterator<Item = &'a Review>) -> Option<Memory> {
    reviews
        .into_iter()
        .fold(None, |memory, review| Some(add_review(memory, *review)))
}

/// Estimated probability of recall at `at`
pub fn retention(memory: &Memory, at: DateTime<Utc>) -> f64 {
    algorithm::retrievability(memory.stability, elapsed_days(memory.last_instant, at))
}

/// Instant at which retention decays to `target_retention`
pub fn due_date(memory: &Memory, target_retention: f64) -> DateTime<Utc> {
    add_days(
        memory.last_instant,
        algorithm::next_interval(memory.stability, target_retention),
    )
}

// ============================================================================
// TESTS
// ============================================================================
