//! Scheduling options
//!
//! Loaded once per run from the deck's `options` section. Missing fields take
//! their defaults; unknown fields are rejected.

use serde::{Deserialize, Serialize};

use crate::error::{MsrsError, Result};
use crate::fsrs::{Rating, DEFAULT_RETENTION};
use crate::marks::SlotKind;

/// Where never-reviewed cards go in the schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NewCardsPlacement {
    /// Before every due card
    #[default]
    Start,
    /// After every due card
    End,
}

/// Mark symbols for each rating, plus where the user types them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RatingSymbols {
    /// Slot that receives the placeholder mark after each run
    pub location: SlotKind,
    /// Mark left behind when no unknown mark needs preserving
    pub placeholder: String,
    pub again: String,
    pub hard: String,
    pub good: String,
    pub easy: String,
}

impl Default for RatingSymbols {
    fn default() -> Self {
        Self {
            location: SlotKind::End,
            placeholder: String::new(),
            again: "1".to_string(),
            hard: "2".to_string(),
            good: "3".to_string(),
            easy: "4".to_string(),
        }
    }
}

impl RatingSymbols {
    /// Configured symbol for `rating`
    pub fn symbol(&self, rating: Rating) -> &str {
        match rating {
            Rating::Again => &self.again,
            Rating::Hard => &self.hard,
            Rating::Good => &self.good,
            Rating::Easy => &self.easy,
        }
    }

    /// Rating whose symbol equals `mark` exactly
    pub fn rating_for(&self, mark: &str) -> Option<Rating> {
        Rating::ALL.into_iter().find(|r| self.symbol(*r) == mark)
    }
}

/// Options for one scheduling run. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulingOptions {
    /// Retention probability at which a card becomes due, in (0, 1)
    pub target_retention: f64,
    pub rating: RatingSymbols,
    pub new_cards: NewCardsPlacement,
    /// Abort on review labels outside the rating table instead of skipping them
    pub strict_labels: bool,
}

impl Default for SchedulingOptions {
    fn default() -> Self {
        Self {
            target_retention: DEFAULT_RETENTION,
            rating: RatingSymbols::default(),
            new_cards: NewCardsPlacement::Start,
            strict_labels: false,
        }
    }
}

impl SchedulingOptions {
    /// Reject options that would make scheduling or mark matching ambiguous
    pub fn validate(&self) -> Result<()> {
        let r = self.target_retention;
        if !(r > 0.0 && r < 1.0) {
            return Err(MsrsError::InvalidOptions(format!(
                "target_retention must be between 0 and 1 (exclusive), got {}",
                r
            )));
        }

        let mut seen: Vec<(&str, Rating)> = Vec::with_capacity(4);
        for rating in Rating::ALL {
            let symbol = self.rating.symbol(rating);
            if symbol.trim().is_empty() {
                return Err(MsrsError::InvalidOptions(format!(
                    "rating symbol for \"{}\" is empty",
                    rating
                )));
            }
            if let Some((_, other)) = seen.iter().find(|(s, _)| *s == symbol) {
                return Err(MsrsError::InvalidOptions(format!(
                    "\"{}\" and \"{}\" share the symbol \"{}\"",
                    other, rating, symbol
                )));
            }
            seen.push((symbol, rating));
        }

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
