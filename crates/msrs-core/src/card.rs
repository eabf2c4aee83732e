//! Cards as handed to the scheduler, and the warnings a run reports

use serde::{Deserialize, Serialize};

use crate::fsrs::{Rating, Review};
use crate::timestamp::parse_timestamp;

/// A review as stored in a deck: an unparsed date and a rating label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReview {
    pub date: String,
    pub rating: String,
}

impl RawReview {
    pub fn new(date: impl Into<String>, rating: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            rating: rating.into(),
        }
    }
}

/// One learnable item
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Card {
    /// Question text, also the card's identity in messages
    pub id: String,
    /// Stored reviews, in any order
    pub reviews: Vec<RawReview>,
    /// Pending marks already extracted from the card's annotation slots
    pub marks: Vec<String>,
}

impl Card {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_reviews(mut self, reviews: Vec<RawReview>) -> Self {
        self.reviews = reviews;
        self
    }

    pub fn with_marks<S: Into<String>>(mut self, marks: impl IntoIterator<Item = S>) -> Self {
        self.marks = marks.into_iter().map(Into::into).collect();
        self
    }

    /// Parse stored reviews, skipping (and reporting) bad dates and unknown labels
    ///
    /// The result keeps the stored order; callers sort before folding.
    pub fn parse_reviews(&self) -> (Vec<Review>, Vec<Warning>) {
        let mut reviews = Vec::with_capacity(self.reviews.len());
        let mut warnings = Vec::new();

        for raw in &self.reviews {
            let Some(instant) = parse_timestamp(&raw.date) else {
                warnings.push(Warning::new(&self.id, WarningKind::BadDate, &raw.date));
                continue;
            };
            let Some(rating) = Rating::from_label(&raw.rating) else {
                warnings.push(Warning::new(
                    &self.id,
                    WarningKind::UnknownRatingLabel,
                    &raw.rating,
                ));
                continue;
            };
            reviews.push(Review::new(instant, rating));
        }

        (reviews, warnings)
    }
}

// ============================================================================
// WARNINGS
// ============================================================================

/// What went wrong with one mark or stored review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WarningKind {
    /// A mark that matches no rating symbol
    UnknownMark,
    /// A matching mark ignored because an earlier one already won
    DuplicateMark,
    /// A stored review label outside the rating table
    UnknownRatingLabel,
    /// A stored review date that could not be parsed
    BadDate,
}

/// A recoverable problem reported after a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    pub card_id: String,
    pub kind: WarningKind,
    /// The offending mark, label or date
    pub detail: String,
    /// The winning mark, for duplicates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kept: Option<String>,
}

impl Warning {
    pub fn new(card_id: &str, kind: WarningKind, detail: &str) -> Self {
        Self {
            card_id: card_id.to_string(),
            kind,
            detail: detail.to_string(),
            kept: None,
        }
    }

    pub fn duplicate(card_id: &str, ignored: &str, kept: &str) -> Self {
        Self {
            kept: Some(kept.to_string()),
            ..Self::new(card_id, WarningKind::DuplicateMark, ignored)
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            WarningKind::UnknownMark => write!(f, "unknown rating \"{}\"", self.detail)?,
            WarningKind::DuplicateMark => write!(
                f,
                "ignoring rating \"{}\" (already have \"{}\")",
                self.detail,
                self.kept.as_deref().unwrap_or_default()
            )?,
            WarningKind::UnknownRatingLabel => write!(f, "unknown label \"{}\"", self.detail)?,
            WarningKind::BadDate => write!(f, "bad date \"{}\"", self.detail)?,
        }
        write!(f, " (in \"{}\")", self.card_id)
    }
}

// ============================================================================
// TESTS
// ============================================================================
