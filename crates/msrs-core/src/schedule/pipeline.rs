//! One scheduling run over a card set

use std::cmp::{Ordering, Reverse};
use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::card::{Card, RawReview, Warning};
use crate::error::{MsrsError, Result};
use crate::fsrs::{fold_reviews, Memory, Rating, Review};
use crate::marks::{choose_placeholder, reconcile, Placeholder};
use crate::options::{NewCardsPlacement, SchedulingOptions};
use crate::timestamp::{format_timestamp, parse_timestamp};

use super::jitter::jittered_due;

// ============================================================================
// MEMORY CACHE
// ============================================================================

/// Read-through cache of folded memory states for one run
///
/// Keyed by the card's position in the run. A new cache is created for
/// every run since reviews may change between runs.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: HashMap<usize, Option<Memory>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folded memory for card `key`, computing it from `history` on first use
    ///
    /// `history` must be sorted ascending by instant.
    pub fn memory(&mut self, key: usize, history: &[Review]) -> Option<Memory> {
        *self
            .entries
            .entry(key)
            .or_insert_with(|| fold_reviews(history))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// RUN OUTPUT
// ============================================================================

/// A card after reconciliation and scheduling
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledCard {
    pub id: String,
    /// Stored reviews to write back, most recent first; unparsable entries
    /// are kept at the end untouched
    pub reviews: Vec<RawReview>,
    /// Valid reviews, ascending by instant
    pub history: Vec<Review>,
    /// Review recorded from a mark during this run
    pub new_review: Option<Review>,
    /// `None` for a new card
    pub memory: Option<Memory>,
    /// `None` for a new card
    pub due: Option<DateTime<Utc>>,
    /// Mark to leave for the next round
    pub placeholder: Placeholder,
}

impl ScheduledCard {
    pub fn is_new(&self) -> bool {
        self.memory.is_none()
    }

    pub fn last_rating(&self) -> Option<Rating> {
        self.history.last().map(|r| r.rating)
    }
}

/// Everything one run produces
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRun {
    /// "Now" for this run
    pub now: DateTime<Utc>,
    /// Cards in input order
    pub cards: Vec<ScheduledCard>,
    /// Indices into `cards`, ascending by due instant with new cards placed
    /// per the options
    pub order: Vec<usize>,
    /// Warnings in card order
    pub warnings: Vec<Warning>,
}

impl ScheduleRun {
    /// Cards in schedule order
    pub fn ordered(&self) -> impl Iterator<Item = &ScheduledCard> + '_ {
        self.order.iter().map(move |&i| &self.cards[i])
    }

    /// Never-reviewed cards, in schedule order
    pub fn new_cards(&self) -> impl Iterator<Item = &ScheduledCard> + '_ {
        self.ordered().filter(|c| c.is_new())
    }

    /// Reviewed cards, ascending by due instant
    pub fn due_cards(&self) -> impl Iterator<Item = &ScheduledCard> + '_ {
        self.ordered().filter(|c| !c.is_new())
    }

    /// Cards due at or before `now`
    pub fn due_now(&self) -> impl Iterator<Item = &ScheduledCard> + '_ {
        self.due_cards()
            .filter(move |c| c.due.is_some_and(|due| due <= self.now))
    }

    pub fn new_reviews(&self) -> usize {
        self.cards.iter().filter(|c| c.new_review.is_some()).count()
    }
}

// ============================================================================
// SCHEDULER
// ============================================================================

/// Reconciles marks and computes due dates for a card set
#[derive(Debug, Clone)]
pub struct Scheduler {
    options: SchedulingOptions,
    now: DateTime<Utc>,
}

impl Scheduler {
    /// Validate options up front; invalid options are fatal
    pub fn new(options: SchedulingOptions, now: DateTime<Utc>) -> Result<Self> {
        options.validate()?;
        Ok(Self { options, now })
    }

    pub fn options(&self) -> &SchedulingOptions {
        &self.options
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// In strict mode, fail on the first review label outside the rating table
    pub fn check_labels<'a>(
        &self,
        cards: impl IntoIterator<Item = (&'a str, &'a [RawReview])>,
    ) -> Result<()> {
        if !self.options.strict_labels {
            return Ok(());
        }
        for (id, reviews) in cards {
            if let Some(raw) = reviews.iter().find(|r| Rating::from_label(&r.rating).is_none()) {
                return Err(MsrsError::UnknownRatingLabel {
                    card: id.to_string(),
                    label: raw.rating.clone(),
                });
            }
        }
        Ok(())
    }

    /// Run the pipeline over `cards`
    ///
    /// Fatal errors are raised before any card is processed.
    pub fn run(&self, cards: &[Card]) -> Result<ScheduleRun> {
        self.check_labels(cards.iter().map(|c| (c.id.as_str(), c.reviews.as_slice())))?;

        let mut cache = MemoryCache::new();
        let mut warnings = Vec::new();
        let mut scheduled = Vec::with_capacity(cards.len());

        for (index, card) in cards.iter().enumerate() {
            scheduled.push(self.schedule_card(index, card, &mut cache, &mut warnings));
        }

        let order = sort_order(&scheduled, self.options.new_cards);

        tracing::debug!(
            cards = scheduled.len(),
            cached = cache.len(),
            warnings = warnings.len(),
            "scheduling run complete"
        );

        Ok(ScheduleRun {
            now: self.now,
            cards: scheduled,
            order,
            warnings,
        })
    }

    fn schedule_card(
        &self,
        index: usize,
        card: &Card,
        cache: &mut MemoryCache,
        warnings: &mut Vec<Warning>,
    ) -> ScheduledCard {
        let symbols = &self.options.rating;

        let (mut history, review_warnings) = card.parse_reviews();
        warnings.extend(review_warnings);

        let reconciliation = reconcile(&card.marks, symbols);
        warnings.extend(reconciliation.warnings(&card.id));
        let placeholder = choose_placeholder(&reconciliation.unknown_marks, symbols);

        let mut reviews = card.reviews.clone();
        let new_review = reconciliation.new_rating.map(|rating| {
            let review = Review::new(self.now, rating);
            history.push(review);
            reviews.push(RawReview::new(format_timestamp(self.now), rating.label()));
            review
        });

        history.sort_by_key(|r| r.instant);
        reviews.sort_by_cached_key(|r| Reverse(parse_timestamp(&r.date)));

        let memory = cache.memory(index, &history);
        let due = memory.zip(history.last()).map(|(memory, last)| {
            jittered_due(&card.id, &memory, last.rating, self.options.target_retention)
        });

        if let Some(review) = &new_review {
            tracing::debug!(card = %card.id, rating = %review.rating, due = ?due, "recorded review");
        }

        ScheduledCard {
            id: card.id.clone(),
            reviews,
            history,
            new_review,
            memory,
            due,
            placeholder,
        }
    }
}

/// Stable sort by due instant; new cards go to the configured end
fn sort_order(cards: &[ScheduledCard], placement: NewCardsPlacement) -> Vec<usize> {
    let mut order: Vec<usize> = (0..cards.len()).collect();
    order.sort_by(|&a, &b| match (cards[a].due, cards[b].due) {
        (Some(x), Some(y)) => x.cmp(&y),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => match placement {
            NewCardsPlacement::Start => Ordering::Less,
            NewCardsPlacement::End => Ordering::Greater,
        },
        (Some(_), None) => match placement {
            NewCardsPlacement::Start => Ordering::Greater,
            NewCardsPlacement::End => Ordering::Less,
        },
    });
    order
}
