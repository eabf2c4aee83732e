//! Deck statistics
//!
//! Counts and per-day review activity for a finished run. Rendering (boxes,
//! heatmaps) is left to the front end.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, TimeZone};
use serde::Serialize;

use crate::fsrs::{retention, Rating};
use crate::schedule::ScheduleRun;

/// Summary of a deck after a run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckStats {
    pub cards: usize,
    pub new_cards: usize,
    /// Valid reviews across all cards
    pub reviews: usize,
    /// Reviews recorded from marks in this run
    pub new_reviews: usize,
    /// Reviewed cards due at or before "now"
    pub due_now: usize,
    /// Mean estimated retention at "now" over reviewed cards
    pub average_retention: Option<f64>,
    /// Ratings given on each local calendar day
    pub activity: BTreeMap<NaiveDate, Vec<Rating>>,
}

impl DeckStats {
    pub fn from_run<Tz: TimeZone>(run: &ScheduleRun, tz: &Tz) -> Self {
        let mut activity: BTreeMap<NaiveDate, Vec<Rating>> = BTreeMap::new();
        for review in run.cards.iter().flat_map(|c| &c.history) {
            activity
                .entry(review.instant.with_timezone(tz).date_naive())
                .or_default()
                .push(review.rating);
        }

        let retentions: Vec<f64> = run
            .cards
            .iter()
            .filter_map(|c| c.memory.as_ref())
            .map(|m| retention(m, run.now))
            .collect();
        let average_retention = if retentions.is_empty() {
            None
        } else {
            Some(retentions.iter().sum::<f64>() / retentions.len() as f64)
        };

        Self {
            cards: run.cards.len(),
            new_cards: run.new_cards().count(),
            reviews: run.cards.iter().map(|c| c.history.len()).sum(),
            new_reviews: run.new_reviews(),
            due_now: run.due_now().count(),
            average_retention,
            activity,
        }
    }

    /// Ratings given on `date`
    pub fn reviews_on(&self, date: NaiveDate) -> &[Rating] {
        self.activity.get(&date).map(Vec::as_slice).unwrap_or_default()
    }

    /// Days with at least one review in the `weeks` weeks ending on `today`
    pub fn active_days(&self, today: NaiveDate, weeks: u32) -> usize {
        // Windows reaching past the calendar's range start at its first day
        let start = match today.checked_sub_signed(Duration::weeks(i64::from(weeks))) {
            Some(day) => match day.succ_opt() {
                Some(start) if start <= today => start,
                _ => return 0,
            },
            None => NaiveDate::MIN,
        };
        self.activity.range(start..=today).count()
    }

    /// Consecutive days with reviews ending on `today` (or yesterday, when
    /// today has none yet)
    pub fn streak(&self, today: NaiveDate) -> usize {
        let mut day = if self.activity.contains_key(&today) {
            Some(today)
        } else {
            today.pred_opt()
        };
        let mut streak = 0;
        while let Some(current) = day.filter(|d| self.activity.contains_key(d)) {
            streak += 1;
            day = current.pred_opt();
        }
        streak
    }
}

// ============================================================================
// TESTS
// ============================================================================
