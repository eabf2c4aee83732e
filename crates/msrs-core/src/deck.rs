//! JSON Deck Document
//!
//! The plain file a learner edits: scheduling options plus an ordered list of
//! cards. Each card carries its review history and four free-text slots
//! where the user types a grade mark:
//!
//! ```json
//! {
//!   "options": { "target_retention": 0.9, "rating": { "location": "end" } },
//!   "cards": [
//!     { "question": "hola", "answer": "hello", "end": "3",
//!       "reviews": [ { "date": "2025-04-10T07:00:00Z", "rating": "good" } ] }
//!   ]
//! }
//! ```
//!
//! A review pass consumes every slot, records at most one review per card,
//! writes the placeholder back, sorts each history most-recent-first and
//! reorders the cards by due date.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::card::{Card, RawReview};
use crate::error::{MsrsError, Result};
use crate::marks::{extract_marks, MarkSlots, SlotKind};
use crate::options::SchedulingOptions;
use crate::schedule::{ScheduleRun, Scheduler};

/// One card as stored in the deck
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CardEntry {
    pub question: String,
    /// Free-form answer, preserved as written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub start: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub end: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub outside: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub inside: String,
    #[serde(default)]
    pub reviews: Vec<RawReview>,
}

impl CardEntry {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Default::default()
        }
    }

    fn slot_mut(&mut self, slot: SlotKind) -> &mut String {
        match slot {
            SlotKind::Start => &mut self.start,
            SlotKind::End => &mut self.end,
            SlotKind::Outside => &mut self.outside,
            SlotKind::Inside => &mut self.inside,
        }
    }
}

impl MarkSlots for CardEntry {
    fn take_slot(&mut self, slot: SlotKind) -> Option<String> {
        let raw = std::mem::take(self.slot_mut(slot));
        let mark = match slot {
            // "-" is the start slot's blank placeholder
            SlotKind::Start => {
                let trimmed = raw.trim();
                trimmed.strip_prefix('-').unwrap_or(trimmed).trim().to_string()
            }
            // Note slots may hold several lines; the mark is on the last one
            _ => raw.lines().last().unwrap_or_default().trim().to_string(),
        };
        Some(mark).filter(|m| !m.is_empty())
    }

    fn set_slot(&mut self, slot: SlotKind, value: String) {
        *self.slot_mut(slot) = value;
    }
}

/// A whole deck file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Deck {
    #[serde(default)]
    pub options: SchedulingOptions,
    #[serde(default)]
    pub cards: Vec<CardEntry>,
}

impl Deck {
    /// Parse a deck; blank input is an empty deck with default options
    pub fn from_json(source: &str) -> Result<Self> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: serde_json::Value = serde_json::from_str(source)?;
        if !value.is_object() {
            return Err(MsrsError::Deck(format!(
                "expected a top-level object, got {}",
                json_kind(&value)
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Pretty JSON with a trailing newline
    pub fn to_json(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }

    /// Reconcile marks, schedule, and rewrite the deck in schedule order
    ///
    /// On error the deck is left untouched.
    pub fn review(&mut self, now: DateTime<Utc>) -> Result<ScheduleRun> {
        let scheduler = Scheduler::new(self.options.clone(), now)?;

        // Scheduler::run checks labels before touching any card; the deck
        // itself is only replaced once the run has succeeded
        let mut entries = self.cards.clone();
        let cards: Vec<Card> = entries
            .iter_mut()
            .map(|entry| Card {
                id: entry.question.clone(),
                reviews: entry.reviews.clone(),
                marks: extract_marks(entry),
            })
            .collect();

        let run = scheduler.run(&cards)?;

        for (entry, scheduled) in entries.iter_mut().zip(&run.cards) {
            entry.reviews = scheduled.reviews.clone();
            entry.set_slot(scheduled.placeholder.slot, scheduled.placeholder.value.clone());
        }

        let mut slots: Vec<Option<CardEntry>> = entries.into_iter().map(Some).collect();
        self.cards = run.order.iter().filter_map(|&i| slots[i].take()).collect();

        tracing::info!(
            cards = self.cards.len(),
            new_reviews = run.new_reviews(),
            warnings = run.warnings.len(),
            "deck reviewed"
        );
        Ok(run)
    }

    /// Schedule without modifying the deck
    pub fn preview(&self, now: DateTime<Utc>) -> Result<ScheduleRun> {
        self.clone().review(now)
    }

    /// Append cards whose question is not already in the deck
    ///
    /// Returns how many were added.
    pub fn add_cards(&mut self, entries: impl IntoIterator<Item = CardEntry>) -> usize {
        let before = self.cards.len();
        for entry in entries {
            if self.cards.iter().any(|c| c.question == entry.question) {
                tracing::debug!(question = %entry.question, "skipping card already in deck");
                continue;
            }
            self.cards.push(entry);
        }
        self.cards.len() - before
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "object",
    }
}

// ============================================================================
// TESTS
// ============================================================================
