//! # msrs Core
//!
//! Spaced-repetition scheduling for plain-text decks:
//!
//! - **FSRS-5 memory model**: fold a card's review history into stability and
//!   difficulty, then predict retention and the next due date
//! - **Mark reconciliation**: turn grade marks typed next to a card into at
//!   most one new review, with warnings for anything ambiguous
//! - **Scheduling pipeline**: deterministic ±10% jitter, a one-day minimum
//!   gap, due-date ordering and grouping by local day and month
//! - **JSON deck document**: the file the learner edits, with write-back
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use msrs_core::Deck;
//!
//! let mut deck = Deck::from_json(r#"{
//!     "cards": [
//!         { "question": "hola", "answer": "hello", "end": "3" },
//!         { "question": "gato" }
//!     ]
//! }"#)?;
//!
//! let now = Utc.with_ymd_and_hms(2025, 5, 1, 18, 0, 0).unwrap();
//! let run = deck.review(now)?;
//!
//! assert_eq!(run.new_reviews(), 1);
//! // New cards come first by default
//! assert_eq!(deck.cards[0].question, "gato");
//! assert_eq!(deck.cards[1].reviews[0].rating, "good");
//! # Ok::<(), msrs_core::MsrsError>(())
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod card;
pub mod deck;
pub mod error;
pub mod fsrs;
pub mod import;
pub mod marks;
pub mod options;
pub mod schedule;
pub mod stats;
pub mod timestamp;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use card::{Card, RawReview, Warning, WarningKind};
pub use deck::{CardEntry, Deck};
pub use error::{MsrsError, Result};
pub use fsrs::{add_review, due_date, fold_reviews, retention, Memory, Rating, Review};
pub use import::import_jpdb;
pub use marks::{apply_marks, MarkSlots, Placeholder, Reconciliation, SlotKind};
pub use options::{NewCardsPlacement, RatingSymbols, SchedulingOptions};
pub use schedule::{Calendar, DayGroup, MonthGroup, ScheduleRun, ScheduledCard, Scheduler};
pub use stats::DeckStats;
pub use timestamp::{format_timestamp, parse_timestamp};
