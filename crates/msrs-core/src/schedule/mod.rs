//! Scheduling Pipeline
//!
//! For each card independently:
//! 1. Parse stored reviews (bad dates and unknown labels are skipped with a warning)
//! 2. Reconcile pending marks into at most one new review at "now"
//! 3. Sort reviews ascending and fold them into a [`Memory`](crate::fsrs::Memory)
//! 4. Derive the due date at the target retention, jitter it by ±10% and
//!    enforce a one-day minimum unless the last rating was Again
//!
//! Then across cards: order by due date (new cards at the configured end)
//! and group by local day and month.

mod calendar;
mod jitter;
mod pipeline;

pub use calendar::{Calendar, DayGroup, MonthGroup};
pub use jitter::{
    adjusted_interval, card_hash, hash_key, jitter_factor, js_number, jittered_due, JITTER_RATIO,
    MIN_GAP_DAYS,
};
pub use pipeline::{MemoryCache, ScheduleRun, ScheduledCard, Scheduler};

// ============================================================================
// TESTS
// ============================================================================
