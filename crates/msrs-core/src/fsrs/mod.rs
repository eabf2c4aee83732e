//! FSRS (Free Spaced Repetition Scheduler) Memory Model
//!
//! Turns a card's graded reviews into a memory state and derives retention
//! and due dates from it.
//!
//! Reference: https://github.com/open-spaced-repetition/fsrs4anki/wiki/The-Algorithm
//!
//! ## Core Formulas:
//! - Retrievability: R = (1 + FACTOR * t / S)^DECAY where DECAY = -0.5, FACTOR = 0.9^(1/DECAY) - 1
//! - Interval: t = S/FACTOR * (R^(1/DECAY) - 1)
//!
//! All functions are pure. Reviews made less than one day apart use the
//! same-day stability shortcut instead of the decay-based update.

mod algorithm;
mod memory;

pub use algorithm::{
    factor,
    initial_difficulty,
    initial_stability,
    next_difficulty,
    next_forget_stability,
    next_interval,
    next_recall_stability,
    next_stability,
    // Core functions
    retrievability,
    same_day_stability,
    // Constants
    DECAY,
    DEFAULT_RETENTION,
    FSRS5_WEIGHTS,
    MAX_DIFFICULTY,
    MIN_DIFFICULTY,
    MIN_STABILITY,
};

pub use memory::{
    add_days, add_review, due_date, elapsed_days, fold_reviews, retention, Memory, Rating, Review,
    DAY_MS,
};
