//! Test data

mod fixtures;

pub use fixtures::{DeckFactory, TestScenario};
