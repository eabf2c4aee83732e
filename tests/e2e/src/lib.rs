//! End-to-end test support
//!
//! - `harness`: temporary deck files that clean up after themselves
//! - `mocks`: ready-made decks and exports for journey tests

pub mod harness;
pub mod mocks;
