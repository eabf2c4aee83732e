//! Test harness


pub use deck_manager::TestDeckManager;
