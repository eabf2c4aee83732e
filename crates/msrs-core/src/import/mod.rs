//! Importers from other review tools

mod jpdb;

pub use jpdb::{grade_rating as jpdb_grade_rating, import_jpdb};
