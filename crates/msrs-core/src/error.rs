//! Error types for the scheduling engine

/// Errors that abort a run before any card is mutated
#[derive(Debug, thiserror::Error)]
pub enum MsrsError {
    /// Scheduling options failed validation
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
    /// A review label outside the rating table (strict mode only)
    #[error("Unknown rating label \"{label}\" (in \"{card}\")")]
    UnknownRatingLabel { card: String, label: String },
    /// The deck document does not have the expected shape
    #[error("Deck error: {0}")]
    Deck(String),
    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// An export that cannot be converted into cards
    #[error("Import error: {0}")]
    Import(String),
    /// Unparsable timestamp
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Crate result type
pub type Result<T> = std::result::Result<T, MsrsError>;
