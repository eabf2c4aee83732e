//! jpdb.io review export
//!
//! Reads `reviews.json` as exported by jpdb.io and turns each vocabulary card
//! into a deck card with its full history. Grades map onto ratings:
//!
//! | jpdb grade            | rating |
//! |-----------------------|--------|
//! | `unknown`, `something` | again |
//! | `hard`                | hard   |
//! | `okay`                | good   |
//! | `easy`, `known`       | easy   |

use chrono::DateTime;
use serde::Deserialize;

use crate::card::RawReview;
use crate::deck::CardEntry;
use crate::error::{MsrsError, Result};
use crate::fsrs::Rating;
use crate::timestamp::format_timestamp;

#[derive(Debug, Deserialize)]
struct JpdbExport {
    #[serde(default)]
    cards_vocabulary_jp_en: Vec<JpdbCard>,
}

#[derive(Debug, Deserialize)]
struct JpdbCard {
    spelling: String,
    reading: String,
    #[serde(default)]
    reviews: Vec<JpdbReview>,
}

#[derive(Debug, Deserialize)]
struct JpdbReview {
    /// Unix seconds
    timestamp: i64,
    grade: String,
}

/// Rating for a jpdb grade
pub fn grade_rating(grade: &str) -> Option<Rating> {
    match grade {
        "unknown" | "something" => Some(Rating::Again),
        "hard" => Some(Rating::Hard),
        "okay" => Some(Rating::Good),
        "easy" | "known" => Some(Rating::Easy),
        _ => None,
    }
}

/// Convert a jpdb export into deck cards, in export order
///
/// The reading becomes the answer when it differs from the spelling.
/// An unknown grade or out-of-range timestamp fails the whole import.
pub fn import_jpdb(source: &str) -> Result<Vec<CardEntry>> {
    let export: JpdbExport = serde_json::from_str(source)?;
    let mut entries = Vec::with_capacity(export.cards_vocabulary_jp_en.len());

    for card in export.cards_vocabulary_jp_en {
        let mut reviews = card
            .reviews
            .iter()
            .map(|review| {
                let rating = grade_rating(&review.grade).ok_or_else(|| {
                    MsrsError::Import(format!(
                        "Unknown grade \"{}\" (in \"{}\")",
                        review.grade, card.spelling
                    ))
                })?;
                let instant = DateTime::from_timestamp(review.timestamp, 0).ok_or_else(|| {
                    MsrsError::InvalidTimestamp(review.timestamp.to_string())
                })?;
                Ok((instant, rating))
            })
            .collect::<Result<Vec<_>>>()?;
        reviews.sort_by(|a, b| b.0.cmp(&a.0));

        let answer = (card.reading != card.spelling).then(|| serde_json::Value::String(card.reading));
        entries.push(CardEntry {
            question: card.spelling,
            answer,
            reviews: reviews
                .into_iter()
                .map(|(instant, rating)| RawReview::new(format_timestamp(instant), rating.label()))
                .collect(),
            ..Default::default()
        });
    }

    tracing::info!(cards = entries.len(), "imported jpdb export");
    Ok(entries)
}
