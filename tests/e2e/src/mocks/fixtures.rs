//! Test Data Factory
//!
//! Provides decks and exports for journey tests:
//! - Hand-written decks covering new, learned, lapsed and graded cards
//! - Batch generation for larger runs
//! - jpdb.io exports in the shape the site produces

use chrono::{DateTime, Duration, TimeZone, Utc};
use msrs_core::{CardEntry, Deck, RawReview, Rating, SchedulingOptions};

/// Factory for creating test decks
pub struct DeckFactory;

/// A deck plus the instant it should be reviewed at
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub deck: Deck,
    pub now: DateTime<Utc>,
    pub description: &'static str,
}

impl DeckFactory {
    /// Fixed "now" used by every scenario
    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 1, 18, 0, 0).unwrap()
    }

    /// A card with the given reviews, most recent first
    pub fn card(question: &str, reviews: &[(&str, Rating)]) -> CardEntry {
        CardEntry {
            question: question.to_string(),
            reviews: reviews
                .iter()
                .map(|(date, rating)| RawReview::new(*date, rating.label()))
                .collect(),
            ..Default::default()
        }
    }

    /// Same card with `mark` typed into its end slot
    pub fn graded(mut card: CardEntry, mark: &str) -> CardEntry {
        card.end = mark.to_string();
        card
    }

    // ========================================================================
    // SCENARIOS
    // ========================================================================

    /// Small vocabulary deck: two new cards, a learned card graded today,
    /// a recent lapse and a card carrying a typo mark
    pub fn vocabulary_scenario() -> TestScenario {
        let deck = Deck {
            options: SchedulingOptions::default(),
            cards: vec![
                Self::card("el perro", &[]),
                Self::graded(
                    Self::card(
                        "la casa",
                        &[("2025-04-10T07:00:00Z", Rating::Good), ("2025-04-01", Rating::Good)],
                    ),
                    "3",
                ),
                Self::card("el gato", &[("2025-04-30", Rating::Again)]),
                Self::graded(Self::card("la mesa", &[("2025-03-01", Rating::Easy)]), "e"),
                Self::card("el libro", &[]),
            ],
        };

        TestScenario {
            deck,
            now: Self::now(),
            description: "Mixed vocabulary deck with one mark and one typo",
        }
    }

    /// Cards reviewed daily with the same rating, for comparing schedules
    pub fn rating_ladder_scenario() -> TestScenario {
        let cards = Rating::ALL
            .into_iter()
            .map(|rating| {
                let reviews: Vec<(String, Rating)> = (1..=3)
                    .map(|days| ((Self::now() - Duration::days(days * 4)).to_rfc3339(), rating))
                    .collect();
                let borrowed: Vec<(&str, Rating)> =
                    reviews.iter().map(|(d, r)| (d.as_str(), *r)).collect();
                Self::card(&format!("always {}", rating), &borrowed)
            })
            .collect();

        TestScenario {
            deck: Deck {
                options: SchedulingOptions::default(),
                cards,
            },
            now: Self::now(),
            description: "One card per rating, each graded the same three times",
        }
    }

    /// `count` cards with deterministic histories of varying length
    pub fn batch(count: usize) -> Deck {
        let cards = (0..count)
            .map(|i| {
                let reviews: Vec<RawReview> = (0..i % 6)
                    .map(|j| {
                        let date = Self::now() - Duration::days((j * 9 + i % 7) as i64 + 1);
                        RawReview::new(date.format("%Y-%m-%d").to_string(), Rating::ALL[(i + j) % 4].label())
                    })
                    .collect();
                CardEntry {
                    question: format!("card {}", i),
                    reviews,
                    ..Default::default()
                }
            })
            .collect();

        Deck {
            options: SchedulingOptions::default(),
            cards,
        }
    }

    // ========================================================================
    // EXPORTS
    // ========================================================================

    /// A jpdb.io `reviews.json` export
    pub fn jpdb_export(cards: &[(&str, &str, Vec<(i64, &str)>)]) -> String {
        let cards: Vec<serde_json::Value> = cards
            .iter()
            .enumerate()
            .map(|(vid, (spelling, reading, reviews))| {
                let reviews: Vec<serde_json::Value> = reviews
                    .iter()
                    .map(|(timestamp, grade)| {
                        serde_json::json!({ "timestamp": timestamp, "grade": grade, "from_anki": false })
                    })
                    .collect();
                serde_json::json!({
                    "vid": 1_000_000 + vid,
                    "spelling": spelling,
                    "reading": reading,
                    "reviews": reviews,
                })
            })
            .collect();

        serde_json::json!({ "cards_vocabulary_jp_en": cards }).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_scenario_parses_back() {
        let scenario = DeckFactory::vocabulary_scenario();
        let json = scenario.deck.to_json().unwrap();
        assert_eq!(Deck::from_json(&json).unwrap(), scenario.deck);
    }

    #[test]
    fn test_batch_is_deterministic() {
        assert_eq!(DeckFactory::batch(20), DeckFactory::batch(20));
        assert_eq!(DeckFactory::batch(20).cards.len(), 20);
    }

    #[test]
    fn test_jpdb_export_shape() {
        let export = DeckFactory::jpdb_export(&[("約", "やく", vec![(1718273287, "known")])]);
        let value: serde_json::Value = serde_json::from_str(&export).unwrap();
        assert_eq!(value["cards_vocabulary_jp_en"][0]["reading"], "やく");
    }
}
