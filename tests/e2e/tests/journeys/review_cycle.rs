//! Review cycle journeys
//!
//! A learner edits a deck file, types marks, runs a review, and comes back
//! on later days. Each test drives the real file format end to end.

use chrono::{Duration, FixedOffset};
use msrs_core::{
    fold_reviews, Calendar, Deck, MsrsError, NewCardsPlacement, Rating, WarningKind,
};
use msrs_e2e_tests::harness::TestDeckManager;
use msrs_e2e_tests::mocks::DeckFactory;

#[test]
fn test_first_review_records_marks_and_reorders() {
    let scenario = DeckFactory::vocabulary_scenario();
    let mut manager = TestDeckManager::from_deck(&scenario.deck);

    let run = manager.review(scenario.now);
    assert_eq!(run.new_reviews(), 1);
    assert_eq!(run.warnings.len(), 1);
    assert_eq!(run.warnings[0].kind, WarningKind::UnknownMark);
    assert_eq!(run.warnings[0].to_string(), "unknown rating \"e\" (in \"la mesa\")");

    let deck = manager.load();
    let questions: Vec<&str> = deck.cards.iter().map(|c| c.question.as_str()).collect();
    assert_eq!(&questions[..2], &["el perro", "el libro"]);

    let casa = deck.cards.iter().find(|c| c.question == "la casa").unwrap();
    assert_eq!(casa.reviews.len(), 3);
    assert_eq!(casa.reviews[0].date, "2025-05-01T18:00:00Z");
    assert_eq!(casa.reviews[0].rating, "good");
    assert_eq!(casa.end, " ");

    // The typo stays visible where the user will look for it
    let mesa = deck.cards.iter().find(|c| c.question == "la mesa").unwrap();
    assert_eq!(mesa.end, "e");
    assert_eq!(mesa.reviews.len(), 1);
}

#[test]
fn test_rerun_without_marks_changes_nothing() {
    let scenario = DeckFactory::vocabulary_scenario();
    let mut manager = TestDeckManager::from_deck(&scenario.deck);
    manager.review(scenario.now);
    manager.take_snapshot();

    let run = manager.review(scenario.now);
    assert_eq!(run.new_reviews(), 0);
    assert!(manager.matches_snapshot());
}

#[test]
fn test_learning_over_several_sessions() {
    let mut manager = TestDeckManager::new_temp(r#"{"cards": [{"question": "der Hund", "end": "3"}]}"#);
    let mut now = DeckFactory::now();
    let mut last_stability = 0.0;

    for session in 0..4 {
        let run = manager.review(now);
        let card = &run.cards[0];
        let memory = card.memory.expect("graded card has memory");
        assert_eq!(card.history.len(), session + 1);
        assert!(memory.stability > last_stability);
        last_stability = memory.stability;

        // Come back when the card is due and grade it again
        let due = card.due.expect("graded card has a due date");
        assert!(due >= now + Duration::days(1));
        now = due + Duration::hours(1);
        manager.edit(|deck| deck.cards[0].end = "3".to_string());
    }

    let deck = manager.load();
    let history = deck.cards[0].reviews.len();
    assert_eq!(history, 4);
}

#[test]
fn test_stored_history_folds_to_run_memory() {
    let scenario = DeckFactory::vocabulary_scenario();
    let run = scenario.deck.preview(scenario.now).unwrap();

    for card in run.due_cards() {
        assert_eq!(card.memory, fold_reviews(&card.history));
    }
}

#[test]
fn test_better_ratings_are_due_later() {
    let scenario = DeckFactory::rating_ladder_scenario();
    let run = scenario.deck.preview(scenario.now).unwrap();

    let due = |rating: Rating| {
        run.cards
            .iter()
            .find(|c| c.last_rating() == Some(rating))
            .and_then(|c| c.due)
            .unwrap()
    };
    assert!(due(Rating::Again) < due(Rating::Hard));
    assert!(due(Rating::Hard) < due(Rating::Good));
    assert!(due(Rating::Good) < due(Rating::Easy));
}

#[test]
fn test_strict_labels_leave_file_untouched() {
    let scenario = DeckFactory::vocabulary_scenario();
    let mut manager = TestDeckManager::from_deck(&scenario.deck);
    manager.edit(|deck| {
        deck.options.strict_labels = true;
        deck.cards[2].reviews[0].rating = "Again".to_string();
    });
    manager.take_snapshot();

    let mut deck = manager.load();
    let err = deck.review(scenario.now).unwrap_err();
    assert!(matches!(err, MsrsError::UnknownRatingLabel { .. }));
    assert_eq!(deck, manager.load());
    assert!(manager.matches_snapshot());
}

#[test]
fn test_lenient_labels_skip_and_keep_entry() {
    let scenario = DeckFactory::vocabulary_scenario();
    let mut manager = TestDeckManager::from_deck(&scenario.deck);
    manager.edit(|deck| deck.cards[2].reviews[0].rating = "Again".to_string());

    let run = manager.review(scenario.now);
    assert!(run
        .warnings
        .iter()
        .any(|w| w.kind == WarningKind::UnknownRatingLabel && w.card_id == "el gato"));

    // Skipping the only review makes the card new again, but the entry is kept
    let deck = manager.load();
    let gato = deck.cards.iter().find(|c| c.question == "el gato").unwrap();
    assert_eq!(gato.reviews[0].rating, "Again");
}

#[test]
fn test_new_cards_at_end_option() {
    let scenario = DeckFactory::vocabulary_scenario();
    let mut deck = scenario.deck.clone();
    deck.options.new_cards = NewCardsPlacement::End;
    deck.review(scenario.now).unwrap();

    let n = deck.cards.len();
    assert_eq!(deck.cards[n - 2].question, "el perro");
    assert_eq!(deck.cards[n - 1].question, "el libro");
}

#[test]
fn test_large_deck_schedule_is_ordered_and_grouped() {
    let deck = DeckFactory::batch(300);
    let run = deck.preview(DeckFactory::now()).unwrap();

    let dues: Vec<_> = run.due_cards().filter_map(|c| c.due).collect();
    assert!(dues.windows(2).all(|w| w[0] <= w[1]));

    let east = FixedOffset::east_opt(9 * 3600).unwrap();
    let calendar = Calendar::build(&run, &east);
    let grouped: usize = calendar.days.iter().map(|d| d.cards.len()).sum();
    assert_eq!(grouped, dues.len());
    assert_eq!(calendar.new_cards.len(), run.new_cards().count());
    assert!(calendar.days.windows(2).all(|w| w[0].date < w[1].date));

    // Same input, same schedule
    assert_eq!(run, deck.preview(DeckFactory::now()).unwrap());
}

#[test]
fn test_blank_file_is_an_empty_deck() {
    let mut manager = TestDeckManager::new_temp("");
    let run = manager.review(DeckFactory::now());
    assert!(run.cards.is_empty());
    assert_eq!(manager.load(), Deck::default());
}
