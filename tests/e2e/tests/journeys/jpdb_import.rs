//! jpdb.io import journeys
//!
//! Import an export into a deck, then keep reviewing it with marks.

use msrs_core::{import_jpdb, Deck, MsrsError};
use msrs_e2e_tests::harness::TestDeckManager;
use msrs_e2e_tests::mocks::DeckFactory;

fn export() -> String {
    DeckFactory::jpdb_export(&[
        (
            "約",
            "やく",
            vec![
                (1718273287, "known"),
                (1719171285, "okay"),
                (1723477863, "easy"),
                (1743275221, "something"),
                (1743275536, "okay"),
            ],
        ),
        ("ご", "ご", vec![(1730212797, "known"), (1730811641, "easy")]),
    ])
}

#[test]
fn test_import_then_review() {
    let mut manager = TestDeckManager::new_temp("{}");
    manager.edit(|deck| {
        deck.add_cards(import_jpdb(&export()).unwrap());
    });

    let deck = manager.load();
    assert_eq!(deck.cards.len(), 2);
    let yaku = &deck.cards[0];
    assert_eq!(yaku.answer, Some(serde_json::json!("やく")));
    assert_eq!(yaku.reviews.len(), 5);
    assert_eq!(yaku.reviews[0].date, "2025-03-29T19:12:16Z");
    assert_eq!(yaku.reviews[0].rating, "good");
    assert_eq!(yaku.reviews[1].rating, "again");
    assert_eq!(yaku.reviews[4].date, "2024-06-13T10:08:07Z");
    assert!(deck.cards[1].answer.is_none());

    manager.edit(|deck| deck.cards[1].end = "1".to_string());
    let run = manager.review(DeckFactory::now());
    assert_eq!(run.new_reviews(), 1);
    assert!(run.warnings.is_empty());
    assert_eq!(run.new_cards().count(), 0);

    let go = manager
        .load()
        .cards
        .into_iter()
        .find(|c| c.question == "ご")
        .unwrap();
    assert_eq!(go.reviews.len(), 3);
    assert_eq!(go.reviews[0].rating, "again");
}

#[test]
fn test_reimport_does_not_duplicate() {
    let mut deck = Deck::default();
    assert_eq!(deck.add_cards(import_jpdb(&export()).unwrap()), 2);
    assert_eq!(deck.add_cards(import_jpdb(&export()).unwrap()), 0);
    assert_eq!(deck.cards.len(), 2);
}

#[test]
fn test_unknown_grade_aborts_import() {
    let export = DeckFactory::jpdb_export(&[
        ("一", "いち", vec![(1718273287, "okay")]),
        ("二", "に", vec![(1718273287, "perfect")]),
    ]);
    let err = import_jpdb(&export).unwrap_err();
    assert!(matches!(err, MsrsError::Import(_)));
    assert!(err.to_string().contains("perfect"));
}
