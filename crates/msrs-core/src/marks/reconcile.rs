//! Turning pending marks into at most one new review

use crate::card::Warning;
use crate::card::WarningKind;
use crate::fsrs::Rating;
use crate::options::RatingSymbols;

use super::slots::{extract_marks, MarkSlots, SlotKind};

/// Outcome of matching a card's marks against the rating symbols
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reconciliation {
    /// Rating of the first matching mark
    pub new_rating: Option<Rating>,
    /// The mark that produced `new_rating`
    pub matched_symbol: Option<String>,
    /// Later matching marks, ignored
    pub duplicate_marks: Vec<String>,
    /// Marks matching no symbol, in scan order
    pub unknown_marks: Vec<String>,
}

impl Reconciliation {
    /// Unknown-mark warnings first, then ignored duplicates
    pub fn warnings(&self, card_id: &str) -> Vec<Warning> {
        let kept = self.matched_symbol.as_deref().unwrap_or_default();
        self.unknown_marks
            .iter()
            .map(|mark| Warning::new(card_id, WarningKind::UnknownMark, mark))
            .chain(
                self.duplicate_marks
                    .iter()
                    .map(|mark| Warning::duplicate(card_id, mark, kept)),
            )
            .collect()
    }
}

/// Mark to leave in the rating slot for the next round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub slot: SlotKind,
    pub value: String,
}

/// Match marks in order; the first match wins
pub fn reconcile(marks: &[String], symbols: &RatingSymbols) -> Reconciliation {
    let mut result = Reconciliation::default();

    for mark in marks {
        match symbols.rating_for(mark) {
            Some(rating) if result.new_rating.is_none() => {
                result.new_rating = Some(rating);
                result.matched_symbol = Some(mark.clone());
            }
            Some(_) => result.duplicate_marks.push(mark.clone()),
            None => result.unknown_marks.push(mark.clone()),
        }
    }

    result
}

/// Pick the placeholder: the first unknown mark (so the user sees the typo),
/// else the configured placeholder, else the slot's blank
pub fn choose_placeholder(unknown_marks: &[String], symbols: &RatingSymbols) -> Placeholder {
    let slot = symbols.location;
    let value = unknown_marks
        .first()
        .cloned()
        .or_else(|| Some(symbols.placeholder.clone()).filter(|p| !p.is_empty()))
        .unwrap_or_else(|| slot.blank_placeholder().to_string());

    Placeholder { slot, value }
}

/// Full per-card step: consume the slots, reconcile, write the placeholder back
pub fn apply_marks<T: MarkSlots + ?Sized>(
    card: &mut T,
    symbols: &RatingSymbols,
) -> (Reconciliation, Placeholder) {
    let marks = extract_marks(card);
    let reconciliation = reconcile(&marks, symbols);
    let placeholder = choose_placeholder(&reconciliation.unknown_marks, symbols);

    card.set_slot(placeholder.slot, placeholder.value.clone());
    (reconciliation, placeholder)
}
