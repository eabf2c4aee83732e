//! Annotation slots a card exposes to the reconciler

use serde::{Deserialize, Serialize};

/// The four places a user can leave a mark on a card
///
/// What each slot physically is belongs to the document; the reconciler only
/// reads, clears and writes them through [`MarkSlots`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    /// Short prefix before the question
    Start,
    /// Note trailing the question
    #[default]
    End,
    /// Note on the line above the card
    Outside,
    /// Note inside the card's value
    Inside,
}

impl SlotKind {
    /// Order in which slots are scanned for marks
    pub const SCAN_ORDER: [SlotKind; 4] = [
        SlotKind::Start,
        SlotKind::End,
        SlotKind::Outside,
        SlotKind::Inside,
    ];

    /// Placeholder written when neither an unknown mark nor a configured
    /// placeholder is available
    pub fn blank_placeholder(self) -> &'static str {
        match self {
            SlotKind::Start => "-",
            _ => " ",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SlotKind::Start => "start",
            SlotKind::End => "end",
            SlotKind::Outside => "outside",
            SlotKind::Inside => "inside",
        }
    }
}

impl std::fmt::Display for SlotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform read/clear/write access to a card's mark slots
pub trait MarkSlots {
    /// Remove and return the slot's mark text, if any
    fn take_slot(&mut self, slot: SlotKind) -> Option<String>;

    /// Overwrite the slot
    fn set_slot(&mut self, slot: SlotKind, value: String);
}

/// Consume every slot in scan order, returning the non-blank marks
pub fn extract_marks<T: MarkSlots + ?Sized>(card: &mut T) -> Vec<String> {
    SlotKind::SCAN_ORDER
        .into_iter()
        .filter_map(|slot| card.take_slot(slot))
        .map(|mark| mark.trim().to_string())
        .filter(|mark| !mark.is_empty())
        .collect()
}
