//! Mark Reconciliation Module
//!
//! Users grade a card by typing a short mark (by default `1`-`4`) into one
//! of its annotation slots. Before scheduling, every slot is consumed and:
//!
//! 1. The first mark equal to a rating symbol becomes a new review at "now"
//! 2. Later matching marks are reported as ignored duplicates
//! 3. Marks matching nothing are reported as unknown
//! 4. A placeholder goes back into the configured slot (the first unknown
//!    mark if there was one, so the mistake stays visible)

mod reconcile;
mod slots;

pub use reconcile::{apply_marks, choose_placeholder, reconcile, Placeholder, Reconciliation};
pub use slots::{extract_marks, MarkSlots, SlotKind};

// ============================================================================
// TESTS
// ============================================================================
