//! Ordering-to-index synchronization.
//!
//! Turns the current in-memory order of a sequence into the batch of
//! `(id, position)` pairs the backend persists as display order. The
//! functions are pure and idempotent; an empty sequence yields an empty
//! batch and callers skip the network call entirely.

use crate::model::{Card, CardId, Column, OptionId};

/// Zero-based index map for the cards of one column.
///
/// Cards without a backend id cannot be reindexed and are skipped; their
/// slot still counts, so saved cards keep their true positions.
pub fn card_index_map(cards: &[Card]) -> Vec<(CardId, usize)> {
    cards
        .iter()
        .enumerate()
        .filter_map(|(position, card)| card.id.map(|id| (id, position)))
        .collect()
}

/// Zero-based index map over the board's columns.
///
/// The synthetic unmatched bucket has no backing status option and is
/// skipped the same way.
pub fn column_index_map(columns: &[Column]) -> Vec<(OptionId, usize)> {
    columns
        .iter()
        .enumerate()
        .filter_map(|(position, column)| column.option_id().map(|id| (id, position)))
        .collect()
}
