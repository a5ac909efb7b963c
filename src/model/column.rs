//! Status columns: named, ordered buckets of cards.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::card::{Card, CardId, StatusKey};

/// Backend identifier of a status option.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OptionId(pub i64);

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A status option as stored by the backend; one column per option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusOption {
    pub id: OptionId,
    pub key: StatusKey,
    pub label: String,
}

/// An ordered bucket of cards corresponding to one status value.
///
/// Card order is significant: it is the persisted display order. A column
/// never contains two cards with the same id, and every contained card's
/// `status` equals the column key (the synthetic unsorted bucket, which has
/// no backing option, is exempt from the status match).
#[derive(Debug, Clone)]
pub struct Column {
    key: StatusKey,
    option_id: Option<OptionId>,
    label: String,
    cards: Vec<Card>,
}

impl Column {
    pub fn from_option(option: StatusOption) -> Self {
        Self {
            key: option.key,
            option_id: Some(option.id),
            label: option.label,
            cards: Vec::new(),
        }
    }

    /// Bucket column for unmatched items; has no backing status option and
    /// is excluded from column reindexing.
    pub(crate) fn synthetic(key: StatusKey, label: impl Into<String>) -> Self {
        Self {
            key,
            option_id: None,
            label: label.into(),
            cards: Vec::new(),
        }
    }

    pub fn key(&self) -> &StatusKey {
        &self.key
    }

    pub fn option_id(&self) -> Option<OptionId> {
        self.option_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_synthetic(&self) -> bool {
        self.option_id.is_none()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Display header: label plus live count, e.g. `In Progress (4)`.
    pub fn header(&self) -> String {
        format!("{} ({})", self.label, self.cards.len())
    }

    pub fn position_of(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == Some(id))
    }

    /// Append a card, refusing duplicates of an already-present id.
    /// Returns whether the card was added.
    pub(crate) fn push_card(&mut self, card: Card) -> bool {
        if let Some(id) = card.id {
            if self.position_of(id).is_some() {
                tracing::warn!(card = %id, column = %self.key, "duplicate card id, skipping");
                return false;
            }
        }
        self.cards.push(card);
        true
    }

    /// Insert at `index`, which the caller has already clamped to `0..=len`.
    pub(crate) fn insert_card(&mut self, index: usize, card: Card) {
        self.cards.insert(index, card);
    }

    pub(crate) fn remove_card(&mut self, id: CardId) -> Option<Card> {
        let pos = self.position_of(id)?;
        Some(self.cards.remove(pos))
    }
}
