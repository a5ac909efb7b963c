//! Board state and its mutation operations.
//!
//! Every operation here is a synchronous state transition. Operations that
//! imply persistence return a description of it ([`CardMove`],
//! [`ColumnMove`]) and the orchestrator issues the backend calls around the
//! transition; nothing in this module performs I/O.

use crate::config::UnmatchedPolicy;
use crate::error::BoardError;
use crate::model::{Card, CardId, Column, DropTarget, OptionId, StatusKey, StatusOption};
use crate::reindex::{card_index_map, column_index_map};
use crate::source::Scope;

/// The transient "new card" editor. At most one exists board-wide.
#[derive(Debug, Clone)]
pub struct PendingEditor {
    column: StatusKey,
    draft: Card,
}

impl PendingEditor {
    pub fn column(&self) -> &StatusKey {
        &self.column
    }

    pub fn draft(&self) -> &Card {
        &self.draft
    }
}

/// Result of a card move: the snapshot to persist and the destination
/// column's index map. `reindex` is empty only if the destination holds no
/// saved cards, in which case no batch call is made.
#[derive(Debug)]
pub struct CardMove {
    pub card: Card,
    pub from: StatusKey,
    pub to: StatusKey,
    pub index: usize,
    pub reindex: Vec<(CardId, usize)>,
    /// False for an in-column reorder; no status update is persisted then.
    pub status_changed: bool,
}

/// Result of a column move: the full board-level index map.
#[derive(Debug)]
pub struct ColumnMove {
    pub key: StatusKey,
    pub index: usize,
    pub reindex: Vec<(OptionId, usize)>,
}

/// Outcome of applying one fetched page to the board.
#[derive(Debug, Default)]
pub struct PageApply {
    /// Cards actually appended, grouped per column in first-seen order.
    pub appended: Vec<(StatusKey, Vec<Card>)>,
    /// Items whose status matched a column.
    pub matched: usize,
    /// Items whose status matched no column (dropped or bucketed per policy).
    pub unmatched: usize,
}

/// The ordered set of columns plus the single pending-editor slot.
#[derive(Debug, Default)]
pub struct BoardState {
    columns: Vec<Column>,
    editor: Option<PendingEditor>,
}

impl BoardState {
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, key: &StatusKey) -> Option<&Column> {
        self.columns.iter().find(|c| c.key() == key)
    }

    fn column_mut(&mut self, key: &StatusKey) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.key() == key)
    }

    pub fn card_count(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    pub fn editor(&self) -> Option<&PendingEditor> {
        self.editor.as_ref()
    }

    /// Drop all columns, cards and any pending editor. A fresh query
    /// reloads both columns and cards from the backend.
    pub(crate) fn clear(&mut self) {
        self.columns.clear();
        self.editor = None;
    }

    /// Append a column for a status option. Column keys are unique across
    /// the board.
    pub fn add_column(&mut self, option: StatusOption) -> Result<&Column, BoardError> {
        if self.column(&option.key).is_some() {
            return Err(BoardError::DuplicateColumn { key: option.key });
        }
        self.columns.push(Column::from_option(option));
        Ok(&self.columns[self.columns.len() - 1])
    }

    /// Ensure the synthetic unmatched bucket exists. Returns the column
    /// only when it was created by this call.
    pub(crate) fn ensure_bucket(&mut self, key: &str, label: &str) -> Option<&Column> {
        let key = StatusKey::from(key);
        if let Some(existing) = self.column(&key) {
            if !existing.is_synthetic() {
                tracing::warn!(
                    status = %key,
                    "unmatched bucket key collides with a real column, leaving policy inert"
                );
            }
            return None;
        }
        self.columns.push(Column::synthetic(key, label));
        Some(&self.columns[self.columns.len() - 1])
    }

    /// Move a card between (or within) columns, clamping the target index.
    ///
    /// Returns `Ok(None)` for a drop the acceptance criterion rejects; the
    /// board is untouched then.
    pub fn move_card(
        &mut self,
        id: CardId,
        from: &StatusKey,
        to: &StatusKey,
        target: DropTarget,
    ) -> Result<Option<CardMove>, BoardError> {
        let source = self.column(from).ok_or_else(|| BoardError::ColumnNotFound {
            key: from.clone(),
        })?;
        if source.position_of(id).is_none() {
            return Err(BoardError::CardNotFound {
                id,
                key: from.clone(),
            });
        }
        let dest = self.column(to).ok_or_else(|| BoardError::ColumnNotFound {
            key: to.clone(),
        })?;
        if dest.is_synthetic() {
            return Err(BoardError::SyntheticColumn { key: to.clone() });
        }

        let same = from == to;
        // Clamp against the destination length as it will be once the card
        // has left its source position.
        let dest_len = dest.len() - usize::from(same);
        let Some(index) = target.resolve(dest_len) else {
            return Ok(None);
        };

        let mut card = self
            .column_mut(from)
            .and_then(|c| c.remove_card(id))
            .ok_or(BoardError::CardNotFound {
                id,
                key: from.clone(),
            })?;
        card.status = to.clone();

        let dest = self.column_mut(to).ok_or_else(|| BoardError::ColumnNotFound {
            key: to.clone(),
        })?;
        dest.insert_card(index, card.clone());
        let reindex = card_index_map(dest.cards());

        Ok(Some(CardMove {
            card,
            from: from.clone(),
            to: to.clone(),
            index,
            reindex,
            status_changed: !same,
        }))
    }

    /// Move a column to a new position, clamping the target index.
    ///
    /// Returns `Ok(None)` for a rejected drop.
    pub fn move_column(
        &mut self,
        key: &StatusKey,
        target: DropTarget,
    ) -> Result<Option<ColumnMove>, BoardError> {
        let pos = self
            .columns
            .iter()
            .position(|c| c.key() == key)
            .ok_or_else(|| BoardError::ColumnNotFound { key: key.clone() })?;

        let Some(index) = target.resolve(self.columns.len() - 1) else {
            return Ok(None);
        };

        let column = self.columns.remove(pos);
        self.columns.insert(index, column);
        let reindex = column_index_map(&self.columns);

        Ok(Some(ColumnMove {
            key: key.clone(),
            index,
            reindex,
        }))
    }

    /// Apply one fetched page: route each item to the column matching its
    /// status, or handle it per the unmatched policy.
    pub(crate) fn append_page(
        &mut self,
        cards: Vec<Card>,
        policy: &UnmatchedPolicy,
    ) -> PageApply {
        let mut apply = PageApply::default();
        for card in cards {
            let dest = if self.column(&card.status).is_some() {
                apply.matched += 1;
                Some(card.status.clone())
            } else {
                apply.unmatched += 1;
                match policy {
                    UnmatchedPolicy::Drop => {
                        tracing::warn!(
                            status = %card.status,
                            card = ?card.id,
                            "no column for status, dropping item from the board"
                        );
                        None
                    }
                    UnmatchedPolicy::Collect { key, .. } => {
                        // A real column under the bucket key means the policy
                        // is inert; routing into it would break the
                        // status-matches-column invariant.
                        let bucket = StatusKey::from(key.as_str());
                        if self.column(&bucket).is_some_and(Column::is_synthetic) {
                            tracing::warn!(
                                status = %card.status,
                                card = ?card.id,
                                bucket = %bucket,
                                "no column for status, collecting item into bucket"
                            );
                            Some(bucket)
                        } else {
                            tracing::warn!(
                                status = %card.status,
                                card = ?card.id,
                                "no column for status and no bucket, dropping item"
                            );
                            None
                        }
                    }
                }
            };

            let Some(dest) = dest else { continue };
            let Some(column) = self.column_mut(&dest) else {
                continue;
            };
            if !column.push_card(card.clone()) {
                continue;
            }
            match apply.appended.iter_mut().find(|(k, _)| *k == dest) {
                Some((_, cards)) => cards.push(card),
                None => apply.appended.push((dest, vec![card])),
            }
        }
        apply
    }

    /// Open the inline "new card" editor on a column, evicting any editor
    /// already open elsewhere on the board. The evicted draft is discarded
    /// without a persistence call.
    pub fn open_editor(
        &mut self,
        key: &StatusKey,
        scope: &Scope,
    ) -> Result<&PendingEditor, BoardError> {
        let column = self.column(key).ok_or_else(|| BoardError::ColumnNotFound {
            key: key.clone(),
        })?;
        if column.is_synthetic() {
            return Err(BoardError::SyntheticColumn { key: key.clone() });
        }
        if let Some(evicted) = self.editor.take() {
            tracing::debug!(column = %evicted.column, "evicting pending card editor");
        }
        let draft = Card {
            id: None,
            title: String::new(),
            status: key.clone(),
            priority: Default::default(),
            deadline: None,
            assignee: None,
            percent_complete: 0.0,
            project_id: scope.project_id,
            project_short_name: scope.project_short_name.clone(),
        };
        Ok(self.editor.insert(PendingEditor {
            column: key.clone(),
            draft,
        }))
    }

    /// Validate a confirm and return the draft to persist. The editor stays
    /// open: a blank title is rejected with the editor intact, and the
    /// editor is only consumed once the save succeeded
    /// (see [`complete_confirm`](Self::complete_confirm)).
    pub fn stage_confirm(&self, title: &str) -> Result<Card, BoardError> {
        let editor = self.editor.as_ref().ok_or(BoardError::NoEditor)?;
        let title = title.trim();
        if title.is_empty() {
            return Err(BoardError::EmptyTitle);
        }
        let mut draft = editor.draft.clone();
        draft.title = title.to_string();
        Ok(draft)
    }

    /// Replace the editor with the now-saved card at index 0 of its column.
    /// Returns the column's new count.
    pub fn complete_confirm(&mut self, saved: Card) -> Result<usize, BoardError> {
        let editor = self.editor.take().ok_or(BoardError::NoEditor)?;
        let column = self
            .column_mut(&editor.column)
            .ok_or(BoardError::ColumnNotFound {
                key: editor.column,
            })?;
        column.insert_card(0, saved);
        Ok(column.len())
    }

    /// Discard the pending editor, if any, with no persistence call.
    pub fn cancel_editor(&mut self) -> bool {
        self.editor.take().is_some()
    }
}
