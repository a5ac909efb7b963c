//! Engine error taxonomy.

use thiserror::Error;

use crate::model::{CardId, StatusKey};
use crate::source::SourceError;

/// Errors surfaced by board operations.
///
/// Data-consistency conditions during a load (unmatched status, duplicate
/// card id) are warnings, not errors: they are logged and the load goes on.
/// A drop the acceptance criterion rejects is not an error either, it is a
/// defined no-op.
#[derive(Debug, Error)]
pub enum BoardError {
    /// No column on the board carries this status key.
    #[error("no column for status '{key}'")]
    ColumnNotFound { key: StatusKey },

    /// Adding a column whose key is already taken.
    #[error("column '{key}' already exists")]
    DuplicateColumn { key: StatusKey },

    /// The card is not in the column it was claimed to be in.
    #[error("card {id} is not in column '{key}'")]
    CardNotFound { id: CardId, key: StatusKey },

    /// The synthetic unmatched bucket has no backing status option, so
    /// nothing can be persisted against it.
    #[error("column '{key}' has no backing status option")]
    SyntheticColumn { key: StatusKey },

    /// An inline-create operation without an open editor.
    #[error("no pending card editor")]
    NoEditor,

    /// Inline-create confirm with a blank title. The editor stays open.
    #[error("card title must not be blank")]
    EmptyTitle,

    /// A backend collaborator call failed.
    #[error(transparent)]
    Source(#[from] SourceError),
}
