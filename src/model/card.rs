//! Work-item cards and their identifiers.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Backend-assigned card identifier. Absent on a card means the card is an
/// unsaved draft from the inline "new card" flow.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CardId(pub i64);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable status value identifying a column, e.g. `"InProgress"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusKey(String);

impl StatusKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StatusKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StatusKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for StatusKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Card priority. Items fetched without one display as `Medium`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

/// A single work item, bound to exactly one column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    /// Backend id, assigned on first successful save.
    pub id: Option<CardId>,
    pub title: String,
    /// Always equals the key of the containing column. The move operations
    /// rewrite it; nothing else may.
    pub status: StatusKey,
    #[serde(default)]
    pub priority: Priority,
    pub deadline: Option<NaiveDate>,
    pub assignee: Option<String>,
    /// Completion fraction in `0.0..=1.0`.
    pub percent_complete: f64,
    pub project_id: i64,
    pub project_short_name: String,
}

impl Card {
    /// Whether this card has never been persisted.
    pub fn is_draft(&self) -> bool {
        self.id.is_none()
    }

    /// Caption the surface shows on the card face, e.g. `[PRJ-42] Fix build`.
    /// Drafts have no key yet and show the bare title.
    pub fn display_key(&self) -> String {
        match self.id {
            Some(id) => format!("[{}-{}] {}", self.project_short_name, id, self.title),
            None => self.title.clone(),
        }
    }
}
