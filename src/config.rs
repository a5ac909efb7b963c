//! Engine configuration.

use serde::Deserialize;

/// Page size of the paginated item fetch when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// What to do with a fetched item whose status key matches no column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum UnmatchedPolicy {
    /// Log a data-consistency warning and leave the item off the board.
    #[default]
    Drop,
    /// Collect such items into a synthetic bucket column. The bucket has no
    /// backing status option, is excluded from column reindexing, and never
    /// rewrites or persists the collected cards.
    Collect { key: String, label: String },
}

/// Board engine configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Items fetched per page during a load. Values below 1 are treated as 1.
    pub page_size: usize,
    pub unmatched: UnmatchedPolicy,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            unmatched: UnmatchedPolicy::default(),
        }
    }
}

impl BoardConfig {
    pub(crate) fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }
}
