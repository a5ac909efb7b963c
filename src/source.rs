//! Backend collaborator seams.
//!
//! The engine never reaches into a service registry: the status-option
//! store and the item store are injected at construction as trait objects
//! and everything the engine persists or fetches goes through them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Card, CardId, OptionId, StatusOption};

/// Identity under which the board operates: the active project and the
/// acting user. Stamped onto drafts and forwarded with persistence calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scope {
    pub project_id: i64,
    pub account_id: i64,
    pub project_short_name: String,
    pub actor: String,
}

/// Search criteria forwarded to the item backend. The board stamps its own
/// project id onto the criteria before a query runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryCriteria {
    pub project_id: i64,
    pub text: Option<String>,
    pub assignee: Option<String>,
}

/// Failure of a backend collaborator call.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// Transport-level failure reaching the backend.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    /// The backend processed the call and refused it.
    #[error("backend rejected the call: {0}")]
    Rejected(String),
}

/// Store of the status options (column definitions) of a project.
#[async_trait]
pub trait StatusOptionSource: Send + Sync {
    /// All status options for the project, in persisted display order.
    async fn list(
        &self,
        project_id: i64,
        account_id: i64,
    ) -> Result<Vec<StatusOption>, SourceError>;

    /// Persist the display order of the options in one batch.
    async fn batch_reindex(
        &self,
        pairs: &[(OptionId, usize)],
        account_id: i64,
    ) -> Result<(), SourceError>;
}

/// Store of the work items.
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Total number of items matching the criteria.
    async fn count(&self, criteria: &QueryCriteria) -> Result<usize, SourceError>;

    /// One page of matching items, ordered by persisted index. `page` is
    /// zero-based.
    async fn page(
        &self,
        criteria: &QueryCriteria,
        page: usize,
        page_size: usize,
    ) -> Result<Vec<Card>, SourceError>;

    /// Persist a draft; the returned card carries its backend-assigned id.
    async fn save(&self, card: &Card, actor: &str) -> Result<Card, SourceError>;

    /// Persist a field-level update of an existing card (status change).
    async fn update(&self, card: &Card, actor: &str) -> Result<(), SourceError>;

    /// Persist the display order of one column's cards in one batch.
    async fn batch_reindex(
        &self,
        pairs: &[(CardId, usize)],
        account_id: i64,
    ) -> Result<(), SourceError>;
}
