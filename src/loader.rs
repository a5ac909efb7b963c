//! Progressive board population.
//!
//! A load runs as a spawned worker that never touches board state. It
//! fetches the status options, then the total match count, then pages of
//! items, and hands each batch back over an unbounded channel as a
//! discrete [`LoadStep`]. The fetch loop does not wait for the board to
//! apply the previous step before issuing the next fetch; applications on
//! the owning thread stay serialized regardless.
//!
//! Every step is tagged with the generation of the query that produced it.
//! The board discards steps from superseded generations, so a newer query
//! can never end up interleaved with a stale one. Dropping the receiver is
//! the cancellation signal: the worker exits on its next send.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use crate::model::{Card, StatusOption};
use crate::source::{ItemSource, QueryCriteria, Scope, SourceError, StatusOptionSource};

/// Summary of a load, accumulated while its steps are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Total match count reported by the backend.
    pub total: usize,
    /// Fetched items that found their column.
    pub matched: usize,
    /// Fetched items whose status matched no column.
    pub unmatched: usize,
}

/// One discrete publish step of an in-flight load.
#[derive(Debug)]
pub enum LoadStep {
    /// All status options for the scope, fetched before any items.
    Columns(Vec<StatusOption>),
    /// Total number of matching items, for progress display.
    Total(usize),
    /// One fetched page of items.
    Page(Vec<Card>),
    /// The load delivered every page; `fetched` items went out in
    /// [`LoadStep::Page`] steps.
    Finished { fetched: usize },
    /// A backend fetch failed. Pages applied so far stay on the board.
    Failed(SourceError),
}

/// A step tagged with its query generation.
#[derive(Debug)]
pub struct LoadBatch {
    pub generation: u64,
    pub step: LoadStep,
}

fn publish(tx: &UnboundedSender<LoadBatch>, generation: u64, step: LoadStep) -> bool {
    tx.send(LoadBatch { generation, step }).is_ok()
}

/// Worker body of one load. Runs off the interactive thread; all board
/// mutation happens where the channel is drained.
pub(crate) async fn run_load(
    options: Arc<dyn StatusOptionSource>,
    items: Arc<dyn ItemSource>,
    scope: Scope,
    criteria: QueryCriteria,
    page_size: usize,
    generation: u64,
    tx: UnboundedSender<LoadBatch>,
) {
    let columns = match options.list(scope.project_id, scope.account_id).await {
        Ok(columns) => columns,
        Err(err) => {
            tracing::error!(generation, error = %err, "status option fetch failed");
            publish(&tx, generation, LoadStep::Failed(err));
            return;
        }
    };
    if !publish(&tx, generation, LoadStep::Columns(columns)) {
        return;
    }

    let total = match items.count(&criteria).await {
        Ok(total) => total,
        Err(err) => {
            tracing::error!(generation, error = %err, "item count fetch failed");
            publish(&tx, generation, LoadStep::Failed(err));
            return;
        }
    };
    if !publish(&tx, generation, LoadStep::Total(total)) {
        return;
    }

    let mut fetched = 0;
    for page in 0..total.div_ceil(page_size) {
        match items.page(&criteria, page, page_size).await {
            Ok(cards) => {
                fetched += cards.len();
                tracing::debug!(generation, page, count = cards.len(), "page fetched");
                if !publish(&tx, generation, LoadStep::Page(cards)) {
                    return;
                }
            }
            Err(err) => {
                tracing::error!(generation, page, error = %err, "page fetch failed");
                publish(&tx, generation, LoadStep::Failed(err));
                return;
            }
        }
    }

    publish(&tx, generation, LoadStep::Finished { fetched });
}
