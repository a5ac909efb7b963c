//! Board orchestrator.
//!
//! [`Board`] owns the ordered column state, routes drag gestures and the
//! inline-create lifecycle into state transitions, and coordinates the
//! loader and the index synchronization that follows every structural
//! change.
//!
//! All methods must run on the single task that owns the board, inside a
//! Tokio runtime. Persistence after a mutation is optimistic: the board
//! updates in memory first, issues the backend call fire-and-forget, and
//! reports a failure without rolling the order back.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinSet;

use crate::config::{BoardConfig, UnmatchedPolicy};
use crate::error::BoardError;
use crate::loader::{self, LoadBatch, LoadReport, LoadStep};
use crate::model::{
    BoardState, Card, CardId, Column, DropTarget, PendingEditor, StatusKey, StatusOption,
};
use crate::source::{ItemSource, QueryCriteria, Scope, StatusOptionSource};
use crate::surface::RenderSurface;

pub struct Board {
    state: BoardState,
    config: BoardConfig,
    scope: Scope,
    options: Arc<dyn StatusOptionSource>,
    items: Arc<dyn ItemSource>,
    surface: Box<dyn RenderSurface>,
    /// Bumped by every `query`; stale load steps are discarded against it.
    generation: u64,
    load_rx: Option<UnboundedReceiver<LoadBatch>>,
    report: LoadReport,
    loading: bool,
    persistence: JoinSet<()>,
}

impl Board {
    pub fn new(
        options: Arc<dyn StatusOptionSource>,
        items: Arc<dyn ItemSource>,
        surface: Box<dyn RenderSurface>,
        scope: Scope,
        config: BoardConfig,
    ) -> Self {
        Self {
            state: BoardState::default(),
            config,
            scope,
            options,
            items,
            surface,
            generation: 0,
            load_rx: None,
            report: LoadReport::default(),
            loading: false,
            persistence: JoinSet::new(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        self.state.columns()
    }

    pub fn column(&self, key: &StatusKey) -> Option<&Column> {
        self.state.column(key)
    }

    pub fn card_count(&self) -> usize {
        self.state.card_count()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Report of the current load, or of the last one once it finished.
    pub fn load_report(&self) -> LoadReport {
        self.report
    }

    /// Reset the board and start a fresh load for `criteria`.
    ///
    /// Any load still publishing is superseded: its channel is dropped and
    /// its remaining steps fail the generation check. The navigational
    /// chrome is suspended until the new load completes or fails.
    pub fn query(&mut self, mut criteria: QueryCriteria) {
        criteria.project_id = self.scope.project_id;
        self.generation += 1;
        self.state.clear();
        self.report = LoadReport::default();
        self.loading = true;
        self.surface.chrome_suspended(true);

        let (tx, rx) = mpsc::unbounded_channel();
        self.load_rx = Some(rx);
        tokio::spawn(loader::run_load(
            Arc::clone(&self.options),
            Arc::clone(&self.items),
            self.scope.clone(),
            criteria,
            self.config.effective_page_size(),
            self.generation,
            tx,
        ));
        tracing::info!(generation = self.generation, "board query started");
    }

    /// Receive and apply the next publish step of the in-flight load.
    /// Returns `false` once no load is running.
    pub async fn pump_one(&mut self) -> bool {
        let Some(rx) = self.load_rx.as_mut() else {
            return false;
        };
        match rx.recv().await {
            Some(batch) => {
                self.apply(batch);
                self.loading
            }
            None => {
                // Worker gone without a terminal step; treat as finished.
                self.finish_load();
                false
            }
        }
    }

    /// Drive the current load to completion, applying every step.
    pub async fn run_to_completion(&mut self) {
        while self.pump_one().await {}
    }

    /// Apply one publish step. Steps from a superseded generation are
    /// discarded so two result sets can never interleave on one board.
    pub fn apply(&mut self, batch: LoadBatch) {
        if batch.generation != self.generation {
            tracing::debug!(
                stale = batch.generation,
                current = self.generation,
                "discarding stale load step"
            );
            return;
        }
        match batch.step {
            LoadStep::Columns(options) => {
                for option in options {
                    match self.state.add_column(option) {
                        Ok(column) => self.surface.column_added(column),
                        Err(err) => {
                            tracing::warn!(error = %err, "skipping status option")
                        }
                    }
                }
                if let UnmatchedPolicy::Collect { key, label } = &self.config.unmatched {
                    if let Some(bucket) = self.state.ensure_bucket(key, label) {
                        self.surface.column_added(bucket);
                    }
                }
            }
            LoadStep::Total(total) => {
                self.report.total = total;
            }
            LoadStep::Page(cards) => {
                let apply = self.state.append_page(cards, &self.config.unmatched);
                self.report.matched += apply.matched;
                self.report.unmatched += apply.unmatched;
                for (key, cards) in &apply.appended {
                    self.surface.cards_appended(key, cards);
                    if let Some(column) = self.state.column(key) {
                        self.surface.count_updated(key, column.len());
                    }
                }
                self.surface.progress(
                    self.report.matched + self.report.unmatched,
                    self.report.total,
                );
            }
            LoadStep::Finished { fetched } => {
                if fetched != self.report.matched + self.report.unmatched {
                    tracing::debug!(
                        fetched,
                        applied = self.report.matched + self.report.unmatched,
                        "load finished with unapplied items"
                    );
                }
                self.finish_load();
            }
            LoadStep::Failed(err) => {
                tracing::error!(error = %err, "board load failed, keeping pages applied so far");
                self.finish_load();
            }
        }
    }

    fn finish_load(&mut self) {
        self.loading = false;
        self.load_rx = None;
        self.surface.chrome_suspended(false);
        tracing::info!(
            total = self.report.total,
            matched = self.report.matched,
            unmatched = self.report.unmatched,
            "board load finished"
        );
    }

    /// Append a column for a freshly created status option. Callable at
    /// any time, including while a load is publishing pages.
    pub fn add_column(&mut self, option: StatusOption) -> Result<(), BoardError> {
        let column = self.state.add_column(option)?;
        self.surface.column_added(column);
        Ok(())
    }

    /// Move a card out of `from` into `to` at the resolved target index.
    ///
    /// The in-memory order and both displayed counts update immediately;
    /// the status change (cross-column only) and the destination column's
    /// index map are persisted fire-and-forget. A drop rejected by the
    /// acceptance criterion is a no-op.
    pub fn move_card(
        &mut self,
        id: CardId,
        from: &StatusKey,
        to: &StatusKey,
        target: DropTarget,
    ) -> Result<(), BoardError> {
        let Some(mv) = self.state.move_card(id, from, to, target)? else {
            tracing::debug!(card = %id, "drop rejected by acceptance criterion");
            return Ok(());
        };
        tracing::info!(card = %id, from = %mv.from, to = %mv.to, index = mv.index, "card moved");

        if let Some(column) = self.state.column(&mv.to) {
            self.surface.count_updated(&mv.to, column.len());
        }
        if mv.from != mv.to {
            if let Some(column) = self.state.column(&mv.from) {
                self.surface.count_updated(&mv.from, column.len());
            }
        }

        if mv.status_changed {
            let items = Arc::clone(&self.items);
            let actor = self.scope.actor.clone();
            let card = mv.card;
            self.persistence.spawn(async move {
                if let Err(err) = items.update(&card, &actor).await {
                    tracing::error!(card = ?card.id, error = %err, "status update failed, keeping board order");
                }
            });
        }
        if !mv.reindex.is_empty() {
            let items = Arc::clone(&self.items);
            let account_id = self.scope.account_id;
            let pairs = mv.reindex;
            self.persistence.spawn(async move {
                if let Err(err) = items.batch_reindex(&pairs, account_id).await {
                    tracing::error!(error = %err, "card reindex failed, keeping board order");
                }
            });
        }
        Ok(())
    }

    /// Move a column to the resolved target index and persist the full
    /// board-level index map in one batch. An empty map issues no call.
    pub fn move_column(
        &mut self,
        key: &StatusKey,
        target: DropTarget,
    ) -> Result<(), BoardError> {
        let Some(mv) = self.state.move_column(key, target)? else {
            tracing::debug!(column = %key, "drop rejected by acceptance criterion");
            return Ok(());
        };
        tracing::info!(column = %key, index = mv.index, "column moved");

        if !mv.reindex.is_empty() {
            let options = Arc::clone(&self.options);
            let account_id = self.scope.account_id;
            let pairs = mv.reindex;
            self.persistence.spawn(async move {
                if let Err(err) = options.batch_reindex(&pairs, account_id).await {
                    tracing::error!(error = %err, "column reindex failed, keeping board order");
                }
            });
        }
        Ok(())
    }

    /// Open the inline "new card" editor on a column. At most one editor
    /// exists board-wide; an editor already open elsewhere is evicted with
    /// no persisted side effect.
    pub fn open_editor(&mut self, key: &StatusKey) -> Result<&PendingEditor, BoardError> {
        self.state.open_editor(key, &self.scope)
    }

    pub fn pending_editor(&self) -> Option<&PendingEditor> {
        self.state.editor()
    }

    /// Confirm the pending editor with `title`.
    ///
    /// A blank title is rejected and the editor stays open. Otherwise the
    /// draft is saved through the item source, the saved card takes index 0
    /// of its column, the displayed count refreshes, and the saved card is
    /// returned for the caller to render.
    pub async fn confirm(&mut self, title: &str) -> Result<Card, BoardError> {
        let draft = self.state.stage_confirm(title)?;
        let saved = self.items.save(&draft, &self.scope.actor).await?;
        tracing::info!(card = ?saved.id, column = %saved.status, "inline card saved");
        let key = saved.status.clone();
        let count = self.state.complete_confirm(saved.clone())?;
        self.surface.count_updated(&key, count);
        Ok(saved)
    }

    /// Discard the pending editor with no persistence call.
    pub fn cancel(&mut self) -> bool {
        self.state.cancel_editor()
    }

    /// Await the fire-and-forget persistence calls issued so far. The
    /// surface never waits on these; this is for shutdown and tests.
    pub async fn flush(&mut self) {
        while self.persistence.join_next().await.is_some() {}
    }
}
