//! Shared mock collaborators for the integration suites.

#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use taskboard::{
    Board, BoardConfig, Card, CardId, Column, ItemSource, OptionId, Priority, QueryCriteria,
    RenderSurface, Scope, SourceError, StatusKey, StatusOption, StatusOptionSource,
};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn scope() -> Scope {
    Scope {
        project_id: 7,
        account_id: 11,
        project_short_name: "PRJ".to_string(),
        actor: "alice".to_string(),
    }
}

pub fn card(id: i64, status: &str, title: &str) -> Card {
    Card {
        id: Some(CardId(id)),
        title: title.to_string(),
        status: StatusKey::from(status),
        priority: Priority::default(),
        deadline: None,
        assignee: None,
        percent_complete: 0.0,
        project_id: 7,
        project_short_name: "PRJ".to_string(),
    }
}

/// One card per status, ids counting up from 1.
pub fn seeded_items(statuses: &[&str]) -> Vec<Card> {
    statuses
        .iter()
        .enumerate()
        .map(|(i, status)| card(i as i64 + 1, status, &format!("task {}", i + 1)))
        .collect()
}

// -- Mock sources -------------------------------------------------------------

pub struct MockOptionSource {
    options: Vec<StatusOption>,
    pub reindexes: Arc<Mutex<Vec<Vec<(OptionId, usize)>>>>,
    pub fail_list: bool,
}

impl MockOptionSource {
    pub fn new(options: &[(i64, &str)]) -> Arc<Self> {
        Arc::new(Self {
            options: options
                .iter()
                .map(|(id, key)| StatusOption {
                    id: OptionId(*id),
                    key: StatusKey::from(*key),
                    label: key.to_string(),
                })
                .collect(),
            reindexes: Arc::new(Mutex::new(Vec::new())),
            fail_list: false,
        })
    }
}

#[async_trait]
impl StatusOptionSource for MockOptionSource {
    async fn list(
        &self,
        _project_id: i64,
        _account_id: i64,
    ) -> Result<Vec<StatusOption>, SourceError> {
        if self.fail_list {
            return Err(SourceError::Unavailable("option store down".to_string()));
        }
        Ok(self.options.clone())
    }

    async fn batch_reindex(
        &self,
        pairs: &[(OptionId, usize)],
        _account_id: i64,
    ) -> Result<(), SourceError> {
        self.reindexes.lock().unwrap().push(pairs.to_vec());
        Ok(())
    }
}

pub struct MockItemSource {
    items: Mutex<Vec<Card>>,
    next_id: AtomicI64,
    pub saves: Arc<Mutex<Vec<Card>>>,
    pub updates: Arc<Mutex<Vec<Card>>>,
    pub reindexes: Arc<Mutex<Vec<Vec<(CardId, usize)>>>>,
    /// Zero-based page number whose fetch should fail.
    pub fail_page: Option<usize>,
    /// When set, every `save` call fails.
    pub fail_save: bool,
}

impl MockItemSource {
    pub fn new(items: Vec<Card>) -> Arc<Self> {
        Arc::new(Self {
            items: Mutex::new(items),
            next_id: AtomicI64::new(1000),
            saves: Arc::new(Mutex::new(Vec::new())),
            updates: Arc::new(Mutex::new(Vec::new())),
            reindexes: Arc::new(Mutex::new(Vec::new())),
            fail_page: None,
            fail_save: false,
        })
    }

    pub fn failing_page(items: Vec<Card>, page: usize) -> Arc<Self> {
        let mut source = Self::new(items);
        Arc::get_mut(&mut source).unwrap().fail_page = Some(page);
        source
    }

    pub fn failing_save(items: Vec<Card>) -> Arc<Self> {
        let mut source = Self::new(items);
        Arc::get_mut(&mut source).unwrap().fail_save = true;
        source
    }

    fn matching(&self, criteria: &QueryCriteria) -> Vec<Card> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .filter(|c| match &criteria.text {
                Some(text) => c.title.contains(text.as_str()),
                None => true,
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ItemSource for MockItemSource {
    async fn count(&self, criteria: &QueryCriteria) -> Result<usize, SourceError> {
        Ok(self.matching(criteria).len())
    }

    async fn page(
        &self,
        criteria: &QueryCriteria,
        page: usize,
        page_size: usize,
    ) -> Result<Vec<Card>, SourceError> {
        if self.fail_page == Some(page) {
            return Err(SourceError::Unavailable(format!("page {page} fetch failed")));
        }
        Ok(self
            .matching(criteria)
            .chunks(page_size)
            .nth(page)
            .map(<[Card]>::to_vec)
            .unwrap_or_default())
    }

    async fn save(&self, card: &Card, _actor: &str) -> Result<Card, SourceError> {
        if self.fail_save {
            return Err(SourceError::Unavailable("item store down".to_string()));
        }
        let mut saved = card.clone();
        saved.id = Some(CardId(self.next_id.fetch_add(1, Ordering::SeqCst)));
        self.saves.lock().unwrap().push(saved.clone());
        self.items.lock().unwrap().push(saved.clone());
        Ok(saved)
    }

    async fn update(&self, card: &Card, _actor: &str) -> Result<(), SourceError> {
        self.updates.lock().unwrap().push(card.clone());
        Ok(())
    }

    async fn batch_reindex(
        &self,
        pairs: &[(CardId, usize)],
        _account_id: i64,
    ) -> Result<(), SourceError> {
        self.reindexes.lock().unwrap().push(pairs.to_vec());
        Ok(())
    }
}

// -- Recording surface --------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    ColumnAdded(String),
    CardsAppended(String, usize),
    CountUpdated(String, usize),
    Progress(usize, usize),
    Chrome(bool),
}

pub type EventLog = Arc<Mutex<Vec<SurfaceEvent>>>;

/// Surface that records every published event for assertions.
pub struct RecordingSurface(pub EventLog);

impl RecordingSurface {
    pub fn new() -> (Self, EventLog) {
        let log: EventLog = Arc::new(Mutex::new(Vec::new()));
        (Self(Arc::clone(&log)), log)
    }
}

impl RenderSurface for RecordingSurface {
    fn column_added(&mut self, column: &Column) {
        self.0
            .lock()
            .unwrap()
            .push(SurfaceEvent::ColumnAdded(column.key().to_string()));
    }

    fn cards_appended(&mut self, key: &StatusKey, cards: &[Card]) {
        self.0
            .lock()
            .unwrap()
            .push(SurfaceEvent::CardsAppended(key.to_string(), cards.len()));
    }

    fn count_updated(&mut self, key: &StatusKey, count: usize) {
        self.0
            .lock()
            .unwrap()
            .push(SurfaceEvent::CountUpdated(key.to_string(), count));
    }

    fn progress(&mut self, fetched: usize, total: usize) {
        self.0
            .lock()
            .unwrap()
            .push(SurfaceEvent::Progress(fetched, total));
    }

    fn chrome_suspended(&mut self, suspended: bool) {
        self.0.lock().unwrap().push(SurfaceEvent::Chrome(suspended));
    }
}

// -- Composite builders -------------------------------------------------------

/// Build a board wired to mock sources and a recording surface.
pub fn make_board(
    options: &Arc<MockOptionSource>,
    items: &Arc<MockItemSource>,
    config: BoardConfig,
) -> (Board, EventLog) {
    let (surface, log) = RecordingSurface::new();
    let board = Board::new(
        Arc::clone(options) as Arc<dyn StatusOptionSource>,
        Arc::clone(items) as Arc<dyn ItemSource>,
        Box::new(surface),
        scope(),
        config,
    );
    (board, log)
}

/// Build a board over the given columns and items and load it fully.
pub async fn loaded_board(
    option_defs: &[(i64, &str)],
    items: Vec<Card>,
) -> (Board, Arc<MockOptionSource>, Arc<MockItemSource>, EventLog) {
    let options = MockOptionSource::new(option_defs);
    let item_source = MockItemSource::new(items);
    let (mut board, log) = make_board(&options, &item_source, BoardConfig::default());
    board.query(QueryCriteria::default());
    board.run_to_completion().await;
    log.lock().unwrap().clear();
    (board, options, item_source, log)
}
