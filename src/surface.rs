//! Render surface boundary.
//!
//! The engine emits discrete state-change events; the rendering layer
//! implements [`RenderSurface`] and redraws from them. Events are emitted
//! on the thread that owns the board, already serialized with respect to
//! every other mutation.

use crate::model::{Card, Column, StatusKey};

/// Callbacks through which the engine publishes board state changes.
pub trait RenderSurface: Send {
    /// A column was created: during the load's column phase, by
    /// `add_column` mid-load, or the synthetic unmatched bucket.
    fn column_added(&mut self, column: &Column);

    /// Cards were appended to the tail of a column.
    fn cards_appended(&mut self, key: &StatusKey, cards: &[Card]);

    /// A column's displayed count changed.
    fn count_updated(&mut self, key: &StatusKey, count: usize);

    /// Load progress: items delivered so far out of the total match count.
    fn progress(&mut self, fetched: usize, total: usize);

    /// The surrounding navigational chrome hides while a load runs and is
    /// restored when the load completes or fails.
    fn chrome_suspended(&mut self, suspended: bool) {
        let _ = suspended;
    }
}

/// Surface that ignores every event. Useful for headless use and tests.
#[derive(Debug, Default)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn column_added(&mut self, _column: &Column) {}
    fn cards_appended(&mut self, _key: &StatusKey, _cards: &[Card]) {}
    fn count_updated(&mut self, _key: &StatusKey, _count: usize) {}
    fn progress(&mut self, _fetched: usize, _total: usize) {}
}
