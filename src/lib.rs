//! Kanban board engine for a project-management backend.
//!
//! The engine keeps an in-memory model of status columns and work-item
//! cards, populates it progressively from injected backend sources, and
//! routes drag-and-drop gestures and inline card creation into ordered
//! index updates against persistent storage.
//!
//! # Architecture
//!
//! ```text
//! query ──→ loader worker ──→ LoadBatch ──→ Board::apply ──→ RenderSurface
//!                                              │
//! drag / inline-create ──→ Board ops ──────────┴──→ fire-and-forget persistence
//! ```
//!
//! One thread owns all board state. Loader workers never touch it; they
//! hand fetched batches back over a channel and the owner applies them as
//! discrete, serialized steps. Persistence after a mutation is optimistic:
//! the in-memory order is the truth the surface renders, and a failed
//! backend call is reported, never rolled back.

pub mod board;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod reindex;
pub mod source;
pub mod surface;

pub use board::Board;
pub use config::{BoardConfig, UnmatchedPolicy};
pub use error::BoardError;
pub use loader::{LoadBatch, LoadReport, LoadStep};
pub use model::{Card, CardId, Column, DropTarget, OptionId, Priority, StatusKey, StatusOption};
pub use source::{ItemSource, QueryCriteria, Scope, SourceError, StatusOptionSource};
pub use surface::{NullSurface, RenderSurface};
