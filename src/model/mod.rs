//! In-memory board model.
//!
//! The model layer is synchronous and side-effect free: mutation
//! operations describe the persistence they imply instead of issuing it,
//! and the [`Board`](crate::board::Board) orchestrator dispatches those
//! effects around the state change.

mod card;
mod column;
mod drop;
mod state;

pub use card::{Card, CardId, Priority, StatusKey};
pub use column::{Column, OptionId, StatusOption};
pub use drop::DropTarget;
pub use state::{BoardState, CardMove, ColumnMove, PageApply, PendingEditor};
