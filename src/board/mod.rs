//! Board system: positions, placement, completion, undo.
//!
//! ## Key Types
//!
//! - [`PositionMap`] / [`Position`]: the static layout a board is built on
//! - [`Board`]: slots, painted grid, completion cache, history, listeners
//! - [`History`] / [`HistoryRecord`]: the undo stack
//! - [`BoardSnapshot`]: serializable board state
//!
//! ## Placement
//!
//! A position names eight triangle references A–H. Placing a piece paints
//! A–D with its first color and E–H with its second, then re-checks the
//! hexagons of A–F for completion. G and H are painted but never trigger a
//! check; a hexagon they finish is noticed only when a later placement
//! touches it through A–F.

mod state;
mod history;
mod map;
mod snapshot;
mod standard;

pub use state::{Board, HexagonPosition};
pub use history::{History, HistoryRecord};
pub use map::{Position, PositionMap, MAX_CELLS, REFS_PER_POSITION};
pub use snapshot::BoardSnapshot;
