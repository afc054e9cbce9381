//! # trihex
//!
//! Rules and state engine for a tile-placement puzzle played on a hex grid
//! whose hexagons are split into six triangles.
//!
//! Players place two-colored pieces onto fixed board positions. Each
//! position paints eight triangles spread over neighboring hexagons; when
//! all six triangles of a hexagon share one color the hexagon is complete.
//!
//! ## Design Principles
//!
//! 1. **Layered**: the grid knows nothing about pieces, pieces know nothing
//!    about boards. Only [`Board`] ties them together.
//!
//! 2. **Configuration Over Convention**: board layouts are data. A
//!    [`PositionMap`] is loaded from JSON or taken from the bundled
//!    standard map.
//!
//! 3. **Incremental**: completion is tracked per write, never by rescanning
//!    the grid, so speculative "what if" queries stay cheap.
//!
//! ## Modules
//!
//! - `core`: coordinates, colors, errors
//! - `grid`: offset hex grids and triangle grids
//! - `pieces`: two-colored pieces with caller attributes
//! - `events`: board events and listener dispatch
//! - `board`: position maps, the board state machine, history, snapshots
//!
//! ## Example
//!
//! ```
//! use trihex::{Board, EventKind, Piece};
//!
//! let mut board = Board::standard();
//! board.add_event_listener(EventKind::Form, |event| {
//!     println!("{event:?}");
//! });
//!
//! board.place(0, Piece::new("red", "green")).unwrap();
//! let best = board.get_hexagon_positions(&Piece::new("green", "blue")).unwrap();
//! assert_eq!(best[0].index, 8);
//! ```

pub mod core;
pub mod grid;
pub mod pieces;
pub mod events;
pub mod board;

// Re-export commonly used types
pub use crate::core::{BoardError, Color, HexCoord, Result, TriRef};

pub use crate::grid::{Grid, GridType, Hexagon, TriGrid};

pub use crate::pieces::{AttributeKey, AttributeValue, Attributes, Piece};

pub use crate::events::{BoardEvent, EventKind, FormedHexagon, ListenerId};

pub use crate::board::{
    Board, BoardSnapshot, HexagonPosition, History, HistoryRecord,
    Position, PositionMap,
};
