//! Position map: the board's static configuration.
//!
//! A map fixes the grid layout and size and lists every position a piece can
//! occupy. Each position names the eight triangles its piece paints:
//! references A–D take the piece's first color, E–H its second.
//!
//! Maps are immutable once a board is built on them. Boards share a map
//! through `Arc`, so every board and snapshot built from one map refers to
//! the same instance.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::core::{BoardError, Result, TriRef, TRIANGLES};
use crate::grid::GridType;

/// Number of triangle references per position.
pub const REFS_PER_POSITION: usize = 8;

/// References whose hexagons are re-checked for completion (A–F).
const RELATED_REFS: usize = 6;

/// Largest grid, in hexagons, a map may declare.
pub const MAX_CELLS: usize = 1 << 16;

/// One position on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PositionRepr", into = "PositionRepr")]
pub struct Position {
    /// Indices of neighboring positions.
    pub adjacents: Vec<usize>,

    /// Does this position lie on the board's edge?
    pub edge: bool,

    /// Triangle references A–H.
    pub refs: [TriRef; REFS_PER_POSITION],
}

impl Position {
    /// Create a position from its eight references, A first.
    #[must_use]
    pub fn new(refs: [TriRef; REFS_PER_POSITION]) -> Self {
        Self {
            adjacents: Vec::new(),
            edge: false,
            refs,
        }
    }

    /// Set the adjacency list (builder pattern).
    #[must_use]
    pub fn with_adjacents(mut self, adjacents: impl Into<Vec<usize>>) -> Self {
        self.adjacents = adjacents.into();
        self
    }

    /// Mark as an edge position (builder pattern).
    #[must_use]
    pub fn on_edge(mut self) -> Self {
        self.edge = true;
        self
    }

    /// References A–D, painted with the first color.
    #[must_use]
    pub fn first_half(&self) -> &[TriRef] {
        &self.refs[..4]
    }

    /// References E–H, painted with the second color.
    #[must_use]
    pub fn second_half(&self) -> &[TriRef] {
        &self.refs[4..]
    }

    /// References A–F. Only their hexagons are re-checked for completion
    /// after a write.
    #[must_use]
    pub fn related_refs(&self) -> &[TriRef] {
        &self.refs[..RELATED_REFS]
    }
}

#[derive(Serialize, Deserialize)]
struct PositionRepr {
    #[serde(default)]
    adjacents: Vec<usize>,
    #[serde(default)]
    edge: bool,
    #[serde(rename = "A")]
    a: TriRef,
    #[serde(rename = "B")]
    b: TriRef,
    #[serde(rename = "C")]
    c: TriRef,
    #[serde(rename = "D")]
    d: TriRef,
    #[serde(rename = "E")]
    e: TriRef,
    #[serde(rename = "F")]
    f: TriRef,
    #[serde(rename = "G")]
    g: TriRef,
    #[serde(rename = "H")]
    h: TriRef,
}

impl From<PositionRepr> for Position {
    fn from(r: PositionRepr) -> Self {
        Self {
            adjacents: r.adjacents,
            edge: r.edge,
            refs: [r.a, r.b, r.c, r.d, r.e, r.f, r.g, r.h],
        }
    }
}

impl From<Position> for PositionRepr {
    fn from(p: Position) -> Self {
        let [a, b, c, d, e, f, g, h] = p.refs;
        Self {
            adjacents: p.adjacents,
            edge: p.edge,
            a,
            b,
            c,
            d,
            e,
            f,
            g,
            h,
        }
    }
}

/// Complete board configuration.
///
/// ## Example
///
/// ```
/// use trihex::board::{Position, PositionMap};
/// use trihex::core::TriRef;
/// use trihex::grid::GridType;
///
/// let refs = [
///     TriRef::new(0, 0, 1), TriRef::new(0, 0, 2), TriRef::new(0, 0, 3), TriRef::new(0, 0, 4),
///     TriRef::new(1, 0, 1), TriRef::new(1, 0, 2), TriRef::new(1, 0, 3), TriRef::new(1, 0, 4),
/// ];
/// let map = PositionMap::new(GridType::OddR, 2, 1)
///     .with_position(Position::new(refs).on_edge());
///
/// assert!(map.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionMap {
    /// Offset layout of the grid.
    #[serde(rename = "type")]
    pub grid_type: GridType,

    /// Grid width.
    pub columns: u32,

    /// Grid height.
    pub rows: u32,

    /// Positions, indexed from 0.
    pub positions: Vec<Position>,
}

impl PositionMap {
    /// Create a map with no positions.
    #[must_use]
    pub fn new(grid_type: GridType, columns: u32, rows: u32) -> Self {
        Self {
            grid_type,
            columns,
            rows,
            positions: Vec::new(),
        }
    }

    /// Append a position (builder pattern).
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.positions.push(position);
        self
    }

    /// Parse and validate a map from JSON.
    ///
    /// Missing fields, unknown grid types, and failed validation all report
    /// `InvalidConfiguration`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let map: Self = serde_json::from_str(json)
            .map_err(|e| BoardError::InvalidConfiguration(format!("malformed position map: {e}")))?;
        map.validate()?;
        Ok(map)
    }

    /// Parse and validate a map from a reader.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let map: Self = serde_json::from_reader(reader)
            .map_err(|e| BoardError::InvalidConfiguration(format!("malformed position map: {e}")))?;
        map.validate()?;
        Ok(map)
    }

    /// Check the map is usable by a board.
    ///
    /// Requires a non-empty grid of at most [`MAX_CELLS`] hexagons, at least
    /// one position, adjacency indices that name other positions, and
    /// references inside the grid with triangle numbers in `1..=6`.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(BoardError::InvalidConfiguration(msg));

        if self.columns == 0 || self.rows == 0 {
            return invalid(format!("grid must be non-empty, got {}x{}", self.columns, self.rows));
        }
        match (self.columns as usize).checked_mul(self.rows as usize) {
            Some(cells) if cells <= MAX_CELLS => {}
            _ => {
                return invalid(format!(
                    "grid of {}x{} exceeds {MAX_CELLS} hexagons",
                    self.columns, self.rows
                ))
            }
        }
        if self.positions.is_empty() {
            return invalid("position map has no positions".to_string());
        }

        let len = self.positions.len();
        for (index, position) in self.positions.iter().enumerate() {
            if let Some(&bad) = position.adjacents.iter().find(|&&a| a >= len || a == index) {
                return invalid(format!("position {index} lists invalid neighbor {bad}"));
            }
            for r in &position.refs {
                let in_grid = r.col >= 0
                    && r.row >= 0
                    && (r.col as u32) < self.columns
                    && (r.row as u32) < self.rows;
                if !in_grid || !(1..=TRIANGLES as u8).contains(&r.tri) {
                    return invalid(format!(
                        "position {index} references ({}, {}, {}) outside the grid",
                        r.col, r.row, r.tri
                    ));
                }
            }
        }
        Ok(())
    }

    /// Number of positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if the map has no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Get a position by index.
    #[must_use]
    pub fn position(&self, index: usize) -> Option<&Position> {
        self.positions.get(index)
    }
}
