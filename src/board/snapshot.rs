//! JSON snapshots of board state.
//!
//! A snapshot carries the map, painted grid, slots, and completion cache so
//! a board can be rebuilt without replaying moves. History is optional.

use std::collections::BTreeMap;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::state::Board;
use super::history::{History, HistoryRecord};
use super::map::PositionMap;
use crate::core::{BoardError, Color, HexCoord, Result};
use crate::grid::TriGrid;
use crate::pieces::Piece;

/// Serializable board state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// The board's position map.
    pub map: PositionMap,

    /// Painted triangles.
    pub grid: TriGrid<Color>,

    /// One entry per position.
    pub slots: Vec<Option<Piece>>,

    /// Complete hexagons, row-major.
    pub hexagons: Vec<HexCoord>,

    /// Color of each complete hexagon, keyed `"col-row"`.
    pub hexagon_colors: BTreeMap<HexCoord, Color>,

    /// Undo history, if it was captured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<History>,
}

impl Board {
    /// Capture the board's state.
    #[must_use]
    pub fn to_snapshot(&self, with_history: bool) -> BoardSnapshot {
        let hexagon_colors: BTreeMap<HexCoord, Color> = self
            .hexagons
            .iter()
            .map(|(coord, color)| (*coord, color.clone()))
            .collect();
        BoardSnapshot {
            map: PositionMap::clone(&self.map),
            grid: self.grid.clone(),
            slots: self.slots.clone(),
            hexagons: hexagon_colors.keys().copied().collect(),
            hexagon_colors,
            history: with_history.then(|| self.history.clone()),
        }
    }

    /// Rebuild a board from a snapshot.
    ///
    /// A snapshot of the standard map reuses the shared standard instance.
    /// Listeners start empty.
    pub fn from_snapshot(snapshot: BoardSnapshot) -> Result<Self> {
        let standard = PositionMap::standard();
        let map = if snapshot.map == *standard {
            standard
        } else {
            Arc::new(snapshot.map.clone())
        };
        Self::from_snapshot_with_map(snapshot, map)
    }

    /// Rebuild a board from a snapshot onto an existing map instance.
    ///
    /// Fails with `InvalidConfiguration` if the snapshot was taken on a
    /// different map or its parts disagree with each other.
    pub fn from_snapshot_with_map(snapshot: BoardSnapshot, map: Arc<PositionMap>) -> Result<Self> {
        let invalid = |msg: String| Err(BoardError::InvalidConfiguration(msg));

        if snapshot.map != *map {
            return invalid("snapshot was taken on a different position map".to_string());
        }
        map.validate()?;

        let grid = snapshot.grid.grid();
        if (grid.grid_type(), grid.columns(), grid.rows()) != (map.grid_type, map.columns, map.rows) {
            return invalid(format!(
                "snapshot grid {} {}x{} does not match map {} {}x{}",
                grid.grid_type(),
                grid.columns(),
                grid.rows(),
                map.grid_type,
                map.columns,
                map.rows
            ));
        }
        if snapshot.slots.len() != map.len() {
            return invalid(format!(
                "snapshot has {} slots for {} positions",
                snapshot.slots.len(),
                map.len()
            ));
        }
        if snapshot.hexagons.len() != snapshot.hexagon_colors.len()
            || snapshot.hexagons.iter().any(|c| !snapshot.hexagon_colors.contains_key(c))
        {
            return invalid("snapshot hexagon list and colors disagree".to_string());
        }
        if let Some(record) = snapshot
            .history
            .iter()
            .flat_map(History::iter)
            .find(|r| r.index() >= map.len())
        {
            return invalid(format!("history touches unknown position {}", record.index()));
        }

        let mut board = Board::build(map);
        board.grid = snapshot.grid;
        board.slots = snapshot.slots;

        let mut hexagons = FxHashMap::default();
        for (coord, color) in snapshot.hexagon_colors {
            match board.hexagon_color(coord) {
                None => {
                    return invalid(format!("hexagon {coord} is listed complete but is not"));
                }
                Some(painted) if painted != color => {
                    return invalid(format!(
                        "hexagon {coord} is cached as {color} but painted {painted}"
                    ));
                }
                Some(_) => {
                    hexagons.insert(coord, color);
                }
            }
        }
        board.hexagons = hexagons;
        board.history = snapshot.history.unwrap_or_default();

        debug!(
            occupied = board.get_occupied_positions().len(),
            hexagons = board.hexagons.len(),
            history = board.history.len(),
            "board restored from snapshot"
        );
        Ok(board)
    }

    /// Serialize the board to a JSON string.
    pub fn to_json(&self, with_history: bool) -> Result<String> {
        Ok(serde_json::to_string(&self.to_snapshot(with_history))?)
    }

    /// Rebuild a board from [`Board::to_json`] output.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: BoardSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }

    /// The recorded history as a list, oldest first.
    #[must_use]
    pub fn history_records(&self) -> Vec<HistoryRecord> {
        self.history.iter().cloned().collect()
    }
}
