//! The board state machine.
//!
//! A [`Board`] owns a triangle grid, one slot per map position, the set of
//! complete hexagons with their colors, an undo history, and the listener
//! registry. It is the only way to mutate any of them.
//!
//! ## Completion Tracking
//!
//! Completion is maintained incrementally. A write only re-checks the
//! hexagons named by the position's references A–F; a removal drops every
//! tracked hexagon among them. The board never rescans the whole grid.
//!
//! ## Speculative Queries
//!
//! [`Board::count_hexagons_formed`] answers "how many hexagons would this
//! placement complete" by placing for real, reading the result, and undoing
//! with events suppressed. Board state and history come back unchanged.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use super::history::{History, HistoryRecord};
use super::map::{Position, PositionMap};
use crate::core::{BoardError, Color, HexCoord, Result, TRIANGLES};
use crate::events::{BoardEvent, EventKind, FormedHexagon, ListenerId, ListenerRegistry};
use crate::grid::TriGrid;
use crate::pieces::Piece;

/// A candidate position and how many hexagons a placement there completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexagonPosition {
    /// Position index.
    pub index: usize,
    /// Hexagons the placement would complete.
    pub count: usize,
}

/// Board state: occupancy, completion, history, listeners.
///
/// ## Usage
///
/// ```
/// use trihex::board::Board;
/// use trihex::pieces::Piece;
///
/// let mut board = Board::standard();
/// board.place(0, Piece::new("red", "green")).unwrap();
///
/// let formed = board.place(8, Piece::new("green", "blue")).unwrap();
/// assert_eq!(formed.len(), 1);
/// assert_eq!(formed[0].coordinate, [1, 1]);
///
/// assert_eq!(board.back(1).unwrap(), 1);
/// assert!(board.get_complete_hexagons().is_empty());
/// ```
#[derive(Debug)]
pub struct Board {
    /// Shared, immutable configuration.
    pub(super) map: Arc<PositionMap>,

    /// Painted triangles.
    pub(super) grid: TriGrid<Color>,

    /// One slot per position.
    pub(super) slots: Vec<Option<Piece>>,

    /// Complete hexagons and their colors.
    pub(super) hexagons: FxHashMap<HexCoord, Color>,

    /// Undo stack.
    pub(super) history: History,

    listeners: ListenerRegistry,

    /// Set while a speculative query runs.
    suppress_events: bool,
}

impl Board {
    /// Create an empty board on `map`.
    ///
    /// Fails with `InvalidConfiguration` if the map does not validate.
    pub fn new(map: Arc<PositionMap>) -> Result<Self> {
        map.validate()?;
        Ok(Self::build(map))
    }

    /// Create an empty board on the bundled standard map.
    #[must_use]
    pub fn standard() -> Self {
        Self::build(PositionMap::standard())
    }

    /// Build a board by replaying history records from empty.
    pub fn replay(
        map: Arc<PositionMap>,
        records: impl IntoIterator<Item = HistoryRecord>,
    ) -> Result<Self> {
        let mut board = Self::new(map)?;
        for record in records {
            match record {
                HistoryRecord::Set { index, piece } => board.set(index, piece)?,
                HistoryRecord::Remove { index, .. } => {
                    board.remove(index)?;
                }
            }
        }
        Ok(board)
    }

    pub(super) fn build(map: Arc<PositionMap>) -> Self {
        debug!(
            grid_type = %map.grid_type,
            columns = map.columns,
            rows = map.rows,
            positions = map.len(),
            "building board"
        );
        Self {
            grid: TriGrid::new(map.grid_type, map.columns, map.rows),
            slots: vec![None; map.len()],
            hexagons: FxHashMap::default(),
            history: History::new(),
            listeners: ListenerRegistry::new(),
            suppress_events: false,
            map,
        }
    }

    // === Accessors ===

    /// The board's position map.
    #[must_use]
    pub fn map(&self) -> &Arc<PositionMap> {
        &self.map
    }

    /// The painted triangle grid.
    #[must_use]
    pub fn grid(&self) -> &TriGrid<Color> {
        &self.grid
    }

    /// The undo history.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Number of positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if no position is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Check if every position is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Get the piece at a position.
    pub fn get(&self, index: usize) -> Result<Option<&Piece>> {
        self.check_index(index)?;
        Ok(self.slots[index].as_ref())
    }

    fn check_index(&self, index: usize) -> Result<&Position> {
        self.map.position(index).ok_or(BoardError::IndexOutOfRange {
            index,
            len: self.slots.len(),
        })
    }

    // === Mutation ===

    /// Write `piece` to `index`, overwriting whatever is there.
    ///
    /// Paints references A–D with the first color and E–H with the second,
    /// then re-checks the hexagons of references A–F. Used for replay and
    /// undo; gameplay should go through [`Board::place`].
    pub fn set(&mut self, index: usize, piece: Piece) -> Result<()> {
        self.check_index(index)?;
        self.apply_set(index, piece, true)
    }

    /// Place `piece` on an empty position.
    ///
    /// Returns the hexagons this placement completed, in reference order.
    /// Fails with `InvalidState` if the position is occupied.
    pub fn place(&mut self, index: usize, piece: Piece) -> Result<Vec<FormedHexagon>> {
        let position = self.check_index(index)?;
        if let Some(existing) = &self.slots[index] {
            return Err(BoardError::InvalidState(format!(
                "position {index} is already occupied by {existing}"
            )));
        }

        let related = related_hexagons(position);
        let complete_before: SmallVec<[bool; TRIANGLES]> =
            related.iter().map(|c| self.hexagons.contains_key(c)).collect();

        debug!(index, piece = %piece, "placing piece");
        self.apply_set(index, piece, true)?;

        let formed: Vec<FormedHexagon> = related
            .iter()
            .zip(complete_before)
            .filter(|(_, before)| !before)
            .filter_map(|(coord, _)| {
                self.hexagons
                    .get(coord)
                    .map(|color| FormedHexagon::new(*coord, color.clone()))
            })
            .collect();

        if !formed.is_empty() {
            debug!(index, formed = formed.len(), "hexagons formed");
            self.emit(EventKind::Form, || BoardEvent::Form(formed.clone()));
        }
        Ok(formed)
    }

    /// Clear a position, returning the piece that was there.
    ///
    /// All eight triangles are cleared. Every tracked complete hexagon among
    /// references A–F is dropped with one `destroy` event each.
    pub fn remove(&mut self, index: usize) -> Result<Option<Piece>> {
        self.check_index(index)?;
        debug!(index, "removing piece");
        self.apply_remove(index, true)
    }

    /// Undo up to `steps` operations, most recent first.
    ///
    /// Undoing does not grow the history: each step pops one record and
    /// applies its inverse without recording it. Returns the number of steps
    /// actually undone.
    pub fn back(&mut self, steps: usize) -> Result<usize> {
        let mut undone = 0;
        while undone < steps {
            let Some(record) = self.history.pop() else {
                break;
            };
            match record {
                HistoryRecord::Set { index, .. } => {
                    self.apply_remove(index, false)?;
                }
                HistoryRecord::Remove {
                    index,
                    piece: Some(piece),
                } => self.apply_set(index, piece, false)?,
                // Removing an empty slot changed nothing worth restoring
                HistoryRecord::Remove { piece: None, .. } => {}
            }
            undone += 1;
        }
        debug!(requested = steps, undone, "undo");
        Ok(undone)
    }

    /// Reset the board to empty. Listeners stay attached.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.hexagons.clear();
        self.history.clear();
        debug!("board cleared");
        self.emit(EventKind::Clear, || BoardEvent::Clear);
    }

    fn apply_set(&mut self, index: usize, piece: Piece, record: bool) -> Result<()> {
        let map = Arc::clone(&self.map);
        let position = &map.positions[index];

        self.slots[index] = Some(piece.clone());
        self.grid.set(position.first_half(), piece.first().clone())?;
        self.grid.set(position.second_half(), piece.second().clone())?;

        let destroyed: SmallVec<[HexCoord; TRIANGLES]> = related_hexagons(position)
            .into_iter()
            .filter_map(|coord| self.refresh_hexagon(coord))
            .collect();

        trace!(index, piece = %piece, record, "set");
        if record {
            self.history.push(HistoryRecord::Set {
                index,
                piece: piece.clone(),
            });
        }
        self.emit(EventKind::Set, || BoardEvent::Set { index, piece });
        for coord in destroyed {
            self.emit(EventKind::Destroy, || BoardEvent::Destroy(vec![coord.as_pair()]));
        }
        Ok(())
    }

    fn apply_remove(&mut self, index: usize, record: bool) -> Result<Option<Piece>> {
        let map = Arc::clone(&self.map);
        let position = &map.positions[index];
        let related = related_hexagons(position);

        self.grid.remove(&position.refs)?;
        let piece = self.slots[index].take();

        for coord in related {
            if self.hexagons.remove(&coord).is_some() {
                trace!(hexagon = %coord, "hexagon destroyed");
                self.emit(EventKind::Destroy, || BoardEvent::Destroy(vec![coord.as_pair()]));
            }
        }

        if record {
            self.history.push(HistoryRecord::Remove {
                index,
                piece: piece.clone(),
            });
        }
        self.emit(EventKind::Remove, || BoardEvent::Remove {
            index,
            piece: piece.clone(),
        });
        Ok(piece)
    }

    /// Bring the cache entry for `coord` in line with the grid.
    ///
    /// Returns `Some(coord)` if a tracked hexagon stopped being complete.
    fn refresh_hexagon(&mut self, coord: HexCoord) -> Option<HexCoord> {
        match self.hexagon_color(coord) {
            Some(color) => {
                if self.hexagons.insert(coord, color).is_none() {
                    trace!(hexagon = %coord, "hexagon completed");
                }
                None
            }
            None => self.hexagons.remove(&coord).map(|_| coord),
        }
    }

    // === Queries ===

    /// Hexagons of references A–F of a position, deduplicated, in reference
    /// order.
    pub fn get_related_hexagons(&self, index: usize) -> Result<Vec<HexCoord>> {
        let position = self.check_index(index)?;
        Ok(related_hexagons(position).into_vec())
    }

    /// Check if all six triangles of a hexagon hold the same color.
    ///
    /// Fails with `InvalidArgument` for coordinates outside the grid.
    pub fn is_complete_hexagon(&self, col: i32, row: i32) -> Result<bool> {
        if !self.grid.contains(col, row) {
            return Err(BoardError::InvalidArgument(format!(
                "hexagon ({col}, {row}) is outside the {}x{} grid",
                self.map.columns, self.map.rows
            )));
        }
        Ok(self.hexagon_color(HexCoord::new(col, row)).is_some())
    }

    /// The shared color of a complete hexagon.
    ///
    /// Triangles are compared pairwise in order, stopping at the first gap
    /// or mismatch.
    pub(super) fn hexagon_color(&self, coord: HexCoord) -> Option<Color> {
        let triangles = self.grid.get_hexagon(coord.col, coord.row);
        for i in 1..TRIANGLES {
            match (triangles[i - 1], triangles[i]) {
                (Some(prev), Some(cur)) if prev == cur => {}
                _ => return None,
            }
        }
        triangles[0].cloned()
    }

    /// All complete hexagons, sorted row-major.
    #[must_use]
    pub fn get_complete_hexagons(&self) -> Vec<FormedHexagon> {
        let mut complete: Vec<_> = self
            .hexagons
            .iter()
            .map(|(coord, color)| FormedHexagon::new(*coord, color.clone()))
            .collect();
        complete.sort_by_key(FormedHexagon::coord);
        complete
    }

    /// Indices of empty positions.
    #[must_use]
    pub fn get_empty_positions(&self) -> Vec<usize> {
        (0..self.slots.len()).filter(|&i| self.slots[i].is_none()).collect()
    }

    /// Indices of occupied positions.
    #[must_use]
    pub fn get_occupied_positions(&self) -> Vec<usize> {
        (0..self.slots.len()).filter(|&i| self.slots[i].is_some()).collect()
    }

    /// Neighbors of a position, as listed by the map.
    pub fn get_adjacent_positions(&self, index: usize) -> Result<&[usize]> {
        Ok(&self.check_index(index)?.adjacents)
    }

    /// Empty positions next to at least one occupied position.
    #[must_use]
    pub fn get_available_positions(&self) -> Vec<usize> {
        self.map
            .positions
            .iter()
            .enumerate()
            .filter(|(i, position)| {
                self.slots[*i].is_none()
                    && position.adjacents.iter().any(|&a| self.slots[a].is_some())
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Empty positions flagged as edge positions.
    #[must_use]
    pub fn get_edge_positions(&self) -> Vec<usize> {
        self.map
            .positions
            .iter()
            .enumerate()
            .filter(|(i, position)| position.edge && self.slots[*i].is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// Count the hexagons placing `piece` at `index` would complete.
    ///
    /// Leaves slots, completion, and history exactly as they were and
    /// raises no events. Fails like [`Board::place`] would.
    pub fn count_hexagons_formed(&mut self, index: usize, piece: Piece) -> Result<usize> {
        let suppressed = std::mem::replace(&mut self.suppress_events, true);
        let result = self.place(index, piece).and_then(|formed| {
            self.back(1)?;
            Ok(formed.len())
        });
        self.suppress_events = suppressed;

        trace!(index, count = ?result.as_ref().ok(), "speculative count");
        result
    }

    /// Available positions where `piece` would complete at least one
    /// hexagon, best first.
    ///
    /// Ties keep position order.
    pub fn get_hexagon_positions(&mut self, piece: &Piece) -> Result<Vec<HexagonPosition>> {
        let mut candidates = Vec::new();
        for index in self.get_available_positions() {
            let count = self.count_hexagons_formed(index, piece.clone())?;
            if count > 0 {
                candidates.push(HexagonPosition { index, count });
            }
        }
        candidates.sort_by(|a, b| b.count.cmp(&a.count));
        Ok(candidates)
    }

    // === Events ===

    /// Register a listener for one event kind.
    pub fn add_event_listener(
        &mut self,
        kind: EventKind,
        callback: impl FnMut(&BoardEvent) + 'static,
    ) -> ListenerId {
        self.listeners.add(kind, Box::new(callback))
    }

    /// Register a listener by event name.
    ///
    /// Fails with `InvalidArgument` for names other than `set`, `remove`,
    /// `form`, `destroy`, and `clear`.
    pub fn add_event_listener_named(
        &mut self,
        kind: &str,
        callback: impl FnMut(&BoardEvent) + 'static,
    ) -> Result<ListenerId> {
        Ok(self.add_event_listener(kind.parse()?, callback))
    }

    /// Unregister a listener. Returns `false` if it was not registered for
    /// `kind`.
    pub fn remove_event_listener(&mut self, kind: EventKind, id: ListenerId) -> bool {
        self.listeners.remove(kind, id)
    }

    /// Unregister a listener by event name.
    pub fn remove_event_listener_named(&mut self, kind: &str, id: ListenerId) -> Result<bool> {
        Ok(self.remove_event_listener(kind.parse()?, id))
    }

    /// Deliver an event unless suppressed. The payload is only built when
    /// someone listens for `kind`.
    fn emit(&mut self, kind: EventKind, make: impl FnOnce() -> BoardEvent) {
        if self.suppress_events || !self.listeners.has_listeners(kind) {
            return;
        }
        self.listeners.emit(&make());
    }
}

fn related_hexagons(position: &Position) -> SmallVec<[HexCoord; TRIANGLES]> {
    let mut related = SmallVec::new();
    for r in position.related_refs() {
        let coord = r.hex();
        if !related.contains(&coord) {
            related.push(coord);
        }
    }
    related
}
