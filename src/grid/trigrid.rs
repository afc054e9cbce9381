//! Triangle-subdivided hex grid.
//!
//! Each hexagon of a [`TriGrid`] is split into six triangles numbered 1–6.
//! Triangles are painted independently; a hexagon cell only exists while at
//! least one of its triangles holds a value.

use serde::{Deserialize, Serialize};

use super::hex_grid::{Grid, GridType};
use crate::core::{BoardError, Result, TriRef, TRIANGLES};

/// The six triangles of one hexagon, index 0 holding triangle 1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hexagon<V> {
    triangles: [Option<V>; TRIANGLES],
}

impl<V> Hexagon<V> {
    /// A hexagon with no painted triangles.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            triangles: std::array::from_fn(|_| None),
        }
    }

    /// Get triangle `tri` (1-based).
    #[must_use]
    pub fn get(&self, tri: u8) -> Option<&V> {
        tri_slot(tri).ok().and_then(|i| self.triangles[i].as_ref())
    }

    /// All six triangles in order.
    #[must_use]
    pub fn triangles(&self) -> &[Option<V>; TRIANGLES] {
        &self.triangles
    }

    /// Check if all six triangles are painted.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.triangles.iter().all(Option::is_some)
    }

    /// Check if no triangle is painted.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.triangles.iter().all(Option::is_none)
    }
}

fn tri_slot(tri: u8) -> Result<usize> {
    if (1..=TRIANGLES as u8).contains(&tri) {
        Ok(usize::from(tri) - 1)
    } else {
        Err(BoardError::TriangleOutOfRange(tri))
    }
}

/// Hex grid whose cells are six independently painted triangles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TriGrid<V> {
    grid: Grid<Hexagon<V>>,
}

impl<V> TriGrid<V> {
    /// Create an empty triangle grid.
    #[must_use]
    pub fn new(grid_type: GridType, columns: u32, rows: u32) -> Self {
        Self {
            grid: Grid::new(grid_type, columns, rows),
        }
    }

    /// The underlying hexagon grid.
    #[must_use]
    pub fn grid(&self) -> &Grid<Hexagon<V>> {
        &self.grid
    }

    /// Check if `(col, row)` lies inside the grid.
    #[must_use]
    pub fn contains(&self, col: i32, row: i32) -> bool {
        self.grid.contains(col, row)
    }

    /// Get the value of one triangle.
    ///
    /// Fails with `TriangleOutOfRange` unless `tri` is in `1..=6`. Empty or
    /// out-of-range hexagons read as `None`.
    pub fn get(&self, col: i32, row: i32, tri: u8) -> Result<Option<&V>> {
        let slot = tri_slot(tri)?;
        Ok(self
            .grid
            .get(col, row)
            .and_then(|hex| hex.triangles[slot].as_ref()))
    }

    /// Paint `value` into every referenced triangle.
    ///
    /// Hexagon cells are created on demand. References outside the grid are
    /// skipped. Triangle numbers are all checked before anything is written.
    pub fn set(&mut self, refs: &[TriRef], value: V) -> Result<()>
    where
        V: Clone,
    {
        let slots = refs.iter().map(|r| tri_slot(r.tri)).collect::<Result<Vec<_>>>()?;
        for (r, slot) in refs.iter().zip(slots) {
            if !self.grid.contains(r.col, r.row) {
                continue;
            }
            if self.grid.get(r.col, r.row).is_none() {
                self.grid.set(r.col, r.row, Hexagon::empty());
            }
            if let Some(hex) = self.grid.get_mut(r.col, r.row) {
                hex.triangles[slot] = Some(value.clone());
            }
        }
        Ok(())
    }

    /// Clear every referenced triangle, returning the previous values in
    /// reference order.
    ///
    /// A hexagon cell is dropped once its last triangle is cleared.
    pub fn remove(&mut self, refs: &[TriRef]) -> Result<Vec<Option<V>>> {
        let slots = refs.iter().map(|r| tri_slot(r.tri)).collect::<Result<Vec<_>>>()?;
        let mut previous = Vec::with_capacity(refs.len());
        for (r, slot) in refs.iter().zip(slots) {
            let Some(hex) = self.grid.get_mut(r.col, r.row) else {
                previous.push(None);
                continue;
            };
            previous.push(hex.triangles[slot].take());
            if hex.is_blank() {
                self.grid.remove(r.col, r.row);
            }
        }
        Ok(previous)
    }

    /// All six triangles of a hexagon, `None`-filled if it does not exist.
    #[must_use]
    pub fn get_hexagon(&self, col: i32, row: i32) -> [Option<&V>; TRIANGLES] {
        let hex = self.grid.get(col, row);
        std::array::from_fn(|i| hex.and_then(|h| h.triangles[i].as_ref()))
    }

    /// Overwrite all six triangles of a hexagon at once.
    ///
    /// Writing six `None`s removes the cell.
    pub fn set_hexagon(&mut self, col: i32, row: i32, triangles: [Option<V>; TRIANGLES]) {
        let hex = Hexagon { triangles };
        if hex.is_blank() {
            self.grid.remove(col, row);
        } else {
            self.grid.set(col, row, hex);
        }
    }

    /// Remove a whole hexagon, returning it.
    pub fn remove_hexagon(&mut self, col: i32, row: i32) -> Option<Hexagon<V>> {
        self.grid.remove(col, row)
    }

    /// Check if all six triangles of a hexagon are painted.
    #[must_use]
    pub fn is_full(&self, col: i32, row: i32) -> bool {
        self.grid.get(col, row).is_some_and(Hexagon::is_full)
    }

    /// Reset every hexagon.
    pub fn clear(&mut self) {
        self.grid.clear();
    }
}
