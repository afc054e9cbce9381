//! Offset-coordinate hexagonal grid.
//!
//! `Grid<T>` is a dense `columns × rows` array of optional cells addressed by
//! `(col, row)`. It knows nothing about the game; it only answers "what is
//! stored here" and "who are my neighbors".
//!
//! ## Offset Layouts
//!
//! Four layouts are supported, named the usual way:
//!
//! - `odd-r` / `even-r`: pointy-top hexagons, odd/even rows shoved right
//! - `odd-q` / `even-q`: flat-top hexagons, odd/even columns shoved down
//!
//! Neighbor offsets depend on the layout and on the parity of the row (`-r`
//! layouts) or column (`-q` layouts) of the queried cell.

use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use smallvec::SmallVec;

use crate::core::{BoardError, HexCoord, Result};

type Offsets = [(i32, i32); 6];

const ODD_R_EVEN: Offsets = [(1, 0), (0, -1), (-1, -1), (-1, 0), (-1, 1), (0, 1)];
const ODD_R_ODD: Offsets = [(1, 0), (1, -1), (0, -1), (-1, 0), (0, 1), (1, 1)];
const EVEN_R_EVEN: Offsets = [(1, 0), (1, -1), (0, -1), (-1, 0), (0, 1), (1, 1)];
const EVEN_R_ODD: Offsets = [(1, 0), (0, -1), (-1, -1), (-1, 0), (-1, 1), (0, 1)];
const ODD_Q_EVEN: Offsets = [(1, 0), (1, -1), (0, -1), (-1, -1), (-1, 0), (0, 1)];
const ODD_Q_ODD: Offsets = [(1, 1), (1, 0), (0, -1), (-1, 0), (-1, 1), (0, 1)];
const EVEN_Q_EVEN: Offsets = [(1, 1), (1, 0), (0, -1), (-1, 0), (-1, 1), (0, 1)];
const EVEN_Q_ODD: Offsets = [(1, 0), (1, -1), (0, -1), (-1, -1), (-1, 0), (0, 1)];

/// Offset layout of a hex grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridType {
    /// Pointy-top, odd rows shoved right.
    #[serde(rename = "odd-r")]
    OddR,
    /// Pointy-top, even rows shoved right.
    #[serde(rename = "even-r")]
    EvenR,
    /// Flat-top, odd columns shoved down.
    #[serde(rename = "odd-q")]
    OddQ,
    /// Flat-top, even columns shoved down.
    #[serde(rename = "even-q")]
    EvenQ,
}

impl GridType {
    /// All supported layouts.
    pub const ALL: [GridType; 4] = [GridType::OddR, GridType::EvenR, GridType::OddQ, GridType::EvenQ];

    /// The layout's canonical name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            GridType::OddR => "odd-r",
            GridType::EvenR => "even-r",
            GridType::OddQ => "odd-q",
            GridType::EvenQ => "even-q",
        }
    }

    /// Neighbor offsets for the cell at `(col, row)`.
    #[must_use]
    pub fn offsets(self, col: i32, row: i32) -> &'static [(i32, i32); 6] {
        let row_odd = row.rem_euclid(2) == 1;
        let col_odd = col.rem_euclid(2) == 1;
        match (self, row_odd, col_odd) {
            (GridType::OddR, false, _) => &ODD_R_EVEN,
            (GridType::OddR, true, _) => &ODD_R_ODD,
            (GridType::EvenR, false, _) => &EVEN_R_EVEN,
            (GridType::EvenR, true, _) => &EVEN_R_ODD,
            (GridType::OddQ, _, false) => &ODD_Q_EVEN,
            (GridType::OddQ, _, true) => &ODD_Q_ODD,
            (GridType::EvenQ, _, false) => &EVEN_Q_EVEN,
            (GridType::EvenQ, _, true) => &EVEN_Q_ODD,
        }
    }
}

impl std::fmt::Display for GridType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GridType {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self> {
        GridType::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| BoardError::InvalidConfiguration(format!("unknown grid type '{s}'")))
    }
}

/// An occupied neighbor returned by [`Grid::get_adjacents`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Adjacent<'a, T> {
    /// Neighbor column.
    pub col: i32,
    /// Neighbor row.
    pub row: i32,
    /// The neighbor's contents.
    pub value: &'a T,
}

/// Dense hex grid with optional cells.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grid<T> {
    #[serde(rename = "type")]
    grid_type: GridType,
    columns: u32,
    rows: u32,
    /// Row-major cell storage.
    cells: Vec<Option<T>>,
}

impl<T> Grid<T> {
    /// Create an empty grid.
    #[must_use]
    pub fn new(grid_type: GridType, columns: u32, rows: u32) -> Self {
        let len = columns as usize * rows as usize;
        Self {
            grid_type,
            columns,
            rows,
            cells: std::iter::repeat_with(|| None).take(len).collect(),
        }
    }

    /// Create an empty grid from a layout name such as `"odd-r"`.
    ///
    /// Fails with `InvalidConfiguration` for an unknown layout.
    pub fn with_type_name(grid_type: &str, columns: u32, rows: u32) -> Result<Self> {
        Ok(Self::new(grid_type.parse()?, columns, rows))
    }

    /// The grid's offset layout.
    #[must_use]
    pub fn grid_type(&self) -> GridType {
        self.grid_type
    }

    /// Number of columns.
    #[must_use]
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Check if `(col, row)` lies inside the grid.
    #[must_use]
    pub fn contains(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && (col as u32) < self.columns && (row as u32) < self.rows
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        self.contains(col, row)
            .then(|| row as usize * self.columns as usize + col as usize)
    }

    /// Get the cell at `(col, row)`. `None` if empty or out of range.
    #[must_use]
    pub fn get(&self, col: i32, row: i32) -> Option<&T> {
        self.index(col, row).and_then(|i| self.cells[i].as_ref())
    }

    /// Get a mutable reference to the cell at `(col, row)`.
    pub fn get_mut(&mut self, col: i32, row: i32) -> Option<&mut T> {
        let i = self.index(col, row)?;
        self.cells[i].as_mut()
    }

    /// Store `value` at `(col, row)`. Out-of-range writes are ignored.
    pub fn set(&mut self, col: i32, row: i32, value: T) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = Some(value);
        }
    }

    /// Clear the cell at `(col, row)`, returning its previous contents.
    pub fn remove(&mut self, col: i32, row: i32) -> Option<T> {
        let i = self.index(col, row)?;
        self.cells[i].take()
    }

    /// In-range neighbor coordinates of `(col, row)`, occupied or not.
    #[must_use]
    pub fn neighbors(&self, col: i32, row: i32) -> SmallVec<[HexCoord; 6]> {
        self.grid_type
            .offsets(col, row)
            .iter()
            .map(|&(dc, dr)| HexCoord::new(col + dc, row + dr))
            .filter(|c| self.contains(c.col, c.row))
            .collect()
    }

    /// Occupied, in-range neighbors of `(col, row)`.
    #[must_use]
    pub fn get_adjacents(&self, col: i32, row: i32) -> Vec<Adjacent<'_, T>> {
        self.neighbors(col, row)
            .into_iter()
            .filter_map(|c| {
                self.get(c.col, c.row).map(|value| Adjacent {
                    col: c.col,
                    row: c.row,
                    value,
                })
            })
            .collect()
    }

    /// Iterate occupied cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (HexCoord, &T)> + '_ {
        let columns = self.columns as usize;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.as_ref()
                .map(|v| (HexCoord::new((i % columns) as i32, (i / columns) as i32), v))
        })
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Check if no cell is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }
}

#[derive(Deserialize)]
struct GridRepr<T> {
    #[serde(rename = "type")]
    grid_type: GridType,
    columns: u32,
    rows: u32,
    cells: Vec<Option<T>>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Grid<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let repr = GridRepr::<T>::deserialize(deserializer)?;
        let expected = (repr.columns as usize).checked_mul(repr.rows as usize);
        if expected != Some(repr.cells.len()) {
            return Err(D::Error::custom(format!(
                "grid of {}x{} cannot hold {} cells",
                repr.columns,
                repr.rows,
                repr.cells.len()
            )));
        }
        Ok(Self {
            grid_type: repr.grid_type,
            columns: repr.columns,
            rows: repr.rows,
            cells: repr.cells,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords<T>(adjacents: &[Adjacent<'_, T>]) -> Vec<(i32, i32)> {
        let mut v: Vec<_> = adjacents.iter().map(|a| (a.col, a.row)).collect();
        v.sort_unstable();
        v
    }

    fn filled(grid_type: GridType) -> Grid<u32> {
        let mut grid = Grid::new(grid_type, 5, 5);
        for row in 0..5 {
            for col in 0..5 {
                grid.set(col, row, (row * 5 + col) as u32);
            }
        }
        grid
    }

    #[test]
    fn test_get_set_remove() {
        let mut grid = Grid::new(GridType::OddR, 3, 2);
        assert!(grid.get(0, 0).is_none());

        grid.set(2, 1, "x");
        assert_eq!(grid.get(2, 1), Some(&"x"));
        assert_eq!(grid.len(), 1);

        assert_eq!(grid.remove(2, 1), Some("x"));
        assert_eq!(grid.remove(2, 1), None);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_out_of_range_is_absent() {
        let mut grid = Grid::new(GridType::OddR, 3, 3);
        grid.set(-1, 0, 1);
        grid.set(3, 0, 1);
        grid.set(0, 3, 1);
        assert!(grid.is_empty());
        assert_eq!(grid.get(-1, -1), None);
        assert_eq!(grid.get(100, 0), None);
        assert_eq!(grid.remove(0, 100), None);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = Grid::<u8>::with_type_name("odd-x", 3, 3).unwrap_err();
        assert!(matches!(err, BoardError::InvalidConfiguration(_)));

        let grid = Grid::<u8>::with_type_name("even-q", 3, 3).unwrap();
        assert_eq!(grid.grid_type(), GridType::EvenQ);
    }

    #[test]
    fn test_odd_r_adjacents() {
        let grid = filled(GridType::OddR);
        // Even row
        assert_eq!(
            coords(&grid.get_adjacents(2, 2)),
            vec![(1, 1), (1, 2), (1, 3), (2, 1), (2, 3), (3, 2)]
        );
        // Odd row
        assert_eq!(
            coords(&grid.get_adjacents(2, 1)),
            vec![(1, 1), (2, 0), (2, 2), (3, 0), (3, 1), (3, 2)]
        );
    }

    #[test]
    fn test_even_r_adjacents() {
        let grid = filled(GridType::EvenR);
        assert_eq!(
            coords(&grid.get_adjacents(2, 2)),
            vec![(1, 2), (2, 1), (2, 3), (3, 1), (3, 2), (3, 3)]
        );
        assert_eq!(
            coords(&grid.get_adjacents(2, 1)),
            vec![(1, 0), (1, 1), (1, 2), (2, 0), (2, 2), (3, 1)]
        );
    }

    #[test]
    fn test_odd_q_adjacents() {
        let grid = filled(GridType::OddQ);
        // Even column
        assert_eq!(
            coords(&grid.get_adjacents(2, 2)),
            vec![(1, 1), (1, 2), (2, 1), (2, 3), (3, 1), (3, 2)]
        );
        // Odd column
        assert_eq!(
            coords(&grid.get_adjacents(1, 2)),
            vec![(0, 2), (0, 3), (1, 1), (1, 3), (2, 2), (2, 3)]
        );
    }

    #[test]
    fn test_even_q_adjacents() {
        let grid = filled(GridType::EvenQ);
        assert_eq!(
            coords(&grid.get_adjacents(2, 2)),
            vec![(1, 2), (1, 3), (2, 1), (2, 3), (3, 2), (3, 3)]
        );
        assert_eq!(
            coords(&grid.get_adjacents(1, 2)),
            vec![(0, 1), (0, 2), (1, 1), (1, 3), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn test_adjacents_exclude_empty_and_out_of_range() {
        let mut grid = Grid::new(GridType::OddR, 3, 3);
        grid.set(1, 0, 'a');
        grid.set(2, 2, 'b');

        // Corner cell: only in-range, occupied neighbors come back
        let adj = grid.get_adjacents(0, 0);
        assert_eq!(coords(&adj), vec![(1, 0)]);
        assert_eq!(adj[0].value, &'a');
        assert_eq!(grid.neighbors(0, 0).len(), 2);
    }

    #[test]
    fn test_iter_and_clear() {
        let mut grid = Grid::new(GridType::OddQ, 2, 2);
        grid.set(1, 1, 4);
        grid.set(0, 1, 3);

        let cells: Vec<_> = grid.iter().map(|(c, v)| (c.col, c.row, *v)).collect();
        assert_eq!(cells, vec![(0, 1, 3), (1, 1, 4)]);

        let copy = grid.clone();
        grid.clear();
        assert!(grid.is_empty());
        assert_eq!(copy.len(), 2);
        assert_eq!(copy.columns(), 2);
        assert_eq!(copy.grid_type(), GridType::OddQ);
    }

    #[test]
    fn test_serialization_validates_cell_count() {
        let mut grid = Grid::new(GridType::EvenR, 2, 1);
        grid.set(1, 0, 9u8);
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, r#"{"type":"even-r","columns":2,"rows":1,"cells":[null,9]}"#);
        let back: Grid<u8> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);

        let bad = r#"{"type":"even-r","columns":2,"rows":2,"cells":[null,9]}"#;
        assert!(serde_json::from_str::<Grid<u8>>(bad).is_err());
    }
}
