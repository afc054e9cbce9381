//! Coordinate and color value types.
//!
//! - [`HexCoord`]: a hexagon cell by `(col, row)`, keyed as `"col-row"`
//! - [`TriRef`]: one triangle of one hexagon, `(col, row, tri)`
//! - [`Color`]: an opaque color label

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::BoardError;

/// Number of triangles in a hexagon.
pub const TRIANGLES: usize = 6;

/// Hexagon cell address.
///
/// Serializes as its `"col-row"` key so it can be used as a JSON map key.
/// Keys are only defined for non-negative coordinates, which covers every
/// cell of a grid; `"-1-2"` does not parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct HexCoord {
    /// Column.
    pub col: i32,
    /// Row.
    pub row: i32,
}

impl HexCoord {
    /// Create a new hexagon coordinate.
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// The coordinate as a `[col, row]` pair.
    #[must_use]
    pub const fn as_pair(self) -> [i32; 2] {
        [self.col, self.row]
    }
}

impl PartialOrd for HexCoord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HexCoord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Row-major
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}

impl std::fmt::Display for HexCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.col, self.row)
    }
}

/// Parses a `"col-row"` key with non-negative parts.
impl FromStr for HexCoord {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BoardError::InvalidArgument(format!("malformed hexagon key '{s}'"));
        let part = |p: &str| {
            p.parse::<u32>()
                .ok()
                .and_then(|v| i32::try_from(v).ok())
                .ok_or_else(invalid)
        };
        let (col, row) = s.split_once('-').ok_or_else(invalid)?;
        Ok(Self {
            col: part(col)?,
            row: part(row)?,
        })
    }
}

impl From<HexCoord> for String {
    fn from(coord: HexCoord) -> Self {
        coord.to_string()
    }
}

impl TryFrom<String> for HexCoord {
    type Error = BoardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<[i32; 2]> for HexCoord {
    fn from([col, row]: [i32; 2]) -> Self {
        Self { col, row }
    }
}

/// Reference to a single triangle: `(col, row, tri)` with `tri` in `1..=6`.
///
/// Serializes as a `[col, row, tri]` array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(i32, i32, u8)", into = "(i32, i32, u8)")]
pub struct TriRef {
    /// Column of the hexagon.
    pub col: i32,
    /// Row of the hexagon.
    pub row: i32,
    /// Triangle number, 1-based.
    pub tri: u8,
}

impl TriRef {
    /// Create a new triangle reference.
    #[must_use]
    pub const fn new(col: i32, row: i32, tri: u8) -> Self {
        Self { col, row, tri }
    }

    /// The hexagon this triangle belongs to.
    #[must_use]
    pub const fn hex(self) -> HexCoord {
        HexCoord::new(self.col, self.row)
    }
}

impl From<(i32, i32, u8)> for TriRef {
    fn from((col, row, tri): (i32, i32, u8)) -> Self {
        Self { col, row, tri }
    }
}

impl From<TriRef> for (i32, i32, u8) {
    fn from(r: TriRef) -> Self {
        (r.col, r.row, r.tri)
    }
}

/// An opaque color label.
///
/// The engine only compares colors for equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub String);

impl Color {
    /// Create a new color.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The color label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Color {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<&str> for Color {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
