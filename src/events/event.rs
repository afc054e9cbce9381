//! Board event kinds and payloads.
//!
//! Events describe state transitions the renderer needs to mirror. They are
//! raised synchronously inside the operation that caused them.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{BoardError, Color, HexCoord};
use crate::pieces::Piece;

/// The five recognized event kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// A piece was written to a position.
    Set,
    /// A position was cleared.
    Remove,
    /// A placement completed one or more hexagons.
    Form,
    /// A completed hexagon was broken.
    Destroy,
    /// The board was reset.
    Clear,
}

impl EventKind {
    /// All event kinds.
    pub const ALL: [EventKind; 5] = [
        EventKind::Set,
        EventKind::Remove,
        EventKind::Form,
        EventKind::Destroy,
        EventKind::Clear,
    ];

    /// The kind's name as used by `FromStr`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EventKind::Set => "set",
            EventKind::Remove => "remove",
            EventKind::Form => "form",
            EventKind::Destroy => "destroy",
            EventKind::Clear => "clear",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventKind {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| BoardError::InvalidArgument(format!("unknown event kind '{s}'")))
    }
}

/// A completed hexagon and its color.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormedHexagon {
    /// `[col, row]` of the hexagon.
    pub coordinate: [i32; 2],
    /// The shared color of its six triangles.
    pub color: Color,
}

impl FormedHexagon {
    /// Create a formed-hexagon entry.
    #[must_use]
    pub fn new(coord: HexCoord, color: Color) -> Self {
        Self {
            coordinate: coord.as_pair(),
            color,
        }
    }

    /// The hexagon's coordinate.
    #[must_use]
    pub fn coord(&self) -> HexCoord {
        HexCoord::from(self.coordinate)
    }
}

/// An event raised by the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "lowercase")]
pub enum BoardEvent {
    /// `piece` was written to position `index`.
    Set {
        /// Position index.
        index: usize,
        /// The piece now occupying it.
        piece: Piece,
    },
    /// Position `index` was cleared.
    Remove {
        /// Position index.
        index: usize,
        /// The piece that was there, if any.
        piece: Option<Piece>,
    },
    /// Hexagons newly completed by a placement.
    Form(Vec<FormedHexagon>),
    /// Hexagons that stopped being complete, as `[col, row]`.
    Destroy(Vec<[i32; 2]>),
    /// The board was reset.
    Clear,
}

impl BoardEvent {
    /// The kind of this event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            BoardEvent::Set { .. } => EventKind::Set,
            BoardEvent::Remove { .. } => EventKind::Remove,
            BoardEvent::Form(_) => EventKind::Form,
            BoardEvent::Destroy(_) => EventKind::Destroy,
            BoardEvent::Clear => EventKind::Clear,
        }
    }
}
