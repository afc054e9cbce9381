//! Undo history.
//!
//! Every `set` and `remove` on a board appends one record. Undo pops records
//! most-recent-first. Replaying the records in order on an empty board
//! rebuilds the board's current state.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::pieces::Piece;

/// One recorded board operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum HistoryRecord {
    /// `piece` was written to `index`.
    Set {
        /// Position index.
        index: usize,
        /// The piece written. Kept so the record can be replayed.
        piece: Piece,
    },
    /// `index` was cleared; `piece` is what it held.
    Remove {
        /// Position index.
        index: usize,
        /// The piece removed, if the position was occupied.
        piece: Option<Piece>,
    },
}

impl HistoryRecord {
    /// The position this record touches.
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            HistoryRecord::Set { index, .. } | HistoryRecord::Remove { index, .. } => *index,
        }
    }
}

/// Stack of history records.
///
/// Backed by a persistent vector so boards and snapshots can share it
/// cheaply.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    records: Vector<HistoryRecord>,
}

impl History {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn push(&mut self, record: HistoryRecord) {
        self.records.push_back(record);
    }

    /// Pop the most recent record.
    pub fn pop(&mut self) -> Option<HistoryRecord> {
        self.records.pop_back()
    }

    /// The most recent record.
    #[must_use]
    pub fn last(&self) -> Option<&HistoryRecord> {
        self.records.last()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter()
    }

    /// Drop all records.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl FromIterator<HistoryRecord> for History {
    fn from_iter<I: IntoIterator<Item = HistoryRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
