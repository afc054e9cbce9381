//! The bundled standard map.
//!
//! A 4×4 `odd-r` board with nine positions. Every triangle is painted by at
//! most one position, and every position paints at most two triangles of any
//! hexagon except the centre hexagon (1, 1), which is shared by positions 0
//! (triangles 1–2, second color) and 8 (triangles 3–6, first color).
//!
//! The placement scenarios for the default board (a shared centre hexagon
//! formed by positions 0 and 8, its destruction on removal, and position 8
//! as the only scoring candidate) hold on this 4×4 layout. Nine positions of
//! eight distinct triangles need more than the 54 triangles a 3×3 grid has.
//!
//! Built once on first use and shared by every board through `Arc`.

use std::sync::{Arc, OnceLock};

use super::map::{Position, PositionMap, REFS_PER_POSITION};
use crate::core::TriRef;
use crate::grid::GridType;

struct StandardPosition {
    adjacents: &'static [usize],
    edge: bool,
    refs: [(i32, i32, u8); REFS_PER_POSITION],
}

#[rustfmt::skip]
const STANDARD_POSITIONS: [StandardPosition; 9] = [
    StandardPosition { adjacents: &[1, 6, 7, 8], edge: true,
        refs: [(0, 1, 1), (0, 1, 2), (1, 0, 3), (1, 0, 4), (1, 1, 1), (1, 1, 2), (0, 0, 3), (0, 0, 4)] },
    StandardPosition { adjacents: &[0, 2, 3, 7], edge: true,
        refs: [(1, 0, 1), (1, 0, 2), (2, 0, 3), (2, 0, 4), (0, 0, 1), (0, 0, 2), (2, 1, 1), (2, 1, 2)] },
    StandardPosition { adjacents: &[1, 3], edge: true,
        refs: [(2, 0, 1), (2, 0, 2), (3, 0, 3), (3, 0, 4), (3, 1, 1), (3, 1, 2), (2, 1, 3), (2, 1, 4)] },
    StandardPosition { adjacents: &[1, 2, 4, 8], edge: false,
        refs: [(2, 1, 5), (2, 1, 6), (3, 1, 3), (3, 1, 4), (2, 2, 1), (2, 2, 2), (3, 2, 1), (3, 2, 2)] },
    StandardPosition { adjacents: &[3, 8], edge: true,
        refs: [(3, 2, 3), (3, 2, 4), (3, 3, 1), (3, 3, 2), (2, 3, 3), (2, 3, 4), (2, 2, 3), (2, 2, 4)] },
    StandardPosition { adjacents: &[6, 7, 8], edge: true,
        refs: [(1, 2, 3), (1, 2, 4), (1, 3, 1), (1, 3, 2), (0, 3, 3), (0, 3, 4), (0, 2, 1), (0, 2, 2)] },
    StandardPosition { adjacents: &[0, 5, 7], edge: true,
        refs: [(0, 2, 3), (0, 2, 4), (0, 1, 5), (0, 1, 6), (1, 3, 3), (1, 3, 4), (0, 3, 1), (0, 3, 2)] },
    StandardPosition { adjacents: &[0, 1, 5, 6], edge: true,
        refs: [(0, 1, 3), (0, 1, 4), (0, 0, 5), (0, 0, 6), (1, 0, 5), (1, 0, 6), (0, 2, 5), (0, 2, 6)] },
    StandardPosition { adjacents: &[0, 3, 4, 5], edge: false,
        refs: [(1, 1, 3), (1, 1, 4), (1, 1, 5), (1, 1, 6), (1, 2, 1), (1, 2, 2), (2, 2, 5), (2, 2, 6)] },
];

fn build() -> PositionMap {
    STANDARD_POSITIONS.iter().fold(
        PositionMap::new(GridType::OddR, 4, 4),
        |map, p| {
            let mut position = Position::new(p.refs.map(TriRef::from))
                .with_adjacents(p.adjacents.to_vec());
            position.edge = p.edge;
            map.with_position(position)
        },
    )
}

impl PositionMap {
    /// The bundled standard map, shared process-wide.
    #[must_use]
    pub fn standard() -> Arc<PositionMap> {
        static STANDARD: OnceLock<Arc<PositionMap>> = OnceLock::new();
        Arc::clone(STANDARD.get_or_init(|| Arc::new(build())))
    }
}
