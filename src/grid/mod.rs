//! Grid layer: offset-coordinate hex grids with no game semantics.
//!
//! ## Key Types
//!
//! - [`GridType`]: one of the four offset layouts
//! - [`Grid`]: dense `(col, row)` storage with neighbor lookup
//! - [`TriGrid`]: a grid whose cells are six numbered triangles
//! - [`Hexagon`]: the six triangles of one cell

mod hex_grid;
mod trigrid;

pub use hex_grid::{Adjacent, Grid, GridType};
pub use trigrid::{Hexagon, TriGrid};
