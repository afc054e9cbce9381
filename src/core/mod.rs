//! Core value types shared by every layer: coordinates, colors, errors.

pub mod coord;
pub mod error;

pub use coord::{Color, HexCoord, TriRef, TRIANGLES};
pub use error::{BoardError, Result};
