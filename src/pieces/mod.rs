//! Piece system: two-colored pieces and their attributes.
//!
//! ## Key Types
//!
//! - `Piece`: an ordered color pair with a derived identity key
//! - `AttributeKey` / `AttributeValue` / `Attributes`: caller data carried
//!   by a piece, opaque to the engine

pub mod attributes;
pub mod piece;

pub use attributes::{AttributeKey, AttributeValue, Attributes};
pub use piece::Piece;
