//! Two-colored pieces.
//!
//! A `Piece` is an ordered pair of colors plus caller-supplied attributes.
//! Identity is the derived colors key `"first-second"`: two pieces are equal
//! iff their keys match, so `(red, blue)` and `(blue, red)` differ.
//!
//! ## JSON Shape
//!
//! ```json
//! { "colors": ["red", "blue"], "id": 7, "sprite": "rb.png" }
//! ```
//!
//! Attributes are flattened next to `colors`. The key is derived on load and
//! never written out. `colors` itself is reserved and cannot be used as an
//! attribute name.

use serde::{Deserialize, Serialize};

use super::attributes::{AttributeKey, AttributeValue, Attributes};
use crate::core::{BoardError, Color, Result};

/// Attribute name taken by the colors in the JSON shape.
const RESERVED_KEY: &str = "colors";

fn check_key(key: &AttributeKey) -> Result<()> {
    if key.as_str() == RESERVED_KEY {
        return Err(BoardError::InvalidArgument(format!(
            "attribute name '{RESERVED_KEY}' is reserved"
        )));
    }
    Ok(())
}

/// A placeable two-colored piece.
///
/// ## Example
///
/// ```
/// use trihex::pieces::Piece;
///
/// let piece = Piece::new("red", "green").with_attribute("id", 3i32)?;
/// assert_eq!(piece.colors_key(), "red-green");
/// assert_eq!(piece, Piece::new("red", "green"));
/// assert_ne!(piece, Piece::new("green", "red"));
/// assert!(Piece::new("red", "green").with_attribute("colors", "x").is_err());
/// # Ok::<(), trihex::core::BoardError>(())
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "PieceRepr", into = "PieceRepr")]
pub struct Piece {
    colors: [Color; 2],
    colors_key: String,
    attributes: Attributes,
}

impl Piece {
    /// Create a piece from its two colors.
    pub fn new(first: impl Into<Color>, second: impl Into<Color>) -> Self {
        Self::build([first.into(), second.into()], Attributes::default())
    }

    /// Create a piece from a color list.
    ///
    /// Fails with `InvalidArgument` unless exactly two non-empty colors are
    /// given.
    pub fn from_colors<S: AsRef<str>>(colors: &[S]) -> Result<Self> {
        match colors {
            [first, second] => {
                let (first, second) = (first.as_ref(), second.as_ref());
                if first.is_empty() || second.is_empty() {
                    return Err(BoardError::InvalidArgument(
                        "piece colors must be non-empty".to_string(),
                    ));
                }
                Ok(Self::new(first, second))
            }
            _ => Err(BoardError::InvalidArgument(format!(
                "a piece needs exactly 2 colors, got {}",
                colors.len()
            ))),
        }
    }

    fn build(colors: [Color; 2], attributes: Attributes) -> Self {
        let colors_key = format!("{}-{}", colors[0], colors[1]);
        Self {
            colors,
            colors_key,
            attributes,
        }
    }

    /// Add an attribute (builder pattern).
    ///
    /// Fails with `InvalidArgument` for the reserved name `colors`.
    pub fn with_attribute(
        mut self,
        key: impl Into<AttributeKey>,
        value: impl Into<AttributeValue>,
    ) -> Result<Self> {
        let key = key.into();
        check_key(&key)?;
        self.attributes.insert(key, value.into());
        Ok(self)
    }

    /// Replace all attributes (builder pattern).
    ///
    /// Fails with `InvalidArgument` if `colors` is among the names.
    pub fn with_attributes(mut self, attributes: Attributes) -> Result<Self> {
        attributes.keys().try_for_each(check_key)?;
        self.attributes = attributes;
        Ok(self)
    }

    /// Both colors, in order.
    #[must_use]
    pub fn colors(&self) -> &[Color; 2] {
        &self.colors
    }

    /// Color painted on references A–D.
    #[must_use]
    pub fn first(&self) -> &Color {
        &self.colors[0]
    }

    /// Color painted on references E–H.
    #[must_use]
    pub fn second(&self) -> &Color {
        &self.colors[1]
    }

    /// The derived identity key, `"first-second"`.
    #[must_use]
    pub fn colors_key(&self) -> &str {
        &self.colors_key
    }

    /// All extra attributes.
    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Look up one attribute.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(&AttributeKey::from(key))
    }

    /// Serialize to a JSON value: `colors` plus the attributes.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Rebuild a piece from [`Piece::to_json`] output.
    ///
    /// Fails with `InvalidArgument` for non-objects or malformed colors.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        Self::deserialize(value)
            .map_err(|e| BoardError::InvalidArgument(format!("malformed piece: {e}")))
    }
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.colors_key == other.colors_key
    }
}

impl Eq for Piece {}

impl std::hash::Hash for Piece {
    fn hash<H: std::hash::Hasher>(&self, hasher: &mut H) {
        self.colors_key.hash(hasher);
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Piece({})", self.colors_key)
    }
}

#[derive(Serialize, Deserialize)]
struct PieceRepr {
    colors: Vec<Color>,
    #[serde(flatten)]
    attributes: Attributes,
}

impl TryFrom<PieceRepr> for Piece {
    type Error = BoardError;

    fn try_from(repr: PieceRepr) -> Result<Self> {
        let colors: Vec<&str> = repr.colors.iter().map(Color::as_str).collect();
        Piece::from_colors(colors.as_slice())?.with_attributes(repr.attributes)
    }
}

impl From<Piece> for PieceRepr {
    fn from(piece: Piece) -> Self {
        let [first, second] = piece.colors;
        Self {
            colors: vec![first, second],
            attributes: piece.attributes,
        }
    }
}
