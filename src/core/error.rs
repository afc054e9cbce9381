//! Error taxonomy for grid, piece, and board operations.
//!
//! Every failure is raised synchronously from the offending call. Operations
//! validate their inputs before touching any state, so an `Err` never leaves
//! a half-applied mutation behind.

use thiserror::Error;

/// Errors raised by the engine.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Malformed position map or unknown grid type. Fatal at construction.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Position index outside the board's slot range.
    #[error("Position index {index} out of range (board has {len} positions)")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Number of positions on the board.
        len: usize,
    },

    /// Bad argument: coordinates outside the grid, malformed piece data,
    /// unknown event kind.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation is not legal in the current board state.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Triangle index outside `1..=6`.
    #[error("Triangle {0} out of range (expected 1..=6)")]
    TriangleOutOfRange(u8),

    /// JSON encoding or decoding failed.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = BoardError::IndexOutOfRange { index: 12, len: 9 };
        assert_eq!(
            err.to_string(),
            "Position index 12 out of range (board has 9 positions)"
        );

        let err = BoardError::TriangleOutOfRange(7);
        assert_eq!(err.to_string(), "Triangle 7 out of range (expected 1..=6)");
    }

    #[test]
    fn test_serialization_error_conversion() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: BoardError = parse.unwrap_err().into();
        assert!(matches!(err, BoardError::Serialization(_)));
    }
}
