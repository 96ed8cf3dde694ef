//! Error types for the rules engine
//!
//! Covers invalid external input (coordinates, notation, FEN), game-flow
//! violations, and the missing-king terminal condition.

use thiserror::Error;

use crate::types::{Color, PieceKind, Square};

/// Errors that can occur in the rules engine and game session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// Coordinates outside the 8x8 grid
    #[error("Invalid square: row {row}, col {col} (must be 0-7)")]
    InvalidSquare { row: i32, col: i32 },

    /// No piece at the source square
    #[error("No piece at square {square}")]
    EmptySquare { square: Square },

    /// Piece belongs to the side that is not on move
    #[error("Piece at {square} belongs to {color}, not the side to move")]
    NotYourPiece { square: Square, color: Color },

    /// Destination is not reachable by the piece
    #[error("Illegal move: {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    /// The king of a color is not on the board
    #[error("{color} king not found, the game ended prematurely")]
    KingMissing { color: Color },

    /// A promotion choice is required before the next ply
    #[error("Pawn on {square} is waiting for a promotion choice")]
    PromotionPending { square: Square },

    /// A promotion choice was given while none is pending
    #[error("No pawn is waiting for promotion")]
    NoPromotionPending,

    /// Promotion to a kind a pawn cannot become, or from a square without a
    /// pawn on its last rank
    #[error("Cannot promote to {kind:?} on {square}")]
    InvalidPromotion { square: Square, kind: PieceKind },

    /// The game has already finished
    #[error("The game is over")]
    GameOver,

    /// Malformed FEN input
    #[error("Invalid FEN: {0}")]
    InvalidFen(String),

    /// Malformed square or move text
    #[error("Invalid notation: {0}")]
    InvalidNotation(String),
}

/// Result type alias for rules engine operations
pub type Result<T> = std::result::Result<T, ChessError>;
