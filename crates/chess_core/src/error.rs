//! Error types for board queries, move application and engine calls.
//!
//! `ChessError` is what boundary-facing operations return. `InvariantViolation`
//! describes a corrupted board; the move applier panics with it, since a board
//! in that state cannot be searched meaningfully.

use thiserror::Error;

use crate::types::Color;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error("invalid square index {square} (must be 0-63)")]
    InvalidSquare { square: u8 },

    #[error("it is {actual}'s turn, not {expected}'s")]
    NotYourTurn { expected: Color, actual: Color },

    #[error("engine plays {engine} but {to_move} is to move")]
    IllegalState { engine: Color, to_move: Color },

    #[error("illegal move from square {from} to square {to}")]
    IllegalMove { from: u8, to: u8 },

    #[error("no legal moves in this position")]
    NoLegalMoves,

    #[error("square {square} cannot be an en-passant target for the side to move")]
    InvalidEnPassant { square: u8 },

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("invariant violation: more than one piece on square {square}")]
    OverlappingPieces { square: u8 },

    #[error("invariant violation: {color} has {count} kings")]
    KingCount { color: Color, count: u32 },
}
