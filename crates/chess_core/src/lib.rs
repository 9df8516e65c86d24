//! Chess rules core: bitboard board state, legal move generation and move
//! application. Engines build on top of this crate.

pub mod apply;
pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod error;
pub mod movegen;
pub mod perft;
pub mod square;
pub mod types;

pub use bitboard::Bitboard;
pub use board::*;
pub use error::{ChessError, InvariantViolation};
pub use movegen::{legal_moves, legal_moves_for, legal_moves_into, pseudo_legal_moves};
pub use perft::{divide, perft};
pub use square::{SQUARE_NAMES, check_square, parse_square, square_name};
pub use types::*;
