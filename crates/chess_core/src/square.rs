//! Square indexing and the square-name lookup table.
//!
//! Squares run left to right, bottom to top: 0 = a1, 7 = h1, 8 = a2, 63 = h8.

use crate::error::ChessError;

#[rustfmt::skip]
pub static SQUARE_NAMES: [&str; 64] = [
    "a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1",
    "a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2",
    "a3", "b3", "c3", "d3", "e3", "f3", "g3", "h3",
    "a4", "b4", "c4", "d4", "e4", "f4", "g4", "h4",
    "a5", "b5", "c5", "d5", "e5", "f5", "g5", "h5",
    "a6", "b6", "c6", "d6", "e6", "f6", "g6", "h6",
    "a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7",
    "a8", "b8", "c8", "d8", "e8", "f8", "g8", "h8",
];

/// Reject indices outside the board.
#[inline]
pub fn check_square(sq: u8) -> Result<u8, ChessError> {
    if sq < 64 {
        Ok(sq)
    } else {
        Err(ChessError::InvalidSquare { square: sq })
    }
}

pub fn square_name(sq: u8) -> Result<&'static str, ChessError> {
    Ok(SQUARE_NAMES[check_square(sq)? as usize])
}

/// Look up a square by name, case-insensitively ("A1" and "a1" both give 0).
pub fn parse_square(name: &str) -> Option<u8> {
    SQUARE_NAMES
        .iter()
        .position(|n| n.eq_ignore_ascii_case(name))
        .map(|i| i as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_bitboard_order() {
        assert_eq!(SQUARE_NAMES[0], "a1");
        assert_eq!(SQUARE_NAMES[7], "h1");
        assert_eq!(SQUARE_NAMES[8], "a2");
        assert_eq!(SQUARE_NAMES[63], "h8");
    }

    #[test]
    fn parse_accepts_either_case() {
        assert_eq!(parse_square("A1"), Some(0));
        assert_eq!(parse_square("e4"), Some(28));
        assert_eq!(parse_square("H8"), Some(63));
        assert_eq!(parse_square("i9"), None);
        assert_eq!(parse_square(""), None);
    }

    #[test]
    fn every_name_maps_back_to_its_index() {
        for sq in 0..64u8 {
            let name = square_name(sq).unwrap();
            assert_eq!(parse_square(name), Some(sq));
        }
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        assert_eq!(
            square_name(64),
            Err(ChessError::InvalidSquare { square: 64 })
        );
        assert!(check_square(63).is_ok());
    }
}
