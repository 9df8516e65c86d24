//! The canonical board state: twelve piece bitboards plus side to move,
//! castling rights and the en-passant target.

use std::fmt;

use tracing::trace;

use crate::apply::en_passant_rank;
use crate::attacks::*;
use crate::bitboard::Bitboard;
use crate::error::{ChessError, InvariantViolation};
use crate::movegen::legal_moves;
use crate::square::{check_square, parse_square};
use crate::types::*;

// Initial placement of every piece set.
pub const INIT_WHITE_PAWNS: Bitboard = Bitboard::RANK_2;
pub const INIT_WHITE_KNIGHTS: Bitboard = Bitboard::from_squares(&[1, 6]);
pub const INIT_WHITE_BISHOPS: Bitboard = Bitboard::from_squares(&[2, 5]);
pub const INIT_WHITE_ROOKS: Bitboard = Bitboard::from_squares(&[0, 7]);
pub const INIT_WHITE_QUEEN: Bitboard = Bitboard::from_square(3);
pub const INIT_WHITE_KING: Bitboard = Bitboard::from_square(4);

pub const INIT_BLACK_PAWNS: Bitboard = Bitboard::RANK_7;
pub const INIT_BLACK_KNIGHTS: Bitboard = Bitboard::from_squares(&[57, 62]);
pub const INIT_BLACK_BISHOPS: Bitboard = Bitboard::from_squares(&[58, 61]);
pub const INIT_BLACK_ROOKS: Bitboard = Bitboard::from_squares(&[56, 63]);
pub const INIT_BLACK_QUEEN: Bitboard = Bitboard::from_square(59);
pub const INIT_BLACK_KING: Bitboard = Bitboard::from_square(60);

pub const INIT_CASTLING_RIGHTS: CastlingRights = CastlingRights::ALL;

/// Piece sets of the standard start position, indexed by [color][kind].
pub const INIT_PIECES: [[Bitboard; 6]; 2] = [
    [
        INIT_WHITE_PAWNS,
        INIT_WHITE_KNIGHTS,
        INIT_WHITE_BISHOPS,
        INIT_WHITE_ROOKS,
        INIT_WHITE_QUEEN,
        INIT_WHITE_KING,
    ],
    [
        INIT_BLACK_PAWNS,
        INIT_BLACK_KNIGHTS,
        INIT_BLACK_BISHOPS,
        INIT_BLACK_ROOKS,
        INIT_BLACK_QUEEN,
        INIT_BLACK_KING,
    ],
];

/// Outcome of a position from the side to move's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    pieces: [[Bitboard; 6]; 2],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square behind a pawn that just advanced 2
}

impl Board {
    pub fn startpos() -> Self {
        Board {
            pieces: INIT_PIECES,
            side_to_move: Color::White,
            castling: INIT_CASTLING_RIGHTS,
            en_passant: None,
        }
    }

    /// Build a position from explicit piece sets.
    ///
    /// The sets must not overlap and each side needs exactly one king. An
    /// en-passant target must sit on the sixth rank from the mover's side.
    /// Castling rights whose king or rook is off its home square are dropped.
    pub fn from_parts(
        pieces: [[Bitboard; 6]; 2],
        side_to_move: Color,
        castling: CastlingRights,
        en_passant: Option<u8>,
    ) -> Result<Self, ChessError> {
        if let Some(ep) = en_passant {
            if rank_of(check_square(ep)?) != en_passant_rank(side_to_move) {
                return Err(ChessError::InvalidEnPassant { square: ep });
            }
        }
        let mut board = Board {
            pieces,
            side_to_move,
            castling,
            en_passant,
        };
        board.check_invariants()?;
        board.castling = board.reachable_castling(castling);
        Ok(board)
    }

    /// Parse a Forsyth-Edwards Notation setup string.
    /// The halfmove and fullmove fields are accepted and ignored.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let bad = |msg: &str| ChessError::InvalidFen(format!("{msg}: '{fen}'"));

        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(bad("expected at least 4 fields"));
        }

        let mut pieces = [[Bitboard::EMPTY; 6]; 2];
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(bad("board section needs 8 ranks"));
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            let mut file: i8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let kind = PieceKind::from_symbol(ch).ok_or_else(|| bad("unknown piece"))?;
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let s = sq(file, rank).ok_or_else(|| bad("too many files in rank"))?;
                    pieces[color.idx()][kind.idx()].set(s);
                    file += 1;
                }
                if file > 8 {
                    return Err(bad("too many files in rank"));
                }
            }
            if file != 8 {
                return Err(bad("not enough files in rank"));
            }
        }

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(bad("side to move must be 'w' or 'b'")),
        };

        let mut castling = CastlingRights::NONE;
        if parts[2] != "-" {
            for c in parts[2].chars() {
                let flag = match c {
                    'K' => CastlingRights::WHITE_KINGSIDE,
                    'Q' => CastlingRights::WHITE_QUEENSIDE,
                    'k' => CastlingRights::BLACK_KINGSIDE,
                    'q' => CastlingRights::BLACK_QUEENSIDE,
                    _ => return Err(bad("invalid castling field")),
                };
                castling.insert(flag);
            }
        }

        let en_passant = match parts[3] {
            "-" => None,
            s => Some(parse_square(s).ok_or_else(|| bad("invalid en-passant square"))?),
        };

        Board::from_parts(pieces, side_to_move, castling, en_passant)
    }

    /// Restore the standard start position.
    pub fn reset(&mut self) {
        *self = Board::startpos();
    }

    #[inline(always)]
    pub fn pieces(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.pieces[color.idx()][kind.idx()]
    }

    pub fn color_occupancy(&self, color: Color) -> Bitboard {
        self.pieces[color.idx()]
            .iter()
            .fold(Bitboard::EMPTY, |acc, &bb| acc | bb)
    }

    pub fn occupied(&self) -> Bitboard {
        self.color_occupancy(Color::White) | self.color_occupancy(Color::Black)
    }

    /// Piece on `sq`, rejecting indices outside the board.
    pub fn piece_at(&self, sq: u8) -> Result<Option<Piece>, ChessError> {
        Ok(self.piece_on(check_square(sq)?))
    }

    pub(crate) fn piece_on(&self, sq: u8) -> Option<Piece> {
        for color in Color::ALL {
            for kind in PieceKind::ALL {
                if self.pieces(color, kind).contains(sq) {
                    return Some(Piece::new(color, kind));
                }
            }
        }
        None
    }

    pub(crate) fn put(&mut self, sq: u8, pc: Piece) {
        self.pieces[pc.color.idx()][pc.kind.idx()].set(sq);
    }

    pub(crate) fn remove(&mut self, sq: u8, pc: Piece) {
        self.pieces[pc.color.idx()][pc.kind.idx()].clear(sq);
    }

    /// Square of `color`'s king.
    ///
    /// # Panics
    /// If the king set does not hold exactly one square; such a board was
    /// corrupted by a bug and cannot be played on.
    pub fn king_square(&self, color: Color) -> u8 {
        let kings = self.pieces(color, PieceKind::King);
        match kings.lsb() {
            Some(s) if !kings.more_than_one() => s,
            _ => panic!(
                "{}",
                InvariantViolation::KingCount {
                    color,
                    count: kings.popcount(),
                }
            ),
        }
    }

    pub fn is_square_attacked(&self, sq: u8, by: Color) -> Result<bool, ChessError> {
        Ok(self.attacked(check_square(sq)?, by))
    }

    pub(crate) fn attacked(&self, target: u8, by: Color) -> bool {
        let occupied = self.occupied();

        // A `by` pawn attacks target iff it stands where an opposite pawn on
        // target would capture.
        if !(pawn_attacks(target, by.other()) & self.pieces(by, PieceKind::Pawn)).is_empty() {
            return true;
        }
        if !(knight_attacks(target) & self.pieces(by, PieceKind::Knight)).is_empty() {
            return true;
        }
        if !(king_attacks(target) & self.pieces(by, PieceKind::King)).is_empty() {
            return true;
        }

        let queens = self.pieces(by, PieceKind::Queen);
        let diagonal = self.pieces(by, PieceKind::Bishop) | queens;
        if !(bishop_attacks(target, occupied) & diagonal).is_empty() {
            return true;
        }
        let orthogonal = self.pieces(by, PieceKind::Rook) | queens;
        !(rook_attacks(target, occupied) & orthogonal).is_empty()
    }

    pub fn in_check(&self, c: Color) -> bool {
        self.attacked(self.king_square(c), c.other())
    }

    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut seen = Bitboard::EMPTY;
        for color in Color::ALL {
            for kind in PieceKind::ALL {
                let bb = self.pieces(color, kind);
                if let Some(square) = (seen & bb).lsb() {
                    return Err(InvariantViolation::OverlappingPieces { square });
                }
                seen |= bb;
            }
            let count = self.pieces(color, PieceKind::King).popcount();
            if count != 1 {
                return Err(InvariantViolation::KingCount { color, count });
            }
        }
        Ok(())
    }

    fn reachable_castling(&self, rights: CastlingRights) -> CastlingRights {
        let mut out = rights;
        for color in Color::ALL {
            let (king_home, rook_k, rook_q) = match color {
                Color::White => (4, 7, 0),
                Color::Black => (60, 63, 56),
            };
            let rooks = self.pieces(color, PieceKind::Rook);
            let king_home = self.pieces(color, PieceKind::King).contains(king_home);
            if !king_home || !rooks.contains(rook_k) {
                out.remove(CastlingRights::kingside(color));
            }
            if !king_home || !rooks.contains(rook_q) {
                out.remove(CastlingRights::queenside(color));
            }
        }
        out
    }

    /// Play the legal move from `start` to `end`, promoting to a queen if the
    /// move is a promotion. On error the board is left untouched.
    pub fn make_move(&mut self, start: u8, end: u8) -> Result<Move, ChessError> {
        self.make_move_with_promotion(start, end, None)
    }

    pub fn make_move_with_promotion(
        &mut self,
        start: u8,
        end: u8,
        promotion: Option<PieceKind>,
    ) -> Result<Move, ChessError> {
        check_square(start)?;
        check_square(end)?;

        let wanted = |m: &Move| match m.promotion {
            Some(p) => p == promotion.unwrap_or(PieceKind::Queen),
            None => promotion.is_none(),
        };
        let mv = legal_moves(self)
            .into_iter()
            .find(|m| m.from == start && m.to == end && wanted(m))
            .ok_or(ChessError::IllegalMove {
                from: start,
                to: end,
            })?;

        *self = self.apply_legal(mv);
        trace!(%mv, to_move = %self.side_to_move, "move played");
        Ok(mv)
    }

    pub fn status(&self) -> GameStatus {
        if legal_moves(self).is_empty() {
            if self.in_check(self.side_to_move) {
                GameStatus::Checkmate {
                    winner: self.side_to_move.other(),
                }
            } else {
                GameStatus::Stalemate
            }
        } else if self.is_insufficient_material() {
            GameStatus::InsufficientMaterial
        } else {
            GameStatus::Ongoing
        }
    }

    pub fn is_checkmate(&self) -> bool {
        matches!(self.status(), GameStatus::Checkmate { .. })
    }

    pub fn is_stalemate(&self) -> bool {
        self.status() == GameStatus::Stalemate
    }

    /// Drawn by stalemate or by lack of mating material.
    pub fn is_tied(&self) -> bool {
        matches!(
            self.status(),
            GameStatus::Stalemate | GameStatus::InsufficientMaterial
        )
    }

    /// Bare kings, or kings plus a single knight or bishop.
    pub fn is_insufficient_material(&self) -> bool {
        let heavy_or_pawns = Color::ALL.iter().any(|&c| {
            !(self.pieces(c, PieceKind::Pawn)
                | self.pieces(c, PieceKind::Rook)
                | self.pieces(c, PieceKind::Queen))
            .is_empty()
        });
        if heavy_or_pawns {
            return false;
        }
        let minors: u32 = Color::ALL
            .iter()
            .map(|&c| {
                (self.pieces(c, PieceKind::Knight) | self.pieces(c, PieceKind::Bishop)).popcount()
            })
            .sum();
        minors <= 1
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let ch = match self.piece_on(rank * 8 + file) {
                    Some(pc) if pc.color == Color::White => pc.kind.symbol().to_ascii_uppercase(),
                    Some(pc) => pc.kind.symbol(),
                    None => '.',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        write!(f, "{} to move", self.side_to_move)
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
