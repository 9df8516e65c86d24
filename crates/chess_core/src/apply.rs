//! Move application: the only way board contents change during play.
//!
//! `apply_legal` is copy-make: it returns the successor and leaves `self`
//! untouched, so the search can keep parents on the stack without undo data.

use crate::attacks::pawn_attacks;
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::error::ChessError;
use crate::square::check_square;
use crate::types::*;

/// Castling rights that survive a move touching each square.
/// A move from or to a king or rook home square clears the matching rights.
static CASTLING_MASK: [u8; 64] = {
    let all = CastlingRights::ALL.0;
    let mut mask = [all; 64];
    mask[0] = all & !CastlingRights::WHITE_QUEENSIDE;
    mask[7] = all & !CastlingRights::WHITE_KINGSIDE;
    mask[4] = all & !(CastlingRights::WHITE_KINGSIDE | CastlingRights::WHITE_QUEENSIDE);
    mask[56] = all & !CastlingRights::BLACK_QUEENSIDE;
    mask[63] = all & !CastlingRights::BLACK_KINGSIDE;
    mask[60] = all & !(CastlingRights::BLACK_KINGSIDE | CastlingRights::BLACK_QUEENSIDE);
    mask
};

fn king_home(color: Color) -> u8 {
    match color {
        Color::White => 4,
        Color::Black => 60,
    }
}

fn last_rank(color: Color) -> i8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}

/// Rank an en-passant target can sit on when `side_to_move` is to move.
pub(crate) fn en_passant_rank(side_to_move: Color) -> i8 {
    match side_to_move {
        Color::White => 5,
        Color::Black => 2,
    }
}

/// Square of the pawn taken by an en-passant capture landing on `to`.
fn en_passant_victim(to: u8, us: Color) -> Option<u8> {
    match us {
        Color::White => to.checked_sub(8),
        Color::Black => to.checked_add(8).filter(|&s| s < 64),
    }
}

impl Board {
    /// Successor state after `mv`.
    ///
    /// Rejects moves whose shape does not fit this position: wrong side's
    /// piece, own piece on the target, a castle without the right, a clear
    /// path or the corner rook, an en-passant capture with no pawn to take,
    /// or a mismatched promotion. It does not re-run legality filtering;
    /// moves from `legal_moves` always pass.
    pub fn apply(&self, mv: Move) -> Result<Board, ChessError> {
        check_square(mv.from)?;
        check_square(mv.to)?;
        if !self.fits(mv) {
            return Err(ChessError::IllegalMove {
                from: mv.from,
                to: mv.to,
            });
        }
        Ok(self.apply_legal(mv))
    }

    /// Successor state for a move produced by the move generator for this
    /// exact position.
    ///
    /// # Panics
    /// If the resulting board breaks an occupancy invariant.
    pub fn apply_legal(&self, mv: Move) -> Board {
        let mut next = self.clone();
        next.play(mv);
        if let Err(violation) = next.check_invariants() {
            panic!("{violation} after {mv} on\n{self}");
        }
        next
    }

    fn fits(&self, mv: Move) -> bool {
        let us = self.side_to_move;
        let Some(moved) = self.piece_on(mv.from) else {
            return false;
        };
        if moved.color != us {
            return false;
        }
        let target = self.piece_on(mv.to);
        if let Some(t) = target
            && (t.color == us || t.kind == PieceKind::King)
        {
            return false;
        }

        let is_pawn = moved.kind == PieceKind::Pawn;
        let promoting = is_pawn && rank_of(mv.to) == last_rank(us);
        if promoting != mv.promotion.is_some() {
            return false;
        }

        match mv.kind {
            MoveKind::Quiet => target.is_none(),
            MoveKind::Capture => target.is_some(),
            MoveKind::DoublePawnPush => {
                let (start, step): (i8, i8) = match us {
                    Color::White => (1, 1),
                    Color::Black => (6, -1),
                };
                let (file, rank) = (file_of(mv.from), rank_of(mv.from));
                is_pawn
                    && rank == start
                    && target.is_none()
                    && sq(file, rank + 2 * step) == Some(mv.to)
                    && sq(file, rank + step).is_some_and(|mid| self.piece_on(mid).is_none())
            }
            MoveKind::EnPassant => {
                let victim = Piece::new(us.other(), PieceKind::Pawn);
                is_pawn
                    && target.is_none()
                    && self.en_passant == Some(mv.to)
                    && rank_of(mv.to) == en_passant_rank(us)
                    && pawn_attacks(mv.from, us).contains(mv.to)
                    && en_passant_victim(mv.to, us).is_some_and(|v| self.piece_on(v) == Some(victim))
            }
            MoveKind::CastleKingside => self.castle_fits(mv, moved, true),
            MoveKind::CastleQueenside => self.castle_fits(mv, moved, false),
            MoveKind::Promotion | MoveKind::PromotionCapture => {
                let captures = mv.kind == MoveKind::PromotionCapture;
                matches!(
                    mv.promotion,
                    Some(PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight)
                ) && captures == target.is_some()
            }
        }
    }

    /// King on its home square, right held, path empty, rook in the corner.
    fn castle_fits(&self, mv: Move, moved: Piece, kingside: bool) -> bool {
        let us = self.side_to_move;
        let home = king_home(us);
        if moved.kind != PieceKind::King || mv.from != home {
            return false;
        }
        let (to, right, rook, path) = if kingside {
            (
                home + 2,
                CastlingRights::kingside(us),
                home + 3,
                Bitboard::from_squares(&[home + 1, home + 2]),
            )
        } else {
            (
                home - 2,
                CastlingRights::queenside(us),
                home - 4,
                Bitboard::from_squares(&[home - 1, home - 2, home - 3]),
            )
        };
        mv.to == to
            && self.castling.has(right)
            && (self.occupied() & path).is_empty()
            && self.pieces(us, PieceKind::Rook).contains(rook)
    }

    fn play(&mut self, mv: Move) {
        let us = self.side_to_move;
        let them = us.other();
        let Some(moved) = self.piece_on(mv.from) else {
            panic!("no piece on {} for {mv}\n{self}", mv.from);
        };

        // Captures
        if mv.kind == MoveKind::EnPassant {
            let Some(victim) = en_passant_victim(mv.to, us) else {
                panic!("en-passant target {} has no victim square for {mv}", mv.to);
            };
            self.remove(victim, Piece::new(them, PieceKind::Pawn));
        } else if let Some(captured) = self.piece_on(mv.to) {
            self.remove(mv.to, captured);
        }

        self.remove(mv.from, moved);
        let placed = match mv.promotion {
            Some(kind) => Piece::new(us, kind),
            None => moved,
        };
        self.put(mv.to, placed);

        let rook_hop = match mv.kind {
            MoveKind::CastleKingside => Some((mv.from + 3, mv.from + 1)),
            MoveKind::CastleQueenside => Some((mv.from - 4, mv.from - 1)),
            _ => None,
        };
        if let Some((rook_from, rook_to)) = rook_hop {
            let rook = Piece::new(us, PieceKind::Rook);
            self.remove(rook_from, rook);
            self.put(rook_to, rook);
        }

        self.castling.0 &= CASTLING_MASK[mv.from as usize] & CASTLING_MASK[mv.to as usize];

        self.en_passant = if mv.kind == MoveKind::DoublePawnPush {
            Some((mv.from + mv.to) / 2)
        } else {
            None
        };

        self.side_to_move = them;
    }
}

#[cfg(test)]
#[path = "apply_tests.rs"]
mod apply_tests;
