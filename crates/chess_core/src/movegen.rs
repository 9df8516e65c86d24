//! Legal move generation.
//!
//! Pseudo-legal moves come from the attack tables; each one is then played on
//! a scratch copy and dropped if it leaves the mover's king attacked.
//! Output is sorted by (from, to) with promotions in Q, R, B, N order, so a
//! given position always yields the same sequence.

use crate::attacks::*;
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::error::ChessError;
use crate::types::*;

/// Generate all legal moves, returning a freshly allocated vector.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    legal_moves_into(board, &mut out);
    out
}

/// Legal moves for `color`, which must be the side to move.
pub fn legal_moves_for(board: &Board, color: Color) -> Result<Vec<Move>, ChessError> {
    if board.side_to_move != color {
        return Err(ChessError::NotYourTurn {
            expected: color,
            actual: board.side_to_move,
        });
    }
    Ok(legal_moves(board))
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(board: &Board, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(board, out);

    let mover = board.side_to_move;
    out.retain(|&mv| {
        let next = board.apply_legal(mv);
        !next.attacked(next.king_square(mover), mover.other())
    });
    // Stable: promotions to the same square keep their generation order.
    out.sort_by_key(|mv| (mv.from, mv.to));
}

/// Moves that follow piece movement rules but may leave the king attacked.
pub fn pseudo_legal_moves(board: &Board) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    pseudo_moves(board, &mut out);
    out
}

fn pseudo_moves(board: &Board, out: &mut Vec<Move>) {
    let us = board.side_to_move;
    let them = us.other();
    let occupied = board.occupied();
    // The enemy king is never a capture target.
    let enemy_king = board.pieces(them, PieceKind::King);
    let enemy = board.color_occupancy(them) & !enemy_king;
    let reachable = !(board.color_occupancy(us) | enemy_king);

    gen_pawns(board, us, enemy, occupied, out);

    for from in board.pieces(us, PieceKind::Knight) {
        push_targets(from, knight_attacks(from) & reachable, enemy, out);
    }
    for from in board.pieces(us, PieceKind::Bishop) {
        push_targets(from, bishop_attacks(from, occupied) & reachable, enemy, out);
    }
    for from in board.pieces(us, PieceKind::Rook) {
        push_targets(from, rook_attacks(from, occupied) & reachable, enemy, out);
    }
    for from in board.pieces(us, PieceKind::Queen) {
        push_targets(from, queen_attacks(from, occupied) & reachable, enemy, out);
    }
    for from in board.pieces(us, PieceKind::King) {
        push_targets(from, king_attacks(from) & reachable, enemy, out);
    }

    gen_castles(board, us, occupied, out);
}

fn push_targets(from: u8, targets: Bitboard, enemy: Bitboard, out: &mut Vec<Move>) {
    for to in targets {
        let kind = if enemy.contains(to) {
            MoveKind::Capture
        } else {
            MoveKind::Quiet
        };
        out.push(Move::new(from, to, kind));
    }
}

fn gen_pawns(board: &Board, us: Color, enemy: Bitboard, occupied: Bitboard, out: &mut Vec<Move>) {
    let (dir, start_rank, promo_rank): (i8, i8, i8) = match us {
        Color::White => (1, 1, 7),
        Color::Black => (-1, 6, 0),
    };

    for from in board.pieces(us, PieceKind::Pawn) {
        let f = file_of(from);
        let r = rank_of(from);

        // forward 1, then forward 2 from the start rank
        if let Some(one) = sq(f, r + dir)
            && !occupied.contains(one)
        {
            push_pawn(from, one, false, rank_of(one) == promo_rank, out);
            if r == start_rank
                && let Some(two) = sq(f, r + 2 * dir)
                && !occupied.contains(two)
            {
                out.push(Move::new(from, two, MoveKind::DoublePawnPush));
            }
        }

        let attacks = pawn_attacks(from, us);
        for to in attacks & enemy {
            push_pawn(from, to, true, rank_of(to) == promo_rank, out);
        }
        if let Some(ep) = board.en_passant
            && attacks.contains(ep)
            && !occupied.contains(ep)
        {
            out.push(Move::new(from, ep, MoveKind::EnPassant));
        }
    }
}

fn push_pawn(from: u8, to: u8, capture: bool, promotes: bool, out: &mut Vec<Move>) {
    if promotes {
        for piece in PieceKind::PROMOTIONS {
            out.push(Move::promote(from, to, piece, capture));
        }
    } else if capture {
        out.push(Move::new(from, to, MoveKind::Capture));
    } else {
        out.push(Move::new(from, to, MoveKind::Quiet));
    }
}

fn gen_castles(board: &Board, us: Color, occupied: Bitboard, out: &mut Vec<Move>) {
    let home: u8 = match us {
        Color::White => 4,
        Color::Black => 60,
    };
    if !board.pieces(us, PieceKind::King).contains(home) {
        return;
    }
    let them = us.other();
    // Can't castle out of check.
    if board.attacked(home, them) {
        return;
    }

    // King side: f and g files empty, neither attacked.
    if board.castling.has(CastlingRights::kingside(us))
        && (occupied & Bitboard::from_squares(&[home + 1, home + 2])).is_empty()
        && !board.attacked(home + 1, them)
        && !board.attacked(home + 2, them)
    {
        out.push(Move::new(home, home + 2, MoveKind::CastleKingside));
    }

    // Queen side: b, c and d files empty; only c and d must be safe.
    if board.castling.has(CastlingRights::queenside(us))
        && (occupied & Bitboard::from_squares(&[home - 1, home - 2, home - 3])).is_empty()
        && !board.attacked(home - 1, them)
        && !board.attacked(home - 2, them)
    {
        out.push(Move::new(home, home - 2, MoveKind::CastleQueenside));
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
