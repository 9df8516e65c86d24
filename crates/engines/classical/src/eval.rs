//! Static position evaluation.
//!
//! All scores are in pawns and **White-positive**: a positive number favours
//! White whichever side is to move. The search flips the sign for a Black
//! engine.

use chess_core::{legal_moves, Board, Color, PieceKind};

use crate::config::EvalConfig;

/// Magnitude of a checkmate score. Larger than any material sum.
pub const MATE_SCORE: f64 = 100_000.0;

/// Material values in pawns, indexed by PieceKind::idx().
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
const PIECE_VALUES: [f64; 6] = [1.0, 3.0, 3.0, 5.0, 9.0, 0.0];

/// Piece-square bonuses in centipawns from White's side, a8 first so the
/// tables read like a diagram.
#[rustfmt::skip]
const PST: [[i16; 64]; 6] = [
    // Pawn
    [
         0,  0,  0,  0,  0,  0,  0,  0,
        50, 50, 50, 50, 50, 50, 50, 50,
        10, 10, 20, 30, 30, 20, 10, 10,
         5,  5, 10, 25, 25, 10,  5,  5,
         0,  0,  0, 20, 20,  0,  0,  0,
         5, -5,-10,  0,  0,-10, -5,  5,
         5, 10, 10,-20,-20, 10, 10,  5,
         0,  0,  0,  0,  0,  0,  0,  0,
    ],
    // Knight
    [
        -50,-40,-30,-30,-30,-30,-40,-50,
        -40,-20,  0,  0,  0,  0,-20,-40,
        -30,  0, 10, 15, 15, 10,  0,-30,
        -30,  5, 15, 20, 20, 15,  5,-30,
        -30,  0, 15, 20, 20, 15,  0,-30,
        -30,  5, 10, 15, 15, 10,  5,-30,
        -40,-20,  0,  5,  5,  0,-20,-40,
        -50,-40,-30,-30,-30,-30,-40,-50,
    ],
    // Bishop
    [
        -20,-10,-10,-10,-10,-10,-10,-20,
        -10,  0,  0,  0,  0,  0,  0,-10,
        -10,  0,  5, 10, 10,  5,  0,-10,
        -10,  5,  5, 10, 10,  5,  5,-10,
        -10,  0, 10, 10, 10, 10,  0,-10,
        -10, 10, 10, 10, 10, 10, 10,-10,
        -10,  5,  0,  0,  0,  0,  5,-10,
        -20,-10,-10,-10,-10,-10,-10,-20,
    ],
    // Rook
    [
         0,  0,  0,  0,  0,  0,  0,  0,
         5, 10, 10, 10, 10, 10, 10,  5,
        -5,  0,  0,  0,  0,  0,  0, -5,
        -5,  0,  0,  0,  0,  0,  0, -5,
        -5,  0,  0,  0,  0,  0,  0, -5,
        -5,  0,  0,  0,  0,  0,  0, -5,
        -5,  0,  0,  0,  0,  0,  0, -5,
         0,  0,  0,  5,  5,  0,  0,  0,
    ],
    // Queen
    [
        -20,-10,-10, -5, -5,-10,-10,-20,
        -10,  0,  0,  0,  0,  0,  0,-10,
        -10,  0,  5,  5,  5,  5,  0,-10,
         -5,  0,  5,  5,  5,  5,  0, -5,
          0,  0,  5,  5,  5,  5,  0, -5,
        -10,  5,  5,  5,  5,  5,  0,-10,
        -10,  0,  5,  0,  0,  0,  0,-10,
        -20,-10,-10, -5, -5,-10,-10,-20,
    ],
    // King
    [
        -30,-40,-40,-50,-50,-40,-40,-30,
        -30,-40,-40,-50,-50,-40,-40,-30,
        -30,-40,-40,-50,-50,-40,-40,-30,
        -30,-40,-40,-50,-50,-40,-40,-30,
        -20,-30,-30,-40,-40,-30,-30,-20,
        -10,-20,-20,-20,-20,-20,-20,-10,
         20, 20,  0,  0,  0,  0, 20, 20,
         20, 30, 10,  0,  0, 10, 30, 20,
    ],
];

/// Returns the material value of a piece in pawns. Kings count zero.
#[inline]
pub fn piece_value(kind: PieceKind) -> f64 {
    PIECE_VALUES[kind.idx()]
}

/// Material balance, White minus Black.
pub fn material(board: &Board) -> f64 {
    PieceKind::ALL
        .iter()
        .map(|&kind| {
            let white = board.pieces(Color::White, kind).popcount() as f64;
            let black = board.pieces(Color::Black, kind).popcount() as f64;
            piece_value(kind) * (white - black)
        })
        .sum()
}

fn pst_index(color: Color, sq: u8) -> usize {
    let file = (sq % 8) as usize;
    let rank = (sq / 8) as usize;
    match color {
        Color::White => (7 - rank) * 8 + file,
        Color::Black => rank * 8 + file,
    }
}

/// Piece-square bonus balance in pawns, White minus Black.
pub fn placement(board: &Board) -> f64 {
    let mut centipawns = 0i32;
    for color in Color::ALL {
        for kind in PieceKind::ALL {
            let table = &PST[kind.idx()];
            let sum: i32 = board
                .pieces(color, kind)
                .map(|sq| table[pst_index(color, sq)] as i32)
                .sum();
            centipawns += color.sign() * sum;
        }
    }
    centipawns as f64 / 100.0
}

/// Leaf heuristic: material, plus placement when enabled.
/// Does not look for mate or stalemate.
pub fn static_eval(board: &Board, config: &EvalConfig) -> f64 {
    let mut score = material(board);
    if config.piece_square_tables {
        score += placement(board);
    }
    score
}

/// Evaluates with the default configuration.
pub fn evaluate(board: &Board) -> f64 {
    evaluate_with(board, &EvalConfig::default())
}

/// Full evaluation of a position, White-positive.
///
/// A side with no legal moves is either mated (score `∓MATE_SCORE`, in the
/// winner's favour) or stalemated (0). Otherwise falls back to
/// [`static_eval`].
pub fn evaluate_with(board: &Board, config: &EvalConfig) -> f64 {
    if legal_moves(board).is_empty() {
        let stm = board.side_to_move;
        return if board.in_check(stm) {
            -(stm.sign() as f64) * MATE_SCORE
        } else {
            0.0
        };
    }
    static_eval(board, config)
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
