use crate::{board::Board, movegen::legal_moves_into, types::Move};

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`.
pub fn perft(board: &Board, depth: u8) -> u64 {
    fn inner(board: &Board, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
        let Some((buf, rest)) = layers.split_first_mut() else {
            return 1;
        };

        legal_moves_into(board, buf);
        if depth == 1 {
            return buf.len() as u64;
        }

        let mut nodes = 0u64;
        for &mv in buf.iter() {
            nodes += inner(&board.apply_legal(mv), depth - 1, rest);
        }
        nodes
    }

    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    inner(board, depth, &mut layers[..])
}

/// Node count below each root move, in generator order.
pub fn divide(board: &Board, depth: u8) -> Vec<(Move, u64)> {
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(board, &mut moves);
    moves
        .into_iter()
        .map(|mv| {
            let child = board.apply_legal(mv);
            (mv, perft(&child, depth.saturating_sub(1)))
        })
        .collect()
}
