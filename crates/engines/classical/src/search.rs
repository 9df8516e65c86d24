//! Fixed-depth minimax with optional alpha-beta pruning.
//!
//! Scores are from the engine colour's point of view: the engine maximizes,
//! the opponent minimizes. Mates are scored `MATE_SCORE - ply` so a shorter
//! mate always beats a longer one.

use std::time::Duration;

use chess_core::{legal_moves, Board, Color, Move};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::eval::{static_eval, MATE_SCORE};
use crate::time_control::TimeControl;

/// The stop flag is only polled this close to the root, between siblings.
const CANCEL_CHECK_PLY: u8 = 2;

/// Result of one root search.
#[derive(Debug, Clone, Copy)]
pub struct SearchOutcome {
    /// Best root move and its score, `None` when the root has no legal moves
    pub best: Option<(Move, f64)>,
    /// Score of the root position
    pub score: f64,
    pub nodes: u64,
    /// True if the stop flag interrupted this search
    pub stopped: bool,
}

/// Plain entry point with default evaluation and pruning on.
///
/// `maximizing` says whether the side to move is the colour being scored
/// for; the returned score is from that colour's point of view.
pub fn minimax(
    board: &Board,
    depth: u8,
    alpha: f64,
    beta: f64,
    maximizing: bool,
) -> (f64, Option<Move>) {
    let engine = if maximizing {
        board.side_to_move
    } else {
        board.side_to_move.other()
    };
    let config = EngineConfig::default();
    let tc = TimeControl::unbounded();
    let mut searcher = Searcher::new(engine, &config, &tc);
    searcher.minimax(board, depth, 0, alpha, beta, maximizing)
}

/// Holds per-search state: node counter and stop status.
pub struct Searcher<'a> {
    engine: Color,
    config: &'a EngineConfig,
    tc: &'a TimeControl,
    nodes: u64,
    stopped: bool,
}

impl<'a> Searcher<'a> {
    pub fn new(engine: Color, config: &'a EngineConfig, tc: &'a TimeControl) -> Self {
        Self {
            engine,
            config,
            tc,
            nodes: 0,
            stopped: false,
        }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn stopped(&self) -> bool {
        self.stopped
    }

    /// Searches `board` to `depth` plies. Uses the rayon pool at the root
    /// when `parallel_root` is set.
    pub fn search_root(&mut self, board: &Board, depth: u8) -> SearchOutcome {
        let maximizing = board.side_to_move == self.engine;
        let nodes_before = self.nodes;

        let (score, best) = if self.config.search.parallel_root {
            self.parallel_root(board, depth, maximizing)
        } else {
            let (score, mv) =
                self.minimax(board, depth, 0, f64::NEG_INFINITY, f64::INFINITY, maximizing);
            (score, mv.map(|mv| (mv, score)))
        };

        SearchOutcome {
            best,
            score,
            nodes: self.nodes - nodes_before,
            stopped: self.stopped,
        }
    }

    /// One search to `depth`. Returns the outcome with the depth it
    /// completed: `depth`, or 0 if the stop flag cut it short, in which case
    /// the move comes from [`salvage`](Self::salvage).
    pub fn fixed_depth(&mut self, board: &Board, depth: u8) -> (SearchOutcome, u8) {
        let outcome = self.search_root(board, depth);
        if outcome.stopped {
            debug!(depth, nodes = self.nodes, "search interrupted");
            return (self.salvage(board, Some(outcome)), 0);
        }
        (outcome, depth)
    }

    /// Iterative deepening from 1 to `max_depth`, abandoned when the stop
    /// flag is raised. Returns the last completed iteration and its depth.
    ///
    /// If not even depth 1 completes, the move comes from
    /// [`salvage`](Self::salvage) and the depth is 0.
    pub fn iterative_deepening(&mut self, board: &Board, max_depth: u8) -> (SearchOutcome, u8) {
        let mut completed: Option<(SearchOutcome, u8)> = None;
        let mut partial = None;

        for depth in 1..=max_depth {
            let outcome = self.search_root(board, depth);
            if outcome.stopped {
                debug!(depth, nodes = self.nodes, "iteration interrupted");
                partial = Some(outcome);
                break;
            }
            debug!(
                depth,
                score = outcome.score,
                best = ?outcome.best.map(|(mv, _)| mv.to_string()),
                nodes = self.nodes,
                elapsed = ?self.tc.elapsed(),
                "iteration complete"
            );
            completed = Some((outcome, depth));
        }

        match completed {
            Some((mut outcome, depth)) => {
                outcome.nodes = self.nodes;
                outcome.stopped = self.stopped;
                (outcome, depth)
            }
            None => (self.salvage(board, partial), 0),
        }
    }

    /// Answer for a search that never completed: the interrupted search's
    /// best move if it finished any root move, else the first legal move.
    /// `best` is `None` only when the root has no legal moves.
    pub fn salvage(&self, board: &Board, partial: Option<SearchOutcome>) -> SearchOutcome {
        let best = partial
            .and_then(|outcome| outcome.best)
            .or_else(|| {
                legal_moves(board)
                    .first()
                    .map(|&mv| (mv, self.leaf_score(&board.apply_legal(mv))))
            });
        SearchOutcome {
            best,
            score: best.map_or(0.0, |(_, score)| score),
            nodes: self.nodes,
            stopped: self.stopped,
        }
    }

    /// Recursive minimax. `ply` is the distance from the root.
    pub fn minimax(
        &mut self,
        board: &Board,
        depth: u8,
        ply: u8,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
    ) -> (f64, Option<Move>) {
        let moves = legal_moves(board);

        if moves.is_empty() {
            return (self.terminal_score(board, ply), None);
        }
        if depth == 0 {
            return (self.leaf_score(board), None);
        }

        let mut best_score = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        let mut best_move = None;

        for mv in moves {
            if ply <= CANCEL_CHECK_PLY && self.tc.check_time() {
                self.stopped = true;
                break;
            }

            let child = board.apply_legal(mv);
            self.nodes += 1;

            let (score, _) = self.minimax(&child, depth - 1, ply + 1, alpha, beta, !maximizing);
            if self.stopped {
                break;
            }
            if ply == 0 {
                debug!(%mv, score, depth, "root move");
            }

            let improves = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if improves {
                best_score = score;
                best_move = Some(mv);
            }

            if self.config.search.alpha_beta {
                if maximizing {
                    alpha = alpha.max(best_score);
                } else {
                    beta = beta.min(best_score);
                }
                if alpha >= beta {
                    trace!(ply, %mv, "cutoff");
                    break;
                }
            }
        }

        // Interrupted before any child finished: fall back to the static score.
        if best_move.is_none() {
            return (self.leaf_score(board), None);
        }
        (best_score, best_move)
    }

    /// Each root move gets its own board copy and a full window, so the
    /// reduction sees exact scores and picks what the sequential search
    /// would.
    fn parallel_root(&mut self, board: &Board, depth: u8, maximizing: bool) -> (f64, Option<(Move, f64)>) {
        let moves = legal_moves(board);
        if moves.is_empty() {
            return (self.terminal_score(board, 0), None);
        }
        if depth == 0 {
            return (self.leaf_score(board), None);
        }

        let (engine, config, tc) = (self.engine, self.config, self.tc);
        let results: Vec<(Move, f64, u64, bool)> = moves
            .par_iter()
            .map(|&mv| {
                let mut worker = Searcher::new(engine, config, tc);
                if tc.check_time() {
                    return (mv, 0.0, 0, true);
                }
                let child = board.apply_legal(mv);
                worker.nodes += 1;
                let (score, _) = worker.minimax(
                    &child,
                    depth - 1,
                    1,
                    f64::NEG_INFINITY,
                    f64::INFINITY,
                    !maximizing,
                );
                (mv, score, worker.nodes, worker.stopped)
            })
            .collect();

        let mut best: Option<(Move, f64)> = None;
        for (mv, score, nodes, stopped) in results {
            self.nodes += nodes;
            if stopped {
                self.stopped = true;
                continue;
            }
            debug!(%mv, score, depth, "root move");
            let improves = match best {
                None => true,
                Some((_, best_score)) if maximizing => score > best_score,
                Some((_, best_score)) => score < best_score,
            };
            if improves {
                best = Some((mv, score));
            }
        }

        match best {
            Some((_, score)) => (score, best),
            None => (self.leaf_score(board), None),
        }
    }

    /// Side to move has no legal moves: mated or stalemated.
    fn terminal_score(&self, board: &Board, ply: u8) -> f64 {
        let stm = board.side_to_move;
        if !board.in_check(stm) {
            return 0.0;
        }
        let mate = MATE_SCORE - ply as f64;
        if stm == self.engine {
            -mate
        } else {
            mate
        }
    }

    fn leaf_score(&self, board: &Board) -> f64 {
        self.engine.sign() as f64 * static_eval(board, &self.config.eval)
    }
}

/// Converts a configured millisecond bound into a [`TimeControl`].
pub fn time_control_for(config: &EngineConfig) -> TimeControl {
    TimeControl::new(config.search.move_time_ms.map(Duration::from_millis))
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
