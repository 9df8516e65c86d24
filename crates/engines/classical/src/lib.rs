//! Classical Chess Engine
//!
//! Fixed-depth minimax with alpha-beta pruning over the `chess_core` board,
//! scored by material and piece-square tables.

pub mod config;
pub mod eval;
pub mod search;
pub mod time_control;

use chess_core::{legal_moves_for, Board, ChessError, Color, Move};
use tracing::info;

pub use config::{ConfigError, EngineConfig, EvalConfig, SearchConfig};
pub use eval::{evaluate, evaluate_with, piece_value, static_eval, MATE_SCORE};
pub use search::{minimax, SearchOutcome, Searcher};
pub use time_control::TimeControl;

/// Result of a search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// Best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Score from the engine's perspective, in pawns
    pub score: f64,
    /// Deepest fully searched depth
    pub depth: u8,
    /// Number of nodes searched
    pub nodes: u64,
    /// Whether the search was stopped early
    pub stopped: bool,
}

/// An engine playing one colour.
#[derive(Debug, Clone)]
pub struct Engine {
    color: Color,
    config: EngineConfig,
}

impl Engine {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            config: EngineConfig::default(),
        }
    }

    /// Engine with explicit settings. Fails with `ConfigError::Invalid` if
    /// the config does not pass [`EngineConfig::validate`].
    pub fn with_config(color: Color, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { color, config })
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Legal moves for the engine's colour. Fails with `NotYourTurn` when the
    /// board has the other side to move.
    pub fn generate_possible_moves(&self, board: &Board) -> Result<Vec<Move>, ChessError> {
        legal_moves_for(board, self.color)
    }

    /// White-positive evaluation under this engine's eval settings.
    pub fn eval(&self, board: &Board) -> f64 {
        evaluate_with(board, &self.config.eval)
    }

    /// Picks a move for the engine's colour without touching the board.
    pub fn make_move(&self, board: &Board) -> Result<Move, ChessError> {
        let result = self.search(board)?;
        result.best_move.ok_or(ChessError::NoLegalMoves)
    }

    /// Searches with the configured depth and time bound.
    pub fn search(&self, board: &Board) -> Result<SearchResult, ChessError> {
        let tc = search::time_control_for(&self.config);
        self.search_with_control(board, &tc)
    }

    /// Searches under an external [`TimeControl`]. Bounded controls run
    /// iterative deepening up to the configured depth.
    ///
    /// A stopped search still returns a move whenever one exists; `depth`
    /// is then the last depth that completed, 0 if none did.
    pub fn search_with_control(
        &self,
        board: &Board,
        tc: &TimeControl,
    ) -> Result<SearchResult, ChessError> {
        if board.side_to_move != self.color {
            return Err(ChessError::IllegalState {
                engine: self.color,
                to_move: board.side_to_move,
            });
        }

        let max_depth = self.config.search.depth;
        let mut searcher = Searcher::new(self.color, &self.config, tc);
        let (outcome, depth) = if tc.limit().is_some() {
            searcher.iterative_deepening(board, max_depth)
        } else {
            searcher.fixed_depth(board, max_depth)
        };

        let result = SearchResult {
            best_move: outcome.best.map(|(mv, _)| mv),
            score: outcome.score,
            depth,
            nodes: outcome.nodes,
            stopped: outcome.stopped,
        };
        match result.best_move {
            Some(mv) => info!(
                color = %self.color,
                %mv,
                score = result.score,
                depth,
                nodes = result.nodes,
                elapsed = ?tc.elapsed(),
                "best move"
            ),
            None => info!(color = %self.color, "no legal moves"),
        }
        Ok(result)
    }
}
