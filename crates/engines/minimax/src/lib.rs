//! Minimax Chess Engine
//!
//! Fixed-depth minimax with alpha-beta pruning over the pseudo-legal move
//! rules, scored by material only.

mod config;
mod eval;
mod search;

use chess_core::{Board, Color, Engine, SearchResult};
use tracing::debug;

pub use config::{SearchConfig, DEFAULT_DEPTH};

/// Minimax engine configured by a [`SearchConfig`].
#[derive(Debug, Clone, Default)]
pub struct MinimaxEngine {
    config: SearchConfig,
    /// Node counter for statistics
    nodes: u64,
}

impl MinimaxEngine {
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self { config, nodes: 0 }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl Engine for MinimaxEngine {
    fn search(&mut self, board: &Board, side: Color) -> SearchResult {
        self.nodes = 0;
        let depth = self.config.depth;
        let result = if self.config.parallel_root {
            search::find_best_move_parallel(board, side, depth, &mut self.nodes)
        } else {
            search::find_best_move(board, side, depth, &mut self.nodes)
        };

        match result {
            Some((mv, score)) => debug!(%side, %mv, score, nodes = self.nodes, depth, "search done"),
            None => debug!(%side, nodes = self.nodes, "no move to search"),
        }

        SearchResult {
            best_move: result.map(|(mv, _)| mv),
            score: result.map(|(_, s)| s).unwrap_or(0),
            depth,
            nodes: self.nodes,
        }
    }

    fn name(&self) -> &str {
        "Minimax v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}

// Re-export for direct use if needed
pub use eval::evaluate;
pub use search::{find_best_move, find_best_move_parallel, minimax};
