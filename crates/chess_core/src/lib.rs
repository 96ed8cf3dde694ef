pub mod board;
pub mod check;
pub mod error;
pub mod game;
pub mod notation;
pub mod rules;
pub mod square_set;
pub mod types;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use check::*;
pub use error::{ChessError, Result};
pub use game::*;
pub use notation::*;
pub use rules::*;
pub use square_set::*;
pub use types::*;

// =============================================================================
// Engine trait: implemented by anything that can pick a move for a side
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// The best move found (None if the side has no moves at all)
    pub best_move: Option<Move>,
    /// Material score, positive favours White
    pub score: i32,
    /// Search depth used below the root
    pub depth: u8,
    /// Number of nodes searched
    pub nodes: u64,
}

/// Trait that all move-choosing engines implement.
///
/// The board is borrowed immutably; engines that search speculatively work
/// on their own copy so the caller's board is never observed mid-search.
pub trait Engine: Send {
    /// Picks a move for `side` on `board`.
    fn search(&mut self, board: &Board, side: Color) -> SearchResult;

    /// Returns the engine's name for logs and game records
    fn name(&self) -> &str;

    fn author(&self) -> &str {
        "minimax-chess"
    }

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
