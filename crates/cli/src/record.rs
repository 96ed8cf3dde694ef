//! JSON record of a finished (or abandoned) session

use std::path::Path;

use anyhow::{Context, Result};
use chess_core::{Game, MoveRecord, Outcome};
use serde::{Deserialize, Serialize};

use crate::config::Mode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub mode: Mode,
    /// Start position when it was not the standard setup.
    pub start_fen: Option<String>,
    pub plies: usize,
    pub history: Vec<MoveRecord>,
    pub outcome: Option<Outcome>,
    /// Piece placement of the final position, FEN style.
    pub final_placement: String,
    /// Text diagram of the final position.
    pub final_board: String,
}

impl GameRecord {
    pub fn from_game(game: &Game, mode: Mode, start_fen: Option<String>) -> Self {
        Self {
            mode,
            start_fen,
            plies: game.history().len(),
            history: game.history().to_vec(),
            outcome: game.outcome(),
            final_placement: game.board().placement(),
            final_board: game.board().display(),
        }
    }

    /// Human-readable result line.
    pub fn result_text(&self) -> String {
        match self.outcome {
            Some(Outcome::Checkmate { winner }) => format!("{winner} wins by checkmate"),
            Some(Outcome::KingMissing { color }) => {
                format!("{color} king not found, the game ended prematurely")
            }
            Some(Outcome::NoMoves { side }) => format!("{side} has no move, draw"),
            None => "unfinished".to_string(),
        }
    }

    /// Save the record as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize record")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write record {}", path.display()))
    }

    /// Load a record from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read record {}", path.display()))?;
        serde_json::from_str(&contents).context("Failed to parse record")
    }
}
