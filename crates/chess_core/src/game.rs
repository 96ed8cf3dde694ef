//! Game session: turn order, move history, promotion hand-off and the
//! after-every-ply king inspection.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    board::Board,
    check::{king_status, KingStatus},
    error::{ChessError, Result},
    notation::describe_move,
    rules::valid_moves,
    square_set::SquareSet,
    types::*,
    Engine,
};

/// One applied ply as shown in the move history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub color: Color,
    pub piece: PieceKind,
    pub mv: Move,
    pub captured: Option<PieceKind>,
    pub en_passant: bool,
    pub promotion: Option<PieceKind>,
    /// `White Pawn from E2 to E4`
    pub text: String,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Checkmate { winner: Color },
    /// A king vanished from the board; the game stops prematurely.
    KingMissing { color: Color },
    /// The engine found no move for `side`; scored as a draw.
    NoMoves { side: Color },
}

impl Outcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }
}

/// Result of `Game::play` / `Game::promote`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlyReport {
    pub record: MoveRecord,
    /// The pawn reached its last rank; call `Game::promote` next.
    pub promotion_pending: bool,
    pub white: KingStatus,
    pub black: KingStatus,
    pub outcome: Option<Outcome>,
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    turn: Color,
    history: Vec<MoveRecord>,
    pending_promotion: Option<Square>,
    status: [KingStatus; 2],
    outcome: Option<Outcome>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Standard setup, White to move.
    pub fn new() -> Self {
        Self::with_board(Board::startpos(), Color::White)
    }

    fn with_board(board: Board, turn: Color) -> Self {
        Self {
            board,
            turn,
            history: Vec::new(),
            pending_promotion: None,
            status: [KingStatus::Safe; 2],
            outcome: None,
        }
    }

    /// Position from FEN; the side-to-move field defaults to White.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let board = Board::from_fen(fen)?;
        let turn = match fen.split_whitespace().nth(1) {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => {
                return Err(ChessError::InvalidFen(format!("invalid side to move '{other}'")))
            }
        };
        let mut game = Self::with_board(board, turn);
        game.refresh_status()?;
        Ok(game)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn turn(&self) -> Color {
        self.turn
    }
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }
    pub fn status(&self, color: Color) -> KingStatus {
        self.status[color.idx()]
    }
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }
    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion
    }

    /// Destinations of the side to move's piece on `sq`.
    pub fn select(&self, sq: Square) -> Result<SquareSet> {
        let pc = self
            .board
            .piece_at(sq)
            .ok_or(ChessError::EmptySquare { square: sq })?;
        if pc.color != self.turn {
            return Err(ChessError::NotYourPiece {
                square: sq,
                color: pc.color,
            });
        }
        Ok(valid_moves(&self.board, sq))
    }

    /// Plays a move for the side to move.
    pub fn play(&mut self, mv: Move) -> Result<PlyReport> {
        self.ensure_accepting_moves()?;
        let targets = self.select(mv.from)?;
        if !targets.contains(mv.to) {
            return Err(ChessError::IllegalMove {
                from: mv.from,
                to: mv.to,
            });
        }

        let played = self.board.play(mv)?;
        let record = MoveRecord {
            color: played.moved.color,
            piece: played.moved.kind,
            mv,
            captured: played.captured.map(|pc| pc.kind),
            en_passant: played.en_passant,
            promotion: None,
            text: describe_move(played.moved, mv),
        };
        debug!(move_text = %record.text, "ply applied");
        self.history.push(record.clone());

        if played.promotion_due {
            self.pending_promotion = Some(mv.to);
            return Ok(self.report(record, true));
        }
        self.finish_ply()?;
        Ok(self.report(record, false))
    }

    /// Completes a pending promotion with the chosen kind.
    pub fn promote(&mut self, kind: PieceKind) -> Result<PlyReport> {
        let sq = self
            .pending_promotion
            .ok_or(ChessError::NoPromotionPending)?;
        self.board.promote(sq, kind)?;
        self.pending_promotion = None;
        let record = match self.history.last_mut() {
            Some(last) => {
                last.promotion = Some(kind);
                last.text.push_str(&format!(" promoted to {}", kind.name()));
                last.clone()
            }
            None => return Err(ChessError::NoPromotionPending),
        };
        self.finish_ply()?;
        Ok(self.report(record, false))
    }

    /// Asks `engine` for the side to move and plays its answer. Engine
    /// promotions become queens. `Ok(None)` means the engine had no move and
    /// the game is now over.
    pub fn play_engine(&mut self, engine: &mut dyn Engine) -> Result<Option<PlyReport>> {
        self.ensure_accepting_moves()?;
        let result = engine.search(&self.board, self.turn);
        let mv = match result.best_move {
            Some(mv) => mv,
            None => {
                info!(side = %self.turn, engine = engine.name(), "engine found no move");
                self.outcome = Some(Outcome::NoMoves { side: self.turn });
                return Ok(None);
            }
        };
        debug!(%mv, score = result.score, nodes = result.nodes, engine = engine.name(), "engine move");

        let report = self.play(mv)?;
        if report.promotion_pending {
            return self.promote(PieceKind::Queen).map(Some);
        }
        Ok(Some(report))
    }

    fn ensure_accepting_moves(&self) -> Result<()> {
        if self.outcome.is_some() {
            return Err(ChessError::GameOver);
        }
        if let Some(square) = self.pending_promotion {
            return Err(ChessError::PromotionPending { square });
        }
        Ok(())
    }

    fn finish_ply(&mut self) -> Result<()> {
        self.turn = self.turn.other();
        self.refresh_status()
    }

    /// Inspects both kings, White first. The first terminal finding decides
    /// the outcome.
    fn refresh_status(&mut self) -> Result<()> {
        for color in [Color::White, Color::Black] {
            match king_status(&mut self.board, color) {
                Ok(status) => {
                    self.status[color.idx()] = status;
                    if status == KingStatus::Checkmate && self.outcome.is_none() {
                        info!(loser = %color, "checkmate");
                        self.outcome = Some(Outcome::Checkmate {
                            winner: color.other(),
                        });
                    }
                }
                Err(ChessError::KingMissing { color }) => {
                    self.status[color.idx()] = KingStatus::Safe;
                    if self.outcome.is_none() {
                        self.outcome = Some(Outcome::KingMissing { color });
                    }
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    fn report(&self, record: MoveRecord, promotion_pending: bool) -> PlyReport {
        PlyReport {
            record,
            promotion_pending,
            white: self.status(Color::White),
            black: self.status(Color::Black),
            outcome: self.outcome,
        }
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
