//! Console game loop
//!
//! Generic over the input and output streams so whole games can be scripted
//! in tests. Human turns read one command per line; engine turns call the
//! minimax engine through the `Game` session.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chess_core::{
    parse_move, parse_promotion, Color, Game, KingStatus, Outcome, PlyReport, Square,
};
use minimax_engine::MinimaxEngine;
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::record::GameRecord;

const HELP: &str = "\
Commands:
  e2 e4 | e2e4   move a piece
  moves e2       list the destinations of the piece on e2
  board          print the board
  history        print the moves played so far
  help           show this text
  quit           leave the game";

/// What the loop does after a human command.
enum Flow {
    Continue,
    Quit,
}

pub struct Session<R, W> {
    game: Game,
    config: SessionConfig,
    engine: MinimaxEngine,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(config: SessionConfig, input: R, out: W) -> Result<Self> {
        let game = match &config.fen {
            Some(fen) => Game::from_fen(fen).context("Invalid start position")?,
            None => Game::new(),
        };
        let engine = MinimaxEngine::with_config(config.engine);
        Ok(Self {
            game,
            config,
            engine,
            input,
            out,
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Plays until the game ends, the ply cap is hit, or a human quits.
    pub fn run(&mut self) -> Result<GameRecord> {
        info!(mode = %self.config.mode, max_plies = self.config.max_plies, "session start");
        writeln!(self.out, "Mode: {}", self.config.mode)?;
        if self.config.mode.is_human(self.game.turn()) {
            writeln!(self.out, "{HELP}")?;
        }
        writeln!(self.out, "{}", self.game.board())?;

        loop {
            if let Some(outcome) = self.game.outcome() {
                self.announce(outcome)?;
                break;
            }
            if self.game.history().len() >= self.config.max_plies as usize {
                writeln!(self.out, "Stopping after {} plies.", self.config.max_plies)?;
                break;
            }

            let side = self.game.turn();
            if self.config.mode.is_human(side) {
                if let Flow::Quit = self.human_turn(side)? {
                    writeln!(self.out, "Bye.")?;
                    break;
                }
            } else {
                self.engine_turn(side)?;
            }
        }

        Ok(GameRecord::from_game(
            &self.game,
            self.config.mode,
            self.config.fen.clone(),
        ))
    }

    fn human_turn(&mut self, side: Color) -> Result<Flow> {
        write!(self.out, "{side}> ")?;
        self.out.flush()?;
        let Some(line) = self.read_line()? else {
            return Ok(Flow::Quit);
        };
        let cmd = line.trim();
        let mut words = cmd.split_whitespace();

        match words.next() {
            None => {}
            Some("quit" | "exit") => return Ok(Flow::Quit),
            Some("help") => writeln!(self.out, "{HELP}")?,
            Some("board") => writeln!(self.out, "{}", self.game.board())?,
            Some("history") => self.print_history()?,
            Some("moves") => match words.next().map(str::parse::<Square>) {
                Some(Ok(sq)) => self.print_targets(sq)?,
                Some(Err(e)) => writeln!(self.out, "Error: {e}")?,
                None => writeln!(self.out, "Usage: moves <square>")?,
            },
            Some(_) => return self.human_move(cmd),
        }
        Ok(Flow::Continue)
    }

    fn human_move(&mut self, cmd: &str) -> Result<Flow> {
        let mv = match parse_move(cmd) {
            Ok(mv) => mv,
            Err(e) => {
                writeln!(self.out, "Error: {e} (type 'help' for commands)")?;
                return Ok(Flow::Continue);
            }
        };
        let report = match self.game.play(mv) {
            Ok(report) => report,
            Err(e) => {
                debug!(%mv, error = %e, "move rejected");
                writeln!(self.out, "Error: {e}")?;
                return Ok(Flow::Continue);
            }
        };

        let report = if report.promotion_pending {
            match self.ask_promotion()? {
                Some(report) => report,
                None => return Ok(Flow::Quit),
            }
        } else {
            report
        };
        self.show_ply(&report)?;
        Ok(Flow::Continue)
    }

    /// Prompts until a valid promotion kind is entered; `None` on end of input.
    fn ask_promotion(&mut self) -> Result<Option<PlyReport>> {
        loop {
            write!(self.out, "Promote to (q/r/b/n)> ")?;
            self.out.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match parse_promotion(line.trim()) {
                Ok(kind) => return Ok(Some(self.game.promote(kind)?)),
                Err(e) => writeln!(self.out, "Error: {e}")?,
            }
        }
    }

    fn engine_turn(&mut self, side: Color) -> Result<()> {
        match self.game.play_engine(&mut self.engine)? {
            Some(report) => {
                writeln!(self.out, "{side} plays {}", report.record.mv)?;
                self.show_ply(&report)?;
            }
            None => writeln!(self.out, "{side} has no move.")?,
        }
        Ok(())
    }

    fn show_ply(&mut self, report: &PlyReport) -> Result<()> {
        writeln!(self.out, "{}", report.record.text)?;
        writeln!(self.out, "{}", self.game.board())?;
        for (color, status) in [(Color::White, report.white), (Color::Black, report.black)] {
            if status == KingStatus::Check {
                writeln!(self.out, "{color} king is in check!")?;
            }
        }
        Ok(())
    }

    fn announce(&mut self, outcome: Outcome) -> Result<()> {
        let msg = match outcome {
            Outcome::Checkmate { winner } => format!("Checkmate! {winner} wins."),
            Outcome::KingMissing { color } => {
                format!("{color} king not found, the game ended prematurely.")
            }
            Outcome::NoMoves { side } => format!("{side} cannot move. Draw."),
        };
        info!(?outcome, plies = self.game.history().len(), "game over");
        writeln!(self.out, "{msg}")?;
        Ok(())
    }

    fn print_history(&mut self) -> Result<()> {
        if self.game.history().is_empty() {
            writeln!(self.out, "No moves yet.")?;
        }
        for (i, rec) in self.game.history().iter().enumerate() {
            writeln!(self.out, "{:>3}. {}", i + 1, rec.text)?;
        }
        Ok(())
    }

    fn print_targets(&mut self, sq: Square) -> Result<()> {
        match self.game.select(sq) {
            Ok(targets) if targets.is_empty() => writeln!(self.out, "{sq}: no moves")?,
            Ok(targets) => {
                let list: Vec<String> = targets.iter().map(|t| t.to_string()).collect();
                writeln!(self.out, "{sq}: {}", list.join(" "))?;
            }
            Err(e) => writeln!(self.out, "Error: {e}")?,
        }
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        Ok((n > 0).then_some(line))
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
