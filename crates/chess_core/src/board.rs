use std::fmt;
use std::ops::{Deref, DerefMut};

use tracing::trace;

use crate::error::{ChessError, Result};
use crate::types::*;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";

/// The 8x8 grid plus the en-passant marker.
///
/// `squares` is indexed row-major (`row * 8 + col`), row 0 being Black's home
/// rank. `double_step` holds the square of the pawn that advanced two squares
/// on the ply just played, and nothing otherwise.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
    double_step: Option<Square>,
}

/// Token returned by [`Board::make_move`]; hand it back to
/// [`Board::unmake_move`] to restore the board exactly.
#[must_use = "a speculative move must be undone with Board::unmake_move"]
#[derive(Clone, Debug)]
pub struct Undo {
    mv: Move,
    captured: Option<Piece>,
}

impl Undo {
    pub fn mv(&self) -> Move {
        self.mv
    }
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }
}

/// What a real move application did to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Played {
    pub moved: Piece,
    pub captured: Option<Piece>,
    pub en_passant: bool,
    /// The moved pawn stands on its last rank and needs [`Board::promote`].
    pub promotion_due: bool,
}

impl Board {
    pub fn empty() -> Self {
        Board {
            squares: [None; 64],
            double_step: None,
        }
    }

    pub fn startpos() -> Self {
        let mut b = Board::empty();

        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (col, &kind) in back.iter().enumerate() {
            let col = col as u8;
            b.set_piece(Square::at(0, col), Some(Piece::new(Color::Black, kind)));
            b.set_piece(Square::at(1, col), Some(Piece::new(Color::Black, PieceKind::Pawn)));
            b.set_piece(Square::at(6, col), Some(Piece::new(Color::White, PieceKind::Pawn)));
            b.set_piece(Square::at(7, col), Some(Piece::new(Color::White, kind)));
        }
        b
    }

    /// Parses the piece placement of a FEN string and, when present, its
    /// en-passant field. Side to move and castling fields are accepted but
    /// not stored on the board.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        let placement = parts
            .first()
            .ok_or_else(|| ChessError::InvalidFen("empty string".into()))?;

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != BOARD_SIZE as usize {
            return Err(ChessError::InvalidFen(format!(
                "expected 8 ranks, found {}",
                ranks.len()
            )));
        }

        let mut board = Board::empty();
        // FEN lists rank 8 first, which is row 0 here.
        for (row, rank_str) in ranks.iter().enumerate() {
            let mut col: u8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    col += d as u8;
                    if col > BOARD_SIZE {
                        return Err(ChessError::InvalidFen(format!("rank '{rank_str}' too long")));
                    }
                } else {
                    let kind = PieceKind::from_symbol(ch).ok_or_else(|| {
                        ChessError::InvalidFen(format!("invalid piece char '{ch}'"))
                    })?;
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let sq = Square::new(row as u8, col)
                        .map_err(|_| ChessError::InvalidFen(format!("rank '{rank_str}' too long")))?;
                    board.set_piece(sq, Some(Piece::new(color, kind)));
                    col += 1;
                }
            }
            if col != BOARD_SIZE {
                return Err(ChessError::InvalidFen(format!(
                    "rank '{rank_str}' covers {col} files"
                )));
            }
        }

        if let Some(&ep) = parts.get(3) {
            if ep != "-" {
                let target: Square = ep.parse()?;
                // The pawn that skipped `target` stands one row further on.
                let pawn_sq = match target.rank() {
                    3 => target.offset(-1, 0),
                    6 => target.offset(1, 0),
                    _ => None,
                }
                .ok_or_else(|| ChessError::InvalidFen(format!("bad en-passant square {ep}")))?;
                board.double_step = Some(pawn_sq);
            }
        }

        Ok(board)
    }

    /// Piece placement field of FEN.
    pub fn placement(&self) -> String {
        let mut fen = String::new();
        for row in 0..BOARD_SIZE {
            let mut empty = 0;
            for col in 0..BOARD_SIZE {
                match self.piece_at(Square::at(row, col)) {
                    None => empty += 1,
                    Some(pc) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(pc.symbol());
                    }
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if row + 1 < BOARD_SIZE {
                fen.push('/');
            }
        }
        fen
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    pub fn set_piece(&mut self, sq: Square, pc: Option<Piece>) {
        self.squares[sq.index()] = pc;
    }

    /// Checked lookup for callers holding raw coordinates.
    pub fn get(&self, row: i32, col: i32) -> Result<Option<Piece>> {
        Ok(self.piece_at(Square::from_coords(row, col)?))
    }

    /// Square of the pawn that just advanced two squares, if any.
    pub fn double_step(&self) -> Option<Square> {
        self.double_step
    }

    /// Pieces of `color` with their squares, in row-major order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.piece_at(sq) {
            Some(pc) if pc.color == color => Some((sq, pc)),
            _ => None,
        })
    }

    /// Speculative apply: moves the piece and remembers what stood on the
    /// destination. Nothing else (en-passant marker, promotion) is touched.
    pub fn make_move(&mut self, mv: Move) -> Undo {
        let moved = self.squares[mv.from.index()].take();
        let captured = std::mem::replace(&mut self.squares[mv.to.index()], moved);
        Undo { mv, captured }
    }

    /// Reverses exactly the two writes made by [`Board::make_move`].
    pub fn unmake_move(&mut self, undo: Undo) {
        let moved = self.squares[undo.mv.to.index()].take();
        self.squares[undo.mv.from.index()] = moved;
        self.squares[undo.mv.to.index()] = undo.captured;
    }

    /// Applies `mv` speculatively and undoes it when the guard is dropped,
    /// including on early returns and unwinding.
    pub fn scoped_move(&mut self, mv: Move) -> ScopedMove<'_> {
        let undo = self.make_move(mv);
        ScopedMove {
            board: self,
            undo: Some(undo),
        }
    }

    /// Real move application for the game: handles en-passant removal and
    /// sets or clears the two-square marker. Legality is the caller's job.
    pub fn play(&mut self, mv: Move) -> Result<Played> {
        let moved = self
            .piece_at(mv.from)
            .ok_or(ChessError::EmptySquare { square: mv.from })?;
        let mut captured = self.piece_at(mv.to);
        let mut en_passant = false;

        if moved.kind == PieceKind::Pawn && mv.from.col() != mv.to.col() && captured.is_none() {
            let beside = Square::at(mv.from.row(), mv.to.col());
            if self.double_step == Some(beside) {
                if let Some(victim) = self.piece_at(beside) {
                    if victim.kind == PieceKind::Pawn && victim.color != moved.color {
                        captured = self.squares[beside.index()].take();
                        en_passant = true;
                    }
                }
            }
        }

        let two_squares = moved.kind == PieceKind::Pawn
            && (mv.from.row() as i8 - mv.to.row() as i8).abs() == 2;
        self.double_step = if two_squares { Some(mv.to) } else { None };

        self.set_piece(mv.from, None);
        self.set_piece(mv.to, Some(moved));

        let promotion_due =
            moved.kind == PieceKind::Pawn && mv.to.row() == moved.color.promotion_row();

        trace!(%mv, ?moved, ?captured, en_passant, promotion_due, "played");
        Ok(Played {
            moved,
            captured,
            en_passant,
            promotion_due,
        })
    }

    /// Replaces the pawn on its last rank with `kind`.
    pub fn promote(&mut self, sq: Square, kind: PieceKind) -> Result<()> {
        let invalid = ChessError::InvalidPromotion { square: sq, kind };
        if !PieceKind::PROMOTIONS.contains(&kind) {
            return Err(invalid);
        }
        match self.piece_at(sq) {
            Some(pc) if pc.kind == PieceKind::Pawn && sq.row() == pc.color.promotion_row() => {
                self.set_piece(sq, Some(Piece::new(pc.color, kind)));
                Ok(())
            }
            _ => Err(invalid),
        }
    }

    /// Text diagram with White at the bottom.
    pub fn display(&self) -> String {
        let mut lines = Vec::new();
        lines.push("  +---+---+---+---+---+---+---+---+".to_string());

        for row in 0..BOARD_SIZE {
            let mut line = format!("{} |", BOARD_SIZE - row);
            for col in 0..BOARD_SIZE {
                match self.piece_at(Square::at(row, col)) {
                    Some(pc) => line.push_str(&format!(" {} |", pc.symbol())),
                    None => line.push_str("   |"),
                }
            }
            lines.push(line);
            lines.push("  +---+---+---+---+---+---+---+---+".to_string());
        }
        lines.push("    A   B   C   D   E   F   G   H".to_string());

        lines.join("\n")
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::startpos()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Guard holding a speculative move; derefs to the mutated board.
pub struct ScopedMove<'a> {
    board: &'a mut Board,
    undo: Option<Undo>,
}

impl ScopedMove<'_> {
    /// What stood on the destination before the move.
    pub fn captured(&self) -> Option<Piece> {
        self.undo.as_ref().and_then(Undo::captured)
    }
}

impl Deref for ScopedMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for ScopedMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for ScopedMove<'_> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            self.board.unmake_move(undo);
        }
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
