//! Piece movement rules.
//!
//! Everything here is pseudo-legal: a destination is produced when the
//! piece's movement pattern allows it, whether or not the mover's own king
//! is left in check. King safety is layered on top in [`crate::check`].

use crate::{board::Board, error::Result, square_set::SquareSet, types::*};

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];
const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];
const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Destinations of the piece standing on `from`; empty for an empty square.
pub fn valid_moves(board: &Board, from: Square) -> SquareSet {
    let pc = match board.piece_at(from) {
        Some(p) => p,
        None => return SquareSet::EMPTY,
    };
    let mut out = SquareSet::EMPTY;
    match pc.kind {
        PieceKind::Pawn => gen_pawn(board, from, pc.color, &mut out),
        PieceKind::Knight => gen_steps(board, from, pc.color, &KNIGHT_DELTAS, &mut out),
        PieceKind::Bishop => gen_slider(board, from, pc.color, &DIAGONALS, &mut out),
        PieceKind::Rook => gen_slider(board, from, pc.color, &ORTHOGONALS, &mut out),
        PieceKind::Queen => {
            gen_slider(board, from, pc.color, &DIAGONALS, &mut out);
            gen_slider(board, from, pc.color, &ORTHOGONALS, &mut out);
        }
        PieceKind::King => gen_steps(board, from, pc.color, &KING_DELTAS, &mut out),
    }
    out
}

/// Checked entry point for raw coordinates from a presentation layer.
pub fn get_valid_moves(board: &Board, row: i32, col: i32) -> Result<SquareSet> {
    let from = Square::from_coords(row, col)?;
    Ok(valid_moves(board, from))
}

/// Every pseudo-legal move of `color`, sources in row-major order and each
/// source's destinations in row-major order.
pub fn pseudo_moves(board: &Board, color: Color, out: &mut Vec<Move>) {
    out.clear();
    for (from, _) in board.pieces(color) {
        out.extend(valid_moves(board, from).iter().map(|to| Move::new(from, to)));
    }
}

fn gen_pawn(board: &Board, from: Square, c: Color, out: &mut SquareSet) {
    let dir = c.forward();

    // forward 1, then forward 2 from the home row
    if let Some(one) = from.offset(dir, 0) {
        if board.piece_at(one).is_none() {
            out.insert(one);
            if from.row() == c.pawn_row() {
                if let Some(two) = from.offset(2 * dir, 0) {
                    if board.piece_at(two).is_none() {
                        out.insert(two);
                    }
                }
            }
        }
    }

    // captures + en passant
    for dc in [-1, 1] {
        let Some(to) = from.offset(dir, dc) else {
            continue;
        };
        match board.piece_at(to) {
            Some(tpc) if tpc.color != c => out.insert(to),
            Some(_) => {}
            None => {
                if let Some(beside) = from.offset(0, dc) {
                    if board.double_step() == Some(beside) && is_enemy_pawn(board, beside, c) {
                        out.insert(to);
                    }
                }
            }
        }
    }
}

fn is_enemy_pawn(board: &Board, sq: Square, c: Color) -> bool {
    matches!(board.piece_at(sq), Some(pc) if pc.kind == PieceKind::Pawn && pc.color != c)
}

fn gen_steps(board: &Board, from: Square, c: Color, deltas: &[(i8, i8)], out: &mut SquareSet) {
    for &(dr, dc) in deltas {
        if let Some(to) = from.offset(dr, dc) {
            match board.piece_at(to) {
                None => out.insert(to),
                Some(pc) if pc.color != c => out.insert(to),
                _ => {}
            }
        }
    }
}

fn gen_slider(board: &Board, from: Square, c: Color, dirs: &[(i8, i8)], out: &mut SquareSet) {
    for &(dr, dc) in dirs {
        let mut cur = from;
        while let Some(to) = cur.offset(dr, dc) {
            match board.piece_at(to) {
                None => out.insert(to),
                Some(pc) if pc.color != c => {
                    out.insert(to);
                    break;
                }
                _ => break,
            }
            cur = to;
        }
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
