//! Material-based position evaluation

use chess_core::{Board, Color, Square};

/// Evaluates the position from White's point of view.
///
/// Returns the sum of White's piece values minus the sum of Black's. A board
/// missing a king (possible deep in the search tree) scores the 100-point
/// king value to the side that still has one.
pub fn evaluate(board: &Board) -> i32 {
    let mut score = 0i32;

    for sq in Square::all() {
        if let Some(pc) = board.piece_at(sq) {
            let v = pc.kind.value();
            score += if pc.color == Color::White { v } else { -v };
        }
    }

    score
}
