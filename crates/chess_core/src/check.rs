//! Check and checkmate detection.
//!
//! Checkmate is decided by brute force: every pseudo-legal move of the side
//! in question is tried on the board and undone again, and the position is
//! mate only if none of them leaves the king out of check.

use tracing::warn;

use crate::{
    board::Board,
    error::{ChessError, Result},
    rules::{pseudo_moves, valid_moves},
    types::*,
};

/// Outcome of the per-ply king inspection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum KingStatus {
    Safe,
    Check,
    Checkmate,
}

/// Square of the king of `color`, scanning in row-major order.
pub fn find_king(board: &Board, color: Color) -> Option<Square> {
    board
        .pieces(color)
        .find(|(_, pc)| pc.kind == PieceKind::King)
        .map(|(sq, _)| sq)
}

/// True when any opposing piece can reach the king of `color`.
///
/// A missing king is reported as [`ChessError::KingMissing`], never as a
/// plain `false`.
pub fn is_king_in_check(board: &Board, color: Color) -> Result<bool> {
    let ksq = match find_king(board, color) {
        Some(s) => s,
        None => {
            warn!(%color, "king not found");
            return Err(ChessError::KingMissing { color });
        }
    };
    Ok(board
        .pieces(color.other())
        .any(|(from, _)| valid_moves(board, from).contains(ksq)))
}

/// True when no pseudo-legal move of `color` gets its king out of check.
///
/// Every trial move is undone before the next one and before returning, so
/// the board is unchanged afterwards.
pub fn is_checkmate(board: &mut Board, color: Color) -> Result<bool> {
    let mut moves = Vec::with_capacity(64);
    pseudo_moves(board, color, &mut moves);

    for mv in moves {
        let trial = board.scoped_move(mv);
        if !is_king_in_check(&trial, color)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Check state of `color`'s king; checkmate is only tested when in check.
pub fn king_status(board: &mut Board, color: Color) -> Result<KingStatus> {
    if !is_king_in_check(board, color)? {
        return Ok(KingStatus::Safe);
    }
    if is_checkmate(board, color)? {
        Ok(KingStatus::Checkmate)
    } else {
        Ok(KingStatus::Check)
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod check_tests;
