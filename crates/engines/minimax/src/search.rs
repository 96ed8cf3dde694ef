//! Fixed-depth minimax with alpha-beta pruning
//!
//! White maximizes and Black minimizes the material score. Moves are the
//! pseudo-legal ones from the piece rules, so the tree may contain positions
//! where a king has been captured; the evaluation simply reflects that. There
//! is no mate or stalemate test inside the tree.

use chess_core::{pseudo_moves, Board, Color, Move};
use rayon::prelude::*;
use tracing::trace;

use crate::eval::evaluate;

/// Searches every root move of `side` and returns the best one with its score.
///
/// Each root move is applied and scored with `minimax(depth)` for the
/// opponent, so `depth = 3` looks four plies ahead in total. Ties keep the
/// earliest move in enumeration order. Returns `None` when `side` has no
/// pseudo-legal moves.
pub fn find_best_move(
    board: &Board,
    side: Color,
    depth: u8,
    nodes: &mut u64,
) -> Option<(Move, i32)> {
    let mut tmp = board.clone();
    let mut moves = Vec::with_capacity(64);
    pseudo_moves(&tmp, side, &mut moves);

    let mut best: Option<(Move, i32)> = None;
    for mv in moves {
        let score = {
            let mut child = tmp.scoped_move(mv);
            *nodes += 1;
            minimax(&mut child, depth, i32::MIN, i32::MAX, side.other(), nodes)
        };
        trace!(%mv, score, "root move");

        if improves(side, score, best) {
            best = Some((mv, score));
        }
    }
    best
}

/// Same result as [`find_best_move`], with root moves scored in parallel.
///
/// Every root child is searched on its own board copy with the full window,
/// and results are folded in enumeration order, so move and score match the
/// sequential search exactly.
pub fn find_best_move_parallel(
    board: &Board,
    side: Color,
    depth: u8,
    nodes: &mut u64,
) -> Option<(Move, i32)> {
    let mut moves = Vec::with_capacity(64);
    pseudo_moves(board, side, &mut moves);

    let scored: Vec<(Move, i32, u64)> = moves
        .par_iter()
        .map(|&mv| {
            let mut local = board.clone();
            let mut child = local.scoped_move(mv);
            let mut local_nodes = 1;
            let score = minimax(
                &mut child,
                depth,
                i32::MIN,
                i32::MAX,
                side.other(),
                &mut local_nodes,
            );
            (mv, score, local_nodes)
        })
        .collect();

    let mut best: Option<(Move, i32)> = None;
    for (mv, score, n) in scored {
        *nodes += n;
        trace!(%mv, score, "root move");
        if improves(side, score, best) {
            best = Some((mv, score));
        }
    }
    best
}

/// Minimax value of `board` with `to_move` on turn.
///
/// `depth == 0` returns the static evaluation. A node whose side has no
/// moves returns its starting bound (`i32::MIN` for White, `i32::MAX` for
/// Black). Children are undone before the next one is tried, including when
/// the window closes early, so the board is unchanged on return.
pub fn minimax(
    board: &mut Board,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    to_move: Color,
    nodes: &mut u64,
) -> i32 {
    if depth == 0 {
        return evaluate(board);
    }

    let maximizing = to_move == Color::White;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    let mut moves = Vec::with_capacity(64);
    pseudo_moves(board, to_move, &mut moves);

    for mv in moves {
        let score = {
            let mut child = board.scoped_move(mv);
            *nodes += 1;
            minimax(&mut child, depth - 1, alpha, beta, to_move.other(), nodes)
        };

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }
        if beta <= alpha {
            break; // cutoff
        }
    }

    best
}

/// Strict comparison: an equal score never replaces the earlier move.
fn improves(side: Color, score: i32, best: Option<(Move, i32)>) -> bool {
    match best {
        None => true,
        Some((_, b)) => match side {
            Color::White => score > b,
            Color::Black => score < b,
        },
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
