use super::*;
use crate::DEFAULT_DEPTH;
use chess_core::{Square, STARTING_FEN};

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

fn mv(from: &str, to: &str) -> Move {
    Move::new(sq(from), sq(to))
}

/// Plain minimax without pruning, for comparing scores.
fn full_minimax(board: &mut Board, depth: u8, to_move: Color, nodes: &mut u64) -> i32 {
    if depth == 0 {
        return evaluate(board);
    }
    let maximizing = to_move == Color::White;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    let mut moves = Vec::new();
    pseudo_moves(board, to_move, &mut moves);
    for m in moves {
        let undo = board.make_move(m);
        *nodes += 1;
        let score = full_minimax(board, depth - 1, to_move.other(), nodes);
        board.unmake_move(undo);
        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }
    best
}

const POSITIONS: [&str; 4] = [
    STARTING_FEN,
    "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5Q2/PPPP1PPP/RNB1K1NR w - - 0 1",
    "4k3/3p4/2nb4/8/3Q4/8/8/R3K3 b - - 0 1",
    "3k4/2p5/3p4/8/8/8/8/3QK3 w - - 0 1",
];

#[test]
fn test_startpos_pinned_choice() {
    let board = Board::startpos();
    let mut nodes = 0;
    let result = find_best_move(&board, Color::White, 3, &mut nodes);
    // Every root move is worth 0 at this depth; the first one enumerated wins.
    assert_eq!(result, Some((mv("a2", "a4"), 0)));
    assert!(nodes > 20);
}

#[test]
fn test_best_move_is_own_piece_to_free_square() {
    let board = Board::startpos();
    let mut nodes = 0;
    let (best, _) = find_best_move(&board, Color::Black, 2, &mut nodes).unwrap();
    let moved = board.piece_at(best.from).unwrap();
    assert_eq!(moved.color, Color::Black);
    assert!(board
        .piece_at(best.to)
        .map_or(true, |pc| pc.color == Color::White));
}

#[test]
fn test_alpha_beta_matches_plain_minimax() {
    for fen in POSITIONS {
        let mut board = Board::from_fen(fen).unwrap();
        for depth in 0..=2 {
            for side in [Color::White, Color::Black] {
                let mut pruned_nodes = 0;
                let mut full_nodes = 0;
                let pruned = minimax(
                    &mut board,
                    depth,
                    i32::MIN,
                    i32::MAX,
                    side,
                    &mut pruned_nodes,
                );
                let full = full_minimax(&mut board, depth, side, &mut full_nodes);
                assert_eq!(pruned, full, "{fen} depth {depth} {side}");
                assert!(pruned_nodes <= full_nodes);
            }
        }
    }
}

#[test]
fn test_alpha_beta_matches_plain_minimax_at_default_depth() {
    for fen in &POSITIONS[2..] {
        let mut board = Board::from_fen(fen).unwrap();
        let before = board.clone();
        for side in [Color::White, Color::Black] {
            let mut pruned_nodes = 0;
            let mut full_nodes = 0;
            let pruned = minimax(
                &mut board,
                DEFAULT_DEPTH,
                i32::MIN,
                i32::MAX,
                side,
                &mut pruned_nodes,
            );
            let full = full_minimax(&mut board, DEFAULT_DEPTH, side, &mut full_nodes);
            assert_eq!(pruned, full, "{fen} {side}");
            assert!(pruned_nodes <= full_nodes);
        }
        assert_eq!(board, before);
    }
}

#[test]
fn test_search_restores_board() {
    for fen in POSITIONS {
        let mut board = Board::from_fen(fen).unwrap();
        let before = board.clone();
        let mut nodes = 0;
        let _ = minimax(&mut board, 3, i32::MIN, i32::MAX, Color::White, &mut nodes);
        assert_eq!(board, before);
    }
}

#[test]
fn test_parallel_root_matches_sequential() {
    for fen in POSITIONS {
        let board = Board::from_fen(fen).unwrap();
        for side in [Color::White, Color::Black] {
            let mut seq_nodes = 0;
            let mut par_nodes = 0;
            let seq = find_best_move(&board, side, 2, &mut seq_nodes);
            let par = find_best_move_parallel(&board, side, 2, &mut par_nodes);
            assert_eq!(seq, par, "{fen} {side}");
            assert_eq!(seq_nodes, par_nodes);
        }
    }
}

#[test]
fn test_no_moves_returns_none() {
    let board = Board::from_fen("4k3/8/8/8/8/8/8/8 w - - 0 1").unwrap();
    let mut nodes = 0;
    assert_eq!(find_best_move(&board, Color::White, 3, &mut nodes), None);
    assert_eq!(
        find_best_move_parallel(&board, Color::White, 3, &mut nodes),
        None
    );
    assert_eq!(nodes, 0);
}

#[test]
fn test_takes_free_material() {
    let board = Board::from_fen("3qk3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
    let mut nodes = 0;
    assert_eq!(
        find_best_move(&board, Color::White, 0, &mut nodes),
        Some((mv("d1", "d8"), 9))
    );
    assert_eq!(
        find_best_move(&board, Color::Black, 0, &mut nodes),
        Some((mv("d8", "d1"), -9))
    );
}

#[test]
fn test_lookahead_avoids_defended_pawn() {
    let board = Board::from_fen("3k4/2p5/3p4/8/8/8/8/3QK3 w - - 0 1").unwrap();
    let mut nodes = 0;
    let greedy = find_best_move(&board, Color::White, 0, &mut nodes).unwrap();
    assert_eq!(greedy.0, mv("d1", "d6"));

    let careful = find_best_move(&board, Color::White, 1, &mut nodes).unwrap();
    assert_ne!(careful.0, mv("d1", "d6"));
}
