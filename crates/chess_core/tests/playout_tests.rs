//! Random playout tests for the board and rules
//!
//! Drives many seeded random games and checks, after every ply:
//! - Speculative apply/undo restores the board exactly
//! - Checkmate detection leaves the board untouched
//! - The en-passant marker only lives for one ply

use chess_core::{
    is_checkmate, is_king_in_check, pseudo_moves, Board, Color, Game, Move, Outcome, PieceKind,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const GAMES: u64 = 40;
const MAX_PLIES: usize = 120;

// =============================================================================
// Apply / undo
// =============================================================================

#[test]
fn test_make_unmake_is_identity_along_random_games() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let mut moves: Vec<Move> = Vec::new();

    for _ in 0..GAMES {
        let mut board = Board::startpos();
        let mut side = Color::White;

        for _ in 0..MAX_PLIES {
            pseudo_moves(&board, side, &mut moves);
            let Some(&chosen) = moves.choose(&mut rng) else {
                break;
            };

            let before = board.clone();
            for &mv in &moves {
                let undo = board.make_move(mv);
                board.unmake_move(undo);
                assert_eq!(board, before, "make/unmake of {mv} changed the board");
            }

            let captured = board.play(chosen).expect("source holds a piece").captured;
            if captured.map(|pc| pc.kind) == Some(PieceKind::King) {
                break;
            }
            side = side.other();
        }
    }
}

#[test]
fn test_checkmate_detection_is_side_effect_free() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut moves: Vec<Move> = Vec::new();

    for _ in 0..GAMES / 4 {
        let mut board = Board::startpos();
        let mut side = Color::White;

        for _ in 0..MAX_PLIES / 2 {
            let kings_present = [Color::White, Color::Black]
                .iter()
                .all(|&c| is_king_in_check(&board, c).is_ok());
            if !kings_present {
                break;
            }
            let before = board.clone();
            for color in [Color::White, Color::Black] {
                is_checkmate(&mut board, color).expect("both kings present");
                assert_eq!(board, before);
            }

            pseudo_moves(&board, side, &mut moves);
            let Some(&chosen) = moves.choose(&mut rng) else {
                break;
            };
            board.play(chosen).expect("source holds a piece");
            side = side.other();
        }
    }
}

// =============================================================================
// En passant window
// =============================================================================

#[test]
fn test_marker_cleared_by_every_other_ply() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut moves: Vec<Move> = Vec::new();

    for _ in 0..GAMES {
        let mut board = Board::startpos();
        let mut side = Color::White;

        for _ in 0..MAX_PLIES {
            pseudo_moves(&board, side, &mut moves);
            let Some(&chosen) = moves.choose(&mut rng) else {
                break;
            };
            let moved = board.piece_at(chosen.from).expect("source holds a piece");
            board.play(chosen).expect("source holds a piece");

            let rows = (chosen.from.row() as i32 - chosen.to.row() as i32).abs();
            if moved.kind == PieceKind::Pawn && rows == 2 {
                assert_eq!(board.double_step(), Some(chosen.to));
            } else {
                assert_eq!(board.double_step(), None);
            }
            side = side.other();
        }
    }
}

// =============================================================================
// Whole games through the session API
// =============================================================================

#[test]
fn test_random_sessions_stay_consistent() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut moves: Vec<Move> = Vec::new();

    for _ in 0..GAMES / 2 {
        let mut game = Game::new();

        for ply in 0..MAX_PLIES {
            if game.is_over() {
                break;
            }
            pseudo_moves(game.board(), game.turn(), &mut moves);
            let Some(&chosen) = moves.choose(&mut rng) else {
                break;
            };
            let mover = game.turn();
            let report = game.play(chosen).expect("generated move is accepted");
            if report.promotion_pending {
                game.promote(PieceKind::Queen).expect("pending promotion");
            }

            assert_eq!(game.history().len(), ply + 1);
            assert_eq!(game.history()[ply].color, mover);
            if !game.is_over() {
                assert_eq!(game.turn(), mover.other());
            }
        }

        if let Some(Outcome::Checkmate { winner }) = game.outcome() {
            let loser = winner.other();
            assert!(is_king_in_check(game.board(), loser).unwrap_or(false));
        }
    }
}
