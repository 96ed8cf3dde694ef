use super::*;
use crate::error::ChessError;

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

fn set(names: &[&str]) -> SquareSet {
    names.iter().map(|n| sq(n)).collect()
}

fn moves_from(fen: &str, from: &str) -> SquareSet {
    let b = Board::from_fen(fen).unwrap();
    valid_moves(&b, sq(from))
}

#[test]
fn test_startpos_move_count() {
    let b = Board::startpos();
    let mut moves = Vec::new();
    pseudo_moves(&b, Color::White, &mut moves);
    assert_eq!(moves.len(), 20);
    pseudo_moves(&b, Color::Black, &mut moves);
    assert_eq!(moves.len(), 20);
}

#[test]
fn test_pseudo_moves_order() {
    let b = Board::startpos();
    let mut moves = Vec::new();
    pseudo_moves(&b, Color::White, &mut moves);
    // a2 is the first White piece in row-major order; its destinations
    // come in row-major order too, so the double step is listed first.
    assert_eq!(moves[0], Move::new(sq("a2"), sq("a4")));
    assert_eq!(moves[1], Move::new(sq("a2"), sq("a3")));
    assert_eq!(moves.last().unwrap().from, sq("g1"));
}

#[test]
fn test_empty_square_has_no_moves() {
    assert!(valid_moves(&Board::startpos(), sq("e4")).is_empty());
}

#[test]
fn test_pawn_single_and_double_step() {
    let b = Board::startpos();
    assert_eq!(valid_moves(&b, sq("e2")), set(&["e3", "e4"]));
    assert_eq!(valid_moves(&b, sq("d7")), set(&["d6", "d5"]));
}

#[test]
fn test_pawn_blocked() {
    // Blocked directly: no steps at all.
    assert!(moves_from("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1", "e2").is_empty());
    // Blocked on the second square: only one step.
    assert_eq!(
        moves_from("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1", "e2"),
        set(&["e3"])
    );
}

#[test]
fn test_pawn_no_double_step_off_home_row() {
    assert_eq!(
        moves_from("4k3/8/8/8/8/4P3/8/4K3 w - - 0 1", "e3"),
        set(&["e4"])
    );
}

#[test]
fn test_pawn_captures() {
    assert_eq!(
        moves_from("4k3/8/8/3p1N2/4P3/8/8/4K3 w - - 0 1", "e4"),
        set(&["e5", "d5"])
    );
}

#[test]
fn test_en_passant_target() {
    let fen = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1";
    assert_eq!(moves_from(fen, "e5"), set(&["e6", "d6"]));

    let fen = "4k3/8/8/3pP3/8/8/8/4K3 w - - 0 1";
    assert_eq!(moves_from(fen, "e5"), set(&["e6"]));
}

#[test]
fn test_en_passant_window_after_play() {
    let mut b = Board::from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1").unwrap();
    b.play(Move::new(sq("d7"), sq("d5"))).unwrap();
    assert!(valid_moves(&b, sq("e5")).contains(sq("d6")));

    // Any other ply closes the window.
    b.play(Move::new(sq("e1"), sq("e2"))).unwrap();
    b.play(Move::new(sq("e8"), sq("e7"))).unwrap();
    assert!(!valid_moves(&b, sq("e5")).contains(sq("d6")));
}

#[test]
fn test_knight_in_corner() {
    assert_eq!(
        moves_from("4k3/8/8/8/8/8/8/N3K3 w - - 0 1", "a1"),
        set(&["b3", "c2"])
    );
}

#[test]
fn test_knight_jumps() {
    let b = Board::startpos();
    assert_eq!(valid_moves(&b, sq("g1")), set(&["f3", "h3"]));
}

#[test]
fn test_slider_stops_at_blockers() {
    // Rook on d4, own pawn on d6, enemy knight on f4.
    let got = moves_from("4k3/8/3P4/8/3R1n2/8/8/4K3 w - - 0 1", "d4");
    assert_eq!(
        got,
        set(&["d5", "e4", "f4", "c4", "b4", "a4", "d3", "d2", "d1"])
    );
}

#[test]
fn test_bishop_rays() {
    let got = moves_from("4k3/8/8/8/3B4/8/8/4K3 w - - 0 1", "d4");
    assert_eq!(got.len(), 13);
    assert!(got.contains(sq("a7")) && got.contains(sq("h8")) && got.contains(sq("a1")));
    assert!(!got.contains(sq("d5")));
}

#[test]
fn test_queen_is_rook_plus_bishop() {
    let fen_q = "4k3/8/8/8/3Q4/8/8/4K3 w - - 0 1";
    let fen_r = "4k3/8/8/8/3R4/8/8/4K3 w - - 0 1";
    let fen_b = "4k3/8/8/8/3B4/8/8/4K3 w - - 0 1";
    assert_eq!(
        moves_from(fen_q, "d4"),
        moves_from(fen_r, "d4") | moves_from(fen_b, "d4")
    );
}

#[test]
fn test_king_steps() {
    assert_eq!(
        moves_from("4k3/8/8/8/8/8/3P4/4K3 w - - 0 1", "e1"),
        set(&["e2", "f2", "d1", "f1"])
    );
}

#[test]
fn test_get_valid_moves_bounds() {
    let b = Board::startpos();
    assert_eq!(
        get_valid_moves(&b, -1, 3),
        Err(ChessError::InvalidSquare { row: -1, col: 3 })
    );
    assert_eq!(
        get_valid_moves(&b, 6, 4).unwrap(),
        set(&["e3", "e4"])
    );
}
