use crate::{
    error::{ChessError, Result},
    types::*,
};

/// Parses `e2e4`, `e2 e4` or `e2-e4` into a move. Squares are not checked
/// against any board.
pub fn parse_move(txt: &str) -> Result<Move> {
    let compact: String = txt
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    if compact.len() != 4 || !compact.is_ascii() {
        return Err(ChessError::InvalidNotation(txt.to_string()));
    }
    let from: Square = compact[0..2].parse()?;
    let to: Square = compact[2..4].parse()?;
    Ok(Move::new(from, to))
}

/// Parses a promotion choice: `q`, `rook`, `N`...
pub fn parse_promotion(txt: &str) -> Result<PieceKind> {
    let t = txt.trim().to_ascii_lowercase();
    let kind = match t.as_str() {
        "q" | "queen" => PieceKind::Queen,
        "r" | "rook" => PieceKind::Rook,
        "b" | "bishop" => PieceKind::Bishop,
        "n" | "knight" => PieceKind::Knight,
        _ => return Err(ChessError::InvalidNotation(txt.to_string())),
    };
    Ok(kind)
}

/// History line for a move, e.g. `White Pawn from E2 to E4`.
pub fn describe_move(piece: Piece, mv: Move) -> String {
    format!("{} {} from {} to {}", piece.color, piece.kind.name(), mv.from, mv.to)
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
