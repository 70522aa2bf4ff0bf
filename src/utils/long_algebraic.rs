//! Coordinate move strings: origin, destination and an optional promotion
//! letter. `e2e4`, `e7e8q` on the flat board; `Ba2Ca2`, `Dd4Ee5u` in the cube.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::{algebraic_to_position, position_to_algebraic};

#[inline]
fn square_len(variant: Variant) -> usize {
    if variant.geometry().dimensions == 3 {
        3
    } else {
        2
    }
}

/// Parse a coordinate move. Checks syntax only; legality is the caller's job.
pub fn parse_move(variant: Variant, text: &str) -> ChessResult<Move> {
    let text = text.trim();
    let width = square_len(variant);
    if !text.is_ascii() || (text.len() != 2 * width && text.len() != 2 * width + 1) {
        return Err(ChessErrors::InvalidAlgebraic(format!("invalid move string: {text}")));
    }

    let from = algebraic_to_position(variant, &text[..width])?;
    let to = algebraic_to_position(variant, &text[width..2 * width])?;
    let promotion = match text[2 * width..].chars().next() {
        None => None,
        Some(ch) => Some(promotion_from_char(variant, ch)?),
    };

    Ok(Move { from, to, promotion })
}

pub fn format_move(variant: Variant, mv: Move) -> ChessResult<String> {
    let mut out = position_to_algebraic(variant, mv.from)?;
    out.push_str(&position_to_algebraic(variant, mv.to)?);
    if let Some(kind) = mv.promotion {
        out.push(kind.letter());
    }
    Ok(out)
}

fn promotion_from_char(variant: Variant, ch: char) -> ChessResult<PieceKind> {
    match PieceKind::from_letter(ch) {
        Some(kind) if kind != PieceKind::Pawn && kind != PieceKind::King && variant.allows(kind) => Ok(kind),
        _ => Err(ChessErrors::InvalidAlgebraic(format!("invalid promotion piece: {ch}"))),
    }
}
