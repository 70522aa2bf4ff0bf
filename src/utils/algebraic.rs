//! Square names.
//!
//! The flat board uses the usual file-rank pair (`e4`). Cube squares carry the
//! level first as an uppercase letter, then file and rank (`Ba2`): level `A` is
//! the lowest, file `a` and rank `1` are Light's near corner.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::{Position, Variant};

/// Parse a square name for `variant`.
pub fn algebraic_to_position(variant: Variant, square: &str) -> ChessResult<Position> {
    let geometry = variant.geometry();
    let bytes = square.as_bytes();
    let extent = geometry.extent as u8;

    let (level, rest) = if geometry.dimensions == 3 {
        match bytes.split_first() {
            Some((&level, rest)) => (level, rest),
            None => return Err(ChessErrors::InvalidAlgebraic(square.to_owned())),
        }
    } else {
        (b'A', bytes)
    };

    let [file, rank] = rest else {
        return Err(ChessErrors::InvalidAlgebraic(square.to_owned()));
    };

    if !(b'A'..b'A' + geometry.levels() as u8).contains(&level) {
        return Err(ChessErrors::InvalidAlgebraic(format!("invalid level in {square}")));
    }
    if !(b'a'..b'a' + extent).contains(file) {
        return Err(ChessErrors::InvalidAlgebraic(format!("invalid file in {square}")));
    }
    if !(b'1'..b'1' + extent).contains(rank) {
        return Err(ChessErrors::InvalidAlgebraic(format!("invalid rank in {square}")));
    }

    Ok(Position::new(
        (file - b'a') as i8,
        (rank - b'1') as i8,
        (level - b'A') as i8,
    ))
}

/// Name of an on-board square.
pub fn position_to_algebraic(variant: Variant, position: Position) -> ChessResult<String> {
    let geometry = variant.geometry();
    if !geometry.contains(position) {
        return Err(ChessErrors::InvalidAlgebraic(format!("{position:?} is off the board")));
    }

    let file = char::from(b'a' + position.x as u8);
    let rank = char::from(b'1' + position.y as u8);
    if geometry.dimensions == 3 {
        let level = char::from(b'A' + position.z as u8);
        Ok(format!("{level}{file}{rank}"))
    } else {
        Ok(format!("{file}{rank}"))
    }
}
