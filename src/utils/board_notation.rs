//! Compact board notation shared by both variants.
//!
//! `/rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR/#w#`
//!
//! Rows run from the far rank down to the near one, each closed by `/`. In the
//! cube every level is written as such a block, top level first, and blocks are
//! separated by an extra `/`. Digits count empty cells along a row. The side to
//! move sits between two `#` markers. Moved flags and clocks are not stored:
//! decoding infers moved flags from home squares and starts clocks fresh.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_rules::starts_unmoved;
use crate::game_state::chess_types::*;

pub fn decode_notation(variant: Variant, notation: &str) -> ChessResult<GameState> {
    let geometry = variant.geometry();
    let (board_part, side_part) = notation
        .split_once('#')
        .ok_or_else(|| malformed("missing '#' side marker"))?;

    let side_to_move = match side_part {
        "w#" => Color::Light,
        "b#" => Color::Dark,
        _ => return Err(malformed(format!("invalid side section '#{side_part}'"))),
    };

    let body = board_part
        .strip_prefix('/')
        .and_then(|rest| rest.strip_suffix('/'))
        .ok_or_else(|| malformed("board must open and close with '/'"))?;

    let planes: Vec<&str> = body.split("//").collect();
    if planes.len() != geometry.levels() as usize {
        return Err(malformed(format!(
            "expected {} level block(s), found {}",
            geometry.levels(),
            planes.len()
        )));
    }

    let mut pieces = Vec::new();
    for (plane_idx, plane) in planes.iter().enumerate() {
        let z = geometry.levels() - 1 - plane_idx as i8;
        let rows: Vec<&str> = plane.split('/').collect();
        if rows.len() != geometry.extent as usize {
            return Err(malformed(format!(
                "level {z} has {} rows, expected {}",
                rows.len(),
                geometry.extent
            )));
        }

        for (row_idx, row) in rows.iter().enumerate() {
            let y = geometry.extent - 1 - row_idx as i8;
            decode_row(variant, row, y, z, &mut pieces)?;
        }
    }

    for piece in pieces.iter_mut() {
        piece.has_moved = !starts_unmoved(variant, piece);
    }

    GameState::from_pieces(variant, pieces, side_to_move)
}

fn decode_row(variant: Variant, row: &str, y: i8, z: i8, pieces: &mut Vec<Piece>) -> ChessResult<()> {
    let extent = variant.geometry().extent;
    let mut x = 0i8;

    for ch in row.chars() {
        if let Some(run) = ch.to_digit(10) {
            if run == 0 || run as i8 > extent {
                return Err(malformed(format!("invalid empty-cell count '{ch}'")));
            }
            x += run as i8;
        } else {
            let kind = PieceKind::from_letter(ch)
                .filter(|&kind| variant.allows(kind))
                .ok_or_else(|| malformed(format!("invalid piece letter '{ch}'")))?;
            let color = if ch.is_ascii_uppercase() { Color::Light } else { Color::Dark };
            if x >= extent {
                return Err(malformed(format!("row '{row}' is too long")));
            }
            pieces.push(Piece::new(kind, color, Position::new(x, y, z)));
            x += 1;
        }
        if x > extent {
            return Err(malformed(format!("row '{row}' is too long")));
        }
    }

    if x != extent {
        return Err(malformed(format!("row '{row}' covers {x} cells, expected {extent}")));
    }
    Ok(())
}

pub fn encode_notation(game_state: &GameState) -> String {
    let geometry = game_state.geometry();
    let mut out = String::from("/");

    for (plane_idx, z) in (0..geometry.levels()).rev().enumerate() {
        if plane_idx > 0 {
            out.push('/');
        }
        for y in (0..geometry.extent).rev() {
            let mut empty = 0u8;
            for x in 0..geometry.extent {
                match game_state.piece_at(Position::new(x, y, z)) {
                    Some(piece) => {
                        if empty > 0 {
                            out.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        out.push(piece.notation_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from(b'0' + empty));
            }
            out.push('/');
        }
    }

    out.push('#');
    out.push(game_state.side_to_move.notation_char());
    out.push('#');
    out
}

fn malformed(msg: impl Into<String>) -> ChessErrors {
    ChessErrors::MalformedNotation(msg.into())
}
