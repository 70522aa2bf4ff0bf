//! Attack detection and check status.
//!
//! Reachability uses the same templates as move generation: pawns threaten
//! only their capture steps, leapers their fixed offsets, sliders every cell up
//! to and including the first occupied one along each ray.

use crate::game_state::chess_types::*;
use crate::moves::piece_catalog::{movement_template, pawn_capture_steps, MovementTemplate};

#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Option<Position> {
    game_state.king_position(color)
}

/// Check status of `color`. A side without a king is a corrupt position.
pub fn is_in_check(game_state: &GameState, color: Color) -> CheckState {
    let Some(king) = king_square(game_state, color) else {
        panic!("no {color:?} king on the board");
    };
    if is_square_attacked(game_state, king, color.opposite()) {
        CheckState::InCheck(king)
    } else {
        CheckState::NotInCheck
    }
}

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    is_in_check(game_state, color).is_check()
}

pub fn is_square_attacked(game_state: &GameState, square: Position, attacker_color: Color) -> bool {
    game_state
        .pieces_of(attacker_color)
        .any(|piece| piece_reaches(game_state, piece, square))
}

/// Every piece of `attacker_color` that reaches `square`.
pub fn attackers_to_square(
    game_state: &GameState,
    square: Position,
    attacker_color: Color,
) -> Vec<(Position, PieceKind)> {
    game_state
        .pieces_of(attacker_color)
        .filter(|piece| piece_reaches(game_state, piece, square))
        .map(|piece| (piece.position, piece.kind))
        .collect()
}

fn piece_reaches(game_state: &GameState, piece: &Piece, square: Position) -> bool {
    let geometry = game_state.geometry();
    let from = piece.position;

    match movement_template(piece.kind, geometry) {
        MovementTemplate::Pawn => pawn_capture_steps(piece.color, geometry)
            .iter()
            .any(|&step| from.offset(step) == square),
        MovementTemplate::Leaper(steps) => steps.iter().any(|&step| from.offset(step) == square),
        MovementTemplate::Slider(dirs) => dirs.iter().any(|&dir| {
            let mut cursor = from.offset(dir);
            while geometry.contains(cursor) {
                if cursor == square {
                    return true;
                }
                if !game_state.is_empty(cursor) {
                    return false;
                }
                cursor = cursor.offset(dir);
            }
            false
        }),
    }
}
