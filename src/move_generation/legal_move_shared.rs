use crate::game_state::chess_types::*;
use crate::moves::piece_catalog::promotion_kinds;

/// Occupant of `square` relative to `color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant {
    OffBoard,
    Empty,
    Own,
    Enemy(PieceKind),
}

#[inline]
pub fn occupant(game_state: &GameState, square: Position, color: Color) -> Occupant {
    if !game_state.geometry().contains(square) {
        return Occupant::OffBoard;
    }
    match game_state.piece_at(square) {
        None => Occupant::Empty,
        Some(piece) if piece.color == color => Occupant::Own,
        Some(piece) => Occupant::Enemy(piece.kind),
    }
}

#[inline]
pub fn enemy_piece_on(game_state: &GameState, square: Position) -> Option<PieceKind> {
    match occupant(game_state, square, game_state.side_to_move) {
        Occupant::Enemy(kind) => Some(kind),
        _ => None,
    }
}

/// Whether a pawn of `color` landing on `square` must promote. On the flat
/// board that is the far rank; in the cube the far rank of the far level.
#[inline]
pub fn is_promotion_square(geometry: Geometry, color: Color, square: Position) -> bool {
    let far = geometry.far_edge(color);
    if geometry.dimensions == 3 {
        square.y == far && square.z == far
    } else {
        square.y == far
    }
}

/// Push a pawn move, expanding it into one move per promotion kind when the
/// destination requires it.
pub fn push_pawn_move(geometry: Geometry, color: Color, from: Position, to: Position, out: &mut Vec<Move>) {
    if is_promotion_square(geometry, color, to) {
        for &kind in promotion_kinds(geometry) {
            out.push(Move::with_promotion(from, to, kind));
        }
    } else {
        out.push(Move::new(from, to));
    }
}
