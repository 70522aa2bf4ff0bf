//! Castling. Plain king steps come from the leaper template; this module only
//! adds the two-square king moves of the flat board.

use crate::game_state::chess_rules::king_home;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::with_move_applied;
use crate::move_generation::legal_move_checks::is_king_in_check;

/// Append every castling move open to `king`. The king may not castle out of,
/// through or into check; transit and destination are probed by playing the
/// king there on a scratch copy.
pub fn generate_castling_moves(game_state: &GameState, king: &Piece, out: &mut Vec<Move>) {
    if game_state.variant != Variant::Classic {
        return;
    }
    let color = king.color;
    let from = king.position;
    if king.has_moved || from != king_home(color) {
        return;
    }
    if is_king_in_check(game_state, color) {
        return;
    }

    let mut scratch: Option<GameState> = None;
    for (rook_x, dx) in [(7i8, 1i8), (0, -1)] {
        let rook_square = Position::planar(rook_x, from.y);
        if !game_state.is_unmoved(rook_square, color, PieceKind::Rook) {
            continue;
        }

        let (lo, hi) = if rook_x > from.x { (from.x + 1, rook_x) } else { (rook_x + 1, from.x) };
        if !(lo..hi).all(|x| game_state.is_empty(Position::planar(x, from.y))) {
            continue;
        }

        let transit = Position::planar(from.x + dx, from.y);
        let destination = Position::planar(from.x + 2 * dx, from.y);
        let scratch = scratch.get_or_insert_with(|| game_state.clone());
        if lands_in_check(scratch, Move::new(from, transit), color)
            || lands_in_check(scratch, Move::new(from, destination), color)
        {
            continue;
        }

        out.push(Move::new(from, destination));
    }
}

fn lands_in_check(scratch: &mut GameState, mv: Move, color: Color) -> bool {
    with_move_applied(scratch, mv, |after| is_king_in_check(after, color)).unwrap_or(true)
}
