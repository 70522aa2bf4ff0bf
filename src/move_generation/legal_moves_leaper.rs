use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{occupant, Occupant};

/// Knights and kings: each vector once, onto an empty or enemy cell.
pub fn generate_leaper_moves(game_state: &GameState, piece: &Piece, steps: &[Offset], out: &mut Vec<Move>) {
    let from = piece.position;
    for &step in steps {
        let to = from.offset(step);
        if matches!(occupant(game_state, to, piece.color), Occupant::Empty | Occupant::Enemy(_)) {
            out.push(Move::new(from, to));
        }
    }
}
