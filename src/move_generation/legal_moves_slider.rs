use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{occupant, Occupant};

/// Rooks, bishops, queens and unicorns: walk each ray until the edge, stopping
/// after the first enemy and before the first friendly piece.
pub fn generate_slider_moves(game_state: &GameState, piece: &Piece, dirs: &[Offset], out: &mut Vec<Move>) {
    let from = piece.position;
    for &dir in dirs {
        let mut to = from.offset(dir);
        loop {
            match occupant(game_state, to, piece.color) {
                Occupant::Empty => out.push(Move::new(from, to)),
                Occupant::Enemy(_) => {
                    out.push(Move::new(from, to));
                    break;
                }
                Occupant::Own | Occupant::OffBoard => break,
            }
            to = to.offset(dir);
        }
    }
}
