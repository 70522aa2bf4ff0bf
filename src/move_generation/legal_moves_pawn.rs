use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{occupant, push_pawn_move, Occupant};
use crate::moves::piece_catalog::pawn_steps;

pub fn generate_pawn_moves(game_state: &GameState, pawn: &Piece, out: &mut Vec<Move>) {
    let geometry = game_state.geometry();
    let color = pawn.color;
    let from = pawn.position;
    let steps = pawn_steps(pawn, geometry);

    for (i, &step) in steps.forward.iter().enumerate() {
        let to = from.offset(step);
        if occupant(game_state, to, color) != Occupant::Empty {
            continue;
        }
        push_pawn_move(geometry, color, from, to, out);

        // The double step runs along the first forward axis and needs the
        // square it passes over to be empty, which was just checked.
        if i == 0 {
            if let Some(double) = steps.double {
                let two_step = from.offset(double);
                if occupant(game_state, two_step, color) == Occupant::Empty {
                    out.push(Move::new(from, two_step));
                }
            }
        }
    }

    for &step in &steps.captures {
        let to = from.offset(step);
        match occupant(game_state, to, color) {
            Occupant::Enemy(_) => push_pawn_move(geometry, color, from, to, out),
            Occupant::Empty if en_passant_eligible(game_state, pawn, to) => out.push(Move::new(from, to)),
            _ => {}
        }
    }
}

/// Classic only: the enemy pawn beside `pawn` must have double-stepped on the
/// immediately preceding move and `to` must be the square it passed over.
pub fn en_passant_eligible(game_state: &GameState, pawn: &Piece, to: Position) -> bool {
    if game_state.variant != Variant::Classic {
        return false;
    }
    let Some(last) = game_state.last_move else {
        return false;
    };

    let beside = Position::new(to.x, pawn.position.y, pawn.position.z);
    last.color != pawn.color
        && last.is_pawn_double_step()
        && last.to == beside
        && last.from.x == to.x
        && (last.from.y + last.to.y) / 2 == to.y
}
