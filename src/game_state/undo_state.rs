use crate::game_state::chess_types::*;

/// Single undo record for `make_move` / `unmake_move`.
///
/// Pieces are restored at their original list index so generation order after
/// an undo is identical to the order before the move.
#[derive(Debug, Clone)]
pub struct UndoState {
    pub mv: Move,
    pub mover_index: usize,
    pub prev_mover: Piece,
    pub captured: Option<(usize, Piece)>,
    pub rook: Option<(usize, Piece)>,

    pub prev_side_to_move: Color,
    pub prev_last_move: Option<LastMove>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,
}
