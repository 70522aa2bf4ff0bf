//! Full legal move generation pipeline.
//!
//! Runs the pseudo-legal stage, plays each candidate on a scratch board with
//! a scoped simulation and keeps the ones that leave the mover's king safe.

use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::with_move_applied;
use crate::move_generation::legal_move_checks::{attackers_to_square, is_king_in_check, king_square};
use crate::move_generation::move_generator::{generate_piece_moves, generate_pseudo_legal_moves, MoveGenerator};

pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_moves(&self, game_state: &GameState) -> ChessResult<Vec<Move>> {
        let mut scratch = game_state.clone();
        legal_moves(&mut scratch)
    }
}

/// Legal moves on a board the caller lends out. The board is left exactly as
/// it was found.
pub fn legal_moves(game_state: &mut GameState) -> ChessResult<Vec<Move>> {
    let pseudo = generate_pseudo_legal_moves(game_state);
    filter_legal(game_state, pseudo)
}

/// Legal moves of the piece on `from`, empty when that square holds no piece
/// of the side to move.
pub fn legal_moves_from(game_state: &mut GameState, from: Position) -> ChessResult<Vec<Move>> {
    let Some(piece) = game_state.piece_at(from).copied() else {
        return Ok(Vec::new());
    };
    if piece.color != game_state.side_to_move {
        return Ok(Vec::new());
    }
    let mut pseudo = Vec::new();
    generate_piece_moves(game_state, &piece, &mut pseudo);
    filter_legal(game_state, pseudo)
}

/// Whether the side to move has at least one legal move. Stops at the first.
pub fn has_legal_move(game_state: &mut GameState) -> ChessResult<bool> {
    let side = game_state.side_to_move;
    for mv in generate_pseudo_legal_moves(game_state) {
        if with_move_applied(game_state, mv, |after| !is_king_in_check(after, side))? {
            return Ok(true);
        }
    }
    Ok(false)
}

fn filter_legal(game_state: &mut GameState, pseudo: Vec<Move>) -> ChessResult<Vec<Move>> {
    let side = game_state.side_to_move;
    let mut legal = Vec::with_capacity(pseudo.len());
    for mv in pseudo {
        if with_move_applied(game_state, mv, |after| !is_king_in_check(after, side))? {
            legal.push(mv);
        }
    }
    Ok(legal)
}

/// Check facts about the position reached by a move, seen from the side now
/// to move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveAnnotations {
    pub gives_check: bool,
    pub is_double_check: bool,
    pub is_checkmate: bool,
}

/// Annotate a position right after a move: is the side to move in check, by
/// how many pieces, and can it escape.
pub fn annotate_position(game_state: &mut GameState) -> ChessResult<MoveAnnotations> {
    let side = game_state.side_to_move;
    let Some(king) = king_square(game_state, side) else {
        return Ok(MoveAnnotations::default());
    };
    let attackers = attackers_to_square(game_state, king, side.opposite()).len();
    if attackers == 0 {
        return Ok(MoveAnnotations::default());
    }
    Ok(MoveAnnotations {
        gives_check: true,
        is_double_check: attackers > 1,
        is_checkmate: !has_legal_move(game_state)?,
    })
}
