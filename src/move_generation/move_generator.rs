//! Generator trait and the pseudo-legal stage shared by every generator.
//!
//! Pseudo-legal moves follow each piece's movement template, respect
//! occupancy, and include castling (already screened for attacked squares)
//! and en passant. Whether the mover's own king is left in check is decided
//! later by the legality filter.

use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_moves_king::generate_castling_moves;
use crate::move_generation::legal_moves_leaper::generate_leaper_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_slider::generate_slider_moves;
use crate::moves::piece_catalog::{movement_template, MovementTemplate};

pub trait MoveGenerator: Send + Sync {
    fn generate_moves(&self, game_state: &GameState) -> ChessResult<Vec<Move>>;
}

/// Generator that skips the self-check filter.
pub struct PseudoLegalMoveGenerator;

impl MoveGenerator for PseudoLegalMoveGenerator {
    fn generate_moves(&self, game_state: &GameState) -> ChessResult<Vec<Move>> {
        Ok(generate_pseudo_legal_moves(game_state))
    }
}

/// Every pseudo-legal move for the side to move. Pieces are visited in
/// piece-list order, so the output order is stable for a given position.
pub fn generate_pseudo_legal_moves(game_state: &GameState) -> Vec<Move> {
    let geometry = game_state.geometry();
    let mut out = Vec::with_capacity(if geometry.dimensions == 3 { 192 } else { 64 });

    for piece in game_state.pieces_of(game_state.side_to_move) {
        generate_piece_moves(game_state, piece, &mut out);
    }
    out
}

/// Pseudo-legal moves of a single piece.
pub fn generate_piece_moves(game_state: &GameState, piece: &Piece, out: &mut Vec<Move>) {
    match movement_template(piece.kind, game_state.geometry()) {
        MovementTemplate::Pawn => generate_pawn_moves(game_state, piece, out),
        MovementTemplate::Leaper(steps) => generate_leaper_moves(game_state, piece, steps, out),
        MovementTemplate::Slider(dirs) => generate_slider_moves(game_state, piece, dirs, out),
    }
    if piece.kind == PieceKind::King {
        generate_castling_moves(game_state, piece, out);
    }
}
