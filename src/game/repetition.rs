//! Repetition bookkeeping.
//!
//! A reduced position key identifies a position for repetition purposes:
//! placement, side to move, castling rights, and the en-passant target when a
//! capture onto it is actually available. Move counters are left out.

use std::collections::HashMap;

use crate::game_state::chess_types::*;
use crate::move_generation::legal_moves_pawn::en_passant_eligible;
use crate::utils::board_notation::encode_notation;

pub fn reduced_position_key(game_state: &GameState) -> String {
    let mut key = encode_notation(game_state);
    key.push(':');
    key.push_str(&game_state.castling_rights().to_string());
    if let Some(target) = en_passant_target(game_state) {
        key.push_str(&format!(":{},{}", target.x, target.y));
    }
    key
}

/// En-passant target square, only when some pawn of the side to move can
/// pseudo-legally capture onto it.
fn en_passant_target(game_state: &GameState) -> Option<Position> {
    let last = game_state.last_move.filter(|last| last.is_pawn_double_step())?;
    let target = Position::new(last.to.x, (last.from.y + last.to.y) / 2, last.to.z);
    game_state
        .pieces_of(game_state.side_to_move)
        .filter(|piece| piece.kind == PieceKind::Pawn)
        .any(|pawn| (pawn.position.x - target.x).abs() == 1 && en_passant_eligible(game_state, pawn, target))
        .then_some(target)
}

/// Occurrence counts per reduced key. The highest count seen never drops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepetitionTable {
    counts: HashMap<String, u8>,
    highest: u8,
}

impl RepetitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `game_state` and return its total.
    pub fn record(&mut self, game_state: &GameState) -> u8 {
        let count = self.counts.entry(reduced_position_key(game_state)).or_insert(0);
        *count = count.saturating_add(1);
        self.highest = self.highest.max(*count);
        *count
    }

    pub fn occurrences(&self, game_state: &GameState) -> u8 {
        self.counts
            .get(&reduced_position_key(game_state))
            .copied()
            .unwrap_or(0)
    }

    /// Whether any position has been seen `limit` times.
    #[inline]
    pub fn reached(&self, limit: u8) -> bool {
        self.highest >= limit
    }
}
