//! Canonical rule constants and the tunable rule configuration.
//!
//! Starting positions for both variants, home squares used to infer moved
//! flags when a notation carries no history, and the draw thresholds.

use crate::game_state::chess_types::{Color, Piece, PieceKind, Position, Variant};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Standard chess starting position in compact board notation.
pub const CLASSIC_STARTING_NOTATION: &str =
    "/rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR/#w#";

/// Raumschach starting position in compact board notation, top level first.
pub const RAUMSCHACH_STARTING_NOTATION: &str =
    "/rnknr/ppppp/5/5/5//buqbu/ppppp/5/5/5//5/5/5/5/5//5/5/5/PPPPP/BUQBU//5/5/5/PPPPP/RNKNR/#w#";

pub const DEFAULT_FIFTY_MOVE_HALFMOVE_LIMIT: u16 = 100;
pub const DEFAULT_REPETITION_LIMIT: u8 = 3;

pub const FIFTY_MOVE_LIMIT_ENV: &str = "RAUM_FIFTY_MOVE_LIMIT";
pub const REPETITION_LIMIT_ENV: &str = "RAUM_REPETITION_LIMIT";

#[inline]
pub fn starting_notation(variant: Variant) -> &'static str {
    match variant {
        Variant::Classic => CLASSIC_STARTING_NOTATION,
        Variant::Raumschach => RAUMSCHACH_STARTING_NOTATION,
    }
}

/// Draw thresholds applied by the termination evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RulesConfig {
    /// Half-moves without a pawn move or capture before the game is drawn.
    pub fifty_move_halfmove_limit: u16,
    /// Occurrences of one reduced position that draw the game.
    pub repetition_limit: u8,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            fifty_move_halfmove_limit: DEFAULT_FIFTY_MOVE_HALFMOVE_LIMIT,
            repetition_limit: DEFAULT_REPETITION_LIMIT,
        }
    }
}

impl RulesConfig {
    /// Defaults overridden by `RAUM_FIFTY_MOVE_LIMIT` / `RAUM_REPETITION_LIMIT`.
    /// Unset or unparsable variables keep the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(limit) = read_env_number::<u16>(FIFTY_MOVE_LIMIT_ENV) {
            config.fifty_move_halfmove_limit = limit;
        }
        if let Some(limit) = read_env_number::<u8>(REPETITION_LIMIT_ENV) {
            config.repetition_limit = limit.max(1);
        }
        config
    }
}

fn read_env_number<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok()?.trim().parse::<T>().ok()
}

#[inline]
pub const fn home_rank(color: Color) -> i8 {
    match color {
        Color::Light => 0,
        Color::Dark => 7,
    }
}

#[inline]
pub const fn pawn_start_rank(color: Color) -> i8 {
    match color {
        Color::Light => 1,
        Color::Dark => 6,
    }
}

#[inline]
pub const fn king_home(color: Color) -> Position {
    Position::planar(4, home_rank(color))
}

/// Whether a piece read from a history-free notation should count as unmoved.
/// Only classic pawns, kings and rooks on their starting squares qualify; in the
/// cube the flag has no effect on movement and every piece starts unmoved.
pub fn starts_unmoved(variant: Variant, piece: &Piece) -> bool {
    if variant == Variant::Raumschach {
        return true;
    }

    let pos = piece.position;
    match piece.kind {
        PieceKind::Pawn => pos.y == pawn_start_rank(piece.color),
        PieceKind::King => pos == king_home(piece.color),
        PieceKind::Rook => pos.y == home_rank(piece.color) && (pos.x == 0 || pos.x == 7),
        _ => true,
    }
}
