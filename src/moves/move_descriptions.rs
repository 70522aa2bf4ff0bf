//! Move values and their board-dependent classification.
//!
//! A `Move` is the bare request (origin, destination, optional promotion). The
//! special effects of a move (capture square, rook hop, double step) depend on
//! the position it is played in, so they are derived on demand by
//! `describe_move` instead of being carried in the value.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::{GameState, PieceKind, Position, Variant};

pub const FLAG_CAPTURE: u8 = 1 << 0;
pub const FLAG_DOUBLE_PAWN_PUSH: u8 = 1 << 1;
pub const FLAG_EN_PASSANT: u8 = 1 << 2;
pub const FLAG_CASTLING: u8 = 1 << 3;
pub const FLAG_PROMOTION: u8 = 1 << 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub promotion: Option<PieceKind>,
}

impl Move {
    #[inline]
    pub const fn new(from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    pub const fn with_promotion(from: Position, to: Position, promotion: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }
}

/// A move together with everything needed to play or undo it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveDescription {
    pub mv: Move,
    pub moved_piece: PieceKind,
    pub captured_piece: Option<PieceKind>,
    /// Where the captured piece stands; differs from `mv.to` for en passant.
    pub capture_square: Option<Position>,
    /// Rook hop for castling, as (rook origin, rook destination).
    pub rook_hop: Option<(Position, Position)>,
    pub flags: u8,
}

impl MoveDescription {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.flags & FLAG_CAPTURE != 0
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        self.flags & FLAG_EN_PASSANT != 0
    }

    #[inline]
    pub fn is_castling(&self) -> bool {
        self.flags & FLAG_CASTLING != 0
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.flags & FLAG_PROMOTION != 0
    }

    #[inline]
    pub fn resets_halfmove_clock(&self) -> bool {
        self.moved_piece == PieceKind::Pawn || self.is_capture()
    }
}

/// Classify `mv` against `game_state`. The move is assumed to follow the
/// moving piece's pattern; legality is checked elsewhere.
pub fn describe_move(game_state: &GameState, mv: Move) -> ChessResult<MoveDescription> {
    let mover = game_state
        .piece_at(mv.from)
        .ok_or(ChessErrors::NoPieceOnSquare(mv.from))?;

    let mut flags = 0u8;
    let mut captured_piece = None;
    let mut capture_square = None;
    let mut rook_hop = None;

    if let Some(target) = game_state.piece_at(mv.to) {
        if target.color != mover.color {
            flags |= FLAG_CAPTURE;
            captured_piece = Some(target.kind);
            capture_square = Some(mv.to);
        }
    }

    let classic = game_state.variant == Variant::Classic;

    if mover.kind == PieceKind::Pawn && classic {
        if (mv.to.y - mv.from.y).abs() == 2 {
            flags |= FLAG_DOUBLE_PAWN_PUSH;
        }

        if mv.to.x != mv.from.x && captured_piece.is_none() {
            let behind = Position::new(mv.to.x, mv.from.y, mv.from.z);
            if let Some(victim) = game_state.piece_at(behind) {
                if victim.color != mover.color && victim.kind == PieceKind::Pawn {
                    flags |= FLAG_CAPTURE | FLAG_EN_PASSANT;
                    captured_piece = Some(PieceKind::Pawn);
                    capture_square = Some(behind);
                }
            }
        }
    }

    if mover.kind == PieceKind::King && classic && (mv.to.x - mv.from.x).abs() == 2 {
        flags |= FLAG_CASTLING;
        rook_hop = Some(castling_rook_hop(mv.from, mv.to));
    }

    if mv.promotion.is_some() {
        flags |= FLAG_PROMOTION;
    }

    Ok(MoveDescription {
        mv,
        moved_piece: mover.kind,
        captured_piece,
        capture_square,
        rook_hop,
        flags,
    })
}

/// Rook origin and destination for a castling king move. The rook is taken
/// from the side the king travels toward.
#[inline]
pub fn castling_rook_hop(king_from: Position, king_to: Position) -> (Position, Position) {
    let rank = king_from.y;
    if king_to.x > king_from.x {
        (Position::planar(7, rank), Position::planar(king_to.x - 1, rank))
    } else {
        (Position::planar(0, rank), Position::planar(king_to.x + 1, rank))
    }
}
