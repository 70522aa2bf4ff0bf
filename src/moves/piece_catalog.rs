//! Movement templates keyed by piece kind and geometry.
//!
//! Sliders and leapers share one shape: a static list of vectors and a flag
//! telling the generator whether to repeat each vector until blocked. Pawn
//! steps depend on side and moved-flag, so they are built on demand.

use crate::game_state::chess_types::{Color, Geometry, Offset, Piece, PieceKind};
use crate::moves::offsets::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementTemplate {
    /// Each vector is applied once.
    Leaper(&'static [Offset]),
    /// Each vector is repeated until the board edge or the first occupied cell.
    Slider(&'static [Offset]),
    /// Pawn movement, see `pawn_steps`.
    Pawn,
}

/// Catalogue lookup. Unicorns on the flat board have no movement.
pub fn movement_template(kind: PieceKind, geometry: Geometry) -> MovementTemplate {
    let cube = geometry.dimensions == 3;
    match (kind, cube) {
        (PieceKind::Pawn, _) => MovementTemplate::Pawn,
        (PieceKind::Knight, false) => MovementTemplate::Leaper(&KNIGHT_LEAPS_2D),
        (PieceKind::Knight, true) => MovementTemplate::Leaper(&KNIGHT_LEAPS_3D),
        (PieceKind::King, false) => MovementTemplate::Leaper(&KING_STEPS_2D),
        (PieceKind::King, true) => MovementTemplate::Leaper(&KING_STEPS_3D),
        (PieceKind::Rook, false) => MovementTemplate::Slider(&ROOK_DIRS_2D),
        (PieceKind::Rook, true) => MovementTemplate::Slider(&ROOK_DIRS_3D),
        (PieceKind::Bishop, false) => MovementTemplate::Slider(&BISHOP_DIRS_2D),
        (PieceKind::Bishop, true) => MovementTemplate::Slider(&BISHOP_DIRS_3D),
        (PieceKind::Queen, false) => MovementTemplate::Slider(&QUEEN_DIRS_2D),
        (PieceKind::Queen, true) => MovementTemplate::Slider(&QUEEN_DIRS_3D),
        (PieceKind::Unicorn, false) => MovementTemplate::Slider(&[]),
        (PieceKind::Unicorn, true) => MovementTemplate::Slider(&UNICORN_DIRS_3D),
    }
}

/// Quiet and capturing steps for one pawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PawnSteps {
    /// Single forward steps, one per forward axis.
    pub forward: Vec<Offset>,
    /// Double step, present only for an unmoved classic pawn.
    pub double: Option<Offset>,
    pub captures: Vec<Offset>,
}

/// Pawn templates. On the flat board a pawn walks along the rank axis and may
/// double-step until it has moved. In the cube it walks along rank or level,
/// never double-steps, and captures on any bishop step that advances on at
/// least one forward axis without retreating on the other.
pub fn pawn_steps(piece: &Piece, geometry: Geometry) -> PawnSteps {
    let f = piece.color.forward();
    if geometry.dimensions == 3 {
        PawnSteps {
            forward: vec![Offset::new(0, f, 0), Offset::new(0, 0, f)],
            double: None,
            captures: pawn_capture_steps(piece.color, geometry).to_vec(),
        }
    } else {
        PawnSteps {
            forward: vec![Offset::new(0, f, 0)],
            double: if piece.has_moved {
                None
            } else {
                Some(Offset::new(0, 2 * f, 0))
            },
            captures: pawn_capture_steps(piece.color, geometry).to_vec(),
        }
    }
}

/// Squares a pawn threatens. Forward steps never threaten.
pub fn pawn_capture_steps(color: Color, geometry: Geometry) -> &'static [Offset] {
    const LIGHT_2D: [Offset; 2] = [Offset::new(-1, 1, 0), Offset::new(1, 1, 0)];
    const DARK_2D: [Offset; 2] = [Offset::new(-1, -1, 0), Offset::new(1, -1, 0)];
    const LIGHT_3D: [Offset; 5] = [
        Offset::new(-1, 1, 0),
        Offset::new(1, 1, 0),
        Offset::new(-1, 0, 1),
        Offset::new(1, 0, 1),
        Offset::new(0, 1, 1),
    ];
    const DARK_3D: [Offset; 5] = [
        Offset::new(-1, -1, 0),
        Offset::new(1, -1, 0),
        Offset::new(-1, 0, -1),
        Offset::new(1, 0, -1),
        Offset::new(0, -1, -1),
    ];

    match (color, geometry.dimensions == 3) {
        (Color::Light, false) => &LIGHT_2D,
        (Color::Dark, false) => &DARK_2D,
        (Color::Light, true) => &LIGHT_3D,
        (Color::Dark, true) => &DARK_3D,
    }
}

/// Kinds a pawn may promote to, in emission order.
pub fn promotion_kinds(geometry: Geometry) -> &'static [PieceKind] {
    const CLASSIC: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];
    const CUBE: [PieceKind; 5] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Unicorn,
    ];

    if geometry.dimensions == 3 {
        &CUBE
    } else {
        &CLASSIC
    }
}
