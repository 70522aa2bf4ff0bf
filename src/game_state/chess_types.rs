//! Core value types shared by every subsystem: sides, piece kinds, board
//! geometry and coordinates.
//!
//! Coordinates are zero-based. `x` is the file, `y` the rank and `z` the level;
//! the classic board keeps `z == 0` for every square.

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::UndoState;
pub use crate::moves::move_descriptions::Move;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Sign of a pawn step along each forward axis.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }

    #[inline]
    pub const fn notation_char(self) -> char {
        match self {
            Color::Light => 'w',
            Color::Dark => 'b',
        }
    }

    pub fn from_notation_char(ch: char) -> Option<Self> {
        match ch {
            'w' => Some(Color::Light),
            'b' => Some(Color::Dark),
            _ => None,
        }
    }
}

/// Piece kind. `Unicorn` only exists on the 3D board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
    Unicorn,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
            PieceKind::Unicorn => 6,
        }
    }

    /// Lowercase notation letter.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
            PieceKind::Unicorn => 'u',
        }
    }

    pub fn from_letter(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            'u' => Some(PieceKind::Unicorn),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_minor(self) -> bool {
        matches!(self, PieceKind::Knight | PieceKind::Bishop)
    }
}

/// The two supported boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Standard 8x8 chess.
    Classic,
    /// 5x5x5 cube with unicorns.
    Raumschach,
}

impl Variant {
    #[inline]
    pub const fn geometry(self) -> Geometry {
        match self {
            Variant::Classic => Geometry {
                dimensions: 2,
                extent: 8,
            },
            Variant::Raumschach => Geometry {
                dimensions: 3,
                extent: 5,
            },
        }
    }

    #[inline]
    pub fn allows(self, kind: PieceKind) -> bool {
        kind != PieceKind::Unicorn || self == Variant::Raumschach
    }
}

/// Dimensionality and side length of a cubic (or square) board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Geometry {
    pub dimensions: u8,
    pub extent: i8,
}

impl Geometry {
    #[inline]
    pub fn contains(self, pos: Position) -> bool {
        let in_range = |v: i8| (0..self.extent).contains(&v);
        let level_ok = if self.dimensions == 3 {
            in_range(pos.z)
        } else {
            pos.z == 0
        };
        in_range(pos.x) && in_range(pos.y) && level_ok
    }

    #[inline]
    pub fn levels(self) -> i8 {
        if self.dimensions == 3 {
            self.extent
        } else {
            1
        }
    }

    #[inline]
    pub fn cell_count(self) -> usize {
        let extent = self.extent as usize;
        extent * extent * self.levels() as usize
    }

    /// Dense index of an on-board position.
    #[inline]
    pub fn index_of(self, pos: Position) -> usize {
        let extent = self.extent as usize;
        pos.x as usize + pos.y as usize * extent + pos.z as usize * extent * extent
    }

    /// Last rank (and, in 3D, last level) for a side.
    #[inline]
    pub fn far_edge(self, color: Color) -> i8 {
        match color {
            Color::Light => self.extent - 1,
            Color::Dark => 0,
        }
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i8,
    pub y: i8,
    pub z: i8,
}

impl Position {
    #[inline]
    pub const fn new(x: i8, y: i8, z: i8) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn planar(x: i8, y: i8) -> Self {
        Self { x, y, z: 0 }
    }

    #[inline]
    pub const fn offset(self, offset: Offset) -> Self {
        Self {
            x: self.x + offset.dx,
            y: self.y + offset.dy,
            z: self.z + offset.dz,
        }
    }

    /// Colour of the square under the board's two-colouring.
    #[inline]
    pub const fn parity(self) -> i8 {
        (self.x + self.y + self.z).rem_euclid(2)
    }
}

/// A displacement between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub dx: i8,
    pub dy: i8,
    pub dz: i8,
}

impl Offset {
    #[inline]
    pub const fn new(dx: i8, dy: i8, dz: i8) -> Self {
        Self { dx, dy, dz }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub position: Position,
    pub has_moved: bool,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color, position: Position) -> Self {
        Self {
            kind,
            color,
            position,
            has_moved: false,
        }
    }

    /// Notation letter, uppercase for Light.
    #[inline]
    pub fn notation_char(&self) -> char {
        match self.color {
            Color::Light => self.kind.letter().to_ascii_uppercase(),
            Color::Dark => self.kind.letter(),
        }
    }
}

/// Records that a piece has moved. The pawn step set and castling eligibility
/// are derived from this flag, so this is the only place it flips.
#[inline]
pub fn mark_moved(piece: Piece, to: Position) -> Piece {
    Piece {
        position: to,
        has_moved: true,
        ..piece
    }
}

/// Compact castling rights bitmask, derived from moved flags.
pub type CastlingRights = u8;
pub const CASTLE_LIGHT_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_LIGHT_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_DARK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_DARK_QUEENSIDE: CastlingRights = 1 << 3;

/// Whether a side's king is attacked, and where that king stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckState {
    NotInCheck,
    InCheck(Position),
}

impl CheckState {
    #[inline]
    pub fn is_check(self) -> bool {
        matches!(self, CheckState::InCheck(_))
    }
}

/// The most recent move, kept for en-passant eligibility and presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LastMove {
    pub from: Position,
    pub to: Position,
    pub kind: PieceKind,
    pub color: Color,
}

impl LastMove {
    #[inline]
    pub fn is_pawn_double_step(&self) -> bool {
        self.kind == PieceKind::Pawn && self.from.z == self.to.z && (self.to.y - self.from.y).abs() == 2
    }
}
