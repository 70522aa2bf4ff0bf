//! Board state: piece list, occupancy index, side to move and move-history
//! flags.
//!
//! `GameState` owns every piece. The occupancy index maps each cell to the
//! index of the piece standing on it and is rebuilt whenever the piece list
//! changes. Mutation goes through `make_move` / `unmake_move` in
//! `move_generation::legal_move_apply`, which keeps both in step.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_rules::{king_home, starting_notation};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::utils::board_notation::{decode_notation, encode_notation};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub variant: Variant,

    // Stable order: the order pieces were placed in. Move generation walks it.
    pieces: Vec<Piece>,
    occupancy: Vec<Option<u16>>,

    pub side_to_move: Color,
    pub last_move: Option<LastMove>,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl GameState {
    /// Build a position from an explicit piece list. Rejects off-board pieces,
    /// shared squares, kinds foreign to the variant, sides without exactly
    /// one king, and a king left capturable by the side to move.
    pub fn from_pieces(variant: Variant, pieces: Vec<Piece>, side_to_move: Color) -> ChessResult<Self> {
        validate_placement(variant, &pieces)?;

        let mut game_state = Self {
            variant,
            pieces,
            occupancy: Vec::new(),
            side_to_move,
            last_move: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        };
        game_state.rebuild_occupancy();

        let waiting = side_to_move.opposite();
        if let Some(king) = game_state.king_position(waiting) {
            if is_square_attacked(&game_state, king, side_to_move) {
                return Err(ChessErrors::MalformedNotation(format!(
                    "{waiting:?} king on {king:?} is already in check with {side_to_move:?} to move"
                )));
            }
        }
        Ok(game_state)
    }

    pub fn new_game(variant: Variant) -> Self {
        decode_notation(variant, starting_notation(variant)).expect("starting notation should always decode")
    }

    #[inline]
    pub fn from_notation(variant: Variant, notation: &str) -> ChessResult<Self> {
        decode_notation(variant, notation)
    }

    #[inline]
    pub fn to_notation(&self) -> String {
        encode_notation(self)
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> ChessResult<String> {
        generate_fen(self)
    }

    #[inline]
    pub fn geometry(&self) -> Geometry {
        self.variant.geometry()
    }

    #[inline]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter().filter(move |p| p.color == color)
    }

    #[inline]
    pub fn piece_index_at(&self, pos: Position) -> Option<usize> {
        let geometry = self.geometry();
        if !geometry.contains(pos) {
            return None;
        }
        self.occupancy[geometry.index_of(pos)].map(usize::from)
    }

    #[inline]
    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        self.piece_index_at(pos).map(|index| &self.pieces[index])
    }

    #[inline]
    pub fn is_empty(&self, pos: Position) -> bool {
        self.piece_index_at(pos).is_none()
    }

    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.pieces
            .iter()
            .find(|p| p.color == color && p.kind == PieceKind::King)
            .map(|p| p.position)
    }

    /// Castling rights implied by moved flags and rook presence.
    pub fn castling_rights(&self) -> CastlingRights {
        if self.variant != Variant::Classic {
            return 0;
        }

        let mut rights = 0;
        for (color, kingside, queenside) in [
            (Color::Light, CASTLE_LIGHT_KINGSIDE, CASTLE_LIGHT_QUEENSIDE),
            (Color::Dark, CASTLE_DARK_KINGSIDE, CASTLE_DARK_QUEENSIDE),
        ] {
            let home = king_home(color);
            if !self.is_unmoved(home, color, PieceKind::King) {
                continue;
            }
            if self.is_unmoved(Position::planar(7, home.y), color, PieceKind::Rook) {
                rights |= kingside;
            }
            if self.is_unmoved(Position::planar(0, home.y), color, PieceKind::Rook) {
                rights |= queenside;
            }
        }
        rights
    }

    /// Whether an unmoved piece of the given kind and colour stands on `pos`.
    pub fn is_unmoved(&self, pos: Position, color: Color, kind: PieceKind) -> bool {
        self.piece_at(pos)
            .is_some_and(|p| p.color == color && p.kind == kind && !p.has_moved)
    }

    /// Piece placement sorted by square, ignoring moved flags.
    pub fn placement(&self) -> Vec<(Position, PieceKind, Color)> {
        let mut placement: Vec<_> = self.pieces.iter().map(|p| (p.position, p.kind, p.color)).collect();
        placement.sort();
        placement
    }

    // --- Mutation primitives used by make/unmake ---

    pub(crate) fn replace_piece(&mut self, index: usize, piece: Piece) {
        self.pieces[index] = piece;
        self.rebuild_occupancy();
    }

    pub(crate) fn remove_piece(&mut self, index: usize) -> Piece {
        let piece = self.pieces.remove(index);
        self.rebuild_occupancy();
        piece
    }

    pub(crate) fn insert_piece(&mut self, index: usize, piece: Piece) {
        self.pieces.insert(index, piece);
        self.rebuild_occupancy();
    }

    /// Recompute the occupancy index from the piece list. Panics if two pieces
    /// share a cell or a piece left the board: both mean the state is corrupt.
    fn rebuild_occupancy(&mut self) {
        let geometry = self.geometry();
        self.occupancy.clear();
        self.occupancy.resize(geometry.cell_count(), None);

        for (index, piece) in self.pieces.iter().enumerate() {
            assert!(geometry.contains(piece.position), "piece left the board: {piece:?}");
            let cell = &mut self.occupancy[geometry.index_of(piece.position)];
            assert!(cell.is_none(), "two pieces share {:?}", piece.position);
            *cell = Some(index as u16);
        }
    }
}

fn validate_placement(variant: Variant, pieces: &[Piece]) -> ChessResult<()> {
    let geometry = variant.geometry();
    let mut seen = vec![false; geometry.cell_count()];
    let mut kings = [0usize; 2];

    for piece in pieces {
        if !geometry.contains(piece.position) {
            return Err(ChessErrors::MalformedNotation(format!(
                "piece outside the board at {:?}",
                piece.position
            )));
        }
        if !variant.allows(piece.kind) {
            return Err(ChessErrors::MalformedNotation(format!(
                "{:?} does not exist in the {variant:?} variant",
                piece.kind
            )));
        }
        let cell = geometry.index_of(piece.position);
        if seen[cell] {
            return Err(ChessErrors::MalformedNotation(format!(
                "two pieces on {:?}",
                piece.position
            )));
        }
        seen[cell] = true;
        if piece.kind == PieceKind::King {
            kings[piece.color.index()] += 1;
        }
    }

    if kings != [1, 1] {
        return Err(ChessErrors::MalformedNotation(format!(
            "each side needs exactly one king, found {} light and {} dark",
            kings[0], kings[1]
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupancy_tracks_piece_list() {
        let game_state = GameState::new_game(Variant::Classic);
        assert_eq!(game_state.pieces().len(), 32);
        assert_eq!(
            game_state.piece_at(Position::planar(4, 0)).map(|p| p.kind),
            Some(PieceKind::King)
        );
        assert!(game_state.is_empty(Position::planar(4, 4)));
        assert!(game_state.piece_at(Position::planar(8, 0)).is_none());
    }

    #[test]
    fn start_position_has_all_castling_rights() {
        let game_state = GameState::new_game(Variant::Classic);
        assert_eq!(
            game_state.castling_rights(),
            CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE | CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE
        );
        assert_eq!(GameState::new_game(Variant::Raumschach).castling_rights(), 0);
    }

    #[test]
    fn explicit_piece_list_rejects_duplicate_squares_and_missing_kings() {
        let e1 = Position::planar(4, 0);
        let doubled = vec![
            Piece::new(PieceKind::King, Color::Light, e1),
            Piece::new(PieceKind::Queen, Color::Light, e1),
            Piece::new(PieceKind::King, Color::Dark, Position::planar(4, 7)),
        ];
        assert!(matches!(
            GameState::from_pieces(Variant::Classic, doubled, Color::Light),
            Err(ChessErrors::MalformedNotation(_))
        ));

        let kingless = vec![Piece::new(PieceKind::King, Color::Light, e1)];
        assert!(matches!(
            GameState::from_pieces(Variant::Classic, kingless, Color::Light),
            Err(ChessErrors::MalformedNotation(_))
        ));
    }

    #[test]
    fn unicorns_are_rejected_on_the_flat_board() {
        let pieces = vec![
            Piece::new(PieceKind::King, Color::Light, Position::planar(4, 0)),
            Piece::new(PieceKind::King, Color::Dark, Position::planar(4, 7)),
            Piece::new(PieceKind::Unicorn, Color::Dark, Position::planar(0, 7)),
        ];
        assert!(GameState::from_pieces(Variant::Classic, pieces, Color::Light).is_err());
    }

    #[test]
    fn explicit_piece_list_rejects_waiting_king_in_check() {
        let pieces = vec![
            Piece::new(PieceKind::King, Color::Light, Position::planar(4, 0)),
            Piece::new(PieceKind::Rook, Color::Light, Position::planar(7, 7)),
            Piece::new(PieceKind::King, Color::Dark, Position::planar(4, 7)),
        ];
        assert!(matches!(
            GameState::from_pieces(Variant::Classic, pieces.clone(), Color::Light),
            Err(ChessErrors::MalformedNotation(_))
        ));

        let game_state = GameState::from_pieces(Variant::Classic, pieces, Color::Dark).expect("dark to move");
        assert!(game_state.king_position(Color::Dark).is_some());
    }
}
