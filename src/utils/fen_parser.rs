//! FEN-to-GameState parser for the classic board.
//!
//! FEN carries castling rights and an en-passant target instead of history.
//! Both are folded back into the piece-level state the generator reads: rights
//! decide the moved flags of kings and rooks, and a target square becomes the
//! double-step last move that produced it.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_rules::{home_rank, king_home, pawn_start_rank};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::algebraic_to_position;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| malformed("missing board layout in FEN"))?;
    let side_part = parts.next().ok_or_else(|| malformed("missing side-to-move in FEN"))?;
    let castling_part = parts.next().ok_or_else(|| malformed("missing castling rights in FEN"))?;
    let en_passant_part = parts.next().ok_or_else(|| malformed("missing en-passant square in FEN"))?;
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err(malformed("FEN has extra trailing fields"));
    }

    let side_to_move = match side_part {
        "w" => Color::Light,
        "b" => Color::Dark,
        _ => return Err(malformed(format!("invalid side-to-move field: {side_part}"))),
    };
    let rights = parse_castling_rights(castling_part)?;

    let mut pieces = parse_board(board_part)?;
    for piece in pieces.iter_mut() {
        piece.has_moved = !starts_unmoved_with_rights(piece, rights);
    }

    let mut game_state = GameState::from_pieces(Variant::Classic, pieces, side_to_move)?;
    game_state.last_move = parse_en_passant_target(&game_state, en_passant_part)?;
    game_state.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| malformed(format!("invalid halfmove clock: {halfmove_part}")))?;
    game_state.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| malformed(format!("invalid fullmove number: {fullmove_part}")))?;

    Ok(game_state)
}

fn parse_board(board_part: &str) -> ChessResult<Vec<Piece>> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(malformed("board layout must contain 8 ranks"));
    }

    let mut pieces = Vec::with_capacity(32);
    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - fen_rank_idx as i8;
        let mut file = 0i8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(malformed(format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as i8;
                continue;
            }

            let kind = PieceKind::from_letter(ch)
                .filter(|&kind| Variant::Classic.allows(kind))
                .ok_or_else(|| malformed(format!("invalid piece character '{ch}' in board layout")))?;
            let color = if ch.is_ascii_uppercase() { Color::Light } else { Color::Dark };

            if file >= 8 {
                return Err(malformed("board rank has too many files"));
            }
            pieces.push(Piece::new(kind, color, Position::planar(file, rank)));
            file += 1;
        }

        if file != 8 {
            return Err(malformed("board rank does not sum to 8 files"));
        }
    }

    Ok(pieces)
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_LIGHT_KINGSIDE,
            'Q' => rights |= CASTLE_LIGHT_QUEENSIDE,
            'k' => rights |= CASTLE_DARK_KINGSIDE,
            'q' => rights |= CASTLE_DARK_QUEENSIDE,
            _ => return Err(malformed(format!("invalid castling rights character: {ch}"))),
        }
    }
    Ok(rights)
}

/// Moved-flag inference: pawns by rank, kings and rooks by the rights field.
fn starts_unmoved_with_rights(piece: &Piece, rights: CastlingRights) -> bool {
    let (kingside, queenside) = match piece.color {
        Color::Light => (CASTLE_LIGHT_KINGSIDE, CASTLE_LIGHT_QUEENSIDE),
        Color::Dark => (CASTLE_DARK_KINGSIDE, CASTLE_DARK_QUEENSIDE),
    };
    let pos = piece.position;
    let on_home_rank = pos.y == home_rank(piece.color);

    match piece.kind {
        PieceKind::Pawn => pos.y == pawn_start_rank(piece.color),
        PieceKind::King => pos == king_home(piece.color) && rights & (kingside | queenside) != 0,
        PieceKind::Rook if on_home_rank && pos.x == 7 => rights & kingside != 0,
        PieceKind::Rook if on_home_rank && pos.x == 0 => rights & queenside != 0,
        PieceKind::Rook => false,
        _ => true,
    }
}

/// Rebuild the double step implied by an en-passant target.
fn parse_en_passant_target(game_state: &GameState, en_passant_part: &str) -> ChessResult<Option<LastMove>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let target = algebraic_to_position(Variant::Classic, en_passant_part)?;
    let mover = game_state.side_to_move.opposite();
    let dir = mover.forward();
    let from = Position::planar(target.x, target.y - dir);
    let to = Position::planar(target.x, target.y + dir);

    let pawn_arrived = game_state
        .piece_at(to)
        .is_some_and(|p| p.kind == PieceKind::Pawn && p.color == mover);
    if from.y != pawn_start_rank(mover) || !pawn_arrived || !game_state.is_empty(target) {
        return Err(malformed(format!(
            "en-passant target {en_passant_part} does not follow a double step"
        )));
    }

    Ok(Some(LastMove {
        from,
        to,
        kind: PieceKind::Pawn,
        color: mover,
    }))
}

fn malformed(msg: impl Into<String>) -> ChessErrors {
    ChessErrors::MalformedNotation(msg.into())
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::chess_errors::ChessErrors;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;

    #[test]
    fn parse_starting_fen() {
        let game_state = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        assert_eq!(game_state.side_to_move, Color::Light);
        assert_eq!(game_state.fullmove_number, 1);
        assert_eq!(game_state.halfmove_clock, 0);
        assert_eq!(game_state.placement(), GameState::new_game(Variant::Classic).placement());
        assert_eq!(game_state.castling_rights().count_ones(), 4);
    }

    #[test]
    fn rights_field_sets_moved_flags() {
        let game_state = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 5 20").expect("FEN should parse");

        assert!(!game_state.piece_at(Position::planar(7, 0)).expect("h1 rook").has_moved);
        assert!(game_state.piece_at(Position::planar(0, 0)).expect("a1 rook").has_moved);
        assert!(game_state.piece_at(Position::planar(7, 7)).expect("h8 rook").has_moved);
        assert_eq!(game_state.castling_rights(), CASTLE_LIGHT_KINGSIDE | CASTLE_DARK_QUEENSIDE);
        assert_eq!(game_state.halfmove_clock, 5);
        assert_eq!(game_state.fullmove_number, 20);
    }

    #[test]
    fn en_passant_target_becomes_last_move() {
        let game_state = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").expect("FEN should parse");
        let last = game_state.last_move.expect("double step should be synthesized");

        assert_eq!(last.from, Position::planar(3, 6));
        assert_eq!(last.to, Position::planar(3, 4));
        assert!(last.is_pawn_double_step());

        assert!(matches!(
            parse_fen("4k3/8/8/4P3/8/8/8/4K3 w - d6 0 2"),
            Err(ChessErrors::MalformedNotation(_))
        ));
    }

    #[test]
    fn rejects_broken_fields() {
        for fen in [
            "",
            "8/8/8/8/8/8/8 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 x - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w X - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - - a 1",
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra",
            "4k3/8/8/8/8/8/8/8 w - - 0 1",
        ] {
            assert!(parse_fen(fen).is_err(), "{fen:?} should be rejected");
        }
    }

    #[test]
    fn rejects_king_capturable_by_side_to_move() {
        let result = parse_fen("4k2R/8/8/8/8/8/8/4K3 w - - 0 1");
        assert!(matches!(result, Err(ChessErrors::MalformedNotation(_))));

        // Same placement is fine when the checked side is the one to move.
        assert!(parse_fen("4k2R/8/8/8/8/8/8/4K3 b - - 0 1").is_ok());
    }
}
