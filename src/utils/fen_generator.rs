use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::position_to_algebraic;
use crate::utils::board_notation::encode_notation;

/// Six-field FEN for a classic position. The cube has no FEN form.
pub fn generate_fen(game_state: &GameState) -> ChessResult<String> {
    if game_state.variant != Variant::Classic {
        return Err(ChessErrors::UnsupportedForVariant {
            operation: "FEN",
            variant: game_state.variant,
        });
    }

    let board = generate_board_field(game_state);
    let castling = generate_castling_field(game_state.castling_rights());
    let en_passant = generate_en_passant_field(game_state)?;

    Ok(format!(
        "{} {} {} {} {} {}",
        board,
        game_state.side_to_move.notation_char(),
        castling,
        en_passant,
        game_state.halfmove_clock,
        game_state.fullmove_number
    ))
}

/// The FEN placement field is the compact board block without its outer
/// delimiters and side section.
fn generate_board_field(game_state: &GameState) -> String {
    let compact = encode_notation(game_state);
    let board = compact.split('#').next().unwrap_or_default();
    board.trim_matches('/').to_owned()
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let mut out = String::new();

    if (rights & CASTLE_LIGHT_KINGSIDE) != 0 {
        out.push('K');
    }
    if (rights & CASTLE_LIGHT_QUEENSIDE) != 0 {
        out.push('Q');
    }
    if (rights & CASTLE_DARK_KINGSIDE) != 0 {
        out.push('k');
    }
    if (rights & CASTLE_DARK_QUEENSIDE) != 0 {
        out.push('q');
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

/// Target square right after any double step, whether or not a capture is
/// actually available.
fn generate_en_passant_field(game_state: &GameState) -> ChessResult<String> {
    match game_state.last_move {
        Some(last) if last.is_pawn_double_step() => {
            let target = Position::planar(last.to.x, (last.from.y + last.to.y) / 2);
            position_to_algebraic(Variant::Classic, target)
        }
        _ => Ok("-".to_owned()),
    }
}
