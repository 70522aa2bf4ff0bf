//! Game-ending conditions layered on top of legal move enumeration.

use crate::chess_errors::ChessResult;
use crate::game::game::GameStatus;
use crate::game::repetition::RepetitionTable;
use crate::game_state::chess_rules::RulesConfig;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::has_legal_move;

/// Status of the position on the board, for the side about to move.
///
/// Checked in order: no legal move (mate or stalemate), insufficient material,
/// repetition, then the fifty-move rule.
pub fn evaluate_status(
    game_state: &mut GameState,
    repetition: &RepetitionTable,
    config: &RulesConfig,
) -> ChessResult<GameStatus> {
    let side = game_state.side_to_move;

    if !has_legal_move(game_state)? {
        return Ok(if is_king_in_check(game_state, side) {
            GameStatus::Checkmate {
                winner: side.opposite(),
            }
        } else {
            GameStatus::Stalemate
        });
    }
    if insufficient_material(game_state) {
        return Ok(GameStatus::DrawByInsufficientMaterial);
    }
    if repetition.reached(config.repetition_limit) {
        return Ok(GameStatus::DrawByRepetition);
    }
    if game_state.halfmove_clock >= config.fifty_move_halfmove_limit {
        return Ok(GameStatus::DrawByFiftyMove);
    }
    Ok(GameStatus::Ongoing(side))
}

/// Material from which neither side can force mate: bare kings, a single minor
/// piece against a bare king, bishops that all stand on one square colour, or
/// two knights against a bare king.
pub fn insufficient_material(game_state: &GameState) -> bool {
    let mut minors: [Vec<&Piece>; 2] = [Vec::new(), Vec::new()];

    for piece in game_state.pieces() {
        match piece.kind {
            PieceKind::King => {}
            kind if kind.is_minor() => minors[piece.color.index()].push(piece),
            _ => return false,
        }
    }

    let [light, dark] = &minors;
    let all_minors: Vec<&Piece> = light.iter().chain(dark.iter()).copied().collect();

    if all_minors.len() <= 1 {
        return true;
    }

    let first_parity = all_minors[0].position.parity();
    if all_minors
        .iter()
        .all(|p| p.kind == PieceKind::Bishop && p.position.parity() == first_parity)
    {
        return true;
    }

    let two_knights = |side: &Vec<&Piece>| side.len() == 2 && side.iter().all(|p| p.kind == PieceKind::Knight);
    (two_knights(light) && dark.is_empty()) || (two_knights(dark) && light.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_fen;

    fn status_of(fen: &str) -> GameStatus {
        let mut game_state = parse_fen(fen).expect("FEN should parse");
        let mut repetition = RepetitionTable::new();
        repetition.record(&game_state);
        evaluate_status(&mut game_state, &repetition, &RulesConfig::default()).expect("evaluation")
    }

    #[test]
    fn checkmate_is_not_stalemate() {
        assert_eq!(
            status_of("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1"),
            GameStatus::Checkmate { winner: Color::Light }
        );
        assert_eq!(status_of("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"), GameStatus::Stalemate);
    }

    #[test]
    fn insufficient_material_cases() {
        let draw = |fen: &str| insufficient_material(&parse_fen(fen).expect("FEN should parse"));

        assert!(draw("4k3/8/8/8/8/8/8/4K3 w - - 0 1"));
        assert!(draw("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1"));
        assert!(draw("4k3/8/8/8/8/8/8/1N2K3 w - - 0 1"));
        assert!(draw("4k3/8/8/8/8/8/8/1NN1K3 w - - 0 1"));
        // c1 and f8 are both dark squares.
        assert!(draw("4kb2/8/8/8/8/8/8/2B1K3 w - - 0 1"));

        assert!(!draw("4k3/8/8/8/8/8/8/R3K3 w - - 0 1"));
        assert!(!draw("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"));
        assert!(!draw("4kb2/8/8/8/8/8/8/3BK3 w - - 0 1"));
        assert!(!draw("4kn2/8/8/8/8/8/8/2B1K3 w - - 0 1"));
        assert!(!draw("4k3/8/8/8/8/8/8/1NB1K3 w - - 0 1"));
    }

    #[test]
    fn fifty_move_rule_ends_the_game() {
        assert_eq!(
            status_of("4k3/8/8/8/8/8/8/R3K3 w - - 100 80"),
            GameStatus::DrawByFiftyMove
        );
        assert_eq!(
            status_of("4k3/8/8/8/8/8/8/R3K3 w - - 99 80"),
            GameStatus::Ongoing(Color::Light)
        );
    }

    #[test]
    fn mate_takes_precedence_over_fifty_moves() {
        assert_eq!(
            status_of("R5k1/5ppp/8/8/8/8/8/6K1 b - - 100 60"),
            GameStatus::Checkmate { winner: Color::Light }
        );
    }
}
