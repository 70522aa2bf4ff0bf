use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

use raum_chess::game::game::Game;
use raum_chess::game_state::chess_types::Variant;
use raum_chess::move_generation::legal_move_checks::is_king_in_check;
use raum_chess::utils::board_notation::{decode_notation, encode_notation};
use raum_chess::utils::random_playout::random_playout;

fn check_playout(variant: Variant, seed: u64, plies: usize) -> Result<(), TestCaseError> {
    let mut game = Game::new(variant);
    let mut rng = StdRng::seed_from_u64(seed);

    for _ in 0..plies {
        let played = random_playout(&mut game, 1, &mut rng).map_err(|err| TestCaseError::fail(err.to_string()))?;
        if played.is_empty() {
            break;
        }
        let mover = game.state().side_to_move.opposite();
        prop_assert!(
            !is_king_in_check(game.state(), mover),
            "{mover:?} left its king in check after {:?}",
            played
        );

        let notation = encode_notation(game.state());
        let decoded = decode_notation(variant, &notation).map_err(|err| TestCaseError::fail(err.to_string()))?;
        prop_assert_eq!(decoded.placement(), game.state().placement());
        prop_assert_eq!(decoded.side_to_move, game.state().side_to_move);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn classic_playouts_stay_legal(seed in any::<u64>()) {
        check_playout(Variant::Classic, seed, 80)?;
    }

    #[test]
    fn cube_playouts_stay_legal(seed in any::<u64>()) {
        check_playout(Variant::Raumschach, seed, 30)?;
    }
}
