//! Uniform random playouts.
//!
//! Picks uniformly among legal moves until the game ends or the ply budget runs
//! out. Used to reach arbitrary positions in tests and benchmarks.

use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::chess_errors::ChessResult;
use crate::game::game::Game;
use crate::game_state::chess_types::Move;

/// Play up to `max_plies` random legal moves on `game` and return them.
pub fn random_playout<R: Rng + ?Sized>(game: &mut Game, max_plies: usize, rng: &mut R) -> ChessResult<Vec<Move>> {
    let mut played = Vec::new();
    while played.len() < max_plies && !game.status().is_terminal() {
        let moves = game.legal_moves()?;
        let Some(&mv) = moves.as_slice().choose(rng) else {
            break;
        };
        game.apply_move(mv)?;
        played.push(mv);
    }
    Ok(played)
}
