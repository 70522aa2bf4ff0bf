//! Perft: exhaustive legal-move tree counts for validating the generator.

use std::thread;

use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_generator::{annotate_position, legal_moves};
use crate::moves::move_descriptions::describe_move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub double_checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.double_checks += rhs.double_checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Leaf count at `depth`.
pub fn perft(game_state: &GameState, depth: u8) -> ChessResult<u64> {
    let mut scratch = game_state.clone();
    count_nodes(&mut scratch, depth)
}

/// Leaf count per root move, in generation order.
pub fn divide(game_state: &GameState, depth: u8) -> ChessResult<Vec<(Move, u64)>> {
    let mut scratch = game_state.clone();
    if depth == 0 {
        return Ok(Vec::new());
    }

    let mut out = Vec::new();
    for mv in legal_moves(&mut scratch)? {
        let undo = make_move(&mut scratch, mv)?;
        let nodes = count_nodes(&mut scratch, depth - 1);
        unmake_move(&mut scratch, undo);
        out.push((mv, nodes?));
    }
    Ok(out)
}

/// Leaf count with per-leaf move classification, single threaded.
pub fn perft_counts(game_state: &GameState, depth: u8) -> ChessResult<PerftCounts> {
    let mut scratch = game_state.clone();
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return Ok(counts);
    }
    count_detailed(&mut scratch, depth, &mut counts)?;
    Ok(counts)
}

/// `perft_counts` with one worker per root move.
pub fn perft_multi_threaded(game_state: &GameState, depth: u8) -> ChessResult<PerftCounts> {
    if depth <= 1 {
        return perft_counts(game_state, depth);
    }

    let mut root = game_state.clone();
    let root_moves = legal_moves(&mut root)?;

    let results: Vec<ChessResult<PerftCounts>> = thread::scope(|scope| {
        let handles: Vec<_> = root_moves
            .iter()
            .map(|&mv| {
                let mut local_state = game_state.clone();
                scope.spawn(move || -> ChessResult<PerftCounts> {
                    let mut local = PerftCounts::default();
                    make_move(&mut local_state, mv)?;
                    count_detailed(&mut local_state, depth - 1, &mut local)?;
                    Ok(local)
                })
            })
            .collect();
        // A panicking worker takes the whole run down with it.
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    });

    let mut total = PerftCounts::default();
    for result in results {
        total.merge(result?);
    }
    Ok(total)
}

fn count_nodes(game_state: &mut GameState, depth: u8) -> ChessResult<u64> {
    if depth == 0 {
        return Ok(1);
    }
    let moves = legal_moves(game_state)?;
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0;
    for mv in moves {
        let undo = make_move(game_state, mv)?;
        let child = count_nodes(game_state, depth - 1);
        unmake_move(game_state, undo);
        nodes += child?;
    }
    Ok(nodes)
}

fn count_detailed(game_state: &mut GameState, depth: u8, counts: &mut PerftCounts) -> ChessResult<()> {
    for mv in legal_moves(game_state)? {
        if depth == 1 {
            let description = describe_move(game_state, mv)?;
            counts.nodes += 1;
            if description.is_capture() {
                counts.captures += 1;
            }
            if description.is_en_passant() {
                counts.en_passant += 1;
            }
            if description.is_castling() {
                counts.castles += 1;
            }
            if description.is_promotion() {
                counts.promotions += 1;
            }
        }

        let undo = make_move(game_state, mv)?;
        let result = if depth == 1 {
            annotate_position(game_state).map(|annotations| {
                if annotations.gives_check {
                    counts.checks += 1;
                }
                if annotations.is_double_check {
                    counts.double_checks += 1;
                }
                if annotations.is_checkmate {
                    counts.checkmates += 1;
                }
            })
        } else {
            count_detailed(game_state, depth - 1, counts)
        };
        unmake_move(game_state, undo);
        result?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn perft_depth_zero_counts_single_node() {
        let game_state = GameState::new_game(Variant::Classic);
        assert_eq!(perft(&game_state, 0).expect("perft should run"), 1);
        assert_eq!(perft_counts(&game_state, 0).expect("perft should run").nodes, 1);
    }

    #[test]
    fn start_position_depth_two() {
        let game_state = GameState::new_game(Variant::Classic);
        assert_eq!(perft(&game_state, 1).expect("perft should run"), 20);
        assert_eq!(perft(&game_state, 2).expect("perft should run"), 400);
    }

    #[test]
    fn kiwipete_depth_one_classification() {
        let game_state = parse_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        let counts = perft_counts(&game_state, 1).expect("perft should run");

        assert_eq!(counts.nodes, 48);
        assert_eq!(counts.captures, 8);
        assert_eq!(counts.castles, 2);
        assert_eq!(counts.en_passant, 0);
        assert_eq!(counts.checks, 0);
    }

    #[test]
    fn divide_sums_to_perft_and_threads_agree() {
        let game_state = GameState::new_game(Variant::Classic);
        let split = divide(&game_state, 2).expect("divide should run");

        assert_eq!(split.len(), 20);
        assert!(split.iter().all(|(_, nodes)| *nodes == 20));
        assert_eq!(split.iter().map(|(_, nodes)| nodes).sum::<u64>(), 400);

        let threaded = perft_multi_threaded(&game_state, 2).expect("perft should run");
        assert_eq!(threaded, perft_counts(&game_state, 2).expect("perft should run"));
    }
}
