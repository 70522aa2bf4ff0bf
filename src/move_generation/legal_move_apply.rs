//! Make/unmake on the live board, and the scoped simulation built on them.
//!
//! `make_move` does every fallible lookup before it touches the board, so an
//! error never leaves a half-applied move behind. `ScopedMove` reverts on drop,
//! which covers early returns and panics inside a probe alike.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::describe_move;

/// Play `mv` on `game_state` and return what is needed to take it back.
pub fn make_move(game_state: &mut GameState, mv: Move) -> ChessResult<UndoState> {
    let description = describe_move(game_state, mv)?;
    let mover_index = game_state
        .piece_index_at(mv.from)
        .ok_or(ChessErrors::NoPieceOnSquare(mv.from))?;
    let prev_mover = game_state.pieces()[mover_index];

    let captured_index = match description.capture_square {
        Some(square) => Some(
            game_state
                .piece_index_at(square)
                .ok_or(ChessErrors::NoPieceOnSquare(square))?,
        ),
        None => None,
    };
    let rook_index = match description.rook_hop {
        Some((rook_from, _)) => Some(
            game_state
                .piece_index_at(rook_from)
                .ok_or(ChessErrors::NoPieceOnSquare(rook_from))?,
        ),
        None => None,
    };

    let undo_base = UndoState {
        mv,
        mover_index,
        prev_mover,
        captured: None,
        rook: None,
        prev_side_to_move: game_state.side_to_move,
        prev_last_move: game_state.last_move,
        prev_halfmove_clock: game_state.halfmove_clock,
        prev_fullmove_number: game_state.fullmove_number,
    };

    // Nothing below can fail.
    let shift = |index: usize| match captured_index {
        Some(removed) if removed < index => index - 1,
        _ => index,
    };

    let captured = captured_index.map(|index| (index, game_state.remove_piece(index)));
    let mover_index = shift(mover_index);

    let mut moved = mark_moved(prev_mover, mv.to);
    if let Some(kind) = mv.promotion {
        moved.kind = kind;
    }
    game_state.replace_piece(mover_index, moved);

    let rook = match (rook_index, description.rook_hop) {
        (Some(index), Some((_, rook_to))) => {
            let index = shift(index);
            let prev_rook = game_state.pieces()[index];
            game_state.replace_piece(index, mark_moved(prev_rook, rook_to));
            Some((index, prev_rook))
        }
        _ => None,
    };

    if description.resets_halfmove_clock() {
        game_state.halfmove_clock = 0;
    } else {
        game_state.halfmove_clock = game_state.halfmove_clock.saturating_add(1);
    }
    if prev_mover.color == Color::Dark {
        game_state.fullmove_number = game_state.fullmove_number.saturating_add(1);
    }

    game_state.last_move = Some(LastMove {
        from: mv.from,
        to: mv.to,
        kind: prev_mover.kind,
        color: prev_mover.color,
    });
    game_state.side_to_move = prev_mover.color.opposite();

    Ok(UndoState {
        mover_index,
        captured,
        rook,
        ..undo_base
    })
}

/// Restore the exact position `make_move` started from.
pub fn unmake_move(game_state: &mut GameState, undo: UndoState) {
    game_state.replace_piece(undo.mover_index, undo.prev_mover);
    if let Some((index, rook)) = undo.rook {
        game_state.replace_piece(index, rook);
    }
    if let Some((index, piece)) = undo.captured {
        game_state.insert_piece(index, piece);
    }

    game_state.side_to_move = undo.prev_side_to_move;
    game_state.last_move = undo.prev_last_move;
    game_state.halfmove_clock = undo.prev_halfmove_clock;
    game_state.fullmove_number = undo.prev_fullmove_number;
}

/// Copying variant of `make_move` for callers that keep the old position.
pub fn apply_move(game_state: &GameState, mv: Move) -> ChessResult<GameState> {
    let mut next = game_state.clone();
    make_move(&mut next, mv)?;
    Ok(next)
}

/// A move held on the board for the lifetime of the guard.
pub struct ScopedMove<'a> {
    game_state: &'a mut GameState,
    undo: Option<UndoState>,
}

impl<'a> ScopedMove<'a> {
    pub fn apply(game_state: &'a mut GameState, mv: Move) -> ChessResult<Self> {
        let undo = make_move(game_state, mv)?;
        Ok(Self {
            game_state,
            undo: Some(undo),
        })
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &*self.game_state
    }
}

impl Drop for ScopedMove<'_> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            unmake_move(self.game_state, undo);
        }
    }
}

/// Run `probe` on the position after `mv`; the board is restored before this
/// returns, whatever the probe does.
pub fn with_move_applied<R>(
    game_state: &mut GameState,
    mv: Move,
    probe: impl FnOnce(&GameState) -> R,
) -> ChessResult<R> {
    let scoped = ScopedMove::apply(game_state, mv)?;
    Ok(probe(scoped.state()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_fen;

    fn sq(name: &str) -> Position {
        crate::utils::algebraic::algebraic_to_position(Variant::Classic, name).expect("square should parse")
    }

    #[test]
    fn make_then_unmake_restores_position_exactly() {
        let fens = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2",
            "4k3/1P6/8/8/8/8/8/4K3 w - - 3 40",
        ];
        let moves = [
            Move::new(sq("e1"), sq("c1")),
            Move::new(sq("e5"), sq("d6")),
            Move::with_promotion(sq("b7"), sq("b8"), PieceKind::Knight),
        ];

        for (fen, mv) in fens.iter().zip(moves) {
            let mut game_state = parse_fen(fen).expect("FEN should parse");
            let before = game_state.clone();
            let undo = make_move(&mut game_state, mv).expect("move should apply");
            assert_ne!(game_state, before);
            unmake_move(&mut game_state, undo);
            assert_eq!(game_state, before, "unmake should restore {fen}");
        }
    }

    #[test]
    fn castling_moves_the_rook_from_the_destination_side() {
        let game_state =
            parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");

        let queenside = apply_move(&game_state, Move::new(sq("e1"), sq("c1"))).expect("castle");
        assert_eq!(queenside.piece_at(sq("d1")).map(|p| p.kind), Some(PieceKind::Rook));
        assert!(queenside.is_empty(sq("a1")));
        assert!(queenside.piece_at(sq("h1")).is_some());

        let kingside = apply_move(&game_state, Move::new(sq("e1"), sq("g1"))).expect("castle");
        assert_eq!(kingside.piece_at(sq("f1")).map(|p| p.kind), Some(PieceKind::Rook));
        assert!(kingside.is_empty(sq("h1")));
        assert!(kingside.piece_at(sq("a1")).is_some());
    }

    #[test]
    fn clocks_follow_pawn_moves_and_captures() {
        let game_state = parse_fen("4k3/8/8/8/8/8/4P3/R3K3 w - - 7 12").expect("FEN should parse");

        let quiet = apply_move(&game_state, Move::new(sq("a1"), sq("a5"))).expect("rook move");
        assert_eq!(quiet.halfmove_clock, 8);
        assert_eq!(quiet.fullmove_number, 12);
        assert_eq!(quiet.side_to_move, Color::Dark);

        let pawn = apply_move(&game_state, Move::new(sq("e2"), sq("e4"))).expect("pawn move");
        assert_eq!(pawn.halfmove_clock, 0);
        assert!(pawn.last_move.is_some_and(|m| m.is_pawn_double_step()));

        let reply = apply_move(&pawn, Move::new(sq("e8"), sq("d8"))).expect("king move");
        assert_eq!(reply.fullmove_number, 13);
    }

    #[test]
    fn scoped_simulation_restores_board_after_probe() {
        let mut game_state = GameState::new_game(Variant::Classic);
        let before = game_state.clone();

        let seen_side = with_move_applied(&mut game_state, Move::new(sq("g1"), sq("f3")), |after| {
            assert!(after.piece_at(sq("f3")).is_some());
            after.side_to_move
        })
        .expect("simulation should run");

        assert_eq!(seen_side, Color::Dark);
        assert_eq!(game_state, before);
    }

    #[test]
    fn failed_application_leaves_board_untouched() {
        let mut game_state = GameState::new_game(Variant::Classic);
        let before = game_state.clone();

        let result = with_move_applied(&mut game_state, Move::new(sq("e4"), sq("e5")), |_| true);
        assert_eq!(result, Err(ChessErrors::NoPieceOnSquare(sq("e4"))));
        assert_eq!(game_state, before);
    }
}
