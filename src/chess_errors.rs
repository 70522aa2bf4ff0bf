//! Errors used throughout the rules engine.
//!
//! `ChessErrors` is the single error type returned by notation decoding, move
//! application and the game state machine. Every variant here is recoverable:
//! the caller gets the error back and the game it was working on is unchanged.
//!
//! Internal corruption (occupancy index out of sync with the piece list, two
//! pieces on one square, a side without its king) is not represented here. Those
//! conditions are asserted where they are detected, because every legality
//! decision downstream assumes they never happen.

use thiserror::Error;

use crate::game::game::GameStatus;
use crate::game_state::chess_types::{Position, Variant};

pub type ChessResult<T> = Result<T, ChessErrors>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessErrors {
    /// A board notation (compact or FEN) could not be decoded. No partial
    /// position is ever returned alongside this error.
    #[error("malformed notation: {0}")]
    MalformedNotation(String),

    /// The requested move is not among the legal moves of the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// A move was requested after the game reached a terminal status.
    #[error("game is already over: {0}")]
    GameAlreadyOver(GameStatus),

    /// A square or coordinate move string could not be parsed.
    #[error("invalid algebraic coordinate: {0}")]
    InvalidAlgebraic(String),

    /// Tried to move from an empty square.
    #[error("no piece on square {0:?}")]
    NoPieceOnSquare(Position),

    /// The operation only exists for another board variant (e.g. FEN in 3D).
    #[error("{operation} is not supported for the {variant:?} variant")]
    UnsupportedForVariant {
        operation: &'static str,
        variant: Variant,
    },

    /// An external collaborator (move search, persistence) reported a failure.
    #[error("collaborator failure: {0}")]
    CollaboratorFailure(String),

    /// No stored game record exists for the given identifier.
    #[error("no stored game with id {0}")]
    RecordNotFound(u64),
}
