//! Crate root module declarations for the Raum Chess rules engine.
//!
//! This file exposes all top-level subsystems (board state, piece movement,
//! move generation, the game state machine, notation helpers, and the text
//! front end) so the binary, tests, and benches can import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod undo_state;
}

pub mod moves {
    pub mod move_descriptions;
    pub mod offsets;
    pub mod piece_catalog;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_leaper;
    pub mod legal_moves_pawn;
    pub mod legal_moves_slider;
    pub mod move_generator;
    pub mod perft;
}

pub mod game {
    pub mod collaborators;
    pub mod game;
    pub mod repetition;
    pub mod termination;
}

pub mod utils {
    pub mod algebraic;
    pub mod board_notation;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod pgn;
    pub mod random_playout;
    pub mod render_game_state;
}

pub mod cli {
    pub mod cli_top;
}
