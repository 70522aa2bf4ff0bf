//! The game state machine.
//!
//! `Game` wraps a `GameState` with everything that depends on the whole
//! history: the repetition table, the move list and the current status. Every
//! move goes through `apply_move`, which rejects illegal moves and anything
//! played after the game has ended, leaving the game untouched in both cases.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game::collaborators::{GameRecord, MoveSearchService};
use crate::game::repetition::RepetitionTable;
use crate::game::termination::evaluate_status;
use crate::game_state::chess_rules::RulesConfig;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::make_move;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::{legal_moves, legal_moves_from};
use crate::utils::long_algebraic::{format_move, parse_move};
use crate::utils::pgn::write_pgn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing(Color),
    Checkmate { winner: Color },
    Stalemate,
    DrawByRepetition,
    DrawByFiftyMove,
    DrawByInsufficientMaterial,
}

impl GameStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Ongoing(_))
    }

    /// PGN result token.
    pub fn result_token(self) -> &'static str {
        match self {
            GameStatus::Ongoing(_) => "*",
            GameStatus::Checkmate { winner: Color::Light } => "1-0",
            GameStatus::Checkmate { winner: Color::Dark } => "0-1",
            _ => "1/2-1/2",
        }
    }
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::Light => "white",
        Color::Dark => "black",
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing(side) => write!(f, "ongoing, {} to move", color_name(*side)),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {} wins", color_name(*winner)),
            GameStatus::Stalemate => write!(f, "stalemate"),
            GameStatus::DrawByRepetition => write!(f, "draw by repetition"),
            GameStatus::DrawByFiftyMove => write!(f, "draw by fifty-move rule"),
            GameStatus::DrawByInsufficientMaterial => write!(f, "draw by insufficient material"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    initial_state: GameState,
    state: GameState,
    status: GameStatus,
    repetition: RepetitionTable,
    history: Vec<Move>,
    config: RulesConfig,
}

impl Game {
    pub fn new(variant: Variant) -> Self {
        Self::with_config(variant, RulesConfig::default())
    }

    pub fn with_config(variant: Variant, config: RulesConfig) -> Self {
        let state = GameState::new_game(variant);
        let mut repetition = RepetitionTable::new();
        repetition.record(&state);
        Self {
            initial_state: state.clone(),
            state,
            status: GameStatus::Ongoing(Color::Light),
            repetition,
            history: Vec::new(),
            config,
        }
    }

    /// Start from an arbitrary position. The status is evaluated immediately,
    /// so a position that is already mate starts out terminal.
    pub fn from_state(state: GameState, config: RulesConfig) -> ChessResult<Self> {
        let mut repetition = RepetitionTable::new();
        repetition.record(&state);
        let mut scratch = state.clone();
        let status = evaluate_status(&mut scratch, &repetition, &config)?;
        Ok(Self {
            initial_state: state.clone(),
            state,
            status,
            repetition,
            history: Vec::new(),
            config,
        })
    }

    pub fn from_notation(variant: Variant, notation: &str, config: RulesConfig) -> ChessResult<Self> {
        Self::from_state(GameState::from_notation(variant, notation)?, config)
    }

    pub fn from_fen(fen: &str, config: RulesConfig) -> ChessResult<Self> {
        Self::from_state(GameState::from_fen(fen)?, config)
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.state.variant
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn initial_state(&self) -> &GameState {
        &self.initial_state
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    #[inline]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// New limits apply from the next move on.
    pub fn set_config(&mut self, config: RulesConfig) {
        self.config = config;
    }

    #[inline]
    pub fn repetition_count(&self) -> u8 {
        self.repetition.occurrences(&self.state)
    }

    pub fn legal_moves(&self) -> ChessResult<Vec<Move>> {
        let mut scratch = self.state.clone();
        legal_moves(&mut scratch)
    }

    /// Legal destinations of the piece on `from`, for highlighting.
    pub fn legal_destinations(&self, from: Position) -> ChessResult<Vec<Position>> {
        let mut scratch = self.state.clone();
        let mut destinations: Vec<Position> = legal_moves_from(&mut scratch, from)?
            .into_iter()
            .map(|mv| mv.to)
            .collect();
        destinations.dedup();
        Ok(destinations)
    }

    /// Every movable piece with its legal destinations.
    pub fn legal_moves_by_origin(&self) -> ChessResult<BTreeMap<Position, Vec<Position>>> {
        let mut by_origin = BTreeMap::<Position, Vec<Position>>::new();
        for mv in self.legal_moves()? {
            let destinations = by_origin.entry(mv.from).or_default();
            if !destinations.contains(&mv.to) {
                destinations.push(mv.to);
            }
        }
        Ok(by_origin)
    }

    #[inline]
    pub fn check_state(&self) -> CheckState {
        is_in_check(&self.state, self.state.side_to_move)
    }

    #[inline]
    pub fn last_move(&self) -> Option<LastMove> {
        self.state.last_move
    }

    /// Play `mv` and return the resulting status.
    pub fn apply_move(&mut self, mv: Move) -> ChessResult<GameStatus> {
        if self.status.is_terminal() {
            return Err(ChessErrors::GameAlreadyOver(self.status));
        }
        let mut next = self.state.clone();
        if !legal_moves(&mut next)?.contains(&mv) {
            let text = format_move(self.variant(), mv).unwrap_or_else(|_| format!("{mv:?}"));
            return Err(ChessErrors::IllegalMove(text));
        }

        make_move(&mut next, mv)?;
        let mut repetition = self.repetition.clone();
        repetition.record(&next);
        let mut scratch = next.clone();
        let status = evaluate_status(&mut scratch, &repetition, &self.config)?;

        self.state = next;
        self.repetition = repetition;
        self.history.push(mv);
        self.status = status;
        Ok(status)
    }

    /// Parse a coordinate move string and play it.
    pub fn apply_move_str(&mut self, text: &str) -> ChessResult<GameStatus> {
        let mv = parse_move(self.variant(), text)?;
        self.apply_move(mv)
    }

    /// Ask the search service for a move on the current position and play it
    /// if it is legal. Only the classic board has a search service.
    pub fn apply_search_reply(&mut self, service: &dyn MoveSearchService, depth: u8) -> ChessResult<Move> {
        if self.variant() != Variant::Classic {
            return Err(ChessErrors::UnsupportedForVariant {
                operation: "move search",
                variant: self.variant(),
            });
        }
        if self.status.is_terminal() {
            return Err(ChessErrors::GameAlreadyOver(self.status));
        }

        let fen = self.state.get_fen()?;
        let reply = service.best_move(&fen, depth)?;
        let mv = parse_move(Variant::Classic, &reply)
            .map_err(|err| ChessErrors::CollaboratorFailure(format!("unreadable search reply '{reply}': {err}")))?;
        self.apply_move(mv)?;
        Ok(mv)
    }

    pub fn to_notation(&self) -> String {
        self.state.to_notation()
    }

    pub fn to_fen(&self) -> ChessResult<String> {
        self.state.get_fen()
    }

    /// Snapshot for the persistence layer. Classic positions are stored as FEN
    /// so clocks and rights survive; cube positions use the compact notation.
    pub fn to_record(&self) -> ChessResult<GameRecord> {
        let move_history = self
            .history
            .iter()
            .map(|mv| format_move(self.variant(), *mv))
            .collect::<ChessResult<Vec<_>>>()?;
        Ok(GameRecord {
            initial_notation: record_notation(&self.initial_state)?,
            move_history,
            current_notation: record_notation(&self.state)?,
        })
    }

    /// Rebuild a game by replaying a stored history, then check the result
    /// against the stored current position.
    pub fn from_record(variant: Variant, record: &GameRecord, config: RulesConfig) -> ChessResult<Self> {
        let initial = decode_record_notation(variant, &record.initial_notation)?;
        let mut game = Self::from_state(initial, config)?;
        for text in &record.move_history {
            game.apply_move_str(text)?;
        }

        let stored = decode_record_notation(variant, &record.current_notation)?;
        if stored.placement() != game.state.placement() || stored.side_to_move != game.state.side_to_move {
            return Err(ChessErrors::CollaboratorFailure(
                "stored position does not match the replayed move history".to_owned(),
            ));
        }
        Ok(game)
    }

    pub fn to_pgn(&self, date: NaiveDate) -> ChessResult<String> {
        write_pgn(&self.initial_state, &self.history, self.status.result_token(), date)
    }
}

fn record_notation(state: &GameState) -> ChessResult<String> {
    match state.variant {
        Variant::Classic => state.get_fen(),
        Variant::Raumschach => Ok(state.to_notation()),
    }
}

/// Compact notation starts with `/`; anything else on the flat board is FEN.
fn decode_record_notation(variant: Variant, text: &str) -> ChessResult<GameState> {
    if text.starts_with('/') {
        GameState::from_notation(variant, text)
    } else if variant == Variant::Classic {
        GameState::from_fen(text)
    } else {
        Err(ChessErrors::MalformedNotation(format!("not a cube notation: {text}")))
    }
}
