//! PGN read/write utilities for game history interchange.
//!
//! Movetext is written in coordinate form (`e2e4`, `Ba2Ca2`). Cube games carry
//! a `Variant "Raumschach"` header; a non-standard start is stored as `FEN` on
//! the flat board and as the compact `Notation` in the cube.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_rules::starting_notation;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::make_move;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::utils::long_algebraic::{format_move, parse_move};

const RAUMSCHACH_HEADER: &str = "Raumschach";

#[derive(Debug, Clone)]
pub struct PgnGame {
    pub headers: BTreeMap<String, String>,
    pub variant: Variant,
    pub initial_state: GameState,
    pub move_history: Vec<Move>,
    pub final_state: GameState,
    pub result: String,
}

/// Write a game with the default header set, dated `date`.
pub fn write_pgn(
    initial_state: &GameState,
    move_history: &[Move],
    result: &str,
    date: NaiveDate,
) -> ChessResult<String> {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Raum Chess Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert("Date".to_owned(), date.format("%Y.%m.%d").to_string());
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), "White".to_owned());
    headers.insert("Black".to_owned(), "Black".to_owned());
    headers.insert("Result".to_owned(), normalize_result(result).to_owned());

    let variant = initial_state.variant;
    if variant == Variant::Raumschach {
        headers.insert("Variant".to_owned(), RAUMSCHACH_HEADER.to_owned());
    }

    let initial_notation = initial_state.to_notation();
    let fresh_clocks = initial_state.halfmove_clock == 0 && initial_state.fullmove_number == 1;
    if initial_notation != starting_notation(variant) || !fresh_clocks || initial_state.last_move.is_some() {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        match variant {
            Variant::Classic => headers.insert("FEN".to_owned(), initial_state.get_fen()?),
            Variant::Raumschach => headers.insert("Notation".to_owned(), initial_notation),
        };
    }

    write_pgn_with_headers(initial_state, move_history, &headers)
}

pub fn write_pgn_with_headers(
    initial_state: &GameState,
    move_history: &[Move],
    headers: &BTreeMap<String, String>,
) -> ChessResult<String> {
    let mut out = String::new();

    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let variant = initial_state.variant;
    let first_ply = match initial_state.side_to_move {
        Color::Light => 0,
        Color::Dark => 1,
    };
    let first_number = initial_state.fullmove_number as usize;

    let mut movetext_parts = Vec::<String>::with_capacity(move_history.len() + 1);
    for (i, mv) in move_history.iter().enumerate() {
        let ply = i + first_ply;
        let text = format_move(variant, *mv)?;
        let number = first_number + ply / 2;
        if ply % 2 == 0 {
            movetext_parts.push(format!("{number}. {text}"));
        } else if i == 0 {
            movetext_parts.push(format!("{number}... {text}"));
        } else {
            movetext_parts.push(text);
        }
    }

    let result = headers
        .get("Result")
        .map(|x| normalize_result(x))
        .unwrap_or("*");
    movetext_parts.push(result.to_owned());
    out.push_str(&movetext_parts.join(" "));
    out.push('\n');

    Ok(out)
}

/// Parse PGN text and replay its moves, rejecting any illegal one.
pub fn read_pgn(pgn: &str) -> ChessResult<PgnGame> {
    let mut headers = BTreeMap::<String, String>::new();
    let mut movetext_lines = Vec::<String>::new();

    for line in pgn.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('[') {
            let (k, v) = parse_header_line(trimmed)?;
            headers.insert(k, v);
        } else {
            movetext_lines.push(trimmed.to_owned());
        }
    }

    let variant = match headers.get("Variant").map(|x| x.as_str()) {
        Some(RAUMSCHACH_HEADER) => Variant::Raumschach,
        _ => Variant::Classic,
    };

    let initial_state = if headers.get("SetUp").map(|x| x.as_str()) == Some("1") {
        match (variant, headers.get("FEN"), headers.get("Notation")) {
            (Variant::Classic, Some(fen), _) => GameState::from_fen(fen)?,
            (_, _, Some(notation)) => GameState::from_notation(variant, notation)?,
            _ => {
                return Err(ChessErrors::MalformedNotation(
                    "PGN SetUp=1 is present but no starting position header".to_owned(),
                ))
            }
        }
    } else {
        GameState::new_game(variant)
    };

    let mut state = initial_state.clone();
    let mut move_history = Vec::<Move>::new();
    let mut result = "*".to_owned();

    let movetext = strip_pgn_comments_and_variations(&movetext_lines.join(" "));
    for token in movetext.split_whitespace() {
        if is_move_number_token(token) {
            continue;
        }

        let cleaned = trim_annotation_suffix(token);
        if is_result_token(cleaned) {
            result = normalize_result(cleaned).to_owned();
            break;
        }

        let mv = parse_move(variant, cleaned)?;
        if !legal_moves(&mut state)?.contains(&mv) {
            return Err(ChessErrors::IllegalMove(cleaned.to_owned()));
        }
        make_move(&mut state, mv)?;
        move_history.push(mv);
    }

    if let Some(header_result) = headers.get("Result") {
        result = normalize_result(header_result).to_owned();
    }

    Ok(PgnGame {
        headers,
        variant,
        initial_state,
        move_history,
        final_state: state,
        result,
    })
}

fn parse_header_line(line: &str) -> ChessResult<(String, String)> {
    let invalid = || ChessErrors::MalformedNotation(format!("invalid PGN header line: {line}"));
    let inner = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(invalid)?;
    let (key, value_raw) = inner.split_once(' ').ok_or_else(invalid)?;
    let value = value_raw
        .trim()
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(invalid)?
        .replace("\\\"", "\"");
    Ok((key.trim().to_owned(), value))
}

fn strip_pgn_comments_and_variations(text: &str) -> String {
    let mut out = String::new();
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;

    for ch in text.chars() {
        match ch {
            '{' => brace_depth = brace_depth.saturating_add(1),
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '(' => paren_depth = paren_depth.saturating_add(1),
            ')' => paren_depth = paren_depth.saturating_sub(1),
            _ if brace_depth == 0 && paren_depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

fn is_move_number_token(token: &str) -> bool {
    let head = token.trim_end_matches('.');
    head.len() != token.len() && !head.is_empty() && head.chars().all(|c| c.is_ascii_digit())
}

fn trim_annotation_suffix(token: &str) -> &str {
    token.trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'))
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn normalize_result(result: &str) -> &str {
    if is_result_token(result) {
        result
    } else {
        "*"
    }
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_apply::apply_move;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date")
    }

    #[test]
    fn pgn_round_trip_start_position_history() {
        let mut game = GameState::new_game(Variant::Classic);
        let mut history = Vec::<Move>::new();

        for text in ["e2e4", "e7e5", "g1f3", "b8c6"] {
            let mv = parse_move(Variant::Classic, text).expect("move should parse");
            game = apply_move(&game, mv).expect("move should apply");
            history.push(mv);
        }

        let pgn = write_pgn(&GameState::new_game(Variant::Classic), &history, "*", date())
            .expect("PGN should write");
        assert!(pgn.contains("[Date \"2024.03.09\"]"));
        assert!(pgn.contains("1. e2e4 e7e5 2. g1f3 b8c6 *"));
        assert!(!pgn.contains("SetUp"));

        let parsed = read_pgn(&pgn).expect("PGN should parse");
        assert_eq!(parsed.move_history, history);
        assert_eq!(parsed.final_state.get_fen(), game.get_fen());
        assert_eq!(parsed.result, "*");
    }

    #[test]
    fn pgn_round_trip_custom_fen_setup() {
        let initial = GameState::from_fen("4k3/8/8/8/8/8/4P3/4K3 b - - 0 7").expect("FEN should parse");
        let history = vec![
            parse_move(Variant::Classic, "e8d8").expect("move should parse"),
            parse_move(Variant::Classic, "e2e4").expect("move should parse"),
        ];

        let pgn = write_pgn(&initial, &history, "1-0", date()).expect("PGN should write");
        assert!(pgn.contains("7... e8d8 8. e2e4 1-0"));

        let parsed = read_pgn(&pgn).expect("PGN should parse");
        assert_eq!(parsed.initial_state, initial);
        assert_eq!(parsed.move_history, history);
        assert_eq!(parsed.result, "1-0");
    }

    #[test]
    fn cube_games_carry_variant_header() {
        let initial = GameState::new_game(Variant::Raumschach);
        let mv = parse_move(Variant::Raumschach, "Ba2Ca2").expect("move should parse");

        let pgn = write_pgn(&initial, &[mv], "*", date()).expect("PGN should write");
        assert!(pgn.contains("[Variant \"Raumschach\"]"));

        let parsed = read_pgn(&pgn).expect("PGN should parse");
        assert_eq!(parsed.variant, Variant::Raumschach);
        assert_eq!(parsed.move_history, vec![mv]);
    }

    #[test]
    fn illegal_movetext_is_rejected() {
        let pgn = "[Event \"x\"]\n\n1. e2e5 *\n";
        assert_eq!(
            read_pgn(pgn).map(|game| game.move_history),
            Err(ChessErrors::IllegalMove("e2e5".to_owned()))
        );
    }
}
