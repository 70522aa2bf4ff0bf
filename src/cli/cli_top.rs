//! Line-oriented text front end and command loop.
//!
//! Reads one command per line, keeps the current game, and answers in the
//! style of an engine protocol: results on their own lines, diagnostics as
//! `info string ...`.

use std::io::{self, BufRead, Write};

use chrono::Local;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game::game::Game;
use crate::game_state::chess_rules::RulesConfig;
use crate::game_state::chess_types::*;
use crate::move_generation::perft::{divide, perft};
use crate::utils::long_algebraic::format_move;
use crate::utils::render_game_state::render_game_state;

const CLI_NAME: &str = "Raum Chess";

pub fn run_stdio_loop() -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut cli = CliState::new(RulesConfig::from_env());

    writeln!(stdout, "info string {CLI_NAME} ready")?;
    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = cli.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

pub struct CliState {
    game: Game,
    config: RulesConfig,
}

impl CliState {
    pub fn new(config: RulesConfig) -> Self {
        Self {
            game: Game::with_config(Variant::Classic, config),
            config,
        }
    }

    #[inline]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Handle one input line. Returns `true` when the loop should stop.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        let result = match cmd {
            "variant" => self.handle_variant(&args, out),
            "position" => self.handle_position(&args),
            "move" => self.handle_move(&args, out),
            "moves" => self.handle_moves(out),
            "status" => self.handle_status(out),
            "notation" => writeln!(out, "{}", self.game.to_notation()).map_err(io_failure),
            "fen" => self
                .game
                .to_fen()
                .and_then(|fen| writeln!(out, "{fen}").map_err(io_failure)),
            "board" => writeln!(out, "{}", render_game_state(self.game.state())).map_err(io_failure),
            "perft" => self.handle_perft(&args, out),
            "divide" => self.handle_divide(&args, out),
            "pgn" => self
                .game
                .to_pgn(Local::now().date_naive())
                .and_then(|pgn| write!(out, "{pgn}").map_err(io_failure)),
            "setoption" => self.handle_setoption(trimmed),
            "quit" => return Ok(true),
            other => {
                writeln!(out, "info string unknown command '{other}'")?;
                Ok(())
            }
        };

        if let Err(err) = result {
            writeln!(out, "info string {cmd} error: {err}")?;
        }
        Ok(false)
    }

    fn handle_variant(&mut self, args: &[&str], out: &mut impl Write) -> ChessResult<()> {
        let variant = parse_variant(args.first().copied().unwrap_or_default())?;
        self.game = Game::with_config(variant, self.config);
        writeln!(out, "info string variant {variant:?}").map_err(io_failure)
    }

    /// `position startpos|fen <fen>|notation <text> [moves m1 m2 ...]`. The
    /// current game is replaced only when every move replays.
    fn handle_position(&mut self, args: &[&str]) -> ChessResult<()> {
        let variant = self.game.variant();
        let split = args.iter().position(|tok| *tok == "moves").unwrap_or(args.len());
        let (setup, moves) = args.split_at(split);

        let mut game = match setup {
            ["startpos"] => Game::with_config(variant, self.config),
            ["fen", fen @ ..] if !fen.is_empty() => Game::from_fen(&fen.join(" "), self.config)?,
            ["notation", notation] => Game::from_notation(variant, notation, self.config)?,
            _ => {
                return Err(ChessErrors::MalformedNotation(format!(
                    "unsupported position setup '{}'",
                    setup.join(" ")
                )))
            }
        };

        for text in moves.iter().skip(1) {
            game.apply_move_str(text)?;
        }
        self.game = game;
        Ok(())
    }

    fn handle_move(&mut self, args: &[&str], out: &mut impl Write) -> ChessResult<()> {
        let text = args
            .first()
            .ok_or_else(|| ChessErrors::InvalidAlgebraic("missing move".to_owned()))?;
        let status = self.game.apply_move_str(text)?;
        writeln!(out, "info string status {status}").map_err(io_failure)
    }

    fn handle_moves(&mut self, out: &mut impl Write) -> ChessResult<()> {
        let variant = self.game.variant();
        let moves = self
            .game
            .legal_moves()?
            .into_iter()
            .map(|mv| format_move(variant, mv))
            .collect::<ChessResult<Vec<_>>>()?;
        writeln!(out, "info string legal_moves {}", moves.len()).map_err(io_failure)?;
        writeln!(out, "moves {}", moves.join(" ")).map_err(io_failure)
    }

    fn handle_status(&mut self, out: &mut impl Write) -> ChessResult<()> {
        writeln!(out, "info string status {}", self.game.status()).map_err(io_failure)?;
        if let CheckState::InCheck(king) = self.game.check_state() {
            let square = crate::utils::algebraic::position_to_algebraic(self.game.variant(), king)?;
            writeln!(out, "info string check {square}").map_err(io_failure)?;
        }
        if let Some(last) = self.game.last_move() {
            let text = format_move(self.game.variant(), Move::new(last.from, last.to))?;
            writeln!(out, "info string last_move {text}").map_err(io_failure)?;
        }
        Ok(())
    }

    fn handle_perft(&mut self, args: &[&str], out: &mut impl Write) -> ChessResult<()> {
        let depth = parse_depth(args)?;
        let nodes = perft(self.game.state(), depth)?;
        writeln!(out, "info string perft depth {depth} nodes {nodes}").map_err(io_failure)
    }

    fn handle_divide(&mut self, args: &[&str], out: &mut impl Write) -> ChessResult<()> {
        let depth = parse_depth(args)?;
        let variant = self.game.variant();
        let split = divide(self.game.state(), depth)?;
        let mut total = 0u64;
        for (mv, nodes) in &split {
            writeln!(out, "{}: {nodes}", format_move(variant, *mv)?).map_err(io_failure)?;
            total += nodes;
        }
        writeln!(out, "info string divide depth {depth} moves {} nodes {total}", split.len()).map_err(io_failure)
    }

    fn handle_setoption(&mut self, line: &str) -> ChessResult<()> {
        let mut tokens = line.split_whitespace();
        let _ = tokens.next(); // setoption

        let mut name_tokens = Vec::<&str>::new();
        let mut value_tokens = Vec::<&str>::new();
        let mut mode = "";

        for tok in tokens {
            match tok {
                "name" => mode = "name",
                "value" => mode = "value",
                _ if mode == "name" => name_tokens.push(tok),
                _ if mode == "value" => value_tokens.push(tok),
                _ => {}
            }
        }

        let name = name_tokens.join(" ");
        let value = value_tokens.join(" ");
        let invalid = || ChessErrors::MalformedNotation(format!("invalid {name} value '{value}'"));

        if name.eq_ignore_ascii_case("FiftyMoveLimit") {
            self.config.fifty_move_halfmove_limit = value.parse::<u16>().map_err(|_| invalid())?;
        } else if name.eq_ignore_ascii_case("RepetitionLimit") {
            self.config.repetition_limit = value.parse::<u8>().map_err(|_| invalid())?.max(1);
        } else {
            return Err(ChessErrors::MalformedNotation(format!("unknown option '{name}'")));
        }

        self.game.set_config(self.config);
        Ok(())
    }
}

fn parse_variant(name: &str) -> ChessResult<Variant> {
    match name.to_ascii_lowercase().as_str() {
        "classic" | "standard" => Ok(Variant::Classic),
        "raumschach" | "3d" => Ok(Variant::Raumschach),
        _ => Err(ChessErrors::MalformedNotation(format!("unknown variant '{name}'"))),
    }
}

fn parse_depth(args: &[&str]) -> ChessResult<u8> {
    let raw = args.first().copied().unwrap_or("1");
    raw.parse::<u8>()
        .map_err(|_| ChessErrors::MalformedNotation(format!("invalid depth '{raw}'")))
}

fn io_failure(err: io::Error) -> ChessErrors {
    ChessErrors::CollaboratorFailure(format!("output failed: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(cli: &mut CliState, line: &str) -> String {
        let mut out = Vec::new();
        cli.handle_command(line, &mut out).expect("writing to a Vec cannot fail");
        String::from_utf8(out).expect("output is UTF-8")
    }

    #[test]
    fn position_startpos_with_moves_updates_state() {
        let mut cli = CliState::new(RulesConfig::default());
        assert_eq!(run(&mut cli, "position startpos moves e2e4 e7e5 g1f3"), "");
        assert_eq!(cli.game().state().side_to_move, Color::Dark);
        assert_eq!(cli.game().history().len(), 3);
    }

    #[test]
    fn position_fen_then_fen_command_echoes_it() {
        let mut cli = CliState::new(RulesConfig::default());
        run(&mut cli, "position fen 4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
        assert_eq!(run(&mut cli, "fen"), "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1\n");
    }

    #[test]
    fn bad_position_keeps_previous_game() {
        let mut cli = CliState::new(RulesConfig::default());
        run(&mut cli, "position startpos moves e2e4");
        let output = run(&mut cli, "position startpos moves e2e4 e2e4");
        assert!(output.starts_with("info string position error: illegal move"));
        assert_eq!(cli.game().history().len(), 1);
    }

    #[test]
    fn variant_switch_and_cube_moves() {
        let mut cli = CliState::new(RulesConfig::default());
        assert_eq!(run(&mut cli, "variant raumschach"), "info string variant Raumschach\n");
        let output = run(&mut cli, "moves");
        assert!(output.starts_with("info string legal_moves 61\n"));
        assert!(output.contains("Ba2Ca2"));

        let output = run(&mut cli, "fen");
        assert!(output.contains("FEN is not supported for the Raumschach variant"));
    }

    #[test]
    fn perft_and_divide_report_counts() {
        let mut cli = CliState::new(RulesConfig::default());
        assert_eq!(run(&mut cli, "perft 2"), "info string perft depth 2 nodes 400\n");

        let output = run(&mut cli, "divide 1");
        assert!(output.contains("e2e4: 1\n"));
        assert!(output.ends_with("info string divide depth 1 moves 20 nodes 20\n"));
    }

    #[test]
    fn setoption_changes_rule_limits() {
        let mut cli = CliState::new(RulesConfig::default());
        run(&mut cli, "setoption name RepetitionLimit value 2");
        assert_eq!(cli.game().config().repetition_limit, 2);

        run(&mut cli, "position startpos");
        for mv in ["g1f3", "g8f6", "f3g1"] {
            run(&mut cli, &format!("move {mv}"));
        }
        assert_eq!(run(&mut cli, "move f6g8"), "info string status draw by repetition\n");

        let output = run(&mut cli, "setoption name FiftyMoveLimit value many");
        assert!(output.starts_with("info string setoption error"));
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut cli = CliState::new(RulesConfig::default());
        let mut out = Vec::new();
        assert!(cli.handle_command("quit", &mut out).expect("quit"));
        assert!(!cli.handle_command("status", &mut out).expect("status"));
    }
}
