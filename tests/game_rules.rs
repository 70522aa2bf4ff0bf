use raum_chess::chess_errors::ChessErrors;
use raum_chess::game::game::{Game, GameStatus};
use raum_chess::game_state::chess_rules::RulesConfig;
use raum_chess::game_state::chess_types::{Color, Variant};

fn play(game: &mut Game, moves: &[&str]) -> GameStatus {
    let mut status = game.status();
    for text in moves {
        status = game.apply_move_str(text).unwrap_or_else(|err| panic!("{text} should be legal: {err}"));
    }
    status
}

#[test]
fn fools_mate_ends_the_game() {
    let mut game = Game::new(Variant::Classic);
    let status = play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);

    assert_eq!(status, GameStatus::Checkmate { winner: Color::Dark });
    assert!(matches!(
        game.apply_move_str("a2a3"),
        Err(ChessErrors::GameAlreadyOver(GameStatus::Checkmate { .. }))
    ));
}

#[test]
fn back_rank_mate_versus_stalemate() {
    let mut mate = Game::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", RulesConfig::default())
        .expect("FEN should parse");
    assert_eq!(
        mate.apply_move_str("a1a8").expect("rook move"),
        GameStatus::Checkmate { winner: Color::Light }
    );

    let mut stalemate = Game::from_fen("7k/8/6K1/5Q2/8/8/8/8 w - - 0 1", RulesConfig::default())
        .expect("FEN should parse");
    assert_eq!(stalemate.apply_move_str("f5f7").expect("queen move"), GameStatus::Stalemate);
}

#[test]
fn en_passant_expires_after_one_move() {
    let mut game = Game::new(Variant::Classic);
    play(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5"]);

    let mut immediate = game.clone();
    immediate.apply_move_str("e5d6").expect("en passant right after the double step");
    assert!(immediate.state().piece_at(game.state().last_move.expect("last move").to).is_none());

    play(&mut game, &["h2h3", "h7h6"]);
    assert!(matches!(game.apply_move_str("e5d6"), Err(ChessErrors::IllegalMove(_))));
}

#[test]
fn knight_shuffle_draws_on_third_occurrence() {
    let mut game = Game::new(Variant::Classic);
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];

    assert!(!play(&mut game, &shuffle).is_terminal());
    assert_eq!(game.repetition_count(), 2);
    play(&mut game, &shuffle[..3]);
    assert_eq!(game.apply_move_str("f6g8").expect("knight move"), GameStatus::DrawByRepetition);
}

#[test]
fn bare_kings_after_capture() {
    let mut game = Game::from_fen("8/8/4k3/8/8/3rK3/8/8 w - - 0 1", RulesConfig::default())
        .expect("FEN should parse");
    assert_eq!(
        game.apply_move_str("e3d3").expect("capture"),
        GameStatus::DrawByInsufficientMaterial
    );
}

#[test]
fn positions_with_a_capturable_king_are_refused() {
    assert!(matches!(
        Game::from_notation(Variant::Classic, "/4k2R/8/8/8/8/8/8/4K3/#w#", RulesConfig::default()),
        Err(ChessErrors::MalformedNotation(_))
    ));
    assert!(matches!(
        Game::from_fen("4k2R/8/8/8/8/8/8/4K3 w - - 0 1", RulesConfig::default()),
        Err(ChessErrors::MalformedNotation(_))
    ));

    let game = Game::from_fen("4k2R/8/8/8/8/8/8/4K3 b - - 0 1", RulesConfig::default())
        .expect("checked side to move is a normal position");
    assert!(game.check_state().is_check());
}

#[test]
fn fifty_move_rule_uses_configured_limit() {
    let fen = "4k3/8/8/8/8/8/8/R3K3 w - - 99 80";
    let mut game = Game::from_fen(fen, RulesConfig::default()).expect("FEN should parse");
    assert_eq!(game.apply_move_str("a1a2").expect("rook move"), GameStatus::DrawByFiftyMove);

    let relaxed = RulesConfig {
        fifty_move_halfmove_limit: 150,
        ..RulesConfig::default()
    };
    let mut game = Game::from_fen(fen, relaxed).expect("FEN should parse");
    assert_eq!(game.apply_move_str("a1a2").expect("rook move"), GameStatus::Ongoing(Color::Dark));
}

#[test]
fn castling_is_refused_through_an_attacked_square() {
    let mut game = Game::from_fen("4k3/8/8/8/8/8/5r2/R3K2R w KQ - 0 1", RulesConfig::default())
        .expect("FEN should parse");
    assert!(matches!(game.apply_move_str("e1g1"), Err(ChessErrors::IllegalMove(_))));
    game.apply_move_str("e1c1").expect("queenside path is safe");
}

#[test]
fn notation_round_trip_through_a_new_game() {
    let mut game = Game::new(Variant::Classic);
    play(&mut game, &["d2d4", "g8f6", "c2c4", "e7e6", "b1c3", "f8b4"]);

    let restored = Game::from_notation(Variant::Classic, &game.to_notation(), RulesConfig::default())
        .expect("encoded notation should decode");
    assert_eq!(restored.state().placement(), game.state().placement());
    assert_eq!(restored.state().side_to_move, Color::Light);

    let sorted = |game: &Game| {
        let mut moves = game.legal_moves().expect("moves");
        moves.sort();
        moves
    };
    assert_eq!(sorted(&restored), sorted(&game));
}
