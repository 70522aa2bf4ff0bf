use raum_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use raum_chess::move_generation::perft::{perft, perft_counts};
use raum_chess::utils::fen_parser::parse_fen;

fn assert_perft(fen: &str, expected: &[u64]) {
    let game_state = parse_fen(fen).expect("reference FEN should parse");
    for (depth_idx, &nodes) in expected.iter().enumerate() {
        let depth = (depth_idx + 1) as u8;
        assert_eq!(
            perft(&game_state, depth).expect("perft should run"),
            nodes,
            "{fen} depth {depth}"
        );
    }
}

#[test]
fn starting_position() {
    assert_perft(STARTING_POSITION_FEN, &[20, 400, 8902]);
}

#[test]
fn kiwipete() {
    assert_perft(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        &[48, 2039],
    );
}

#[test]
fn rook_endgame_with_en_passant_pins() {
    assert_perft("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", &[14, 191, 2812]);
}

#[test]
fn promotions_and_castling_out_of_check() {
    assert_perft(
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        &[6, 264],
    );
    assert_perft(
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        &[44, 1486],
    );
}

#[test]
fn kiwipete_classification_at_depth_two() {
    let game_state = parse_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
        .expect("reference FEN should parse");
    let counts = perft_counts(&game_state, 2).expect("perft should run");

    assert_eq!(counts.nodes, 2039);
    assert_eq!(counts.captures, 351);
    assert_eq!(counts.en_passant, 1);
    assert_eq!(counts.castles, 91);
    assert_eq!(counts.promotions, 0);
    assert_eq!(counts.checks, 3);
    assert_eq!(counts.checkmates, 0);
}
