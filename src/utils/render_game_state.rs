//! Terminal-oriented Unicode board renderer.
//!
//! The flat board prints as one grid. The cube prints one grid per level, top
//! level first, each headed by its level letter.

use crate::game_state::chess_types::*;

/// Render the board to a Unicode string for terminal output.
pub fn render_game_state(game_state: &GameState) -> String {
    let geometry = game_state.geometry();
    let files: String = (0..geometry.extent)
        .map(|x| char::from(b'a' + x as u8).to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let mut grids = Vec::new();
    for z in (0..geometry.levels()).rev() {
        let mut out = String::new();
        if geometry.dimensions == 3 {
            out.push_str(&format!("Level {}\n", char::from(b'A' + z as u8)));
        }
        out.push_str(&format!("  {files}\n"));

        for y in (0..geometry.extent).rev() {
            let rank = char::from(b'1' + y as u8);
            out.push(rank);
            out.push(' ');

            let cells: Vec<String> = (0..geometry.extent)
                .map(|x| match game_state.piece_at(Position::new(x, y, z)) {
                    Some(piece) => piece_to_unicode(piece.color, piece.kind).to_string(),
                    None => '·'.to_string(),
                })
                .collect();
            out.push_str(&cells.join(" "));

            out.push(' ');
            out.push(rank);
            out.push('\n');
        }

        out.push_str(&format!("  {files}"));
        grids.push(out);
    }

    grids.join("\n\n")
}

fn piece_to_unicode(color: Color, piece: PieceKind) -> char {
    match (color, piece) {
        (Color::Light, PieceKind::Pawn) => '♙',
        (Color::Light, PieceKind::Knight) => '♘',
        (Color::Light, PieceKind::Bishop) => '♗',
        (Color::Light, PieceKind::Rook) => '♖',
        (Color::Light, PieceKind::Queen) => '♕',
        (Color::Light, PieceKind::King) => '♔',
        (Color::Light, PieceKind::Unicorn) => 'U',
        (Color::Dark, PieceKind::Pawn) => '♟',
        (Color::Dark, PieceKind::Knight) => '♞',
        (Color::Dark, PieceKind::Bishop) => '♝',
        (Color::Dark, PieceKind::Rook) => '♜',
        (Color::Dark, PieceKind::Queen) => '♛',
        (Color::Dark, PieceKind::King) => '♚',
        (Color::Dark, PieceKind::Unicorn) => 'u',
    }
}
