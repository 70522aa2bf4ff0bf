//! Static step and ray tables for both geometries.
//!
//! Every table is declared once and shared; pieces never carry their own copy.
//! Order inside a table is the emission order of the move generator.

use crate::game_state::chess_types::Offset;

const fn o(dx: i8, dy: i8, dz: i8) -> Offset {
    Offset::new(dx, dy, dz)
}

pub const ROOK_DIRS_2D: [Offset; 4] = [o(1, 0, 0), o(-1, 0, 0), o(0, 1, 0), o(0, -1, 0)];

pub const BISHOP_DIRS_2D: [Offset; 4] = [o(1, 1, 0), o(1, -1, 0), o(-1, 1, 0), o(-1, -1, 0)];

pub const QUEEN_DIRS_2D: [Offset; 8] = [
    o(1, 0, 0),
    o(-1, 0, 0),
    o(0, 1, 0),
    o(0, -1, 0),
    o(1, 1, 0),
    o(1, -1, 0),
    o(-1, 1, 0),
    o(-1, -1, 0),
];

pub const KING_STEPS_2D: [Offset; 8] = QUEEN_DIRS_2D;

pub const KNIGHT_LEAPS_2D: [Offset; 8] = [
    o(-2, -1, 0),
    o(-2, 1, 0),
    o(-1, -2, 0),
    o(-1, 2, 0),
    o(1, -2, 0),
    o(1, 2, 0),
    o(2, -1, 0),
    o(2, 1, 0),
];

pub const ROOK_DIRS_3D: [Offset; 6] = [
    o(1, 0, 0),
    o(-1, 0, 0),
    o(0, 1, 0),
    o(0, -1, 0),
    o(0, 0, 1),
    o(0, 0, -1),
];

/// Two-axis diagonals in every axis pair.
pub const BISHOP_DIRS_3D: [Offset; 12] = [
    o(1, 1, 0),
    o(1, -1, 0),
    o(-1, 1, 0),
    o(-1, -1, 0),
    o(1, 0, 1),
    o(1, 0, -1),
    o(-1, 0, 1),
    o(-1, 0, -1),
    o(0, 1, 1),
    o(0, 1, -1),
    o(0, -1, 1),
    o(0, -1, -1),
];

/// Three-axis diagonals through the cube corners.
pub const UNICORN_DIRS_3D: [Offset; 8] = [
    o(1, 1, 1),
    o(1, 1, -1),
    o(1, -1, 1),
    o(1, -1, -1),
    o(-1, 1, 1),
    o(-1, 1, -1),
    o(-1, -1, 1),
    o(-1, -1, -1),
];

pub const QUEEN_DIRS_3D: [Offset; 26] = concat_dirs(ROOK_DIRS_3D, BISHOP_DIRS_3D, UNICORN_DIRS_3D);

pub const KING_STEPS_3D: [Offset; 26] = QUEEN_DIRS_3D;

/// One step along one axis and two along another, in every axis pair.
pub const KNIGHT_LEAPS_3D: [Offset; 24] = [
    o(-2, -1, 0),
    o(-2, 1, 0),
    o(-1, -2, 0),
    o(-1, 2, 0),
    o(1, -2, 0),
    o(1, 2, 0),
    o(2, -1, 0),
    o(2, 1, 0),
    o(-2, 0, -1),
    o(-2, 0, 1),
    o(-1, 0, -2),
    o(-1, 0, 2),
    o(1, 0, -2),
    o(1, 0, 2),
    o(2, 0, -1),
    o(2, 0, 1),
    o(0, -2, -1),
    o(0, -2, 1),
    o(0, -1, -2),
    o(0, -1, 2),
    o(0, 1, -2),
    o(0, 1, 2),
    o(0, 2, -1),
    o(0, 2, 1),
];

const fn concat_dirs(rook: [Offset; 6], bishop: [Offset; 12], unicorn: [Offset; 8]) -> [Offset; 26] {
    let mut out = [o(0, 0, 0); 26];
    let mut i = 0usize;
    while i < 6 {
        out[i] = rook[i];
        i += 1;
    }
    let mut j = 0usize;
    while j < 12 {
        out[6 + j] = bishop[j];
        j += 1;
    }
    let mut k = 0usize;
    while k < 8 {
        out[18 + k] = unicorn[k];
        k += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn three_dimensional_queen_covers_every_neighbour_once() {
        let unique: HashSet<_> = QUEEN_DIRS_3D.iter().copied().collect();
        assert_eq!(unique.len(), 26);
        assert!(!unique.contains(&Offset::new(0, 0, 0)));
    }

    #[test]
    fn three_dimensional_knight_leaps_are_one_two_zero_permutations() {
        let unique: HashSet<_> = KNIGHT_LEAPS_3D.iter().copied().collect();
        assert_eq!(unique.len(), 24);
        for leap in KNIGHT_LEAPS_3D {
            let mut magnitudes = [leap.dx.abs(), leap.dy.abs(), leap.dz.abs()];
            magnitudes.sort_unstable();
            assert_eq!(magnitudes, [0, 1, 2]);
        }
    }
}
