// Piece-square tables, in pawns, from White's point of view.
// Index = rank * 8 + file with A1 = 0; Black pieces read the vertically mirrored square.

use crate::types::Score;

pub const PAWN_VALUE: Score = 1.0;
pub const KNIGHT_VALUE: Score = 3.0;
pub const BISHOP_VALUE: Score = 3.25;
pub const ROOK_VALUE: Score = 5.0;
pub const QUEEN_VALUE: Score = 9.0;
pub const KING_VALUE: Score = 0.0;

/// Non-pawn, non-king material of both sides in the initial position.
pub const TOTAL_PHASE_MATERIAL: Score =
    2.0 * (2.0 * KNIGHT_VALUE + 2.0 * BISHOP_VALUE + 2.0 * ROOK_VALUE + QUEEN_VALUE);

#[rustfmt::skip]
pub static PAWN_TABLE: [Score; 64] = [
     0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,
     0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,
     0.1,  0.1,  0.2,  0.3,  0.3,  0.2,  0.1,  0.1,
    0.15, 0.15,  0.2, 0.35, 0.35,  0.2, 0.15, 0.15,
     0.2,  0.2,  0.3,  0.4,  0.4,  0.3,  0.2,  0.2,
     0.3,  0.3,  0.4,  0.5,  0.5,  0.4,  0.3,  0.3,
     0.5,  0.5,  0.6,  0.7,  0.7,  0.6,  0.5,  0.5,
     0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,
];

// rim knights are dim
#[rustfmt::skip]
pub static KNIGHT_TABLE: [Score; 64] = [
    -0.5, -0.4, -0.3, -0.3, -0.3, -0.3, -0.4, -0.5,
    -0.4, -0.2,  0.0,  0.0,  0.0,  0.0, -0.2, -0.4,
    -0.3,  0.0,  0.1, 0.15, 0.15,  0.1,  0.0, -0.3,
    -0.3, 0.05, 0.15,  0.2,  0.2, 0.15, 0.05, -0.3,
    -0.3,  0.0, 0.15,  0.2,  0.2, 0.15,  0.0, -0.3,
    -0.3, 0.05,  0.1, 0.15, 0.15,  0.1, 0.05, -0.3,
    -0.4, -0.2,  0.0, 0.05, 0.05,  0.0, -0.2, -0.4,
    -0.5, -0.4, -0.3, -0.3, -0.3, -0.3, -0.4, -0.5,
];

#[rustfmt::skip]
pub static BISHOP_TABLE: [Score; 64] = [
    -0.2, -0.1, -0.1, -0.1, -0.1, -0.1, -0.1, -0.2,
    -0.1,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0, -0.1,
    -0.1,  0.0, 0.05,  0.1,  0.1, 0.05,  0.0, -0.1,
    -0.1, 0.05, 0.05,  0.1,  0.1, 0.05, 0.05, -0.1,
    -0.1,  0.0,  0.1,  0.1,  0.1,  0.1,  0.0, -0.1,
    -0.1,  0.1,  0.1,  0.1,  0.1,  0.1,  0.1, -0.1,
    -0.1, 0.05,  0.0,  0.0,  0.0,  0.0, 0.05, -0.1,
    -0.2, -0.1, -0.1, -0.1, -0.1, -0.1, -0.1, -0.2,
];

// seventh rank bonus
#[rustfmt::skip]
pub static ROOK_TABLE: [Score; 64] = [
     0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,
    0.05,  0.1,  0.1,  0.1,  0.1,  0.1,  0.1, 0.05,
   -0.05,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0, -0.05,
   -0.05,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0, -0.05,
   -0.05,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0, -0.05,
   -0.05,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0, -0.05,
    0.25, 0.25, 0.25, 0.25, 0.25, 0.25, 0.25, 0.25,
     0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,
];

/// King behind its pawns, preferably castled.
#[rustfmt::skip]
pub static KING_MG_TABLE: [Score; 64] = [
     0.2,  0.3,  0.1,  0.0,  0.0,  0.1,  0.3,  0.2,
     0.2,  0.2,  0.0,  0.0,  0.0,  0.0,  0.2,  0.2,
    -0.1, -0.2, -0.2, -0.2, -0.2, -0.2, -0.2, -0.1,
    -0.2, -0.3, -0.3, -0.4, -0.4, -0.3, -0.3, -0.2,
    -0.3, -0.4, -0.4, -0.5, -0.5, -0.4, -0.4, -0.3,
    -0.3, -0.4, -0.4, -0.5, -0.5, -0.4, -0.4, -0.3,
    -0.3, -0.4, -0.4, -0.5, -0.5, -0.4, -0.4, -0.3,
    -0.3, -0.4, -0.4, -0.5, -0.5, -0.4, -0.4, -0.3,
];

/// Centralised king for the endgame.
#[rustfmt::skip]
pub static KING_EG_TABLE: [Score; 64] = [
    -0.5, -0.3, -0.3, -0.3, -0.3, -0.3, -0.3, -0.5,
    -0.3, -0.3,  0.0,  0.0,  0.0,  0.0, -0.3, -0.3,
    -0.3, -0.1,  0.2,  0.3,  0.3,  0.2, -0.1, -0.3,
    -0.3, -0.1,  0.3,  0.4,  0.4,  0.3, -0.1, -0.3,
    -0.3, -0.1,  0.3,  0.4,  0.4,  0.3, -0.1, -0.3,
    -0.3, -0.1,  0.2,  0.3,  0.3,  0.2, -0.1, -0.3,
    -0.3, -0.2, -0.1,  0.0,  0.0, -0.1, -0.2, -0.3,
    -0.5, -0.4, -0.3, -0.2, -0.2, -0.3, -0.4, -0.5,
];

/// Passed pawn bonus by rank relative to the pawn's owner (rank 1 = index 0).
pub static PASSED_PAWN_BONUS: [Score; 8] = [0.0, 0.05, 0.1, 0.2, 0.35, 0.6, 1.0, 0.0];

pub const MOBILITY_WEIGHT: Score = 0.1;

pub const SHIELD_PAWN_PENALTY: Score = 0.3;
pub const OPEN_FILE_PENALTY: Score = 0.25;
pub const ATTACKED_ZONE_PENALTY: Score = 0.1;
