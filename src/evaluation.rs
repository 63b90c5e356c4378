use crate::board::{Board, BoardStatus, Color, Role, Square};

use crate::pst::{
    ATTACKED_ZONE_PENALTY, BISHOP_TABLE, BISHOP_VALUE, KING_EG_TABLE, KING_MG_TABLE, KING_VALUE,
    KNIGHT_TABLE, KNIGHT_VALUE, MOBILITY_WEIGHT, OPEN_FILE_PENALTY, PASSED_PAWN_BONUS, PAWN_TABLE,
    PAWN_VALUE, QUEEN_VALUE, ROOK_TABLE, ROOK_VALUE, SHIELD_PAWN_PENALTY, TOTAL_PHASE_MATERIAL,
};
use crate::types::{Difficulty, EvalWeights, Score, SCORE_MATE};

pub fn piece_value(role: Role) -> Score {
    match role {
        Role::Pawn => PAWN_VALUE,
        Role::Knight => KNIGHT_VALUE,
        Role::Bishop => BISHOP_VALUE,
        Role::Rook => ROOK_VALUE,
        Role::Queen => QUEEN_VALUE,
        Role::King => KING_VALUE,
    }
}

/// Index into a White-oriented table: Black reads the mirrored square.
fn pst_index(sq: Square, color: Color) -> usize {
    match color {
        Color::White => sq as usize,
        Color::Black => sq.flip_vertical() as usize,
    }
}

fn signed(color: Color, value: Score) -> Score {
    match color {
        Color::White => value,
        Color::Black => -value,
    }
}

fn square_at(file: i32, rank: i32) -> Option<Square> {
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Some(Square::new((rank * 8 + file) as u32))
    } else {
        None
    }
}

/// Evaluates the position with default weights. Positive favours White.
pub fn evaluate(board: &Board, difficulty: Difficulty) -> Score {
    evaluate_weighted(board, difficulty, &EvalWeights::default())
}

/// Evaluates the position from White's point of view.
///
/// Each tier adds terms on top of the previous one: Easy counts material,
/// Medium adds piece-square tables, mobility and passed pawns, Hard adds
/// king safety. Checkmate is ±10000 and every draw is exactly 0, whatever
/// the weights.
pub fn evaluate_weighted(board: &Board, difficulty: Difficulty, weights: &EvalWeights) -> Score {
    match board.status() {
        BoardStatus::Ongoing => {}
        BoardStatus::Checkmate => return signed(board.side_to_move(), -SCORE_MATE),
        _ => return 0.0,
    }

    let mut score = weights.material * material(board);

    if difficulty >= Difficulty::Medium {
        let phase = game_phase(board);
        score += weights.piece_square * (piece_positions(board, phase) + passed_pawns(board, phase));
        score += weights.mobility * mobility(board) * MOBILITY_WEIGHT;
    }

    if difficulty >= Difficulty::Hard {
        score += weights.king_safety * king_safety(board);
    }

    score
}

/// Material balance from White's point of view.
pub fn material(board: &Board) -> Score {
    board
        .pieces()
        .map(|(_, piece)| signed(piece.color, piece_value(piece.role)))
        .sum()
}

/// 1.0 with all minor and major pieces on the board, 0.0 with none left.
pub fn game_phase(board: &Board) -> Score {
    let remaining: Score = board
        .pieces()
        .filter(|(_, piece)| !matches!(piece.role, Role::Pawn | Role::King))
        .map(|(_, piece)| piece_value(piece.role))
        .sum();
    (remaining / TOTAL_PHASE_MATERIAL).clamp(0.0, 1.0)
}

fn piece_positions(board: &Board, phase: Score) -> Score {
    let mut score = 0.0;

    for (sq, piece) in board.pieces() {
        let idx = pst_index(sq, piece.color);
        let bonus = match piece.role {
            Role::Pawn => PAWN_TABLE[idx],
            Role::Knight => KNIGHT_TABLE[idx],
            Role::Bishop => BISHOP_TABLE[idx],
            Role::Rook => ROOK_TABLE[idx],
            Role::King => phase * KING_MG_TABLE[idx] + (1.0 - phase) * KING_EG_TABLE[idx],
            Role::Queen => 0.0,
        };
        score += signed(piece.color, bonus);
    }

    score
}

/// True if no enemy pawn stands ahead of `sq` on its file or an adjacent one.
pub fn is_passed_pawn(board: &Board, sq: Square, color: Color) -> bool {
    let file = sq.file() as i32;
    let rank = sq.rank() as i32;

    !board.pieces().any(|(other, piece)| {
        if piece.role != Role::Pawn || piece.color == color {
            return false;
        }
        let other_file = other.file() as i32;
        let other_rank = other.rank() as i32;
        let ahead = match color {
            Color::White => other_rank > rank,
            Color::Black => other_rank < rank,
        };
        ahead && (other_file - file).abs() <= 1
    })
}

fn passed_pawns(board: &Board, phase: Score) -> Score {
    let endgame_scale = 1.0 + (1.0 - phase);
    let mut score = 0.0;

    for (sq, piece) in board.pieces() {
        if piece.role != Role::Pawn || !is_passed_pawn(board, sq, piece.color) {
            continue;
        }
        let relative_rank = match piece.color {
            Color::White => sq.rank() as usize,
            Color::Black => 7 - sq.rank() as usize,
        };
        score += signed(piece.color, PASSED_PAWN_BONUS[relative_rank] * endgame_scale);
    }

    score
}

/// Legal move count of the side to move, signed towards White.
fn mobility(board: &Board) -> Score {
    signed(board.side_to_move(), board.legal_moves().len() as Score)
}

/// King safety from White's point of view: White's term minus Black's.
pub fn king_safety(board: &Board) -> Score {
    let mut score = 0.0;
    for color in [Color::White, Color::Black] {
        if let Some(king_sq) = board.king_square(color) {
            score += signed(color, -king_danger(board, king_sq, color));
        }
    }
    score
}

/// Penalty for one king: missing shield pawns, open files nearby and
/// attacked squares around it. Larger is worse.
fn king_danger(board: &Board, king_sq: Square, color: Color) -> Score {
    let king_file = king_sq.file() as i32;
    let king_rank = king_sq.rank() as i32;
    let shield_rank = match color {
        Color::White => king_rank + 1,
        Color::Black => king_rank - 1,
    };

    let mut shield_pawns = 0;
    let mut open_files = 0;

    for file in king_file - 1..=king_file + 1 {
        let shielded = square_at(file, shield_rank)
            .and_then(|sq| board.piece_on(sq))
            .is_some_and(|p| p.role == Role::Pawn && p.color == color);
        if shielded {
            shield_pawns += 1;
        }

        if (0..8).contains(&file) {
            let has_pawn = (0..8).any(|rank| {
                square_at(file, rank)
                    .and_then(|sq| board.piece_on(sq))
                    .is_some_and(|p| p.role == Role::Pawn)
            });
            if !has_pawn {
                open_files += 1;
            }
        }
    }

    let mut attacked = 0;
    for rank in king_rank - 1..=king_rank + 1 {
        for file in king_file - 1..=king_file + 1 {
            if let Some(sq) = square_at(file, rank)
                && board.is_square_attacked(sq, color.other())
            {
                attacked += 1;
            }
        }
    }

    (3 - shield_pawns) as Score * SHIELD_PAWN_PENALTY
        + open_files as Score * OPEN_FILE_PENALTY
        + attacked as Score * ATTACKED_ZONE_PENALTY
}
