use std::fmt;
use std::str::FromStr;

use shakmaty::fen::Fen;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, File, Move, Piece, Position, Role, Square};

use super::chessmove::ChessMove;
use crate::error::{EngineError, Result};

/// Outcome of [`Board::status`], in the order the rules are checked.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BoardStatus {
    Ongoing,
    Checkmate,
    Stalemate,
    DrawInsufficientMaterial,
    DrawFivefoldRepetition,
    DrawSeventyFiveMoveRule,
    DrawThreefoldRepetition,
    DrawFiftyMoveRule,
}

impl BoardStatus {
    pub fn is_draw(self) -> bool {
        !matches!(self, BoardStatus::Ongoing | BoardStatus::Checkmate)
    }
}

impl fmt::Display for BoardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BoardStatus::Ongoing => "ongoing",
            BoardStatus::Checkmate => "checkmate",
            BoardStatus::Stalemate => "stalemate",
            BoardStatus::DrawInsufficientMaterial => "draw (insufficient material)",
            BoardStatus::DrawFivefoldRepetition => "draw (fivefold repetition)",
            BoardStatus::DrawSeventyFiveMoveRule => "draw (seventy-five-move rule)",
            BoardStatus::DrawThreefoldRepetition => "draw (threefold repetition)",
            BoardStatus::DrawFiftyMoveRule => "draw (fifty-move rule)",
        };
        f.write_str(s)
    }
}

/// A game position plus the repetition history needed for draw detection.
///
/// `Clone` is the copy used before every trial move; searches never touch the
/// caller's board. `history` holds the Zobrist keys of every position since
/// the last irreversible move, the current one last.
#[derive(Clone, Debug)]
pub struct Board {
    position: Chess,
    history: Vec<u64>,
}

impl Board {
    pub fn from_fen(fen: &str) -> Result<Board> {
        let fen: Fen = fen
            .trim()
            .parse()
            .map_err(|e| EngineError::InvalidFen(format!("{e}")))?;
        let position: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|e| EngineError::InvalidFen(format!("{e}")))?;
        Ok(Self::from_position(position))
    }

    fn from_position(position: Chess) -> Board {
        let mut board = Board {
            position,
            history: Vec::with_capacity(16),
        };
        board.history.push(board.hash());
        board
    }

    pub fn side_to_move(&self) -> Color {
        self.position.turn()
    }

    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.position.board().piece_at(sq)
    }

    /// All occupied squares, A1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        (0..64u32)
            .map(Square::new)
            .filter_map(|sq| self.piece_on(sq).map(|piece| (sq, piece)))
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.position.board().king_of(color)
    }

    pub fn in_check(&self) -> bool {
        self.position.is_check()
    }

    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        let board = self.position.board();
        board.attacks_to(sq, by, board.occupied()).any()
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.position.halfmoves()
    }

    pub fn hash(&self) -> u64 {
        let key: Zobrist64 = self.position.zobrist_hash(EnPassantMode::Legal);
        key.0
    }

    pub fn history(&self) -> &[u64] {
        &self.history
    }

    /// Replaces the repetition history, e.g. with keys of a game the board
    /// was not built from. The current position is appended if missing.
    pub fn set_history(&mut self, mut keys: Vec<u64>) {
        let current = self.hash();
        if keys.last() != Some(&current) {
            keys.push(current);
        }
        self.history = keys;
    }

    /// Number of times the current position has occurred, itself included.
    pub fn repetition_count(&self) -> usize {
        let current = self.hash();
        self.history.iter().filter(|&&key| key == current).count().max(1)
    }

    pub fn legal_moves(&self) -> Vec<ChessMove> {
        self.position
            .legal_moves()
            .iter()
            .filter_map(to_chess_move)
            .collect()
    }

    pub fn legal(&self, mv: ChessMove) -> bool {
        self.to_move(mv)
            .is_some_and(|m| self.position.is_legal(&m))
    }

    pub fn status(&self) -> BoardStatus {
        if self.position.legal_moves().is_empty() {
            return if self.position.is_check() {
                BoardStatus::Checkmate
            } else {
                BoardStatus::Stalemate
            };
        }

        if self.position.is_insufficient_material() {
            return BoardStatus::DrawInsufficientMaterial;
        }

        let repetitions = self.repetition_count();
        let halfmoves = self.halfmove_clock();

        if repetitions >= 5 {
            BoardStatus::DrawFivefoldRepetition
        } else if halfmoves >= 150 {
            BoardStatus::DrawSeventyFiveMoveRule
        } else if repetitions >= 3 {
            BoardStatus::DrawThreefoldRepetition
        } else if halfmoves >= 100 {
            BoardStatus::DrawFiftyMoveRule
        } else {
            BoardStatus::Ongoing
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.status() != BoardStatus::Ongoing
    }

    /// The side that delivered mate, if the game ended in checkmate.
    pub fn winner(&self) -> Option<Color> {
        match self.status() {
            BoardStatus::Checkmate => Some(self.side_to_move().other()),
            _ => None,
        }
    }

    /// Plays `mv` in place after checking it is legal.
    pub fn make_move(&mut self, mv: ChessMove) -> Result<()> {
        let m = self
            .to_move(mv)
            .filter(|m| self.position.is_legal(m))
            .ok_or_else(|| EngineError::IllegalMove(mv.to_string()))?;
        self.play(&m);
        Ok(())
    }

    /// Returns a copy with `mv` played. `mv` must come from [`Board::legal_moves`].
    pub fn make_move_new(&self, mv: ChessMove) -> Board {
        let mut next = self.clone();
        if let Some(m) = self.to_move(mv) {
            next.play(&m);
        }
        next
    }

    fn play(&mut self, m: &Move) {
        let zeroing = m.is_zeroing();
        self.position.play_unchecked(m);
        if zeroing {
            self.history.clear();
        }
        self.history.push(self.hash());
    }

    fn to_move(&self, mv: ChessMove) -> Option<Move> {
        let from = mv.get_source();
        let to = mv.get_dest();
        let piece = self.piece_on(from)?;
        if piece.color != self.side_to_move() {
            return None;
        }
        let capture = self.piece_on(to);

        let from_file = from.file() as i32;
        let to_file = to.file() as i32;

        match piece.role {
            Role::King if (from_file - to_file).abs() == 2 && from.rank() == to.rank() => {
                let rook_file = if to_file > from_file { File::H } else { File::A };
                Some(Move::Castle {
                    king: from,
                    rook: Square::from_coords(rook_file, from.rank()),
                })
            }
            Role::Pawn if from_file != to_file && capture.is_none() => {
                Some(Move::EnPassant { from, to })
            }
            role => Some(Move::Normal {
                role,
                from,
                capture: capture.map(|p| p.role),
                to,
                promotion: mv.get_promotion(),
            }),
        }
    }
}

fn to_chess_move(m: &Move) -> Option<ChessMove> {
    match *m {
        Move::Normal {
            from,
            to,
            promotion,
            ..
        } => Some(ChessMove::new(from, to, promotion)),
        Move::EnPassant { from, to } => Some(ChessMove::new(from, to, None)),
        Move::Castle { king, rook } => {
            let file = if rook.file() > king.file() { File::G } else { File::C };
            Some(ChessMove::new(king, Square::from_coords(file, king.rank()), None))
        }
        Move::Put { .. } => None,
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::from_position(Chess::default())
    }
}

impl FromStr for Board {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Board::from_fen(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u32).rev() {
            for file in 0..8u32 {
                let sq = Square::new(rank * 8 + file);
                match self.piece_on(sq) {
                    Some(piece) => write!(f, "{} ", piece.char())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        let side = if self.side_to_move() == Color::White { "white" } else { "black" };
        write!(f, "{side} to move")
    }
}
