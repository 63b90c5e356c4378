use std::fmt;

use shakmaty::{Role, Square};

/// A move as seen by the engines: source, destination and optional promotion.
///
/// Castling is reported as the king's two-square move (`e1g1`), en passant
/// as the capturing pawn's diagonal step. The board adapter converts back to
/// the rules engine's own move type when the move is played.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    source: Square,
    dest: Square,
    promotion: Option<Role>,
}

impl ChessMove {
    #[inline]
    pub fn new(source: Square, dest: Square, promotion: Option<Role>) -> Self {
        Self {
            source,
            dest,
            promotion,
        }
    }

    #[inline]
    pub fn get_source(self) -> Square {
        self.source
    }

    #[inline]
    pub fn get_dest(self) -> Square {
        self.dest
    }

    #[inline]
    pub fn get_promotion(self) -> Option<Role> {
        self.promotion
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.source, self.dest)?;
        if let Some(promo) = self.promotion {
            write!(f, "{}", promo.char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChessMove({})", self)
    }
}
