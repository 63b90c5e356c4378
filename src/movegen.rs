use arrayvec::ArrayVec;

use crate::board::{Board, ChessMove, Role};

/// Upper bound on legal moves in any chess position.
pub const MAX_MOVES: usize = 256;

pub fn is_capture(board: &Board, mv: ChessMove) -> bool {
    if board.piece_on(mv.get_dest()).is_some() {
        return true;
    }
    // en passant: a pawn changing file onto an empty square
    board
        .piece_on(mv.get_source())
        .is_some_and(|p| p.role == Role::Pawn)
        && mv.get_source().file() != mv.get_dest().file()
}

/// Orders moves for alpha-beta: captures first, then everything else.
///
/// The partition is stable, so moves keep their generated order within
/// each group. Nothing is dropped or duplicated.
pub fn order_moves(board: &Board, moves: &[ChessMove]) -> ArrayVec<ChessMove, MAX_MOVES> {
    let mut ordered: ArrayVec<ChessMove, MAX_MOVES> = ArrayVec::new();

    ordered.extend(moves.iter().copied().filter(|&mv| is_capture(board, mv)));
    ordered.extend(moves.iter().copied().filter(|&mv| !is_capture(board, mv)));

    ordered
}

pub fn filter_captures(board: &Board, moves: &[ChessMove]) -> Vec<ChessMove> {
    moves
        .iter()
        .copied()
        .filter(|&mv| is_capture(board, mv))
        .collect()
}

/// Moves after which the opponent is in check.
pub fn filter_checks(board: &Board, moves: &[ChessMove]) -> Vec<ChessMove> {
    moves
        .iter()
        .copied()
        .filter(|&mv| board.make_move_new(mv).in_check())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    #[test]
    fn test_captures_come_first() {
        // White queen d4 can take the knight on d7 or the pawn on a7; bishop c1 can take h6.
        let b = board("4k3/p2n4/7p/8/3Q4/8/8/2B1K3 w - - 0 1");
        let moves = b.legal_moves();
        let ordered = order_moves(&b, &moves);

        let first_quiet = ordered
            .iter()
            .position(|&mv| !is_capture(&b, mv))
            .unwrap();
        assert!(first_quiet >= 3);
        assert!(ordered[first_quiet..].iter().all(|&mv| !is_capture(&b, mv)));
        assert!(ordered[..first_quiet].iter().all(|&mv| is_capture(&b, mv)));
    }

    #[test]
    fn test_no_moves_dropped_or_duplicated() {
        let b = board("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let moves = b.legal_moves();
        let ordered = order_moves(&b, &moves);

        assert_eq!(ordered.len(), moves.len());
        let original: HashSet<_> = moves.iter().copied().collect();
        let reordered: HashSet<_> = ordered.iter().copied().collect();
        assert_eq!(original, reordered);
        assert_eq!(reordered.len(), ordered.len());
    }

    #[test]
    fn test_partition_is_stable() {
        let b = board("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let moves = b.legal_moves();
        let ordered = order_moves(&b, &moves);

        let captures: Vec<_> = moves.iter().copied().filter(|&m| is_capture(&b, m)).collect();
        let quiets: Vec<_> = moves.iter().copied().filter(|&m| !is_capture(&b, m)).collect();
        assert_eq!(&ordered[..captures.len()], captures.as_slice());
        assert_eq!(&ordered[captures.len()..], quiets.as_slice());
    }

    #[test]
    fn test_en_passant_is_capture() {
        let b = board("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        let ep = b
            .legal_moves()
            .into_iter()
            .find(|m| m.to_string() == "e5d6")
            .unwrap();
        assert!(is_capture(&b, ep));
        assert_eq!(filter_captures(&b, &b.legal_moves()), vec![ep]);
    }

    #[test]
    fn test_castling_is_not_capture() {
        let b = board("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let moves = b.legal_moves();
        assert!(filter_captures(&b, &moves).is_empty());
    }

    #[test]
    fn test_filter_checks() {
        let b = board("6k1/5ppp/8/8/8/8/8/R6K w - - 0 1");
        let checks: Vec<String> = filter_checks(&b, &b.legal_moves())
            .iter()
            .map(|m| m.to_string())
            .collect();
        assert_eq!(checks, vec!["a1a8".to_string()]);
    }
}
