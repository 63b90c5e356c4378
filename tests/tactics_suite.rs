use std::time::Duration;

use chess_bot::{Board, ChessMove, Deadline, Difficulty, EngineOption, new_engine};

/// Small tactics suite in EPD style, best moves in UCI notation.
const SUITE: &str = r#"
6k1/5ppp/8/8/8/8/8/R6K w - - 0 1 bm a1a8; id "T.01";
r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1 bm a8a1; id "T.02";
4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1 bm d2d5; id "T.03";
r3k3/7p/8/3N4/8/8/7P/4K3 w - - 0 1 bm d5c7; id "T.04";
4k3/8/8/8/8/3b4/4P3/4K3 w - - 0 1 bm e2d3; id "T.05";
"#;

/// Parse an EPD line: "<FEN> bm <move(s)>; id "<name>";"
fn parse_epd_line(line: &str) -> Option<(String, Vec<String>, String)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let bm_idx = line.find(" bm ")?;
    let fen = line[..bm_idx].to_string();
    let rest = &line[bm_idx + 4..];

    let semi_idx = rest.find(';')?;
    let best_moves = rest[..semi_idx]
        .split_whitespace()
        .map(|s| s.to_string())
        .collect();

    let id = rest
        .find("id \"")
        .and_then(|start| {
            let content = &rest[start + 4..];
            content.find('"').map(|end| content[..end].to_string())
        })
        .unwrap_or_else(|| "unknown".to_string());

    Some((fen, best_moves, id))
}

fn positions() -> Vec<(Board, Vec<String>, String)> {
    SUITE
        .lines()
        .filter_map(parse_epd_line)
        .map(|(fen, moves, id)| {
            let board = Board::from_fen(&fen).unwrap_or_else(|e| panic!("{id}: {e}"));
            (board, moves, id)
        })
        .collect()
}

fn solve(difficulty: Difficulty) {
    let mut engine = new_engine(difficulty, &[EngineOption::SearchDepth(4)]).unwrap();

    for (board, best_moves, id) in positions() {
        let mv: ChessMove = engine
            .select_move(Deadline::after(Duration::from_secs(30)), &board)
            .unwrap();
        assert!(
            best_moves.contains(&mv.to_string()),
            "{id}: {} played {mv}, expected {best_moves:?}",
            engine.name()
        );
    }
}

#[test]
fn test_epd_parser() {
    let line = r#"6k1/5ppp/8/8/8/8/8/R6K w - - 0 1 bm a1a8; id "T.01";"#;
    let (fen, moves, id) = parse_epd_line(line).unwrap();
    assert_eq!(fen, "6k1/5ppp/8/8/8/8/8/R6K w - - 0 1");
    assert_eq!(moves, vec!["a1a8"]);
    assert_eq!(id, "T.01");
    assert!(parse_epd_line("   ").is_none());
}

#[test]
fn test_suite_positions_are_playable() {
    let suite = positions();
    assert_eq!(suite.len(), 5);
    for (board, best_moves, id) in &suite {
        let legal: Vec<String> = board.legal_moves().iter().map(|m| m.to_string()).collect();
        for bm in best_moves {
            assert!(legal.contains(bm), "{id}: {bm} is not legal");
        }
    }
}

#[test]
fn test_medium_solves_suite() {
    solve(Difficulty::Medium);
}

#[test]
fn test_hard_solves_suite() {
    solve(Difficulty::Hard);
}
