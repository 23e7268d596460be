//! End-to-end searches on real chess positions.

use chess::{Board, ChessMove, MoveGen};
use chess_minimax::config::SearchConfig;
use chess_minimax::constants::SENTINEL;
use chess_minimax::eval::MaterialEvaluator;
use chess_minimax::node::Terminal;
use chess_minimax::rules::{parse_fen, ChessRules};
use chess_minimax::search::Engine;
use chess_minimax::select::BestMove;

// =============================================================================
// Helper functions
// =============================================================================

fn engine(depth: u32) -> Engine<ChessRules, MaterialEvaluator> {
    Engine::new(ChessRules::new(), MaterialEvaluator::new(), SearchConfig::with_depth(depth))
        .unwrap()
}

fn best_uci(fen: &str, depth: u32) -> String {
    let board = parse_fen(fen).unwrap();
    engine(depth).best_move(board).unwrap().to_string()
}

fn legal(board: &Board) -> Vec<ChessMove> {
    MoveGen::new_legal(board).collect()
}

// =============================================================================
// Tree size
// =============================================================================

#[test]
fn test_start_position_two_plies() {
    let report = engine(2).search(Board::default()).unwrap();
    assert_eq!(report.stats.nodes_created, 20 + 400);
    assert_eq!(report.stats.evaluations, 400);
    assert_eq!(report.root.score, 0);
}

#[test]
fn test_start_position_three_plies_matches_perft() {
    // perft(3) from the start position is 8902 and contains no mates.
    let report = engine(3).search(Board::default()).unwrap();
    assert_eq!(report.stats.nodes_created, 20 + 400 + 8902);
    assert_eq!(report.stats.terminal_nodes, 0);
    assert!(!report.stats.early_stop);
}

#[test]
fn test_level_position_prefers_first_move() {
    let board = Board::default();
    let best = engine(1).best_move(board).unwrap();
    assert_eq!(best.mv(), legal(&board).first());
    assert_eq!(best.score(), Some(0));
}

// =============================================================================
// Tactics
// =============================================================================

#[test]
fn test_scholars_mate_found() {
    let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";
    let report = engine(2).search(parse_fen(fen).unwrap()).unwrap();

    assert_eq!(report.best.to_string(), "h5f7");
    assert_eq!(report.best.score(), Some(SENTINEL));
    assert!(report.stats.early_stop);
    assert_eq!(report.root.max_depth(), 1);
}

#[test]
fn test_fools_mate_found_for_black() {
    let fen = "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2";
    let report = engine(2).search(parse_fen(fen).unwrap()).unwrap();

    assert_eq!(report.best.to_string(), "d8h4");
    assert_eq!(report.best.score(), Some(SENTINEL));
    let mate = report
        .root
        .children
        .iter()
        .find(|c| c.terminal != Terminal::Ongoing)
        .unwrap();
    assert_eq!(mate.terminal, Terminal::Lose);
}

#[test]
fn test_takes_hanging_queen() {
    assert_eq!(best_uci("q3k3/8/8/8/8/8/8/R3K3 w - - 0 1", 2), "a1a8");
}

#[test]
fn test_avoids_losing_the_queen() {
    // The queen on d4 is attacked by the pawn on e5; any queen move that
    // leaves her en prise to the pawn loses material at depth 2.
    let report = engine(2)
        .search(parse_fen("4k3/8/8/4p3/3Q4/8/8/4K3 w - - 0 1").unwrap())
        .unwrap();
    assert!(report.root.score >= 800);
}

// =============================================================================
// Finished games
// =============================================================================

#[test]
fn test_checkmated_root() {
    let fen = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
    let report = engine(3).search(parse_fen(fen).unwrap()).unwrap();
    assert_eq!(report.best, BestMove::NoMove);
    assert_eq!(report.root.score, -SENTINEL);
    assert_eq!(report.best.to_string(), "(none)");
}

#[test]
fn test_stalemated_root() {
    let report = engine(2)
        .search(parse_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap())
        .unwrap();
    assert_eq!(report.best, BestMove::NoMove);
    assert_eq!(report.root.terminal, Terminal::Draw);
    assert_eq!(report.root.score, 0);
}

#[test]
fn test_best_move_is_legal() {
    let fens = [
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
        "8/8/8/4k3/8/8/4P3/4K3 w - - 0 1",
        "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1",
    ];
    for fen in fens {
        let board = parse_fen(fen).unwrap();
        let best = engine(2).best_move(board).unwrap();
        let mv = best.mv().expect("position has legal moves");
        assert!(legal(&board).contains(mv), "{mv} not legal in {fen}");
    }
}
