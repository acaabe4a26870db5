//! Exhaustive minimax search.
//!
//! O is always the maximizing side and X the minimizing side, whichever side
//! is asked to move. The board is small enough that the whole tree is walked
//! without pruning or memoization.

use crate::core::{Board, Cell, EngineError, Move, Side};
use crate::logic::{has_won, is_full, outcome};
use crate::player::PlayerController;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use tracing::{debug, warn};

/// O が勝った局面の評価値
pub const O_WIN_SCORE: i32 = 10;
/// X が勝った局面の評価値
pub const X_WIN_SCORE: i32 = -10;
/// 引き分け
pub const DRAW_SCORE: i32 = 0;

/// Result of a root search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReport {
    pub best: Move,
    /// Every root candidate in ascending index order.
    pub candidates: Vec<Move>,
    pub nodes: usize,
}

/// Returns the optimal move for `side`.
///
/// Ties go to the lowest index. Fails with [`EngineError::NoLegalMove`] when
/// the board is already decided or full.
pub fn best_move(board: &Board, side: Side) -> Result<Move, EngineError> {
    search(board, side).map(|report| report.best)
}

/// Runs the full search and reports every root candidate.
pub fn search(board: &Board, side: Side) -> Result<SearchReport, EngineError> {
    if outcome(board).is_terminal() {
        return Err(EngineError::NoLegalMove);
    }

    // 探索用の作業盤面。呼び出し元の盤面には一切触れない
    let mut work = *board;
    let mut nodes = 0;
    let candidates = score_children(&mut work, side, &mut nodes);
    debug_assert_eq!(&work, board);

    let best = select(&candidates, side).ok_or(EngineError::NoLegalMove)?;
    debug!(%side, index = best.index, score = best.score, nodes, "search finished");

    Ok(SearchReport {
        best,
        candidates,
        nodes,
    })
}

/// 終局していれば評価値を返す (X勝ち → O勝ち → 満杯の順)
fn terminal_score(board: &Board) -> Option<i32> {
    if has_won(board, Side::X) {
        Some(X_WIN_SCORE)
    } else if has_won(board, Side::O) {
        Some(O_WIN_SCORE)
    } else if is_full(board) {
        Some(DRAW_SCORE)
    } else {
        None
    }
}

fn minimax(work: &mut Board, side: Side, nodes: &mut usize) -> i32 {
    *nodes += 1;

    if let Some(score) = terminal_score(work) {
        return score;
    }

    let candidates = score_children(work, side, nodes);
    // 非終局なら空きマスが必ずある
    select(&candidates, side).map_or(DRAW_SCORE, |mv| mv.score)
}

/// Tries every empty cell for `side` and undoes each placement before the
/// next sibling, so `work` is unchanged on return.
fn score_children(work: &mut Board, side: Side, nodes: &mut usize) -> Vec<Move> {
    let empties: Vec<usize> = work.empty_indices().collect();
    let mut moves = Vec::with_capacity(empties.len());

    for index in empties {
        work.set(index, side.mark());
        let score = minimax(work, side.opponent(), nodes);
        work.set(index, Cell::Empty);
        moves.push(Move::new(index, score));
    }

    moves
}

/// Strictly better only, so the first-seen candidate wins ties.
fn select(candidates: &[Move], side: Side) -> Option<Move> {
    let mut best: Option<Move> = None;
    for &mv in candidates {
        let better = match best {
            None => true,
            Some(current) if side.is_maximizing() => mv.score > current.score,
            Some(current) => mv.score < current.score,
        };
        if better {
            best = Some(mv);
        }
    }
    best
}

pub struct MinimaxAI {
    pub side: Side,
    pub name: String,
    last_report: RefCell<Option<SearchReport>>,
}

impl MinimaxAI {
    pub fn new(side: Side, name: &str) -> Self {
        Self {
            side,
            name: name.to_string(),
            last_report: RefCell::new(None),
        }
    }

    /// The report of the most recent `choose_move` call, if it searched.
    pub fn last_report(&self) -> Option<SearchReport> {
        self.last_report.borrow().clone()
    }
}

impl PlayerController for MinimaxAI {
    fn choose_move(&self, board: &Board, legal_moves: &[usize]) -> Option<usize> {
        if legal_moves.is_empty() {
            return None;
        }

        match search(board, self.side) {
            Ok(report) => {
                let index = report.best.index;
                *self.last_report.borrow_mut() = Some(report);
                Some(index)
            }
            Err(e) => {
                warn!(side = %self.side, error = %e, "minimax could not choose a move");
                None
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn side(&self) -> Side {
        self.side
    }

    fn is_computer(&self) -> bool {
        true
    }

    fn last_search(&self) -> Option<SearchReport> {
        self.last_report()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_top_row() {
        let board = Board::parse("XX. OO. ...").unwrap();
        let mv = best_move(&board, Side::O).unwrap();
        // 2 と 5 はどちらも +10。先に見つかった 2 を選ぶ
        assert_eq!(mv, Move::new(2, O_WIN_SCORE));
    }

    #[test]
    fn test_takes_immediate_win_when_it_comes_first() {
        let board = Board::parse("OO. XX. X..").unwrap();
        assert_eq!(best_move(&board, Side::O).unwrap(), Move::new(2, O_WIN_SCORE));
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        let report = search(&Board::new(), Side::O).unwrap();
        assert_eq!(report.best.score, DRAW_SCORE);
        assert_eq!(report.candidates.len(), 9);
        assert!(report.candidates.iter().all(|m| m.score == DRAW_SCORE));
        assert_eq!(report.best.index, 0);
    }

    #[test]
    fn test_x_minimizes() {
        // X は 2 で勝てる
        let board = Board::parse("XX. OO. O..").unwrap();
        assert_eq!(best_move(&board, Side::X).unwrap(), Move::new(2, X_WIN_SCORE));
    }

    #[test]
    fn test_x_tie_goes_to_first_candidate() {
        // 角と中央の後は X のどの手も引き分け
        let board = Board::parse("X.. .O. ...").unwrap();
        let report = search(&board, Side::X).unwrap();
        assert_eq!(report.candidates.len(), 7);
        assert!(report.candidates.iter().all(|m| m.score == DRAW_SCORE));
        assert_eq!(report.best, Move::new(1, DRAW_SCORE));
    }

    #[test]
    fn test_terminal_board_has_no_legal_move() {
        let won = Board::parse("XXX OO. ...").unwrap();
        assert_eq!(best_move(&won, Side::O), Err(EngineError::NoLegalMove));

        let full = Board::parse("XOX XOO OXX").unwrap();
        assert_eq!(best_move(&full, Side::O), Err(EngineError::NoLegalMove));
    }

    #[test]
    fn test_board_is_not_mutated() {
        let board = Board::parse("X.. .O. ..X").unwrap();
        let before = board;
        let first = search(&board, Side::O).unwrap();
        let second = search(&board, Side::O).unwrap();
        assert_eq!(board, before);
        assert_eq!(first, second);
    }

    #[test]
    fn test_last_move_fills_the_board() {
        let board = Board::parse("XOX XOO OX.").unwrap();
        let report = search(&board, Side::X).unwrap();
        assert_eq!(report.best.index, 8);
        assert_eq!(report.nodes, 1);
    }

    #[test]
    fn test_controller_records_report() {
        let ai = MinimaxAI::new(Side::O, "Minimax AI");
        let board = Board::parse("XX. OO. ...").unwrap();
        let legal: Vec<usize> = board.empty_indices().collect();
        assert_eq!(ai.choose_move(&board, &legal), Some(2));
        assert_eq!(ai.last_report().map(|r| r.best.index), Some(2));
        assert_eq!(ai.choose_move(&board, &[]), None);
    }
}
