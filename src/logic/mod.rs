use crate::core::{Board, Cell, EngineError, GameOutcome, Side, BOARD_CELLS, BOARD_WIDTH};
use std::sync::OnceLock;
use tracing::warn;

/// 勝ちラインを構成するマスの組
pub type WinningLine = [usize; BOARD_WIDTH];

static WINNING_LINES: OnceLock<Vec<WinningLine>> = OnceLock::new();

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals.
pub fn winning_lines() -> &'static [WinningLine] {
    WINNING_LINES.get_or_init(|| {
        let n = BOARD_WIDTH;
        let mut lines: Vec<WinningLine> = Vec::with_capacity(2 * n + 2);

        // 行
        for row in 0..n {
            lines.push(std::array::from_fn(|i| row * n + i));
        }
        // 列
        for col in 0..n {
            lines.push(std::array::from_fn(|i| i * n + col));
        }
        // 対角線
        lines.push(std::array::from_fn(|i| i * n + i));
        lines.push(std::array::from_fn(|i| i * n + (n - 1 - i)));

        lines
    })
}

/// 指定した手番が勝ちラインを揃えているか
pub fn has_won(board: &Board, side: Side) -> bool {
    let mark = side.mark();
    winning_lines()
        .iter()
        .any(|line| line.iter().all(|&i| board.get(i) == Some(mark)))
}

/// 空きマスが無いか
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|&c| c != Cell::Empty)
}

/// X の勝ち、O の勝ち、満杯の順に判定する
pub fn outcome(board: &Board) -> GameOutcome {
    if has_won(board, Side::X) {
        GameOutcome::Win(Side::X)
    } else if has_won(board, Side::O) {
        GameOutcome::Win(Side::O)
    } else if is_full(board) {
        GameOutcome::Draw
    } else {
        GameOutcome::Ongoing
    }
}

/// 合法手生成 (終局していれば空)
pub fn legal_moves(board: &Board) -> Vec<usize> {
    if outcome(board).is_terminal() {
        return Vec::new();
    }
    board.empty_indices().collect()
}

/// 移動適用。元の盤面は変更せず、新しい盤面を返す
pub fn apply_move(board: &Board, index: usize, side: Side) -> Result<Board, EngineError> {
    if index >= BOARD_CELLS {
        warn!(index, "rejected move outside the board");
        return Err(EngineError::OutOfRange { index });
    }
    if outcome(board).is_terminal() {
        warn!(index, %side, "rejected move on a finished game");
        return Err(EngineError::GameOver);
    }
    if !board.is_empty_at(index) {
        warn!(index, %side, "rejected move on an occupied cell");
        return Err(EngineError::CellOccupied { index });
    }

    let mut next = *board;
    next.set(index, side.mark());
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winning_lines_shape() {
        let lines = winning_lines();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], [0, 1, 2]);
        assert_eq!(lines[3], [0, 3, 6]);
        assert_eq!(lines[6], [0, 4, 8]);
        assert_eq!(lines[7], [2, 4, 6]);
        // 初期化は一度だけ
        assert!(std::ptr::eq(lines, winning_lines()));
    }

    #[test]
    fn test_column_win() {
        let board = Board::parse("X.. X.. X..").unwrap();
        assert!(has_won(&board, Side::X));
        assert!(!has_won(&board, Side::O));
    }

    #[test]
    fn test_is_full() {
        assert!(!is_full(&Board::new()));
        assert!(is_full(&Board::parse("XOX XOO OXX").unwrap()));
    }

    #[test]
    fn test_apply_move_rejections() {
        let board = Board::parse("X.. ... ...").unwrap();
        assert_eq!(
            apply_move(&board, 0, Side::O),
            Err(EngineError::CellOccupied { index: 0 })
        );
        assert_eq!(
            apply_move(&board, 9, Side::O),
            Err(EngineError::OutOfRange { index: 9 })
        );

        let won = Board::parse("XXX OO. ...").unwrap();
        assert_eq!(apply_move(&won, 8, Side::O), Err(EngineError::GameOver));
    }

    #[test]
    fn test_apply_move_leaves_input_untouched() {
        let board = Board::new();
        let next = apply_move(&board, 4, Side::X).unwrap();
        assert_eq!(board, Board::new());
        assert_eq!(next.get(4), Some(Cell::X));
    }

    #[test]
    fn test_legal_moves_empty_when_terminal() {
        assert_eq!(legal_moves(&Board::new()).len(), 9);
        assert!(legal_moves(&Board::parse("OOO XX. X..").unwrap()).is_empty());
    }
}
