use super::error::EngineError;
use super::types::{Cell, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const BOARD_WIDTH: usize = 3;
pub const BOARD_CELLS: usize = BOARD_WIDTH * BOARD_WIDTH;

/// 盤面 (行優先, index = row * 3 + col)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; BOARD_CELLS],
        }
    }

    /// Builds a board from exactly nine cells.
    pub fn from_cells(cells: &[Cell]) -> Result<Self, EngineError> {
        let cells: [Cell; BOARD_CELLS] = cells.try_into().map_err(|_| {
            EngineError::invalid_board(format!(
                "expected {} cells, got {}",
                BOARD_CELLS,
                cells.len()
            ))
        })?;
        Ok(Board { cells })
    }

    /// Parses `X`, `O` and `.`/`_`/`-` (empty); whitespace is ignored.
    ///
    /// ```
    /// use tictactoe_ai::core::{Board, Cell};
    ///
    /// let board = Board::parse("XX. OO. ...").unwrap();
    /// assert_eq!(board.get(1), Some(Cell::X));
    /// assert_eq!(board.get(5), Some(Cell::Empty));
    /// ```
    pub fn parse(s: &str) -> Result<Self, EngineError> {
        let mut cells = Vec::with_capacity(BOARD_CELLS);
        for (i, c) in s.chars().filter(|c| !c.is_whitespace()).enumerate() {
            match Cell::from_char(c) {
                Some(cell) => cells.push(cell),
                None => {
                    return Err(EngineError::invalid_board(format!(
                        "unexpected character {:?} at position {}",
                        c, i
                    )))
                }
            }
        }
        Self::from_cells(&cells)
    }

    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn cells(&self) -> &[Cell; BOARD_CELLS] {
        &self.cells
    }

    pub fn is_empty_at(&self, index: usize) -> bool {
        self.get(index) == Some(Cell::Empty)
    }

    /// Writes a cell without any rule checks. Used by the search on its
    /// private working copy and by tests building positions.
    pub(crate) fn set(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    pub fn empty_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == Cell::Empty)
            .map(|(i, _)| i)
    }

    /// X always moves first, so X has as many marks as O or one more.
    pub fn validate_counts(&self) -> Result<(), EngineError> {
        let x = self.count(Cell::X);
        let o = self.count(Cell::O);
        if x == o || x == o + 1 {
            Ok(())
        } else {
            Err(EngineError::invalid_board(format!(
                "mark counts out of turn order (X: {}, O: {})",
                x, o
            )))
        }
    }

    pub fn side_to_move(&self) -> Side {
        if self.count(Cell::X) > self.count(Cell::O) {
            Side::O
        } else {
            Side::X
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(BOARD_WIDTH).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for cell in chunk {
                write!(f, "{}", cell.display_char())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_all_empty_markers() {
        let board = Board::parse("x-o\n_._\n...").unwrap();
        assert_eq!(board.get(0), Some(Cell::X));
        assert_eq!(board.get(2), Some(Cell::O));
        assert_eq!(board.count(Cell::Empty), 7);
    }

    #[test]
    fn test_parse_rejects_unknown_character() {
        let err = Board::parse("XXZ......").unwrap_err();
        assert!(matches!(err, EngineError::InvalidBoard { .. }));
        assert!(err.to_string().contains("'Z'"));
    }

    #[test]
    fn test_wrong_length_is_invalid() {
        assert!(matches!(
            Board::parse("XO"),
            Err(EngineError::InvalidBoard { .. })
        ));
        assert!(matches!(
            Board::from_cells(&[Cell::Empty; 10]),
            Err(EngineError::InvalidBoard { .. })
        ));
    }

    #[test]
    fn test_turn_order_validation() {
        assert!(Board::parse("XX.O.....").unwrap().validate_counts().is_ok());
        assert!(Board::parse("XXX.O....").unwrap().validate_counts().is_err());
        assert!(Board::parse("OO.X.....").unwrap().validate_counts().is_err());
    }

    #[test]
    fn test_side_to_move() {
        assert_eq!(Board::new().side_to_move(), Side::X);
        assert_eq!(Board::parse("X........").unwrap().side_to_move(), Side::O);
        assert_eq!(Board::parse("XO.......").unwrap().side_to_move(), Side::X);
    }

    #[test]
    fn test_display_rows() {
        let board = Board::parse("XO. .X. ..O").unwrap();
        assert_eq!(board.to_string(), "XO.\n.X.\n..O");
    }

    #[test]
    fn test_serde_keeps_cells() {
        let board = Board::parse("XO. .X. ..O").unwrap();
        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(board, back);
    }
}
