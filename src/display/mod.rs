use crate::core::{Board, Cell, Move, BOARD_WIDTH};
use crossterm::{cursor, execute, style::Stylize, terminal};
use std::io::{self, stdout, Write};
use tracing::warn;

pub struct DisplayState {
    pub cursor: usize,
    pub status_msg: Option<String>,
    pub last_move: Option<usize>,
    pub show_cursor: bool,
    /// Root candidates of the last computer search, shown under the board.
    pub scores: Option<Vec<Move>>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            cursor: 4,
            status_msg: None,
            last_move: None,
            show_cursor: false,
            scores: None,
        }
    }
}

/// 一マス分の表示文字列 (空きマスは 1-9 の番号)
pub fn cell_label(board: &Board, index: usize) -> String {
    match board.get(index) {
        Some(Cell::Empty) | None => (index + 1).to_string(),
        Some(cell) => cell.display_char().to_string(),
    }
}

/// 画面クリア（スクロール防止）
pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )
}

pub fn render_board(board: &Board, state: &DisplayState) {
    if let Err(e) = clear_screen(&mut stdout()) {
        warn!(error = %e, "could not clear the terminal");
    }

    print!("=== Tic-Tac-Toe ===\r\n");
    if let Some(msg) = &state.status_msg {
        print!("{}\r\n", msg.clone().bold().yellow());
    } else {
        print!("\r\n");
    }
    print!("\r\n");

    print!("   +{}+\r\n", "-----".repeat(BOARD_WIDTH));
    for row in 0..BOARD_WIDTH {
        print!("   |");
        for col in 0..BOARD_WIDTH {
            let index = row * BOARD_WIDTH + col;
            let label = cell_label(board, index);
            let is_cursor = state.show_cursor && state.cursor == index;
            let is_last_move = state.last_move == Some(index);

            let (prefix, suffix) = if is_cursor {
                ("[", "]")
            } else if is_last_move {
                ("{", "}")
            } else {
                (" ", " ")
            };
            let cell_text = format!(" {}{}{}", prefix, label, suffix);

            if is_cursor {
                print!("{}", cell_text.yellow());
            } else if is_last_move {
                print!("{}", cell_text.red());
            } else {
                match board.get(index) {
                    Some(Cell::X) => print!("{}", cell_text.cyan()),
                    Some(Cell::O) => print!("{}", cell_text.magenta()),
                    _ => print!("{}", cell_text.dark_grey()),
                }
            }
            print!(" ");
        }
        print!("|\r\n");
    }
    print!("   +{}+\r\n", "-----".repeat(BOARD_WIDTH));

    if let Some(scores) = &state.scores {
        render_scores(scores);
    }
}

fn render_scores(scores: &[Move]) {
    print!("\r\nComputer's evaluation:\r\n  ");
    for mv in scores {
        print!("[{}: {:+}] ", mv.index + 1, mv.score);
    }
    print!("\r\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_label_numbers_empty_cells() {
        let board = Board::parse("X.. .O. ...").unwrap();
        assert_eq!(cell_label(&board, 0), "X");
        assert_eq!(cell_label(&board, 1), "2");
        assert_eq!(cell_label(&board, 4), "O");
        assert_eq!(cell_label(&board, 8), "9");
    }

    struct BrokenTerminal;

    impl Write for BrokenTerminal {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_clear_screen_reports_write_errors() {
        let mut buf = Vec::new();
        clear_screen(&mut buf).unwrap();
        assert!(!buf.is_empty());

        assert!(clear_screen(&mut BrokenTerminal).is_err());
    }
}
