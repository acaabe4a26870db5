use crate::core::{Board, Side, BOARD_CELLS, BOARD_WIDTH};
use crate::display::{render_board, DisplayState};
use crate::player::PlayerController;
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use std::time::Duration;
use tracing::warn;

pub struct TuiController {
    side: Side,
    name: String,
}

impl TuiController {
    pub fn new(side: Side, name: &str) -> Self {
        Self {
            side,
            name: name.to_string(),
        }
    }

    /// カーソルは中央から。中央が埋まっていれば最初の空きマス
    fn initial_state(&self, legal_moves: &[usize]) -> DisplayState {
        let defaults = DisplayState::default();
        let cursor = match legal_moves.first() {
            Some(&first) if !legal_moves.contains(&defaults.cursor) => first,
            _ => defaults.cursor,
        };
        DisplayState {
            cursor,
            show_cursor: true,
            status_msg: Some(format!("Player {}'s turn ({})", self.side, self.name)),
            ..defaults
        }
    }
}

/// カーソル移動。盤外には出ない
pub fn move_cursor(cursor: usize, code: KeyCode) -> usize {
    let row = cursor / BOARD_WIDTH;
    let col = cursor % BOARD_WIDTH;
    match code {
        KeyCode::Up if row > 0 => cursor - BOARD_WIDTH,
        KeyCode::Down if row < BOARD_WIDTH - 1 => cursor + BOARD_WIDTH,
        KeyCode::Left if col > 0 => cursor - 1,
        KeyCode::Right if col < BOARD_WIDTH - 1 => cursor + 1,
        _ => cursor,
    }
}

/// '1'..'9' をマス番号 0..8 に変換
pub fn digit_to_index(c: char) -> Option<usize> {
    let n = c.to_digit(10)? as usize;
    (1..=BOARD_CELLS).contains(&n).then(|| n - 1)
}

impl PlayerController for TuiController {
    fn name(&self) -> &str {
        &self.name
    }

    fn side(&self) -> Side {
        self.side
    }

    fn choose_move(&self, board: &Board, legal_moves: &[usize]) -> Option<usize> {
        let mut state = self.initial_state(legal_moves);

        loop {
            render_board(board, &state);
            print!("[Arrows]: Move | [Enter]/[1-9]: Place | [q]: Resign\r\n");

            let ready = match event::poll(Duration::from_millis(100)) {
                Ok(ready) => ready,
                Err(e) => {
                    warn!(error = %e, "terminal poll failed");
                    return None;
                }
            };
            if !ready {
                continue;
            }

            let code = match event::read() {
                Ok(Event::Key(KeyEvent { code, .. })) => code,
                Ok(_) => continue,
                Err(e) => {
                    warn!(error = %e, "terminal read failed");
                    return None;
                }
            };

            let target = match code {
                KeyCode::Char('q') => return None,
                KeyCode::Enter | KeyCode::Char(' ') => Some(state.cursor),
                KeyCode::Char(c) => digit_to_index(c),
                other => {
                    state.cursor = move_cursor(state.cursor, other);
                    None
                }
            };

            // 埋まっているマスは無視する
            if let Some(index) = target {
                if legal_moves.contains(&index) {
                    return Some(index);
                }
                state.cursor = index;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_stays_on_board() {
        assert_eq!(move_cursor(0, KeyCode::Up), 0);
        assert_eq!(move_cursor(0, KeyCode::Left), 0);
        assert_eq!(move_cursor(0, KeyCode::Right), 1);
        assert_eq!(move_cursor(0, KeyCode::Down), 3);
        assert_eq!(move_cursor(8, KeyCode::Down), 8);
        assert_eq!(move_cursor(8, KeyCode::Right), 8);
        assert_eq!(move_cursor(5, KeyCode::Right), 5);
        assert_eq!(move_cursor(3, KeyCode::Left), 3);
    }

    #[test]
    fn test_digit_keys() {
        assert_eq!(digit_to_index('1'), Some(0));
        assert_eq!(digit_to_index('9'), Some(8));
        assert_eq!(digit_to_index('0'), None);
        assert_eq!(digit_to_index('a'), None);
    }

    #[test]
    fn test_initial_cursor() {
        let tui = TuiController::new(Side::X, "Human");
        let state = tui.initial_state(&[0, 1, 4, 8]);
        assert_eq!(state.cursor, 4);
        assert!(state.show_cursor);
        assert_eq!(state.status_msg.as_deref(), Some("Player X's turn (Human)"));

        // 中央が埋まっている
        assert_eq!(tui.initial_state(&[2, 7]).cursor, 2);
    }
}
