use crate::config::GameConfig;
use crate::core::{Board, EngineError, GameOutcome, Side};
use crate::display::{render_board, DisplayState};
use crate::logic::{apply_move, legal_moves, outcome};
use crate::player::PlayerController;
use crossterm::event::{self, Event, KeyCode};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// 対局の進行役。盤面を所有し、変更するのはここだけ
pub struct Game {
    pub board: Board,
    pub current_side: Side,
    /// Indices played so far, in order. Kept in memory only.
    pub history: Vec<usize>,
    pub config: GameConfig,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Game {
            board: Board::new(),
            current_side: Side::X,
            history: Vec::new(),
            config,
        }
    }

    pub fn reset(&mut self) {
        self.board = Board::new();
        self.current_side = Side::X;
        self.history.clear();
        info!("new game");
    }

    pub fn outcome(&self) -> GameOutcome {
        outcome(&self.board)
    }

    /// Places the current side's mark. Occupied cells and finished games are
    /// rejected and leave the board as it was.
    pub fn play_turn(&mut self, index: usize) -> Result<GameOutcome, EngineError> {
        let side = self.current_side;
        self.board = apply_move(&self.board, index, side)?;
        self.history.push(index);

        let result = self.outcome();
        debug!(%side, index, outcome = %result, "move applied");
        if result.is_terminal() {
            info!(outcome = %result, moves = self.history.len(), "game over");
        } else {
            self.current_side = side.opponent();
        }
        Ok(result)
    }

    fn controller_for<'a>(
        &self,
        px: &'a dyn PlayerController,
        po: &'a dyn PlayerController,
    ) -> &'a dyn PlayerController {
        let controller = match self.current_side {
            Side::X => px,
            Side::O => po,
        };
        debug_assert_eq!(controller.side(), self.current_side);
        controller
    }

    /// Asks the current controller for a move and applies it. Resigning or
    /// returning an illegal index forfeits the game.
    fn take_turn(&mut self, controller: &dyn PlayerController) -> Turn {
        let side = self.current_side;
        let moves = legal_moves(&self.board);
        let Some(index) = controller.choose_move(&self.board, &moves) else {
            info!(%side, "player resigned");
            return Turn::Forfeited {
                winner: side.opponent(),
                reason: format!("{} resigned.", controller.name()),
            };
        };

        match self.play_turn(index) {
            Ok(_) => Turn::Played,
            Err(e) => {
                // 不正な手は投了扱い
                info!(%side, error = %e, "illegal move, treated as resignation");
                Turn::Forfeited {
                    winner: side.opponent(),
                    reason: format!("{} made an illegal move ({}).", controller.name(), e),
                }
            }
        }
    }

    /// Plays to the end without rendering or delays. A resignation counts as
    /// a win for the other side.
    pub fn run_silent(
        &mut self,
        px: &dyn PlayerController,
        po: &dyn PlayerController,
    ) -> GameOutcome {
        loop {
            let result = self.outcome();
            if result.is_terminal() {
                return result;
            }

            let controller = self.controller_for(px, po);
            if let Turn::Forfeited { winner, .. } = self.take_turn(controller) {
                return GameOutcome::Win(winner);
            }
        }
    }

    /// Interactive loop with terminal rendering. Returns `None` when the user
    /// interrupts with `q` during the computer's pause.
    pub fn play(
        &mut self,
        px: &dyn PlayerController,
        po: &dyn PlayerController,
    ) -> anyhow::Result<Option<GameOutcome>> {
        let mut state = DisplayState::default();

        loop {
            let result = self.outcome();
            state.last_move = self.history.last().copied();

            if result.is_terminal() {
                state.status_msg = Some(status_message(result, self.current_side, px, po));
                render_board(&self.board, &state);
                return Ok(Some(result));
            }

            let controller = self.controller_for(px, po);
            state.status_msg = Some(status_message(result, self.current_side, px, po));
            render_board(&self.board, &state);

            if controller.is_computer() && self.config.think_delay_ms > 0 {
                state.status_msg = Some(format!("{} is thinking...", controller.name()));
                render_board(&self.board, &state);

                let delay = Duration::from_millis(self.config.think_delay_ms);
                if pause_unless_quit(delay, next_terminal_key)? {
                    info!("interrupted by user");
                    return Ok(None);
                }
            }

            match self.take_turn(controller) {
                Turn::Played => {
                    if self.config.show_scores {
                        state.scores = controller.last_search().map(|report| report.candidates);
                    }
                }
                Turn::Forfeited { winner, reason } => {
                    state.status_msg = Some(format!("{} Player {} wins!", reason, winner));
                    render_board(&self.board, &state);
                    return Ok(Some(GameOutcome::Win(winner)));
                }
            }
        }
    }
}

enum Turn {
    Played,
    Forfeited { winner: Side, reason: String },
}

fn next_terminal_key(timeout: Duration) -> std::io::Result<Option<KeyCode>> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            return Ok(Some(key.code));
        }
    }
    Ok(None)
}

/// 思考ウェイト。`q` で中断 (true)。他のキーでは待ち時間を短縮しない
fn pause_unless_quit<F>(delay: Duration, mut next_key: F) -> std::io::Result<bool>
where
    F: FnMut(Duration) -> std::io::Result<Option<KeyCode>>,
{
    let deadline = Instant::now() + delay;
    loop {
        let now = Instant::now();
        if now >= deadline {
            return Ok(false);
        }
        if next_key(deadline - now)? == Some(KeyCode::Char('q')) {
            return Ok(true);
        }
    }
}

/// 状況表示メッセージ
pub fn status_message(
    result: GameOutcome,
    side_to_move: Side,
    px: &dyn PlayerController,
    po: &dyn PlayerController,
) -> String {
    match result {
        GameOutcome::Ongoing => format!("Player {}'s turn", side_to_move),
        GameOutcome::Draw => "It's a draw!".to_string(),
        GameOutcome::Win(side) => {
            let winner = match side {
                Side::X => px,
                Side::O => po,
            };
            let loser = match side {
                Side::X => po,
                Side::O => px,
            };
            if winner.is_computer() && !loser.is_computer() {
                "The computer wins!".to_string()
            } else {
                format!("Player {} wins!", side)
            }
        }
    }
}
