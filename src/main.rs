use crossterm::event::{self, Event, KeyCode};
use crossterm::{execute, terminal};
use std::io;
use std::time::Duration;
use tictactoe_ai::config::GameConfig;
use tictactoe_ai::core::Side;
use tictactoe_ai::game::Game;
use tictactoe_ai::player::ai::AIKind;
use tictactoe_ai::player::{MinimaxAI, PlayerController, TuiController};
use tictactoe_ai::selfplay::{run_selfplay, summary_line, SelfPlayConfig};
use tracing::info;

fn main() -> anyhow::Result<()> {
    tictactoe_ai::logger::init();
    let config = GameConfig::load_or_default();

    // ターミナル初期化
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;

    let res = run(config);

    // ターミナル復帰
    execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    let report = res?;
    if let Some(text) = report {
        println!("{}", text);
    }
    Ok(())
}

/// 数字キーでメニュー選択。'q' で `None`
fn read_choice(max: char) -> anyhow::Result<Option<char>> {
    loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => return Ok(None),
                    KeyCode::Char(c) if ('1'..=max).contains(&c) => return Ok(Some(c)),
                    _ => {}
                }
            }
        }
    }
}

/// Returns text to print once the terminal has been restored.
fn run(config: GameConfig) -> anyhow::Result<Option<String>> {
    print!("=== Tic-Tac-Toe vs Minimax ===\r\n");
    print!("\r\nSelect mode:\r\n");
    print!("1. Human (X) vs Computer (O)\r\n");
    print!("2. Computer vs Computer\r\n");
    print!("3. Self-play statistics ({} games)\r\n", config.selfplay_games);
    print!("[q]: Quit\r\n");

    match read_choice('3')? {
        Some('1') => run_local(config, false),
        Some('2') => run_local(config, true),
        Some('3') => run_stats(config),
        _ => Ok(None),
    }
}

fn run_local(config: GameConfig, computer_only: bool) -> anyhow::Result<Option<String>> {
    let px: Box<dyn PlayerController> = if computer_only {
        Box::new(MinimaxAI::new(Side::X, "Minimax AI (X)"))
    } else {
        Box::new(TuiController::new(Side::X, "Human"))
    };
    let po: Box<dyn PlayerController> = Box::new(MinimaxAI::new(Side::O, "Computer"));

    let mut game = Game::new(config);
    loop {
        let Some(result) = game.play(px.as_ref(), po.as_ref())? else {
            return Ok(None);
        };
        info!(outcome = %result, "game finished");

        print!("\r\n[1]: Play again | [q]: Quit\r\n");
        if read_choice('1')?.is_none() {
            return Ok(None);
        }
        game.reset();
    }
}

fn run_stats(config: GameConfig) -> anyhow::Result<Option<String>> {
    print!("\r\nPlaying {} games per pairing...\r\n", config.selfplay_games);

    let pairings = [
        (AIKind::Random, AIKind::Minimax),
        (AIKind::Minimax, AIKind::Random),
        (AIKind::Minimax, AIKind::Minimax),
    ];

    let mut lines = Vec::new();
    for (x_kind, o_kind) in pairings {
        let stats = run_selfplay(&SelfPlayConfig {
            num_games: config.selfplay_games,
            x_kind,
            o_kind,
        })?;
        let line = summary_line(&stats);
        print!("{}\r\n", line);
        lines.push(line);
    }

    Ok(Some(lines.join("\n")))
}
