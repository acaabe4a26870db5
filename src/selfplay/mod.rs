use crate::config::GameConfig;
use crate::core::{GameOutcome, Side};
use crate::game::Game;
use crate::player::ai::AIKind;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

pub struct SelfPlayConfig {
    pub num_games: usize,
    pub x_kind: AIKind,
    pub o_kind: AIKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Option<Side>,
    pub moves: usize,
    pub time_ms: u128,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfPlayStats {
    pub total_games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub avg_moves: f64,
    pub avg_time_ms: f64,
    pub x_kind: AIKind,
    pub o_kind: AIKind,
    pub generated_at: String,
    pub games: Vec<GameResult>,
}

impl SelfPlayStats {
    pub fn new(x_kind: AIKind, o_kind: AIKind) -> Self {
        Self {
            total_games: 0,
            x_wins: 0,
            o_wins: 0,
            draws: 0,
            avg_moves: 0.0,
            avg_time_ms: 0.0,
            x_kind,
            o_kind,
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            games: Vec::new(),
        }
    }

    pub fn add_result(&mut self, result: GameResult) {
        self.total_games += 1;
        match result.winner {
            Some(Side::X) => self.x_wins += 1,
            Some(Side::O) => self.o_wins += 1,
            None => self.draws += 1,
        }
        self.games.push(result);
        self.recalculate_averages();
    }

    fn recalculate_averages(&mut self) {
        if self.games.is_empty() {
            return;
        }
        let total_moves: usize = self.games.iter().map(|g| g.moves).sum();
        let total_time: u128 = self.games.iter().map(|g| g.time_ms).sum();
        self.avg_moves = total_moves as f64 / self.games.len() as f64;
        self.avg_time_ms = total_time as f64 / self.games.len() as f64;
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn play_one(x_kind: AIKind, o_kind: AIKind) -> GameResult {
    let start_time = Instant::now();
    let px = x_kind.build(Side::X);
    let po = o_kind.build(Side::O);

    let mut game = Game::new(GameConfig::default());
    let result = game.run_silent(px.as_ref(), po.as_ref());

    GameResult {
        winner: result.winner(),
        moves: game.history.len(),
        time_ms: start_time.elapsed().as_millis(),
    }
}

/// Plays `num_games` independent games in parallel. Each game owns its own
/// board and controllers.
pub fn run_selfplay(config: &SelfPlayConfig) -> anyhow::Result<SelfPlayStats> {
    let mut stats = SelfPlayStats::new(config.x_kind, config.o_kind);

    let results: Vec<GameResult> = (0..config.num_games)
        .into_par_iter()
        .map(|_| play_one(config.x_kind, config.o_kind))
        .collect();

    for result in results {
        stats.add_result(result);
    }

    info!(
        games = stats.total_games,
        x_wins = stats.x_wins,
        o_wins = stats.o_wins,
        draws = stats.draws,
        "self-play finished"
    );
    Ok(stats)
}

/// 結果の要約 (1行)
pub fn summary_line(stats: &SelfPlayStats) -> String {
    let pct = |n: usize| {
        if stats.total_games == 0 {
            0.0
        } else {
            n as f64 / stats.total_games as f64 * 100.0
        }
    };
    format!(
        "{:?} (X) vs {:?} (O): X {} ({:.1}%), O {} ({:.1}%), Draw {} ({:.1}%), avg {:.1} moves",
        stats.x_kind,
        stats.o_kind,
        stats.x_wins,
        pct(stats.x_wins),
        stats.o_wins,
        pct(stats.o_wins),
        stats.draws,
        pct(stats.draws),
        stats.avg_moves
    )
}

impl GameResult {
    pub fn outcome(&self) -> GameOutcome {
        match self.winner {
            Some(side) => GameOutcome::Win(side),
            None => GameOutcome::Draw,
        }
    }
}
