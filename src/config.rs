use serde::{Deserialize, Serialize};
use tracing::warn;

pub const CONFIG_PATH: &str = "tictactoe_config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Pause before a computer move. Cosmetic only.
    pub think_delay_ms: u64,
    /// Show the computer's root evaluation under the board.
    pub show_scores: bool,
    pub selfplay_games: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            think_delay_ms: 500,
            show_scores: false,
            selfplay_games: 100,
        }
    }
}

impl GameConfig {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(CONFIG_PATH)
    }

    pub fn load_from(path: &str) -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(path)?;
        Self::from_json(&config_str)
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            warn!(path = CONFIG_PATH, error = %e, "using default config");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "show_scores": true }"#).unwrap();
        assert!(config.show_scores);
        assert_eq!(config.think_delay_ms, 500);
        assert_eq!(config.selfplay_games, 100);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(GameConfig::from_json("{ think_delay_ms: ").is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(GameConfig::load_from("does/not/exist.json").is_err());
    }
}
