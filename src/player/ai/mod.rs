pub mod minimax;
pub mod random;

pub use minimax::{best_move, search, MinimaxAI, SearchReport};
pub use random::RandomAI;

use crate::core::Side;
use crate::player::PlayerController;
use serde::{Deserialize, Serialize};

/// 自動対戦などで使うAIの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AIKind {
    Minimax,
    Random,
}

impl AIKind {
    pub fn build(self, side: Side) -> Box<dyn PlayerController> {
        match self {
            AIKind::Minimax => Box::new(MinimaxAI::new(side, &format!("Minimax AI ({})", side))),
            AIKind::Random => Box::new(RandomAI::new(side, &format!("Random AI ({})", side))),
        }
    }
}
