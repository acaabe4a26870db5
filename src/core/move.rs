use serde::{Deserialize, Serialize};
use std::fmt;

/// 探索中に生成される候補手とその評価値
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub index: usize,
    pub score: i32,
}

impl Move {
    pub fn new(index: usize, score: i32) -> Self {
        Move { index, score }
    }

    pub fn row(&self) -> usize {
        self.index / super::board::BOARD_WIDTH
    }

    pub fn col(&self) -> usize {
        self.index % super::board::BOARD_WIDTH
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "cell {} (row {}, col {}) score {}",
            self.index,
            self.row(),
            self.col(),
            self.score
        )
    }
}
