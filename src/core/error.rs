use derive_more::{Display, Error};

/// Errors raised by the evaluator, the search and move application.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    /// The board is full or already decided.
    #[display("no legal move: the board is full or the game is over")]
    NoLegalMove,
    #[display("invalid board: {reason}")]
    InvalidBoard { reason: String },
    #[display("cell {index} is already occupied")]
    CellOccupied { index: usize },
    #[display("cell index {index} is out of range (0-8)")]
    OutOfRange { index: usize },
    #[display("the game is already over")]
    GameOver,
}

impl EngineError {
    pub fn invalid_board(reason: impl Into<String>) -> Self {
        EngineError::InvalidBoard {
            reason: reason.into(),
        }
    }
}
