pub mod board;
pub mod error;
pub mod r#move;
pub mod types;

pub use board::{Board, BOARD_CELLS, BOARD_WIDTH};
pub use error::EngineError;
pub use r#move::Move;
pub use types::{Cell, GameOutcome, Side};
