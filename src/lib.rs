//! Tic-tac-toe against a computer opponent that always plays optimally.
//!
//! [`logic`] answers "who has won, is it a draw", and
//! [`player::ai::minimax`] picks the computer's move by exhaustive search.
//! Everything else is the terminal front end around those two.

pub mod config;
pub mod core;
pub mod display;
pub mod game;
pub mod logger;
pub mod logic;
pub mod player;
pub mod selfplay;


pub use crate::core::{Board, Cell, EngineError, GameOutcome, Move, Side};
pub use crate::logic::{has_won, is_full, outcome};
pub use crate::player::ai::{best_move, search};
