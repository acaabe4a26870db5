use crate::core::{Board, Side};
use crate::player::ai::minimax::SearchReport;

/// プレイヤー操作のtrait
pub trait PlayerController {
    /// Picks one of `legal_moves`, or `None` to resign.
    fn choose_move(&self, board: &Board, legal_moves: &[usize]) -> Option<usize>;
    fn name(&self) -> &str;
    fn side(&self) -> Side;

    /// Computer players get the "thinking" pause before they move.
    fn is_computer(&self) -> bool {
        false
    }

    fn last_search(&self) -> Option<SearchReport> {
        None
    }
}
