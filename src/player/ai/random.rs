use crate::core::{Board, Side};
use crate::player::PlayerController;
use rand::seq::SliceRandom;

pub struct RandomAI {
    pub side: Side,
    pub name: String,
}

impl RandomAI {
    pub fn new(side: Side, name: &str) -> Self {
        RandomAI {
            side,
            name: name.to_string(),
        }
    }
}

impl PlayerController for RandomAI {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&self, _board: &Board, legal_moves: &[usize]) -> Option<usize> {
        let mut rng = rand::thread_rng();
        legal_moves.choose(&mut rng).copied()
    }

    fn side(&self) -> Side {
        self.side
    }

    fn is_computer(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picks_only_legal_moves() {
        let ai = RandomAI::new(Side::X, "Random AI");
        let board = Board::new();
        let legal = [1, 5, 7];
        for _ in 0..50 {
            let mv = ai.choose_move(&board, &legal).unwrap();
            assert!(legal.contains(&mv));
        }
        assert_eq!(ai.choose_move(&board, &[]), None);
    }
}
