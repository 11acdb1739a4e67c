//! Balanced marks invariant: X leads O by zero or one.

use super::Invariant;
use crate::{GameState, Player};

/// Invariant: X count equals O count, or exceeds it by one.
///
/// X always moves first, so after an even number of moves the counts are
/// equal and after an odd number X is one ahead.
pub struct BalancedMarksInvariant;

impl Invariant<GameState> for BalancedMarksInvariant {
    fn holds(state: &GameState) -> bool {
        let x = state.board().count(Player::X);
        let o = state.board().count(Player::O);
        x == o || x == o + 1
    }

    fn description() -> &'static str {
        "X marks equal O marks or lead by one"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Position, Square};

    #[test]
    fn test_alternating_play_holds() {
        let mut state = GameState::new();
        for index in [4, 0, 8, 2, 6] {
            state = state.apply_move(index);
            assert!(BalancedMarksInvariant::holds(&state));
        }
    }

    #[test]
    fn test_o_ahead_violates() {
        let mut state = GameState::new();
        state.board.set(Position::Center, Square::Occupied(Player::O));
        assert!(!BalancedMarksInvariant::holds(&state));
    }
}
