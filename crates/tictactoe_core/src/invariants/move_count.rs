//! Move count invariant: the counter matches the filled squares.

use super::Invariant;
use crate::GameState;

/// Invariant: `move_count` equals the number of occupied squares.
///
/// Squares are never cleared once set, so every accepted move fills
/// exactly one square.
pub struct MoveCountInvariant;

impl Invariant<GameState> for MoveCountInvariant {
    fn holds(state: &GameState) -> bool {
        state.move_count() == state.board().occupied()
    }

    fn description() -> &'static str {
        "Move count matches number of occupied squares"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Position, Square};

    #[test]
    fn test_empty_game_holds() {
        assert!(MoveCountInvariant::holds(&GameState::new()));
    }

    #[test]
    fn test_accepted_moves_hold() {
        let state = GameState::new().apply_move(4).apply_move(0);
        assert!(MoveCountInvariant::holds(&state));
        assert_eq!(state.move_count(), 2);
    }

    #[test]
    fn test_square_without_move_violates() {
        let mut state = GameState::new().apply_move(4);
        state.board.set(Position::TopLeft, Square::Occupied(Player::O));
        assert!(!MoveCountInvariant::holds(&state));
    }
}
