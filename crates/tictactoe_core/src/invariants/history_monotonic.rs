//! History monotonic invariant: each step adds exactly one mark.

use super::Invariant;
use crate::{GameState, History, Square};

/// Invariant: history entry `i` is the state after `i` moves.
///
/// Entry 0 is the empty board. Each later entry differs from its predecessor
/// in exactly one square, which went from empty to the predecessor's next mark.
pub struct HistoryMonotonicInvariant;

impl HistoryMonotonicInvariant {
    fn follows(before: &GameState, after: &GameState) -> bool {
        let changed: Vec<_> = before
            .board()
            .squares()
            .iter()
            .zip(after.board().squares())
            .filter(|(b, a)| b != a)
            .collect();

        matches!(
            changed.as_slice(),
            [(Square::Empty, Square::Occupied(p))] if *p == before.next_mark()
        )
    }
}

impl Invariant<History> for HistoryMonotonicInvariant {
    fn holds(history: &History) -> bool {
        let states = history.states();

        if states.first() != Some(&GameState::new()) {
            return false;
        }

        let counts_match = states
            .iter()
            .enumerate()
            .all(|(step, state)| state.move_count() == step);

        counts_match
            && states
                .windows(2)
                .all(|pair| Self::follows(&pair[0], &pair[1]))
    }

    fn description() -> &'static str {
        "Each history step adds exactly one mark for the player to move"
    }
}
