//! Single winner invariant: lines are never complete for both marks.

use super::Invariant;
use crate::rules::LINES;
use crate::{GameState, Square};

/// Invariant: at most one mark owns complete lines.
///
/// Moves are rejected once any line is complete, so the opponent can never
/// complete a line of their own afterwards. A single move may complete two
/// lines for the same mark.
pub struct SingleWinnerInvariant;

impl Invariant<GameState> for SingleWinnerInvariant {
    fn holds(state: &GameState) -> bool {
        let board = state.board();
        let mut owners = LINES.iter().filter_map(|[a, b, c]| {
            let sq = board.get(*a);
            match sq {
                Square::Occupied(player) if sq == board.get(*b) && sq == board.get(*c) => {
                    Some(player)
                }
                _ => None,
            }
        });

        match owners.next() {
            Some(first) => owners.all(|p| p == first),
            None => true,
        }
    }

    fn description() -> &'static str {
        "At most one mark owns a complete line"
    }
}
