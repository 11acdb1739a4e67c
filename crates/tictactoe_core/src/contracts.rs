//! Contract-based validation for moves.
//!
//! A contract pairs the preconditions a move must satisfy with the
//! postconditions the resulting state must satisfy: {P} move {Q}.

use super::action::MoveError;
use super::invariants::{InvariantSet, StateInvariants};
use super::{GameState, Position};
use tracing::{instrument, warn};

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

/// Precondition: no line is complete yet.
pub struct NoWinnerYet;

impl NoWinnerYet {
    /// Rejects with `GameOver` once a line is complete.
    #[instrument(skip(state))]
    pub fn check(state: &GameState) -> Result<(), MoveError> {
        match state.winner() {
            Some(winner) => Err(MoveError::GameOver { winner }),
            None => Ok(()),
        }
    }
}

/// Precondition: the target square is empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Rejects with `SquareOccupied` when the square holds a mark.
    #[instrument(skip(state))]
    pub fn check(pos: Position, state: &GameState) -> Result<(), MoveError> {
        if state.board().is_empty(pos) {
            Ok(())
        } else {
            Err(MoveError::SquareOccupied(pos))
        }
    }
}

/// Composite precondition: the game is undecided and the square is empty.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move, winner check first.
    #[instrument(skip(state))]
    pub fn check(pos: Position, state: &GameState) -> Result<(), MoveError> {
        NoWinnerYet::check(state)?;
        SquareIsEmpty::check(pos, state)?;
        Ok(())
    }
}

/// Contract for placing the next mark.
///
/// Postconditions: exactly one more move was counted, and every state
/// invariant holds on the result.
pub struct MoveContract;

impl Contract<GameState, Position> for MoveContract {
    fn pre(state: &GameState, pos: &Position) -> Result<(), MoveError> {
        LegalMove::check(*pos, state)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), MoveError> {
        if after.move_count() != before.move_count() + 1 {
            warn!(
                before = before.move_count(),
                after = after.move_count(),
                "Move count did not advance by one"
            );
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: move count must advance by one".to_string(),
            ));
        }

        StateInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}
