//! Game state and the move acceptor.

use super::action::MoveError;
use super::contracts::{Contract, MoveContract};
use super::rules::evaluate_winner;
use super::{Board, Player, Position, Square};
use serde::Serialize;
use tracing::{debug, instrument};

/// Status of a game state, as shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
pub enum GameStatus {
    /// No line is complete; `next` moves.
    ///
    /// A full board without a winner stays in this status.
    #[display("Next player: {}", next)]
    InProgress {
        /// The player to move.
        next: Player,
    },
    /// A line is complete.
    #[display("Winner: {}", _0)]
    Won(Player),
}

impl GameStatus {
    /// Returns true once a line is complete.
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::Won(_))
    }
}

/// A board plus the number of moves that produced it.
///
/// The player to move is derived from the move count, so a state can never
/// disagree with itself about whose turn it is. The only way to obtain a
/// non-empty state is through [`GameState::try_move`] or
/// [`GameState::apply_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) move_count: usize,
}

impl GameState {
    /// Creates the empty starting state.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            move_count: 0,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the number of accepted moves.
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Returns the player to move: X on even counts, O on odd.
    pub fn next_mark(&self) -> Player {
        Player::for_move_count(self.move_count)
    }

    /// Returns the winner, if a line is complete.
    pub fn winner(&self) -> Option<Player> {
        evaluate_winner(&self.board)
    }

    /// Returns the display status.
    pub fn status(&self) -> GameStatus {
        match self.winner() {
            Some(winner) => GameStatus::Won(winner),
            None => GameStatus::InProgress {
                next: self.next_mark(),
            },
        }
    }

    /// Places the next mark at a cell index (0-8).
    ///
    /// # Errors
    ///
    /// - `OutOfBounds` if the index is not 0-8
    /// - `GameOver` if a line is already complete
    /// - `SquareOccupied` if the cell holds a mark
    #[instrument(skip(self), fields(move_count = self.move_count))]
    pub fn try_move(&self, index: usize) -> Result<GameState, MoveError> {
        let pos = Position::from_index(index).ok_or(MoveError::OutOfBounds(index))?;
        self.try_place(pos)
    }

    /// Places the next mark at a position.
    ///
    /// Preconditions are always checked; postconditions in debug builds only.
    #[instrument(skip(self), fields(move_count = self.move_count, player = %self.next_mark()))]
    pub fn try_place(&self, pos: Position) -> Result<GameState, MoveError> {
        MoveContract::pre(self, &pos)?;

        let mut next = *self;
        next.board.set(pos, Square::Occupied(self.next_mark()));
        next.move_count += 1;

        #[cfg(debug_assertions)]
        MoveContract::post(self, &next)?;

        Ok(next)
    }

    /// Places the next mark at a cell index, returning `self` unchanged if
    /// the move is rejected.
    ///
    /// Rejection is not an error here: a click on an occupied square or
    /// after a win simply does nothing.
    #[instrument(skip(self), fields(move_count = self.move_count))]
    pub fn apply_move(&self, index: usize) -> GameState {
        match self.try_move(index) {
            Ok(next) => next,
            Err(e) => {
                debug!(error = %e, "Move rejected, state unchanged");
                *self
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty_and_x_moves() {
        let state = GameState::new();
        assert_eq!(state.move_count(), 0);
        assert_eq!(state.next_mark(), Player::X);
        assert_eq!(state.board(), &Board::new());
        assert_eq!(state.status(), GameStatus::InProgress { next: Player::X });
    }

    #[test]
    fn test_accepted_move_places_mark_and_flips_turn() {
        let state = GameState::new().apply_move(4);
        assert_eq!(state.board().get(Position::Center), Square::Occupied(Player::X));
        assert_eq!(state.move_count(), 1);
        assert_eq!(state.next_mark(), Player::O);
    }

    #[test]
    fn test_occupied_square_rejected() {
        let state = GameState::new().apply_move(4);
        assert_eq!(
            state.try_move(4),
            Err(MoveError::SquareOccupied(Position::Center))
        );
        assert_eq!(state.apply_move(4), state);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let state = GameState::new();
        assert_eq!(state.try_move(9), Err(MoveError::OutOfBounds(9)));
        assert_eq!(state.apply_move(42), state);
    }

    #[test]
    fn test_status_display_matches_status_line() {
        let state = GameState::new().apply_move(0);
        assert_eq!(state.status().to_string(), "Next player: O");

        let won = [0, 3, 1, 4, 2]
            .into_iter()
            .fold(GameState::new(), |s, i| s.apply_move(i));
        assert_eq!(won.status().to_string(), "Winner: X");
        assert!(won.status().is_over());
    }

    #[test]
    fn test_full_board_without_winner_stays_in_progress() {
        // X O X / X O O / O X X
        let state = [0, 1, 2, 4, 3, 5, 7, 6, 8]
            .into_iter()
            .fold(GameState::new(), |s, i| s.apply_move(i));
        assert_eq!(state.move_count(), 9);
        assert_eq!(state.winner(), None);
        assert_eq!(state.status(), GameStatus::InProgress { next: Player::O });
    }
}
