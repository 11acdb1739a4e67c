//! Step history and navigation.

use super::action::{Move, MoveError};
use super::{GameState, Position, Square};
use tracing::{debug, instrument};

/// Error navigating history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum HistoryError {
    /// The requested step has not been played.
    #[display("Step {} is out of range (0-{})", step, max)]
    InvalidStep {
        /// Requested step.
        step: usize,
        /// Last recorded step.
        max: usize,
    },
}

impl std::error::Error for HistoryError {}

/// Ordered record of game states, one per step.
///
/// Entry `i` is the state after `i` moves, so entry 0 is always the empty
/// board and the history is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    pub(crate) states: Vec<GameState>,
}

impl History {
    /// Creates a history holding only the empty starting state.
    pub fn new() -> Self {
        Self {
            states: vec![GameState::new()],
        }
    }

    /// Replays positions from the empty board.
    ///
    /// # Errors
    ///
    /// Returns the first rejected move's error.
    #[instrument]
    pub fn from_moves(moves: &[Position]) -> Result<Self, MoveError> {
        let mut history = Self::new();
        for (step, pos) in moves.iter().enumerate() {
            let next = history.states[step].try_place(*pos)?;
            history.record(step, next);
        }
        debug!(steps = history.len(), "Replayed history");
        Ok(history)
    }

    /// All recorded states, indexed by step.
    pub fn states(&self) -> &[GameState] {
        &self.states
    }

    /// Number of recorded states (moves played plus one).
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false: the starting state is always recorded.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The highest recorded step.
    pub fn last_step(&self) -> usize {
        self.states.len() - 1
    }

    /// Returns the state at `step`, if recorded.
    pub fn get(&self, step: usize) -> Option<&GameState> {
        self.states.get(step)
    }

    /// Returns the most recent state.
    pub fn latest(&self) -> &GameState {
        &self.states[self.last_step()]
    }

    /// Returns the state at `step`.
    ///
    /// Its next mark is X for even steps and O for odd ones, since a
    /// state's move count equals its step.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStep` if `step` exceeds the last recorded step.
    #[instrument(skip(self), fields(len = self.states.len()))]
    pub fn jump_to(&self, step: usize) -> Result<GameState, HistoryError> {
        self.get(step).copied().ok_or(HistoryError::InvalidStep {
            step,
            max: self.last_step(),
        })
    }

    /// The move that produced the state at `step`.
    ///
    /// Step 0 has no move.
    pub fn move_at(&self, step: usize) -> Option<Move> {
        let before = self.states.get(step.checked_sub(1)?)?;
        let after = self.states.get(step)?;
        Position::ALL.into_iter().find_map(|pos| {
            match (before.board().get(pos), after.board().get(pos)) {
                (Square::Empty, Square::Occupied(player)) => Some(Move::new(player, pos)),
                _ => None,
            }
        })
    }

    /// Records `state` as the successor of `after_step`, dropping any later
    /// entries first.
    pub(crate) fn record(&mut self, after_step: usize, state: GameState) {
        self.states.truncate(after_step + 1);
        self.states.push(state);
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the state at `step` of `history`.
///
/// Free-function form of [`History::jump_to`].
pub fn jump_to_step(history: &History, step: usize) -> Result<GameState, HistoryError> {
    history.jump_to(step)
}
