//! Host-facing game: history, current step and the sync listener.

use super::action::{Move, MoveError};
use super::history::{History, HistoryError};
use super::invariants::{HistoryMonotonicInvariant, Invariant};
use super::state::{GameState, GameStatus};
use super::sync::{FnListener, StateListener, SyncSnapshot};
use super::{Player, Position};
use tracing::{debug, info, instrument, warn};

/// A game a host drives: move placement, step navigation and state sync.
///
/// The host owns the `Game`; all mutation goes through [`Game::play`],
/// [`Game::place`], [`Game::jump_to`] and [`Game::restart`].
pub struct Game {
    history: History,
    step: usize,
    listener: Option<Box<dyn StateListener>>,
}

impl Game {
    /// Creates a new game with no listener.
    #[instrument]
    pub fn new() -> Self {
        Self {
            history: History::new(),
            step: 0,
            listener: None,
        }
    }

    /// Creates a new game that reports accepted states to `listener`.
    pub fn with_listener(listener: impl StateListener + 'static) -> Self {
        let mut game = Self::new();
        game.set_listener(listener);
        game
    }

    /// Registers the sync listener, replacing any previous one.
    pub fn set_listener(&mut self, listener: impl StateListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Registers a closure as the sync listener.
    pub fn on_state<F>(&mut self, f: F)
    where
        F: FnMut(&SyncSnapshot) + 'static,
    {
        self.set_listener(FnListener(f));
    }

    /// Removes the sync listener.
    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    /// Returns true if a sync listener is registered.
    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    /// Returns the state at the current step.
    pub fn state(&self) -> &GameState {
        &self.history.states()[self.step]
    }

    /// Returns the current step.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Returns the recorded history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Returns the status of the current state.
    pub fn status(&self) -> GameStatus {
        self.state().status()
    }

    /// Returns the winner of the current state.
    pub fn winner(&self) -> Option<Player> {
        self.state().winner()
    }

    /// Plays the next mark at a cell index (0-8).
    ///
    /// From an earlier step, later history is discarded before the new
    /// state is recorded. The new state is then sent to the listener.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason; the game is left unchanged.
    #[instrument(skip(self), fields(step = self.step))]
    pub fn play(&mut self, index: usize) -> Result<Move, MoveError> {
        let pos = Position::from_index(index).ok_or(MoveError::OutOfBounds(index))?;
        self.place(pos)
    }

    /// Plays the next mark at a position.
    #[instrument(skip(self), fields(step = self.step))]
    pub fn place(&mut self, pos: Position) -> Result<Move, MoveError> {
        let current = *self.state();
        let next = current.try_place(pos).inspect_err(|e| {
            debug!(error = %e, "Move rejected");
        })?;

        let action = Move::new(current.next_mark(), pos);
        self.history.record(self.step, next);
        self.step += 1;
        debug_assert!(
            HistoryMonotonicInvariant::holds(&self.history),
            "{}",
            HistoryMonotonicInvariant::description()
        );
        info!(%action, step = self.step, "Move accepted");

        if let Some(winner) = next.winner() {
            info!(%winner, "Game won");
        }

        self.emit(&next);
        Ok(action)
    }

    /// Moves to a recorded step.
    ///
    /// Later steps stay recorded until a move is played from here.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStep` for steps beyond the last recorded one.
    #[instrument(skip(self), fields(from = self.step))]
    pub fn jump_to(&mut self, step: usize) -> Result<&GameState, HistoryError> {
        self.history.jump_to(step)?;
        self.step = step;
        info!(step, status = %self.status(), "Jumped to step");
        Ok(self.state())
    }

    /// Starts over with an empty board, keeping the listener.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        self.history = History::new();
        self.step = 0;
        info!("Game restarted");
    }

    fn emit(&mut self, state: &GameState) {
        let Some(listener) = self.listener.as_mut() else {
            info!("No state listener registered, skipping sync");
            return;
        };

        let snapshot = SyncSnapshot::from(state);
        if let Err(e) = listener.on_state(&snapshot) {
            warn!(error = %e, step = snapshot.step_number, "State listener failed");
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("history", &self.history)
            .field("step", &self.step)
            .field("has_listener", &self.has_listener())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::SyncError;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct FailingListener;

    impl StateListener for FailingListener {
        fn on_state(&mut self, _snapshot: &SyncSnapshot) -> Result<(), SyncError> {
            Err(SyncError::new("listener offline"))
        }
    }

    #[test]
    fn test_play_without_listener_is_accepted() {
        let mut game = Game::new();
        assert!(!game.has_listener());
        let action = game.play(4).unwrap();
        assert_eq!(action, Move::new(Player::X, Position::Center));
        assert_eq!(game.step(), 1);
    }

    #[test]
    fn test_listener_sees_each_accepted_state() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut game = Game::new();
        game.on_state(move |s| sink.borrow_mut().push(*s));

        game.play(0).unwrap();
        assert!(game.play(0).is_err());
        game.play(4).unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].step_number, 2);
        assert!(seen[1].x_is_next);
        assert_eq!(seen[1].squares[4], Some(Player::O));
    }

    #[test]
    fn test_cleared_listener_stops_sync_but_not_play() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut game = Game::new();
        game.on_state(move |s| sink.borrow_mut().push(*s));

        game.play(0).unwrap();
        game.clear_listener();
        assert!(!game.has_listener());
        game.play(4).unwrap();

        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(game.step(), 2);
        assert_eq!(game.state().board().marks()[4], Some(Player::O));
    }

    #[test]
    fn test_failing_listener_does_not_undo_move() {
        let mut game = Game::with_listener(FailingListener);
        game.play(4).unwrap();
        assert_eq!(game.state().move_count(), 1);
    }

    #[test]
    fn test_rejected_move_leaves_game_unchanged() {
        let mut game = Game::new();
        game.play(4).unwrap();
        let before = *game.state();
        assert_eq!(
            game.play(4),
            Err(MoveError::SquareOccupied(Position::Center))
        );
        assert_eq!(game.play(12), Err(MoveError::OutOfBounds(12)));
        assert_eq!(game.state(), &before);
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn test_play_after_jump_discards_later_steps() {
        let mut game = Game::new();
        for index in [0, 4, 8] {
            game.play(index).unwrap();
        }
        game.jump_to(1).unwrap();
        assert_eq!(game.history().len(), 4);

        game.play(2).unwrap();
        assert_eq!(game.step(), 2);
        assert_eq!(game.history().len(), 3);
        assert_eq!(
            game.history().move_at(2),
            Some(Move::new(Player::O, Position::TopRight))
        );
    }

    #[test]
    fn test_restart_keeps_listener() {
        let mut game = Game::with_listener(FailingListener);
        game.play(4).unwrap();
        game.restart();
        assert_eq!(game.state(), &GameState::new());
        assert_eq!(game.history().len(), 1);
        assert!(game.has_listener());
    }
}
