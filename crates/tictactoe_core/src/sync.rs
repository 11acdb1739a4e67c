//! State-sync port for external listeners.
//!
//! After every accepted move the game hands a [`SyncSnapshot`] to the
//! registered [`StateListener`], if any. Listener failures are logged by the
//! caller and never undo the move.

use super::{GameState, Player};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Wire shape of an accepted state.
///
/// Serializes as `{"squares": [...], "stepNumber": n, "xIsNext": bool}`
/// with each square `"X"`, `"O"` or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSnapshot {
    /// Per-cell marks in row-major order.
    pub squares: [Option<Player>; 9],
    /// Number of moves that produced this state.
    pub step_number: usize,
    /// Whether X moves next.
    pub x_is_next: bool,
}

impl SyncSnapshot {
    /// Serializes the snapshot as a single line of JSON.
    #[instrument(skip(self), fields(step = self.step_number))]
    pub fn to_json(&self) -> Result<String, SyncError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<&GameState> for SyncSnapshot {
    fn from(state: &GameState) -> Self {
        Self {
            squares: state.board().marks(),
            step_number: state.move_count(),
            x_is_next: state.next_mark() == Player::X,
        }
    }
}

/// Receives each accepted state.
pub trait StateListener {
    /// Called once per accepted move with the resulting state.
    fn on_state(&mut self, snapshot: &SyncSnapshot) -> Result<(), SyncError>;
}

/// Adapts a closure into a [`StateListener`].
pub struct FnListener<F>(pub F);

impl<F> StateListener for FnListener<F>
where
    F: FnMut(&SyncSnapshot),
{
    fn on_state(&mut self, snapshot: &SyncSnapshot) -> Result<(), SyncError> {
        (self.0)(snapshot);
        Ok(())
    }
}

/// Listener failure with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Sync error: {} at {}:{}", message, file, line)]
pub struct SyncError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SyncError {
    /// Creates a new sync error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<serde_json::Error> for SyncError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Serialization error: {}", err))
    }
}

impl From<std::io::Error> for SyncError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_of_new_state() {
        let snapshot = SyncSnapshot::from(&GameState::new());
        assert_eq!(snapshot.squares, [None; 9]);
        assert_eq!(snapshot.step_number, 0);
        assert!(snapshot.x_is_next);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let state = GameState::new().apply_move(0).apply_move(4);
        let json: serde_json::Value =
            serde_json::from_str(&SyncSnapshot::from(&state).to_json().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "squares": ["X", null, null, null, "O", null, null, null, null],
                "stepNumber": 2,
                "xIsNext": true,
            })
        );
    }

    #[test]
    fn test_fn_listener_receives_snapshot() {
        let mut seen = Vec::new();
        let mut listener = FnListener(|s: &SyncSnapshot| seen.push(s.step_number));
        let state = GameState::new().apply_move(3);
        listener.on_state(&SyncSnapshot::from(&state)).unwrap();
        drop(listener);
        assert_eq!(seen, vec![1]);
    }
}
