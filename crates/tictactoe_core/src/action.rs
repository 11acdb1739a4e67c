//! Moves and move rejections.

use super::{Player, Position};
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a player placing their mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The position where the player places their mark.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, position: Position) -> Self {
        Self { player, position }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position.label())
    }
}

/// Why a move was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// A line is already complete.
    #[display("Game is already over, {} won", winner)]
    GameOver {
        /// The mark owning the complete line.
        winner: Player,
    },

    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// The cell index is outside 0-8.
    #[display("Position {} out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),

    /// A postcondition failed after applying the move.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}
