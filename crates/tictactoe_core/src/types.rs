//! Core domain types for tic-tac-toe.

use super::position::Position;
use serde::{Deserialize, Serialize};

/// A mark a player places on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the player to move after `move_count` accepted moves.
    ///
    /// X moves on even counts, O on odd counts.
    pub fn for_move_count(move_count: usize) -> Self {
        if move_count % 2 == 0 {
            Player::X
        } else {
            Player::O
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }
}

impl From<Option<Player>> for Square {
    fn from(mark: Option<Player>) -> Self {
        mark.map_or(Square::Empty, Square::Occupied)
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Builds a board from per-cell marks, `None` meaning empty.
    pub fn from_marks(marks: [Option<Player>; 9]) -> Self {
        Self {
            squares: marks.map(Square::from),
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Returns per-cell marks, `None` for empty squares.
    pub fn marks(&self) -> [Option<Player>; 9] {
        self.squares.map(Square::player)
    }

    /// Number of squares holding the given player's mark.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count()
    }

    /// Number of non-empty squares.
    pub fn occupied(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    // Only `GameState` writes to the grid.
    pub(crate) fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }
}
