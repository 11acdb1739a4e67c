//! Win evaluation for tic-tac-toe.

use super::{Board, Player, Position, Square};
use tracing::instrument;

/// The eight winning lines, in evaluation order.
///
/// Rows top to bottom, columns left to right, then the two diagonals.
/// The first complete line in this order decides the winner.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
    ],
    [
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ],
    // Columns
    [
        Position::TopLeft,
        Position::MiddleLeft,
        Position::BottomLeft,
    ],
    [
        Position::TopCenter,
        Position::Center,
        Position::BottomCenter,
    ],
    [
        Position::TopRight,
        Position::MiddleRight,
        Position::BottomRight,
    ],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Returns the first complete line and its owner.
#[instrument(skip(board))]
pub fn winning_line(board: &Board) -> Option<(Player, [Position; 3])> {
    for line in LINES {
        let [a, b, c] = line;
        let sq = board.get(a);
        if let Square::Occupied(player) = sq
            && sq == board.get(b)
            && sq == board.get(c)
        {
            return Some((player, line));
        }
    }

    None
}

/// Returns the winning mark, if any line holds three identical marks.
#[instrument(skip(board))]
pub fn evaluate_winner(board: &Board) -> Option<Player> {
    winning_line(board).map(|(player, _)| player)
}
