//! Key mapping for board navigation.

use crossterm::event::KeyCode;
use tictactoe_core::Position;

/// Moves the cursor one cell with the arrow keys, stopping at the edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());

    let target = match key {
        KeyCode::Up => row.checked_sub(1).map(|r| (r, col)),
        KeyCode::Down => Some((row + 1, col)),
        KeyCode::Left => col.checked_sub(1).map(|c| (row, c)),
        KeyCode::Right => Some((row, col + 1)),
        _ => None,
    };

    target
        .and_then(|(r, c)| Position::from_row_col(r, c))
        .unwrap_or(cursor)
}

/// Maps keys `1`-`9` to cells in reading order: `1` is top-left, `9`
/// bottom-right.
pub fn digit_position(c: char) -> Option<Position> {
    let digit = c.to_digit(10)? as usize;
    digit.checked_sub(1).and_then(Position::from_index)
}
