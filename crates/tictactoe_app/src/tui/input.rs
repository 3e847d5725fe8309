//! Keyboard mapping for the board and the menu.

use crossterm::event::KeyCode;
use tictactoe_core::Position;

/// Moves cursor based on arrow keys.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let target = match key {
        KeyCode::Up if row > 0 => Position::new(row - 1, col),
        KeyCode::Down => Position::new(row + 1, col),
        KeyCode::Left if col > 0 => Position::new(row, col - 1),
        KeyCode::Right => Position::new(row, col + 1),
        _ => None,
    };
    target.unwrap_or(cursor)
}

/// Maps digit keys `1`-`9` to squares, numbered like the board display.
pub fn digit_position(key: KeyCode) -> Option<Position> {
    match key {
        KeyCode::Char(c) => {
            let digit = c.to_digit(10)? as usize;
            digit.checked_sub(1).and_then(Position::from_index)
        }
        _ => None,
    }
}

/// Moves a menu selection up or down, wrapping around.
pub fn move_selection(selected: usize, len: usize, key: KeyCode) -> usize {
    if len == 0 {
        return 0;
    }
    match key {
        KeyCode::Up => (selected + len - 1) % len,
        KeyCode::Down => (selected + 1) % len,
        _ => selected,
    }
}
