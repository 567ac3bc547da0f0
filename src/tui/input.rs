//! Cursor movement for keyboard navigation.

use crossterm::event::KeyCode;

/// Moves the cursor over a grid of `len` cards laid out `columns` wide.
///
/// Arrow keys stop at the edges; the last row may be short, so moving down
/// into a missing cell stays put.
pub fn move_cursor(cursor: usize, key: KeyCode, columns: usize, len: usize) -> usize {
    if len == 0 || columns == 0 {
        return 0;
    }

    let row = cursor / columns;
    let col = cursor % columns;

    let next = match key {
        KeyCode::Left if col > 0 => cursor - 1,
        KeyCode::Right if col + 1 < columns => cursor + 1,
        KeyCode::Up if row > 0 => cursor - columns,
        KeyCode::Down => cursor + columns,
        KeyCode::Home => row * columns,
        KeyCode::End => (row * columns + columns - 1).min(len - 1),
        _ => cursor,
    };

    if next < len { next } else { cursor.min(len - 1) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_within_grid() {
        assert_eq!(move_cursor(0, KeyCode::Right, 4, 16), 1);
        assert_eq!(move_cursor(1, KeyCode::Down, 4, 16), 5);
        assert_eq!(move_cursor(5, KeyCode::Up, 4, 16), 1);
        assert_eq!(move_cursor(5, KeyCode::Left, 4, 16), 4);
    }

    #[test]
    fn test_stops_at_edges() {
        assert_eq!(move_cursor(0, KeyCode::Left, 4, 16), 0);
        assert_eq!(move_cursor(3, KeyCode::Right, 4, 16), 3);
        assert_eq!(move_cursor(2, KeyCode::Up, 4, 16), 2);
        assert_eq!(move_cursor(14, KeyCode::Down, 4, 16), 14);
    }

    #[test]
    fn test_short_last_row() {
        // 10 cards, 4 wide: last row holds 8 and 9.
        assert_eq!(move_cursor(6, KeyCode::Down, 4, 10), 6);
        assert_eq!(move_cursor(5, KeyCode::Down, 4, 10), 9);
        assert_eq!(move_cursor(8, KeyCode::End, 4, 10), 9);
        assert_eq!(move_cursor(9, KeyCode::Right, 4, 10), 9);
    }

    #[test]
    fn test_other_keys_do_nothing() {
        assert_eq!(move_cursor(7, KeyCode::Char('x'), 4, 16), 7);
        assert_eq!(move_cursor(0, KeyCode::Down, 4, 0), 0);
    }
}
