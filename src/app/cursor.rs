//! Selection cursor over the active result list.
//!
//! Movement is clamped rather than wrapped: stepping past either end leaves
//! the cursor where it is.

/// Direction of a single cursor step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    const fn delta(self) -> isize {
        match self {
            Self::Up => -1,
            Self::Down => 1,
        }
    }
}

/// Zero-based index of the selected result.
///
/// Holds `0 <= index < len` whenever the active list is non-empty. Reset to 0
/// whenever the mode changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor(usize);

impl Cursor {
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    /// Returns the cursor moved one step in `direction` within `match_count`
    /// entries.
    ///
    /// The move is a no-op when the list is empty or when the new index would
    /// fall outside `[0, match_count)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use startpage::app::cursor::{Cursor, Direction};
    ///
    /// let cursor = Cursor::new().moved(Direction::Down, 2);
    /// assert_eq!(cursor.index(), 1);
    /// assert_eq!(cursor.moved(Direction::Down, 2).index(), 1);
    /// assert_eq!(Cursor::new().moved(Direction::Up, 2).index(), 0);
    /// ```
    #[must_use]
    pub fn moved(self, direction: Direction, match_count: usize) -> Self {
        if match_count == 0 {
            return self;
        }

        self.0
            .checked_add_signed(direction.delta())
            .filter(|&index| index < match_count)
            .map_or(self, Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_put_on_empty_list() {
        assert_eq!(Cursor::new().moved(Direction::Down, 0), Cursor::new());
        assert_eq!(Cursor::new().moved(Direction::Up, 0), Cursor::new());
    }

    #[test]
    fn clamps_at_both_ends() {
        let top = Cursor::new();
        assert_eq!(top.moved(Direction::Up, 3), top);

        let bottom = Cursor(2);
        assert_eq!(bottom.moved(Direction::Down, 3), bottom);
    }

    #[test]
    fn never_leaves_bounds() {
        for count in 1..6 {
            let mut cursor = Cursor::new();
            for step in 0..20 {
                let direction = if step % 7 < 4 { Direction::Down } else { Direction::Up };
                cursor = cursor.moved(direction, count);
                assert!(cursor.index() < count);
            }
        }
    }

    #[test]
    fn walks_down_and_back_up() {
        let cursor = Cursor::new()
            .moved(Direction::Down, 3)
            .moved(Direction::Down, 3);
        assert_eq!(cursor.index(), 2);
        assert_eq!(cursor.moved(Direction::Up, 3).index(), 1);
    }
}
