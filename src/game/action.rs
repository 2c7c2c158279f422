/// Direction the snake is heading, in clockwise order starting at Up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    const CLOCKWISE: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Ordinal in clockwise order (Up = 0, Right = 1, Down = 2, Left = 3)
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Direction for an ordinal, taken mod 4
    pub fn from_ordinal(ordinal: usize) -> Self {
        Self::CLOCKWISE[ordinal % 4]
    }

    /// Rotate counter-clockwise (ordinal - 1 mod 4)
    pub fn turned_left(self) -> Self {
        Self::from_ordinal(self.ordinal() + 3)
    }

    /// Rotate clockwise (ordinal + 1 mod 4)
    pub fn turned_right(self) -> Self {
        Self::from_ordinal(self.ordinal() + 1)
    }

    /// Returns the delta (dx, dy) for moving in this direction.
    /// y grows downwards, matching LED row numbering.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }
}

/// A request from the input path to the task that owns the game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Button A
    TurnLeft,
    /// Button B
    TurnRight,
    /// Logo touched: abandon the round and start over
    Reset,
}
