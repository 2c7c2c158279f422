use std::collections::VecDeque;

use super::action::Direction;

/// LED columns
pub const GRID_WIDTH: i32 = 5;
/// LED rows
pub const GRID_HEIGHT: i32 = 5;
/// Every round starts with a snake of this many cells
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// A position on the LED grid. May lie off the grid while a move is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    pub fn is_on_grid(&self) -> bool {
        (0..GRID_WIDTH).contains(&self.x) && (0..GRID_HEIGHT).contains(&self.y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, head at the front, tail at the back
    body: VecDeque<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length.max(1) as i32)
            .map(|i| head.moved_by(-dx * i, -dy * i))
            .collect();

        Self { body, direction }
    }

    /// Build a snake from explicit cells, head first
    pub fn from_cells(cells: impl IntoIterator<Item = Position>, direction: Direction) -> Self {
        let body: VecDeque<Position> = cells.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least one cell");
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// All cells, head first
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().skip(1).copied()
    }

    /// True iff any cell of the snake, head included, is at `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Cell the head would move to next. Not clamped or wrapped.
    pub fn next_head(&self) -> Position {
        self.head().moved_in_direction(self.direction)
    }

    pub(crate) fn push_head(&mut self, pos: Position) {
        self.body.push_front(pos);
    }

    pub(crate) fn pop_tail(&mut self) -> Option<Position> {
        // Never leave the snake empty
        if self.body.len() > 1 {
            self.body.pop_back()
        } else {
            None
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Complete simulation state of one round
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    /// Pending growth credits; each one skips one tail removal
    pub growth: u32,
    /// Current tick interval in milliseconds
    pub tick_ms: u64,
    pub is_alive: bool,
    pub has_won: bool,
    /// Whether the long melody already started this round
    pub anthem_started: bool,
    /// Alternates every tick to make the food blink
    pub food_blink: bool,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Position, tick_ms: u64) -> Self {
        Self {
            snake,
            food,
            growth: 0,
            tick_ms,
            is_alive: true,
            has_won: false,
            anthem_started: false,
            food_blink: false,
        }
    }

    /// Snake every round starts with: [(2,2), (1,2), (0,2)] heading right
    pub fn starting_snake() -> Snake {
        Snake::new(Position::new(2, 2), Direction::Right, INITIAL_SNAKE_LENGTH)
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.is_on_grid()
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }
}
