use super::{
    action::Command,
    config::{GameConfig, Variant},
    state::{GRID_HEIGHT, GRID_WIDTH, GameState, Position, Snake},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Why a round ended in death
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Information about a step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// Whether this step reached the win length
    pub won: bool,
    /// Whether this step should start the long melody
    pub anthem_triggered: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the round has ended (death or win)
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine seeded from the OS
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Fresh round: starting snake heading right, no growth, initial tick,
    /// food somewhere off the snake
    pub fn reset(&mut self) -> GameState {
        let snake = GameState::starting_snake();
        let food = self.place_food(&snake);

        GameState::new(snake, food, self.config.initial_tick_ms)
    }

    /// Apply a turn. Resets are handled by whoever owns the round.
    pub fn apply(&self, state: &mut GameState, command: Command) {
        match command {
            Command::TurnLeft => state.snake.direction = state.snake.direction.turned_left(),
            Command::TurnRight => state.snake.direction = state.snake.direction.turned_right(),
            Command::Reset => {}
        }
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        if !state.is_alive {
            return StepResult {
                terminated: true,
                info: StepInfo::default(),
            };
        }

        let new_head = state.snake.next_head();

        // Checked against the snake before it moves, tail included
        if let Some(collision_type) = self.check_collision(state, new_head) {
            state.is_alive = false;

            return StepResult {
                terminated: true,
                info: StepInfo {
                    collision_type: Some(collision_type),
                    ..Default::default()
                },
            };
        }

        state.snake.push_head(new_head);

        let ate_food = new_head == state.food;
        if ate_food {
            state.growth += 1;
            // A full board leaves the food under the head; the next move
            // collides whatever the direction
            if state.snake.len() < (GRID_WIDTH * GRID_HEIGHT) as usize {
                state.food = self.place_food(&state.snake);
            }
            state.tick_ms = self.config.sped_up_tick(state.tick_ms);
        }

        if state.growth > 0 {
            state.growth -= 1;
        } else {
            state.snake.pop_tail();
        }

        let mut info = StepInfo {
            ate_food,
            ..Default::default()
        };

        match self.config.variant {
            Variant::Victory => {
                if !state.has_won && state.snake.len() >= self.config.win_length {
                    state.has_won = true;
                    state.is_alive = false;
                    info.won = true;
                    return StepResult {
                        terminated: true,
                        info,
                    };
                }
            }
            Variant::Anthem => {
                if !state.anthem_started && state.snake.len() > self.config.anthem_length {
                    state.anthem_started = true;
                    info.anthem_triggered = true;
                }
            }
        }

        state.food_blink = !state.food_blink;

        StepResult {
            terminated: false,
            info,
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if state.is_occupied_by_snake(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Rejection-sample a free cell. The board must have one.
    pub fn place_food(&mut self, snake: &Snake) -> Position {
        loop {
            let x = self.rng.gen_range(0..GRID_WIDTH);
            let y = self.rng.gen_range(0..GRID_HEIGHT);
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                return pos;
            }
        }
    }
}
