use crate::device::LedDisplay;
use crate::game::GameState;

pub const HEAD_BRIGHTNESS: u8 = 255;
pub const BODY_BRIGHTNESS: u8 = 90;
pub const FOOD_BRIGHT: u8 = 180;
pub const FOOD_DIM: u8 = 120;

/// Project the game state onto the LED matrix: dim body, bright head,
/// and food alternating between two levels with `food_blink`.
pub fn draw_board<D: LedDisplay>(display: &mut D, state: &GameState) {
    display.clear();

    for pos in state.snake.body_segments() {
        display.plot(pos.x, pos.y, BODY_BRIGHTNESS);
    }

    let head = state.snake.head();
    display.plot(head.x, head.y, HEAD_BRIGHTNESS);

    let food = if state.food_blink { FOOD_BRIGHT } else { FOOD_DIM };
    display.plot(state.food.x, state.food.y, food);
}
