pub mod board;
pub mod renderer;

pub use board::draw_board;
pub use renderer::Renderer;
