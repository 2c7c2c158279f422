pub mod play;
pub mod runner;

pub use play::PlayMode;
pub use runner::{GameRunner, Phase, RoundStatus};
