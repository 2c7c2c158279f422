//! The device around the game: LED matrix, speaker, melody notation and
//! the terminal emulation of both.

pub mod display;
pub mod font;
pub mod melody;
pub mod speaker;
pub mod terminal;
pub mod tunes;

pub use display::{Icon, LedDisplay, LedMatrix, MATRIX_SIZE};
pub use melody::{Melody, MelodyError, Note, Pitch};
pub use speaker::Speaker;
pub use terminal::{NowPlaying, SharedMatrix, TerminalDisplay, TerminalSpeaker};
pub use tunes::Tunes;
