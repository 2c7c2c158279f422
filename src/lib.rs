//! LED Snake - Snake for a 5x5 LED matrix with two buttons and a touch logo
//!
//! This library provides:
//! - Core game rules (game module)
//! - The device boundary: LED matrix, speaker, melodies (device module)
//! - Drawing the board and the terminal emulator (render module)
//! - Key mapping for the emulated buttons (input module)
//! - The tick loop with its ending sequences, and the terminal session (modes module)

pub mod device;
pub mod game;
pub mod input;
pub mod modes;
pub mod render;
