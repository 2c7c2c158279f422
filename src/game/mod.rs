//! Core game logic module for Snake
//!
//! This module contains the simulation rules without any I/O, timing or
//! rendering dependencies. The device-facing loop lives in `modes`.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::{GameConfig, Variant};
pub use engine::{CollisionType, GameEngine, StepInfo, StepResult};
pub use state::{GRID_HEIGHT, GRID_WIDTH, GameState, INITIAL_SNAKE_LENGTH, Position, Snake};
