use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::state::{GRID_HEIGHT, GRID_WIDTH, INITIAL_SNAKE_LENGTH};

/// Which of the two game flavours to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// No win condition; a long melody starts once the snake grows past the
    /// anthem length. Speed-up has no floor.
    Anthem,
    /// Reaching the win length ends the round with a fanfare. Pickups chirp
    /// and the speed-up is clamped to the minimum tick.
    Victory,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub variant: Variant,
    /// Tick interval at the start of every round
    pub initial_tick_ms: u64,
    /// Fastest tick the Victory variant will speed up to
    pub min_tick_ms: u64,
    /// Length that wins a Victory round
    pub win_length: usize,
    /// The anthem starts once the snake is longer than this (Anthem variant)
    pub anthem_length: usize,
    /// Tempo of the long melody, in BPM
    pub anthem_tempo: u32,
    /// Tempo of the death melody, in BPM
    pub death_tempo: u32,
    /// Scrolled once at power-on, never again
    pub greeting: String,
    /// Scrolled during the win fanfare
    pub win_text: String,
    /// How long the skull lingers after the death melody
    pub death_pause_ms: u64,
    /// How long the happy face lingers after the win text
    pub win_pause_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Victory,
            initial_tick_ms: 700,
            min_tick_ms: 250,
            win_length: 9,
            anthem_length: 9,
            anthem_tempo: 120,
            death_tempo: 144,
            greeting: "Hi Zhi!".to_string(),
            win_text: "PhD! Dr. Zhi! PhD! Dr. Zhi! PhD! Dr. Zhi! PhD! Dr. Zhi!".to_string(),
            death_pause_ms: 400,
            win_pause_ms: 300,
        }
    }
}

impl GameConfig {
    /// Default configuration for a variant
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// Reject configurations the game loop cannot run with
    pub fn validate(&self) -> Result<()> {
        let cells = GRID_WIDTH as usize * GRID_HEIGHT as usize;

        if self.initial_tick_ms == 0 {
            bail!("initial_tick_ms must be positive");
        }
        if self.variant == Variant::Victory && self.min_tick_ms == 0 {
            bail!("min_tick_ms must be positive");
        }
        if self.anthem_tempo == 0 || self.death_tempo == 0 {
            bail!("melody tempos must be positive");
        }
        if self.win_length < INITIAL_SNAKE_LENGTH || self.win_length > cells {
            bail!(
                "win_length must be between {} and {}, got {}",
                INITIAL_SNAKE_LENGTH,
                cells,
                self.win_length
            );
        }
        // The trigger is `length > anthem_length` and the snake never
        // outgrows the board.
        if self.anthem_length < INITIAL_SNAKE_LENGTH || self.anthem_length >= cells {
            bail!(
                "anthem_length must be between {} and {}, got {}",
                INITIAL_SNAKE_LENGTH,
                cells - 1,
                self.anthem_length
            );
        }
        Ok(())
    }

    /// Tick interval after a food pickup.
    ///
    /// Both variants truncate toward zero. Victory uses fixed-point
    /// `tick * 80 / 100` and clamps to `min_tick_ms`; Anthem scales by 0.8
    /// with no variant floor, but never below 1 ms.
    pub fn sped_up_tick(&self, tick_ms: u64) -> u64 {
        match self.variant {
            Variant::Anthem => ((tick_ms as f64 * 0.8).trunc() as u64).max(1),
            Variant::Victory => (tick_ms * 80 / 100).max(self.min_tick_ms),
        }
    }
}
