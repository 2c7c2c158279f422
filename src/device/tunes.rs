//! Built-in tunes

use super::melody::{Melody, MelodyError};
use std::time::Duration;

/// Long melody: the win fanfare, and the easter egg of the Anthem variant
pub const ANTHEM: &str = concat!(
    "A#3:2 C4:1 R:1 C4:1 R:1 C2:1 R:12 A#3:1 R:1 C4:1 R:1 C4:1 R:1 C2:1 R:1 C6:1 ",
    "R:1 C6:1 R:1 C6:1 R:1 C6:1 R:1 C6:4 C6:1 R:1 D6:1 R:1 A#5:1 R:1 G5:1 R:1 ",
    "G5:4 R:1 F5:1 R:1 G5:4 R:9 C6:1 R:1 C6:1 R:1 C6:1 R:1 D6:1 R:1 D#6:1 R:1 ",
    "D6:4 A#3:1 R:1 C6:1 R:1 C4:1 R:1 D#6:1 R:3 D#6:1 R:3 D#6:1 R:1 D#6:1 R:1 ",
    "F6:1 R:1 D#6:1 R:1 D6:1 R:3 D6:1 R:7 C6:1 R:1 D6:1 R:1 G6:1 R:3 G6:1 R:3 ",
    "D#6:1 R:1 D#6:1 R:1 F6:1 R:1 D#6:1 R:1 G6:1 R:3 G6:1 R:5 G6:1 R:1 F6:1 R:1 ",
    "D#6:1 R:3 C6:1 R:1 C6:1 R:1 C6:1 R:1 C6:1 R:5 C6:1 R:1 B5:1 R:1 C6:1 R:1 ",
    "D6:1 R:3 G6:1 R:3 F6:1 R:1 D#6:1 R:1 D#5:1 R:1 D#6:1 R:1 D#6:1 R:1 D#6:1 ",
    "R:1 D#6:1 R:5 D#6:1 R:1 F6:1 R:1 G6:1 R:1 G#6:1 R:1 G6:1 R:11 C6:1 R:1 C6:1 ",
    "R:1 C6:1 R:1 C6:1 R:1 C6:1 R:1 C6:1 R:1 B5:1 R:1 C6:1 R:1 D6:1 R:4 D#6:1 ",
    "R:1 F6:1 R:1 G6:1 R:1 G6:1 R:6 F6:1 D#6:1 F6:1 D#6:1 R:6 G6:1 R:1 G#6:1 ",
    "R:1 G6:1 R:1 G#6:1 R:1 G6:1 R:1 G#6:1 R:1 G6:1 R:3 C5:1 R:1 C6:1 R:1 C6:1 ",
    "R:1 C6:1 R:1 C6:1 R:1 C6:1 R:3 C6:1 R:1 D6:1 R:1 A#5:1 R:1 G5:1 R:1 G5:1 ",
    "R:2 F5:1 R:1 G5:1",
);

/// Dies Irae style motif played over the skull
pub const DEATH: &str = "D4:2 D#4:2 D4:2 C4:4 R:1 D4:2 D#4:2 D4:2 C4:4 R:2 G3:4";

/// Chirp on food pickup (about B5)
pub const COLLECT_TONE_HZ: u32 = 988;

/// Tempo the device uses for beat fractions when none is given
pub const DEFAULT_TEMPO: u32 = 120;

/// A sixteenth note at `bpm`
pub fn sixteenth_beat(bpm: u32) -> Duration {
    Melody::unit_duration(bpm)
}

/// Length of the pickup chirp
pub fn collect_tone_duration() -> Duration {
    sixteenth_beat(DEFAULT_TEMPO)
}

/// The tunes, parsed once at startup
#[derive(Debug, Clone)]
pub struct Tunes {
    pub anthem: Melody,
    pub death: Melody,
}

impl Tunes {
    pub fn load() -> Result<Self, MelodyError> {
        Ok(Self {
            anthem: Melody::parse(ANTHEM)?,
            death: Melody::parse(DEATH)?,
        })
    }
}
