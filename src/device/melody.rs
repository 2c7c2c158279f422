//! Melody notation used by the device speaker
//!
//! A melody is a whitespace-separated list of tokens, either
//! `NOTE[#|b][OCTAVE][:DURATION]` or `R[:DURATION]` for a rest, for example
//! `"C6:4 R:12 D#5:1"`. Octave and duration carry over from the previous
//! token when omitted (starting at octave 4, duration 4). A duration of 4
//! lasts one beat.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_OCTAVE: i32 = 4;
const DEFAULT_UNITS: u32 = 4;
/// Duration units per beat
const UNITS_PER_BEAT: u64 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MelodyError {
    #[error("token {index} ({token:?}): unknown note name")]
    UnknownNote { index: usize, token: String },
    #[error("token {index} ({token:?}): invalid octave")]
    InvalidOctave { index: usize, token: String },
    #[error("token {index} ({token:?}): invalid duration")]
    InvalidDuration { index: usize, token: String },
}

/// A pitched note: semitone within the octave (C = 0 .. B = 11) and octave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pitch {
    pub semitone: i32,
    pub octave: i32,
}

impl Pitch {
    const NAMES: [&'static str; 12] = [
        "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
    ];

    /// Equal-tempered frequency with A4 = 440 Hz, rounded to the nearest Hz
    pub fn frequency_hz(&self) -> u32 {
        let midi = (self.octave + 1) * 12 + self.semitone;
        let hz = 440.0 * 2f64.powf(f64::from(midi - 69) / 12.0);
        hz.round() as u32
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Flats normalise into the neighbouring sharp
        let semitone = self.semitone.rem_euclid(12);
        let octave = self.octave + self.semitone.div_euclid(12);
        write!(f, "{}{}", Self::NAMES[semitone as usize], octave)
    }
}

/// One token of a melody; `pitch` is `None` for a rest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    pub pitch: Option<Pitch>,
    pub units: u32,
}

/// A parsed melody
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Melody {
    notes: Vec<Note>,
}

impl Melody {
    pub fn parse(notation: &str) -> Result<Self, MelodyError> {
        let mut octave = DEFAULT_OCTAVE;
        let mut units = DEFAULT_UNITS;
        let mut notes = Vec::new();

        for (index, token) in notation.split_whitespace().enumerate() {
            let (head, duration) = match token.split_once(':') {
                Some((head, duration)) => (head, Some(duration)),
                None => (token, None),
            };

            if let Some(duration) = duration {
                units = duration
                    .parse()
                    .map_err(|_| MelodyError::InvalidDuration {
                        index,
                        token: token.to_string(),
                    })?;
            }

            let mut chars = head.chars();
            let semitone = match chars.next().map(|c| c.to_ascii_uppercase()) {
                Some('R') if chars.as_str().is_empty() => {
                    notes.push(Note { pitch: None, units });
                    continue;
                }
                Some('C') => 0,
                Some('D') => 2,
                Some('E') => 4,
                Some('F') => 5,
                Some('G') => 7,
                Some('A') => 9,
                Some('B') => 11,
                _ => {
                    return Err(MelodyError::UnknownNote {
                        index,
                        token: token.to_string(),
                    });
                }
            };

            let rest = chars.as_str();
            let (semitone, rest) = if let Some(rest) = rest.strip_prefix('#') {
                (semitone + 1, rest)
            } else if let Some(rest) = rest.strip_prefix('b') {
                (semitone - 1, rest)
            } else {
                (semitone, rest)
            };

            if !rest.is_empty() {
                octave = rest.parse().ok().filter(|o| (0..=9).contains(o)).ok_or_else(|| {
                    MelodyError::InvalidOctave {
                        index,
                        token: token.to_string(),
                    }
                })?;
            }

            notes.push(Note {
                pitch: Some(Pitch { semitone, octave }),
                units,
            });
        }

        Ok(Self { notes })
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Total number of duration units
    pub fn total_units(&self) -> u64 {
        self.notes.iter().map(|n| u64::from(n.units)).sum()
    }

    /// How long one duration unit lasts at `bpm`
    pub fn unit_duration(bpm: u32) -> Duration {
        Duration::from_micros(60_000_000 / u64::from(bpm.max(1)) / UNITS_PER_BEAT)
    }

    /// Playing time of the whole melody at `bpm`
    pub fn duration(&self, bpm: u32) -> Duration {
        Self::unit_duration(bpm) * self.total_units() as u32
    }
}

impl FromStr for Melody {
    type Err = MelodyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitch(semitone: i32, octave: i32) -> Option<Pitch> {
        Some(Pitch { semitone, octave })
    }

    #[test]
    fn test_parse_note_and_rest() {
        let melody = Melody::parse("C6:4 R:12").unwrap();
        assert_eq!(
            melody.notes(),
            &[
                Note {
                    pitch: pitch(0, 6),
                    units: 4
                },
                Note {
                    pitch: None,
                    units: 12
                },
            ]
        );
    }

    #[test]
    fn test_parse_accidentals() {
        let melody = Melody::parse("A#3:2 D#6:1 Bb4:1").unwrap();
        let pitches: Vec<_> = melody.notes().iter().map(|n| n.pitch).collect();
        assert_eq!(pitches, vec![pitch(10, 3), pitch(3, 6), pitch(10, 4)]);
    }

    #[test]
    fn test_octave_and_duration_carry_over() {
        let melody = Melody::parse("e g5:2 a r").unwrap();
        assert_eq!(
            melody.notes(),
            &[
                Note {
                    pitch: pitch(4, 4),
                    units: 4
                },
                Note {
                    pitch: pitch(7, 5),
                    units: 2
                },
                Note {
                    pitch: pitch(9, 5),
                    units: 2
                },
                Note {
                    pitch: None,
                    units: 2
                },
            ]
        );
    }

    #[test]
    fn test_frequencies() {
        assert_eq!(Pitch { semitone: 9, octave: 4 }.frequency_hz(), 440);
        assert_eq!(Pitch { semitone: 0, octave: 4 }.frequency_hz(), 262);
        assert_eq!(Pitch { semitone: 11, octave: 5 }.frequency_hz(), 988);
        assert_eq!(Pitch { semitone: 10, octave: 3 }.frequency_hz(), 233);
    }

    #[test]
    fn test_pitch_display() {
        assert_eq!(Pitch { semitone: 3, octave: 6 }.to_string(), "D#6");
        // Cb5 is B4
        assert_eq!(Pitch { semitone: -1, octave: 5 }.to_string(), "B4");
    }

    #[test]
    fn test_durations() {
        assert_eq!(Melody::unit_duration(120), Duration::from_millis(125));
        let melody = Melody::parse("C4:4 R:4").unwrap();
        assert_eq!(melody.total_units(), 8);
        assert_eq!(melody.duration(120), Duration::from_secs(1));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            Melody::parse("C4 H4"),
            Err(MelodyError::UnknownNote {
                index: 1,
                token: "H4".to_string()
            })
        );
        assert!(matches!(
            Melody::parse("C4:x"),
            Err(MelodyError::InvalidDuration { index: 0, .. })
        ));
        assert!(matches!(
            Melody::parse("C42"),
            Err(MelodyError::InvalidOctave { .. })
        ));
        assert!(matches!(
            Melody::parse("Rx:2"),
            Err(MelodyError::UnknownNote { .. })
        ));
    }

    #[test]
    fn test_empty_melody() {
        let melody: Melody = "   ".parse().unwrap();
        assert!(melody.is_empty());
        assert_eq!(melody.duration(120), Duration::ZERO);
    }
}
