//! Device emulation for the terminal
//!
//! The display writes into a shared [`LedMatrix`] that the TUI renderer
//! paints, and the speaker walks through melodies in real time, publishing
//! the note that is currently sounding.

use log::debug;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use super::display::{Icon, LedDisplay, LedMatrix};
use super::font;
use super::melody::Melody;
use super::speaker::Speaker;

/// How long the host device holds an icon
pub const ICON_HOLD: Duration = Duration::from_millis(600);
/// Time per column when scrolling text
pub const SCROLL_STEP: Duration = Duration::from_millis(150);

/// LED state shared between the game and the renderer
pub type SharedMatrix = Arc<Mutex<LedMatrix>>;

/// Label of the sound currently playing, if any
pub type NowPlaying = Arc<Mutex<Option<String>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Snapshot of the matrix for drawing
pub fn snapshot(matrix: &SharedMatrix) -> LedMatrix {
    *lock(matrix)
}

/// What is sounding right now
pub fn now_playing(now_playing: &NowPlaying) -> Option<String> {
    lock(now_playing).clone()
}

pub struct TerminalDisplay {
    matrix: SharedMatrix,
    scroll_step: Duration,
    icon_hold: Duration,
}

impl TerminalDisplay {
    pub fn new(matrix: SharedMatrix) -> Self {
        Self {
            matrix,
            scroll_step: SCROLL_STEP,
            icon_hold: ICON_HOLD,
        }
    }
}

impl LedDisplay for TerminalDisplay {
    fn clear(&mut self) {
        lock(&self.matrix).clear();
    }

    fn plot(&mut self, x: i32, y: i32, brightness: u8) {
        lock(&self.matrix).plot(x, y, brightness);
    }

    async fn show_text(&mut self, text: &str) {
        // Enter from the right edge, leave past the left edge
        let mut columns = vec![0; 5];
        columns.extend(font::text_columns(text));

        for offset in 1..=columns.len() {
            lock(&self.matrix).show_columns(&columns, offset);
            sleep(self.scroll_step).await;
        }
    }

    async fn show_icon(&mut self, icon: Icon) {
        lock(&self.matrix).show_icon(icon);
        sleep(self.icon_hold).await;
    }
}

pub struct TerminalSpeaker {
    now_playing: NowPlaying,
    background: Vec<JoinHandle<()>>,
}

impl TerminalSpeaker {
    pub fn new(now_playing: NowPlaying) -> Self {
        Self {
            now_playing,
            background: Vec::new(),
        }
    }

    /// Background melodies that have not finished yet
    pub fn background_count(&self) -> usize {
        self.background.iter().filter(|h| !h.is_finished()).count()
    }
}

/// Step through a melody in real time
async fn perform(melody: Melody, bpm: u32, now_playing: NowPlaying) {
    let unit = Melody::unit_duration(bpm);
    for note in melody.notes() {
        *lock(&now_playing) = note
            .pitch
            .map(|pitch| format!("{} ({} Hz)", pitch, pitch.frequency_hz()));
        sleep(unit * note.units).await;
    }
    *lock(&now_playing) = None;
}

impl Speaker for TerminalSpeaker {
    async fn play_melody(&mut self, melody: &Melody, bpm: u32) {
        debug!(
            "Playing {} notes at {} BPM ({:?})",
            melody.notes().len(),
            bpm,
            melody.duration(bpm)
        );
        perform(melody.clone(), bpm, self.now_playing.clone()).await;
    }

    fn play_melody_in_background(&mut self, melody: Melody, bpm: u32) {
        debug!(
            "Playing {} notes at {} BPM in the background",
            melody.notes().len(),
            bpm
        );
        self.background.retain(|h| !h.is_finished());
        let handle = tokio::spawn(perform(melody, bpm, self.now_playing.clone()));
        self.background.push(handle);
    }

    async fn play_tone(&mut self, frequency_hz: u32, duration: Duration) {
        *lock(&self.now_playing) = Some(format!("{} Hz", frequency_hz));
        sleep(duration).await;
        *lock(&self.now_playing) = None;
    }

    fn stop_all(&mut self) {
        let running = self.background.len();
        for handle in self.background.drain(..) {
            handle.abort();
        }
        *lock(&self.now_playing) = None;
        if running > 0 {
            debug!("Stopped {} background melodies", running);
        }
    }
}
