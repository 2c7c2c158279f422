#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use led_snake::device::{Icon, LedDisplay, Melody, Speaker};
use led_snake::game::{Command, Direction, GameConfig, GameEngine, Position, Snake, Variant};
use led_snake::modes::GameRunner;
use rand::rngs::StdRng;
use tokio::sync::mpsc;
use tokio::time::sleep;

/// Fake scroll time for any text
pub const TEXT_TIME: Duration = Duration::from_millis(1000);
pub const ICON_TIME: Duration = Duration::from_millis(600);

/// Everything the game asked the device to do
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    Clear,
    Plot { x: i32, y: i32, brightness: u8 },
    Text(String),
    Icon(Icon),
    Melody { bpm: u32, background: bool },
    Tone { frequency_hz: u32, duration: Duration },
    StopAll,
}

#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<DeviceCall>>>);

impl Journal {
    fn record(&self, call: DeviceCall) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<DeviceCall> {
        self.0.lock().unwrap().clone()
    }

    /// Calls without the per-pixel noise
    pub fn script(&self) -> Vec<DeviceCall> {
        self.calls()
            .into_iter()
            .filter(|call| !matches!(call, DeviceCall::Plot { .. }))
            .collect()
    }

    pub fn count(&self, wanted: &DeviceCall) -> usize {
        self.calls().iter().filter(|call| *call == wanted).count()
    }
}

pub struct RecordingDisplay(pub Journal);

impl LedDisplay for RecordingDisplay {
    fn clear(&mut self) {
        self.0.record(DeviceCall::Clear);
    }

    fn plot(&mut self, x: i32, y: i32, brightness: u8) {
        self.0.record(DeviceCall::Plot { x, y, brightness });
    }

    async fn show_text(&mut self, text: &str) {
        self.0.record(DeviceCall::Text(text.to_string()));
        sleep(TEXT_TIME).await;
    }

    async fn show_icon(&mut self, icon: Icon) {
        self.0.record(DeviceCall::Icon(icon));
        sleep(ICON_TIME).await;
    }
}

pub struct RecordingSpeaker(pub Journal);

impl Speaker for RecordingSpeaker {
    async fn play_melody(&mut self, melody: &Melody, bpm: u32) {
        self.0.record(DeviceCall::Melody {
            bpm,
            background: false,
        });
        sleep(melody.duration(bpm)).await;
    }

    fn play_melody_in_background(&mut self, _melody: Melody, bpm: u32) {
        self.0.record(DeviceCall::Melody {
            bpm,
            background: true,
        });
    }

    async fn play_tone(&mut self, frequency_hz: u32, duration: Duration) {
        self.0.record(DeviceCall::Tone {
            frequency_hz,
            duration,
        });
        sleep(duration).await;
    }

    fn stop_all(&mut self) {
        self.0.record(DeviceCall::StopAll);
    }
}

pub type TestRunner = GameRunner<RecordingDisplay, RecordingSpeaker, StdRng>;

/// A runner without greeting, plus its command sender and journal
pub fn runner(config: GameConfig) -> (TestRunner, mpsc::UnboundedSender<Command>, Journal) {
    let journal = Journal::default();
    let (commands, receiver) = mpsc::unbounded_channel();
    let runner = GameRunner::new(
        GameEngine::seeded(config, 42),
        RecordingDisplay(journal.clone()),
        RecordingSpeaker(journal.clone()),
        receiver,
    )
    .unwrap()
    .without_greeting();
    (runner, commands, journal)
}

pub fn variant(variant: Variant) -> GameConfig {
    GameConfig::new(variant)
}

/// Snake of up to 10 cells folded into the top two rows, head at (4,1),
/// heading down into free space
pub fn long_snake(length: usize) -> Snake {
    let mut cells: Vec<Position> = (0..5).rev().map(|x| Position::new(x, 1)).collect();
    cells.extend((0..5).map(|x| Position::new(x, 0)));
    cells.truncate(length);
    Snake::from_cells(cells, Direction::Down)
}

/// Index of the first call equal to `wanted` at or after `from`
pub fn find_from(script: &[DeviceCall], from: usize, wanted: &DeviceCall) -> Option<usize> {
    script[from..]
        .iter()
        .position(|call| call == wanted)
        .map(|i| i + from)
}
