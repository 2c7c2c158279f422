use std::time::Duration;

use super::melody::Melody;

/// The device speaker.
///
/// Blocking calls complete when the sound has finished. A background melody
/// runs detached and only `stop_all` can cut it short.
#[allow(async_fn_in_trait)]
pub trait Speaker {
    async fn play_melody(&mut self, melody: &Melody, bpm: u32);

    fn play_melody_in_background(&mut self, melody: Melody, bpm: u32);

    async fn play_tone(&mut self, frequency_hz: u32, duration: Duration);

    /// Silence everything, background melodies included
    fn stop_all(&mut self);
}
