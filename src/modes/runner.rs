//! The game loop of the device
//!
//! [`GameRunner`] is the single owner of the [`GameState`]. Button and logo
//! events arrive as [`Command`]s on a channel and are applied as soon as they
//! are received, between ticks. Every tick advances the simulation by one
//! step, redraws the matrix and waits for the current tick interval. Deaths
//! and wins play their ending sequence and start a fresh round; the loop only
//! stops when the command channel closes.

use anyhow::{Context, Result};
use log::{debug, info};
use rand::Rng;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::sleep;

use crate::device::tunes::{self, Tunes};
use crate::device::{Icon, LedDisplay, Speaker};
use crate::game::{CollisionType, Command, GameEngine, GameState, StepResult, Variant};
use crate::render::draw_board;

/// What the device is busy with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Greeting,
    Playing,
    Dying,
    Winning,
}

/// Published after every change so a front end can show it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundStatus {
    /// Rounds started since power-on, counting the current one
    pub round: u32,
    pub length: usize,
    pub tick_ms: u64,
    pub phase: Phase,
}

pub struct GameRunner<D, S, R> {
    engine: GameEngine<R>,
    state: GameState,
    display: D,
    speaker: S,
    tunes: Tunes,
    commands: mpsc::UnboundedReceiver<Command>,
    status: watch::Sender<RoundStatus>,
    round: u32,
    show_greeting: bool,
}

impl<D: LedDisplay, S: Speaker, R: Rng> GameRunner<D, S, R> {
    pub fn new(
        mut engine: GameEngine<R>,
        display: D,
        speaker: S,
        commands: mpsc::UnboundedReceiver<Command>,
    ) -> Result<Self> {
        let tunes = Tunes::load().context("Failed to parse built-in tunes")?;
        let state = engine.reset();
        let (status, _) = watch::channel(RoundStatus::default());

        Ok(Self {
            engine,
            state,
            display,
            speaker,
            tunes,
            commands,
            status,
            round: 1,
            show_greeting: true,
        })
    }

    /// Skip the power-on greeting
    pub fn without_greeting(mut self) -> Self {
        self.show_greeting = false;
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<RoundStatus> {
        self.status.subscribe()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access to the round in progress, for scripted scenarios
    #[doc(hidden)]
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Greet once, then tick forever. Returns when every command sender is gone.
    pub async fn run(&mut self) -> Result<()> {
        if self.show_greeting {
            self.publish(Phase::Greeting);
            let greeting = self.engine.config().greeting.clone();
            self.display.show_text(&greeting).await;
            self.show_greeting = false;
        }

        info!("Round {} started", self.round);
        self.redraw();

        loop {
            let tick = sleep(Duration::from_millis(self.state.tick_ms));
            tokio::pin!(tick);

            loop {
                tokio::select! {
                    command = self.commands.recv() => match command {
                        Some(command) => self.handle_command(command),
                        None => {
                            info!("Input closed, stopping the game loop");
                            return Ok(());
                        }
                    },
                    _ = &mut tick => break,
                }
            }

            if self.state.is_alive {
                self.tick().await;
            }
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Reset => {
                info!("Logo touched, restarting");
                self.reset_round();
            }
            turn => {
                self.engine.apply(&mut self.state, turn);
                debug!("{:?}: heading {:?}", turn, self.state.snake.direction);
            }
        }
    }

    /// One simulation step and its side effects
    async fn tick(&mut self) {
        let StepResult { info, .. } = self.engine.step(&mut self.state);

        if let Some(cause) = info.collision_type {
            self.game_over(cause).await;
            return;
        }

        if info.ate_food {
            debug!(
                "Food eaten, length {}, tick now {} ms",
                self.state.snake.len(),
                self.state.tick_ms
            );
            if self.engine.config().variant == Variant::Victory {
                self.speaker
                    .play_tone(tunes::COLLECT_TONE_HZ, tunes::collect_tone_duration())
                    .await;
            }
        }

        if info.won {
            self.win_game().await;
            return;
        }

        if info.anthem_triggered {
            info!(
                "Length {} reached, starting the anthem",
                self.state.snake.len()
            );
            let tempo = self.engine.config().anthem_tempo;
            self.speaker
                .play_melody_in_background(self.tunes.anthem.clone(), tempo);
        }

        self.redraw();
    }

    fn redraw(&mut self) {
        draw_board(&mut self.display, &self.state);
        self.publish(Phase::Playing);
    }

    fn publish(&self, phase: Phase) {
        self.status.send_replace(RoundStatus {
            round: self.round,
            length: self.state.snake.len(),
            tick_ms: self.state.tick_ms,
            phase,
        });
    }

    fn reset_round(&mut self) {
        self.state = self.engine.reset();
        self.round += 1;
        info!("Round {} started", self.round);
        self.redraw();
    }

    /// Input that arrived during an ending sequence is stale once the round resets
    fn discard_pending_commands(&mut self) {
        let mut dropped = 0;
        while self.commands.try_recv().is_ok() {
            dropped += 1;
        }
        if dropped > 0 {
            debug!("Dropped {} commands queued during the ending", dropped);
        }
    }

    /// Skull and death melody, then a fresh round
    async fn game_over(&mut self, cause: CollisionType) {
        info!(
            "Died ({:?}) at length {} in round {}",
            cause,
            self.state.snake.len(),
            self.round
        );
        self.publish(Phase::Dying);

        let config = self.engine.config();
        let (tempo, linger) = (config.death_tempo, Duration::from_millis(config.death_pause_ms));

        self.speaker.stop_all();
        self.display.show_icon(Icon::Skull).await;
        self.speaker.play_melody(&self.tunes.death, tempo).await;
        sleep(linger).await;
        self.display.clear();

        self.discard_pending_commands();
        self.reset_round();
    }

    /// Anthem over the scrolling win text, happy face, then a fresh round
    async fn win_game(&mut self) {
        info!(
            "Won at length {} in round {}",
            self.state.snake.len(),
            self.round
        );
        self.publish(Phase::Winning);

        let config = self.engine.config();
        let tempo = config.anthem_tempo;
        let text = config.win_text.clone();
        let linger = Duration::from_millis(config.win_pause_ms);

        self.speaker.stop_all();
        self.speaker
            .play_melody_in_background(self.tunes.anthem.clone(), tempo);
        self.display.show_text(&text).await;
        self.display.show_icon(Icon::Happy).await;
        sleep(linger).await;
        self.display.clear();
        // The anthem usually outlasts the text
        self.speaker.stop_all();

        self.discard_pending_commands();
        self.reset_round();
    }
}
