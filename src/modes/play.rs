use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

use super::runner::GameRunner;
use crate::device::terminal::{now_playing, snapshot};
use crate::device::{NowPlaying, SharedMatrix, TerminalDisplay, TerminalSpeaker};
use crate::game::{Command, GameConfig, GameEngine};
use crate::input::{InputHandler, KeyAction};
use crate::render::Renderer;

/// Plays the game on an emulated device in the terminal
pub struct PlayMode {
    config: GameConfig,
    seed: Option<u64>,
    show_greeting: bool,
    matrix: SharedMatrix,
    now_playing: NowPlaying,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig, seed: Option<u64>, show_greeting: bool) -> Self {
        Self {
            renderer: Renderer::new(config.variant),
            config,
            seed,
            show_greeting,
            matrix: SharedMatrix::default(),
            now_playing: NowPlaying::default(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let engine = match self.seed {
            Some(seed) => GameEngine::seeded(self.config.clone(), seed),
            None => GameEngine::new(self.config.clone()),
        };
        let (commands, receiver) = mpsc::unbounded_channel();
        let mut runner = GameRunner::new(
            engine,
            TerminalDisplay::new(self.matrix.clone()),
            TerminalSpeaker::new(self.now_playing.clone()),
            receiver,
        )?;
        if !self.show_greeting {
            runner = runner.without_greeting();
        }
        let status = runner.subscribe();

        info!(
            "Starting {:?} variant, tick {} ms, seed {:?}",
            self.config.variant, self.config.initial_tick_ms, self.seed
        );

        // The game runs on this task, interleaved with input and drawing
        let game = runner.run();
        tokio::pin!(game);

        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                // Buttons and logo
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &commands);
                    }
                }

                result = &mut game => {
                    return result;
                }

                // Render frame
                _ = render_timer.tick() => {
                    let matrix = snapshot(&self.matrix);
                    let sound = now_playing(&self.now_playing);
                    let round = *status.borrow();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &matrix, &round, sound.as_deref());
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!("Quit requested");
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event, commands: &mpsc::UnboundedSender<Command>) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Device(command) => {
                    // Only fails once the game loop has stopped
                    if commands.send(command).is_err() {
                        self.should_quit = true;
                    }
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
