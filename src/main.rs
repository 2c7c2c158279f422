use anyhow::{Context, Result};
use clap::Parser;
use led_snake::game::{GameConfig, Variant};
use led_snake::modes::PlayMode;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "led_snake")]
#[command(version, about = "Snake on an emulated 5x5 LED matrix")]
struct Cli {
    /// Game variant (overrides the config file)
    #[arg(long)]
    variant: Option<Variant>,

    /// JSON file with game settings; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting tick interval in milliseconds (overrides the config file)
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filtered by RUST_LOG, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Skip the power-on greeting
    #[arg(long)]
    no_greeting: bool,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(variant) = self.variant {
            config.variant = variant;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.initial_tick_ms = tick_ms;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

/// The terminal belongs to the game, so logs only go to a file
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }

    builder.init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref())?;
    let config = cli.game_config()?;

    let mut play_mode = PlayMode::new(config, cli.seed, !cli.no_greeting);
    play_mode.run().await?;

    Ok(())
}
