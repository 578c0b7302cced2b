use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use snake_arena::game::{Game, GameConfig, GameMode};
use snake_arena::modes::{HeadlessMode, HumanMode};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_arena")]
#[command(version, about = "Grid snake for one player, two players, or player vs computer")]
struct Cli {
    /// Round to start: single, two-player or vs-ai (interactive play shows a menu when omitted)
    #[arg(long)]
    mode: Option<GameMode>,

    /// Grid width (overrides the config file)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height (overrides the config file)
    #[arg(long)]
    height: Option<usize>,

    /// TOML file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food placement and the computer pilot
    #[arg(long)]
    seed: Option<u64>,

    /// Run one round without a terminal UI and print the final state as JSON
    #[arg(long)]
    headless: bool,

    /// Tick limit for headless rounds
    #[arg(long, default_value = "1000")]
    ticks: u64,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if cli.headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    // The terminal UI owns stderr, so interactive play without a log file stays quiet

    Ok(())
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_toml_file(path)?,
        None => GameConfig::default(),
    };

    if let Some(width) = cli.width {
        config.grid_width = width;
    }
    if let Some(height) = cli.height {
        config.grid_height = height;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = load_config(&cli)?;
    let game = match cli.seed {
        Some(seed) => Game::with_seed(config, seed),
        None => Game::new(config),
    }
    .context("Invalid game configuration")?;

    if cli.headless {
        let mode = cli.mode.unwrap_or(GameMode::VersusAi);
        let snapshot = HeadlessMode::new(game, mode, cli.ticks).run()?;
        let json =
            serde_json::to_string_pretty(&snapshot).context("Failed to serialize the round")?;
        println!("{json}");
        return Ok(());
    }

    let mut human_mode = match cli.mode {
        Some(mode) => HumanMode::new(game).starting_in(mode)?,
        None => HumanMode::new(game),
    };
    human_mode.run().await?;

    Ok(())
}
