//! Station Desk: operator console
//!
//! Reads commands line by line from stdin against an in-memory store seeded
//! from the config file. State lives as long as the process.
//!
//! ```sh
//! # Default config (~/.config/station-desk/config.toml), built-in stations if missing
//! station-desk
//!
//! # Custom config, JSON output
//! station-desk --config ./stations.toml --json
//!
//! # Validate config without starting
//! station-desk --check
//!
//! # Scripted session
//! printf 'search 10178\nreport STATION-001 not_charging Vehicle does not charge\n' | station-desk
//! ```

mod console;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};

use station_desk::config::AppConfig;
use station_desk::{init_tracing, AppError, InMemoryRepositoryProvider};

use crate::console::{Command, Console};

/// Station Desk: malfunction ticketing for Berlin EV charging stations.
#[derive(Parser, Debug)]
#[command(
    name = "station-desk",
    version,
    about = "Operator console for EV charging station malfunction reports",
    long_about = "Station Desk: search Berlin charging stations, file malfunction \
                  reports and resolve tickets from an interactive console.\n\n\
                  Default config: ~/.config/station-desk/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "STATION_DESK_CONFIG")]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Print command results as JSON.
    #[arg(long)]
    json: bool,

    /// Validate the configuration file and exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(station_desk::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    // Init tracing first so subsequent logs are formatted properly
    init_tracing(&config.logging);

    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) if cli.check => {
            error!("Invalid configuration {}: {}", config_path.display(), e);
            return Err(e.into());
        }
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    let stations = config.seed_stations()?;

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Stations    : {}", stations.len());
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    info!(stations = stations.len(), "Seeding station store");
    let repos = Arc::new(InMemoryRepositoryProvider::with_stations(stations));
    let console = Console::new(repos, cli.json);

    // ── Command loop ───────────────────────────────────────────
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    stdout
        .write_all(b"Station Desk ready. Type `help` for commands.\n")
        .await?;

    while let Some(line) = lines.next_line().await? {
        let output = match Command::parse(&line) {
            Ok(None) => continue,
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => console.execute(command).await,
            Err(msg) => format!("error: {}", msg),
        };
        stdout.write_all(output.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    info!("Console closed");
    Ok(())
}
