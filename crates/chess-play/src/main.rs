//! Terminal front end for the chess board.
//!
//! Reads one command per line from stdin and prints the board after each
//! one. In human-vs-computer mode black's reply arrives after a short pause
//! and is printed as its own frame.

mod commands;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chess_rules::StandardRules;
use chess_ui::{BoardView, GameDriver, GameMode, Session, UiConfig};
use clap::Parser;
use commands::{Command, HELP};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chess-play")]
#[command(about = "Play chess in the terminal, against a friend or the computer")]
struct Cli {
    /// Game mode: pvp (two humans) or pvc (computer plays black)
    #[arg(short, long)]
    mode: Option<GameMode>,
    /// Hide legal-move hints for the selected piece
    #[arg(long)]
    no_hints: bool,
    /// Pause before the computer replies, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,
    /// Seed for the computer's tie-breaking
    #[arg(long)]
    seed: Option<u64>,
    /// Start from this FEN position instead of the initial one
    #[arg(long)]
    fen: Option<String>,
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print frames as JSON, one per line
    #[arg(long)]
    json: bool,
    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// The configuration file, with command-line flags layered on top.
    fn ui_config(&self) -> Result<UiConfig> {
        let mut config = match &self.config {
            Some(path) => UiConfig::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => UiConfig::default(),
        };
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if self.no_hints {
            config.hints = false;
        }
        if let Some(delay) = self.delay_ms {
            config.computer_delay_ms = delay;
        }
        if self.seed.is_some() {
            config.heuristic.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_frame(view: &BoardView, json: bool) {
    if json {
        match serde_json::to_string(view) {
            Ok(line) => println!("{line}"),
            Err(e) => eprintln!("Failed to encode frame: {e}"),
        }
    } else {
        println!("{}", render::board_text(view));
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.ui_config()?;
    let rules = match &cli.fen {
        Some(fen) => StandardRules::from_fen(fen).context("parsing --fen")?,
        None => StandardRules::new(),
    };
    info!(mode = %config.mode, hints = config.hints, delay_ms = config.computer_delay_ms, "starting");

    let session = Session::new(rules, &config);
    let (driver, mut frames) = GameDriver::new(session, config.computer_delay());
    let json = cli.json;

    tokio::spawn(async move {
        while let Some(view) = frames.recv().await {
            print_frame(&view, json);
        }
    });

    print_frame(&driver.view().await, json);
    if !json {
        println!("Type `help` for commands.");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };
        debug!(?command, "command");

        let view = match command {
            Command::Click(square) => driver.click(square).await,
            Command::At(pos) => driver.click_screen(pos).await,
            Command::Flip => driver.flip().await,
            Command::Reset => driver.reset().await,
            Command::Hints(None) => driver.toggle_hints().await,
            Command::Hints(Some(enabled)) => driver.set_hints(enabled).await,
            Command::Mode(mode) => driver.set_mode(mode).await,
            Command::Show => driver.view().await,
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            Command::Quit => break,
        };
        print_frame(&view, json);
    }

    Ok(())
}
