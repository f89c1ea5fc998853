//! Terminal driver for the chess rules engine.
//!
//! Plays a game from stdin, one move per line in coordinate notation, and
//! prints the board after each move until checkmate, stalemate or `quit`.

mod config;
mod session;

use clap::Parser;
use config::{Glyphs, TermConfig};
use session::Session;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chess-term")]
#[command(about = "Play chess in the terminal against yourself")]
struct Cli {
    /// Path to the configuration file (defaults to ./chess-term.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Start from this snapshot instead of the configured one
    #[arg(long)]
    fen: Option<String>,
    /// Draw pieces with ASCII letters
    #[arg(long)]
    ascii: bool,
    /// Print legal moves after every board
    #[arg(long)]
    show_moves: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = TermConfig::load(cli.config.as_deref())?;
    if cli.fen.is_some() {
        config.start_fen = cli.fen;
    }
    if cli.ascii {
        config.glyphs = Glyphs::Ascii;
    }
    config.show_legal_moves |= cli.show_moves;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let game = config.start_game()?;
    tracing::info!(fen = %game.to_fen(), "starting game");

    let mut session = Session::new(game, &config);
    let stdin = std::io::stdin();
    session.run(stdin.lock(), std::io::stdout().lock())?;
    if let Some(result) = session.game().outcome() {
        tracing::info!(?result, "finished");
    }
    Ok(())
}
