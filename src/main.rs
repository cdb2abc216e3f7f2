//! blocktui — classic falling-block puzzle game in the terminal.

mod app;
mod game;
mod grid;
mod input;
mod piece;
mod render;
mod shapes;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Options derived from CLI that affect game behaviour.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;
    let theme = load_theme(args.theme.as_deref());
    let config = GameConfig { seed: args.seed };
    let mut app = App::new(&config, theme);
    app.run()?;
    Ok(())
}

/// Falling-block puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "blocktui",
    version,
    about = "Falling-block puzzle in the terminal. Complete rows to clear them and score.",
    long_about = "blocktui is a classic falling-block puzzle game on a 10x20 board.\n\n\
        Pieces fall every half second. Fill a row completely to clear it for 10 points. \
        The game is over when a new piece has no room to spawn.\n\n\
        CONTROLS:\n  Left/Right or h/l  Move    Up or k    Rotate\n  Down or j          Soft drop   q / Esc / Ctrl-C  Quit"
)]
pub struct Args {
    /// Path to theme file (btop-style theme[key]=\"value\"). Built-in colours if not set.
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<PathBuf>,

    /// Seed for the piece sequence; the same seed deals the same pieces.
    #[arg(short, long, value_name = "N")]
    pub seed: Option<u64>,

    /// Write log output to this file (the terminal is busy drawing the game).
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

/// Logging goes to a file, or nowhere: stderr would scribble over the board.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = std::fs::File::create(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn load_theme(path: Option<&Path>) -> theme::Theme {
    let Some(path) = path else {
        return theme::Theme::default();
    };
    theme::Theme::load(path).unwrap_or_else(|err| {
        log::warn!("theme {} not loaded ({}), using defaults", path.display(), err);
        theme::Theme::default()
    })
}
