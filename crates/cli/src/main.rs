mod menu;
mod render;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use othello_core::history::{DEFAULT_ROOT, new_session_id};
use othello_core::{Board, Game, JsonFileStore, MemoryStore};
use rustyline::DefaultEditor;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Two-player Othello in the terminal.
#[derive(Parser, Debug)]
#[command(name = "othello", version)]
struct Cli {
    /// Board edge length, even and between 4 and 26. Prompted when omitted.
    #[arg(long, env = "OTHELLO_SIZE", value_parser = ui::parse_size)]
    size: Option<usize>,

    /// Directory holding one snapshot folder per game.
    #[arg(
        long,
        env = "OTHELLO_SAVE_DIR",
        default_value = DEFAULT_ROOT,
        value_hint = clap::ValueHint::DirPath
    )]
    save_dir: PathBuf,

    /// Keep snapshots in memory instead of writing them to disk.
    #[arg(long)]
    no_save: bool,

    /// Start with legal moves shown.
    #[arg(long)]
    hints: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let mut editor = DefaultEditor::new()?;

    let size = match args.size {
        Some(size) => size,
        None => match ui::prompt_size(&mut editor)? {
            Some(size) => size,
            None => return Ok(()),
        },
    };
    let board = Board::new(size)?;
    let session = new_session_id();
    info!(size, session, no_save = args.no_save, "starting game");

    if args.no_save {
        ui::play(
            Game::new(board, MemoryStore::with_session(session)),
            args.hints,
            &mut editor,
        )
    } else {
        ui::play(
            Game::new(board, JsonFileStore::new(args.save_dir, session)),
            args.hints,
            &mut editor,
        )
    }
}
