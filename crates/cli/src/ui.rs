//! Line-based interactive loop.
//!
//! The loop renders the board, reads one command at the action prompt and
//! hands the resulting [`Action`] to the game. Ctrl-C or Ctrl-D at any
//! prompt abandons the game and still prints the final summary.

use colored::Colorize;
use othello_core::board::validate_size;
use othello_core::{
    Action, ActionOutcome, Game, GameError, Position, PositionError, SnapshotStore, TurnStart,
};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::menu::Command;
use crate::render;

/// Word that leaves the position prompt.
const BACK: &str = "back";

/// Parses a board size typed by the user.
///
/// # Errors
///
/// Returns a message when the text is not a number or not a valid size.
pub fn parse_size(s: &str) -> Result<usize, String> {
    let size: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s.trim()))?;
    validate_size(size).map_err(|e| e.to_string())
}

/// Interprets a line typed at the position prompt.
///
/// # Returns
///
/// * `Ok(None)` - The user typed `back`.
/// * `Ok(Some(position))` - A position on the board.
pub fn parse_position(line: &str, size: usize) -> Result<Option<Position>, PositionError> {
    if line.trim().eq_ignore_ascii_case(BACK) {
        return Ok(None);
    }
    Position::parse(line, size).map(Some)
}

/// Reads one line, mapping Ctrl-C and Ctrl-D to `None`.
fn read_line(editor: &mut DefaultEditor, prompt: &str) -> rustyline::Result<Option<String>> {
    match editor.readline(prompt) {
        Ok(line) => {
            if !line.trim().is_empty() {
                let _ = editor.add_history_entry(line.as_str());
            }
            Ok(Some(line))
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Prompts for the board size until a valid one is entered.
///
/// # Returns
///
/// `None` if the user interrupted the prompt.
pub fn prompt_size(editor: &mut DefaultEditor) -> rustyline::Result<Option<usize>> {
    let mut prompt = "Board size (even, 4 to 26): ";
    loop {
        let Some(line) = read_line(editor, prompt)? else {
            return Ok(None);
        };
        match parse_size(&line) {
            Ok(size) => return Ok(Some(size)),
            Err(e) => {
                debug!(input = %line, error = %e, "rejected board size");
                prompt = "Invalid size, enter an even number between 4 and 26: ";
            }
        }
    }
}

/// Reads commands until one yields an action.
///
/// # Returns
///
/// `None` if the user interrupted a prompt.
fn read_action(editor: &mut DefaultEditor, size: usize) -> rustyline::Result<Option<Action>> {
    loop {
        let Some(line) = read_line(editor, "Action: ")? else {
            return Ok(None);
        };
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(_) => continue,
        };

        let action = match command {
            Command::Place => match read_position(editor, size)? {
                Some(Some(position)) => Action::Place(position),
                Some(None) => continue,
                None => return Ok(None),
            },
            Command::Abandon => Action::Abandon,
            Command::Hints => Action::ToggleHints,
            Command::Undo => Action::Undo,
            Command::Redo => Action::Redo,
        };
        return Ok(Some(action));
    }
}

/// Prompts for a position until it parses or the user goes back.
///
/// # Returns
///
/// * `None` - The prompt was interrupted.
/// * `Some(None)` - The user typed `back`.
/// * `Some(Some(position))` - A well formed position on the board.
fn read_position(
    editor: &mut DefaultEditor,
    size: usize,
) -> rustyline::Result<Option<Option<Position>>> {
    println!(
        "Position: (ex: D3) {}",
        format!("or type '{BACK}' to return to the action menu").cyan()
    );
    loop {
        let Some(line) = read_line(editor, "> ")? else {
            return Ok(None);
        };
        match parse_position(&line, size) {
            Ok(position) => return Ok(Some(position)),
            Err(e) => println!("{} {}", "Invalid position!".red(), e),
        }
    }
}

/// Formats an action error as a one-line notice.
fn notice(error: &GameError) -> String {
    match error {
        GameError::SnapshotNotFound(_) => "No backup !".red().to_string(),
        other => other.to_string().red().to_string(),
    }
}

/// Plays `game` to the end and prints the final summary.
///
/// # Errors
///
/// Returns an error if the terminal cannot be read or written.
pub fn play<S: SnapshotStore>(
    mut game: Game<S>,
    hints: bool,
    editor: &mut DefaultEditor,
) -> anyhow::Result<()> {
    game.start();
    if hints {
        game.act(Action::ToggleHints)?;
    }

    let mut message: Option<String> = None;
    loop {
        let start = game.prepare_turn();
        if start == TurnStart::Finished {
            break;
        }

        render::render(game.board(), game.state())?;
        println!();
        if let TurnStart::Passed(player) = start {
            println!("{} cannot play and passes", render::marker(player));
        }
        if let Some(text) = message.take() {
            println!("{text}");
        }

        let Some(action) = read_action(editor, game.board().size())? else {
            game.abandon();
            break;
        };
        match game.act(action) {
            Ok(ActionOutcome::GameOver) => break,
            Ok(outcome) => debug!(?outcome, "action applied"),
            Err(e) => message = Some(notice(&e)),
        }
    }

    render::render(game.board(), game.state())?;
    println!("\n\n{}", render::game_over_message(&game.outcome()));
    Ok(())
}
