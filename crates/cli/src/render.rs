//! Two-pane terminal layout: the board on the left, the side menu on the right.

use std::io::{self, Write};

use colored::{ColoredString, Colorize};
use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use othello_core::{Board, Cell, Outcome, Player, Position, TurnState};

use crate::menu::Command;

/// Spaces between the board pane and the side menu.
const GUTTER: usize = 6;

/// Returns the colored marker of a player.
pub fn marker(player: Player) -> ColoredString {
    let text = player.to_char().to_string();
    match player {
        Player::First => text.red(),
        Player::Second => text.green(),
    }
}

/// Returns the printed width of the board pane for a board of edge `size`.
pub fn board_width(size: usize) -> usize {
    3 + 2 * size
}

/// Formats the board pane, one string per line.
///
/// Hint squares are drawn only when `show_hints` is set.
pub fn board_lines(board: &Board, show_hints: bool) -> Vec<String> {
    let size = board.size();
    let mut lines = Vec::with_capacity(size + 1);

    let mut header = String::from("   ");
    for col in 0..size {
        let letter = ((b'A' + col as u8) as char).to_string();
        header.push_str(&format!(" {}", letter.yellow()));
    }
    lines.push(header);

    for row in 0..size {
        let mut line = format!("{:>3}", row + 1).yellow().to_string();
        for col in 0..size {
            let symbol = match board.cell(Position::new(row, col)) {
                Some(Cell::Owned(player)) => marker(player),
                Some(Cell::Hint) if show_hints => "?".cyan().bold(),
                _ => ".".normal(),
            };
            line.push_str(&format!(" {symbol}"));
        }
        lines.push(line);
    }
    lines
}

/// Formats the side menu, one string per line.
pub fn menu_lines(state: &TurnState) -> Vec<String> {
    let player = marker(state.player());
    let (first, second) = state.score();

    let mut lines = vec![
        format!("Turns {}", state.turn()).yellow().to_string(),
        format!("It is the turn of {player}"),
        format!("{player} can play"),
        String::new(),
        format!(
            "Pawns : {} {}",
            marker(Player::First),
            first.to_string().red()
        ),
        format!(
            "        {} {}",
            marker(Player::Second),
            second.to_string().green()
        ),
        String::new(),
        "Commands :".to_string(),
    ];
    for command in Command::ALL {
        let (before, letter, after) = command.highlighted();
        lines.push(format!(
            "   {}: {before}{}{after}",
            command.trigger().to_string().yellow(),
            letter.yellow()
        ));
    }
    lines.push(String::new());
    let hints = if state.hints_enabled() {
        "On".green()
    } else {
        "Off".red()
    };
    lines.push(format!("Hints : {hints}"));
    lines
}

/// Joins two panes line by line, padding the shorter one.
///
/// `left_width` is the printed width of the left pane, used for blank lines
/// added below it.
pub fn side_by_side(left: &[String], left_width: usize, right: &[String]) -> Vec<String> {
    let height = left.len().max(right.len());
    let blank = " ".repeat(left_width);
    (0..height)
        .map(|i| {
            let l = left.get(i).map_or(blank.as_str(), String::as_str);
            let r = right.get(i).map_or("", String::as_str);
            format!("{l}{}{r}", " ".repeat(GUTTER)).trim_end().to_string()
        })
        .collect()
}

/// Clears the terminal and moves the cursor home.
pub fn clear_screen() -> io::Result<()> {
    crossterm::execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))
}

/// Clears the screen and draws the board with the side menu.
pub fn render(board: &Board, state: &TurnState) -> io::Result<()> {
    clear_screen()?;
    let left = board_lines(board, state.hints_enabled());
    let right = menu_lines(state);
    let mut out = io::stdout().lock();
    for line in side_by_side(&left, board_width(board.size()), &right) {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

/// Formats the end-of-game message.
pub fn game_over_message(outcome: &Outcome) -> String {
    match outcome.winner {
        Some(winner) => format!(
            "Player {} won with {} pawns !",
            marker(winner),
            outcome.count(winner)
        ),
        None => format!("Equality, {} pawns for 2 players", outcome.score.0),
    }
}
