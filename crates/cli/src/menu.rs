//! Command vocabulary of the action prompt.

use std::fmt;
use std::str::FromStr;

/// A command typed at the action prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Place,
    Abandon,
    Hints,
    Undo,
    Redo,
}

impl Command {
    /// All commands in menu order.
    pub const ALL: [Command; 5] = [
        Command::Place,
        Command::Abandon,
        Command::Hints,
        Command::Undo,
        Command::Redo,
    ];

    /// Returns the letter that triggers the command.
    pub fn trigger(self) -> char {
        match self {
            Command::Place => 'P',
            Command::Abandon => 'A',
            Command::Hints => 'H',
            Command::Undo => 'U',
            Command::Redo => 'R',
        }
    }

    /// Returns the description shown in the side menu.
    pub fn description(self) -> &'static str {
        match self {
            Command::Place => "Place a pawn",
            Command::Abandon => "Abandon",
            Command::Hints => "Toggle hints",
            Command::Undo => "Undo a placement",
            Command::Redo => "Redo a placement",
        }
    }

    /// Splits the description around the trigger letter.
    ///
    /// # Returns
    ///
    /// `(before, letter, after)`, e.g. `("Toggle ", "h", "ints")`.
    pub fn highlighted(self) -> (&'static str, &'static str, &'static str) {
        let description = self.description();
        let trigger = self.trigger();
        let at = description
            .char_indices()
            .find(|&(_, c)| c.eq_ignore_ascii_case(&trigger))
            .map_or(0, |(i, _)| i);
        let end = at + 1;
        (&description[..at], &description[at..end], &description[end..])
    }
}

impl FromStr for Command {
    type Err = String;

    /// Parses a single trigger letter, ignoring case and surrounding spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return Err(format!("Unknown command: '{s}'"));
        };
        Command::ALL
            .into_iter()
            .find(|command| command.trigger().eq_ignore_ascii_case(&c))
            .ok_or_else(|| format!("Unknown command: '{s}'"))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.trigger(), self.description())
    }
}
