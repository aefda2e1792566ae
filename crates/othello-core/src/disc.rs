use serde::{Deserialize, Serialize};

/// One of the two players.
///
/// `First` plays the `X` disks and `Second` plays the `O` disks. `Second`
/// opens the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    First,
    Second,
}

impl Player {
    /// Converts the player to the marker used in board strings and on screen.
    ///
    /// # Returns
    ///
    /// * `'X'` for `Player::First`
    /// * `'O'` for `Player::Second`
    pub fn to_char(self) -> char {
        match self {
            Player::First => 'X',
            Player::Second => 'O',
        }
    }

    /// Parses a board marker back into a player.
    ///
    /// Both upper and lower case markers are accepted.
    pub fn from_char(c: char) -> Option<Player> {
        match c.to_ascii_uppercase() {
            'X' => Some(Player::First),
            'O' => Some(Player::Second),
            _ => None,
        }
    }

    /// Returns the other player.
    pub fn opponent(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }
}

/// What a single square shows to a reader of the board.
///
/// `Hint` is an overlay: it is reported for empty squares that belong to the
/// most recently computed legal-move set and is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Owned(Player),
    Hint,
}

impl Cell {
    /// Returns the owner of the square, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Owned(player) => Some(player),
            Cell::Empty | Cell::Hint => None,
        }
    }

    /// Converts the cell to its plain character representation.
    ///
    /// # Returns
    ///
    /// * `'.'` for `Cell::Empty`
    /// * `'?'` for `Cell::Hint`
    /// * the player's marker for `Cell::Owned`
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Hint => '?',
            Cell::Owned(player) => player.to_char(),
        }
    }
}

impl From<Option<Player>> for Cell {
    fn from(owner: Option<Player>) -> Self {
        owner.map_or(Cell::Empty, Cell::Owned)
    }
}
