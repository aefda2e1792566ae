use std::fmt;
use std::io;

use crate::position::{Position, PositionError};

/// Errors raised by the board, the snapshot store and the game controller.
///
/// None of them is fatal: the controller reports them and waits for the
/// next action.
#[derive(Debug)]
pub enum GameError {
    /// Move notation could not be parsed
    Parse(PositionError),
    /// Well formed position that is not a legal move for the player
    InvalidMove(Position),
    /// Position outside the grid
    OutOfBounds(Position),
    /// Board edge is odd or outside the supported range
    InvalidSize(usize),
    /// Row strings that do not describe a board
    InvalidBoard(String),
    /// No snapshot recorded for this turn
    SnapshotNotFound(u32),
    /// A snapshot exists but cannot be read back
    MalformedSnapshot { turn: u32, reason: String },
    /// Filesystem failure while writing or reading snapshots
    Io(io::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Parse(e) => write!(f, "{e}"),
            GameError::InvalidMove(p) => write!(f, "Invalid move: {p}"),
            GameError::OutOfBounds(p) => write!(f, "Position {p} is outside the board"),
            GameError::InvalidSize(n) => {
                write!(f, "Invalid board size {n}: must be even and between 4 and 26")
            }
            GameError::InvalidBoard(reason) => write!(f, "Invalid board: {reason}"),
            GameError::SnapshotNotFound(turn) => write!(f, "No backup for turn {turn}"),
            GameError::MalformedSnapshot { turn, reason } => {
                write!(f, "Backup for turn {turn} is unreadable: {reason}")
            }
            GameError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Parse(e) => Some(e),
            GameError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PositionError> for GameError {
    fn from(e: PositionError) -> Self {
        match e {
            PositionError::OutOfBounds(p) => GameError::OutOfBounds(p),
            other => GameError::Parse(other),
        }
    }
}

impl From<io::Error> for GameError {
    fn from(e: io::Error) -> Self {
        GameError::Io(e)
    }
}
