//! Square board of variable size stored as a flat row-major grid.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::disc::{Cell, Player};
use crate::error::GameError;
use crate::move_list::MoveList;
use crate::position::{MAX_SIZE, MIN_SIZE, Position};

/// The eight compass directions as `(row, col)` steps.
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Checks that `size` is an even edge length in the supported range.
///
/// # Errors
///
/// Returns `GameError::InvalidSize` for odd sizes and sizes outside `4..=26`.
pub fn validate_size(size: usize) -> Result<usize, GameError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) && size % 2 == 0 {
        Ok(size)
    } else {
        Err(GameError::InvalidSize(size))
    }
}

/// A square Othello board.
///
/// Each square holds the owning player or nothing. The board also remembers
/// the last legal-move set computed by [`Board::legal_moves_for`]; empty
/// squares in that set are reported as [`Cell::Hint`]. That overlay is not
/// part of equality and is never serialized.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "BoardRecord", into = "BoardRecord")]
pub struct Board {
    size: usize,
    squares: Vec<Option<Player>>,
    hints: MoveList,
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.squares == other.squares
    }
}

impl Eq for Board {}

impl Board {
    /// Creates a board of edge `size` with the starting layout.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidSize` unless `size` is even and in `4..=26`.
    pub fn new(size: usize) -> Result<Board, GameError> {
        let size = validate_size(size)?;
        let mut board = Board {
            size,
            squares: vec![None; size * size],
            hints: MoveList::default(),
        };
        board.reset();
        Ok(board)
    }

    /// Creates a board from one string per row using `X`, `O` and `.`.
    ///
    /// # Errors
    ///
    /// * `GameError::InvalidSize` if the row count is not a valid size.
    /// * `GameError::InvalidBoard` for a row of the wrong width or an
    ///   unknown marker.
    pub fn from_rows(rows: &[&str]) -> Result<Board, GameError> {
        let record = BoardRecord {
            size: rows.len(),
            rows: rows.iter().map(|r| r.to_string()).collect(),
        };
        validate_size(record.size)?;
        Board::try_from(record).map_err(GameError::InvalidBoard)
    }

    /// Restores the starting layout: the four centre squares hold a
    /// diagonal 2x2 block, `First` on the main diagonal.
    pub fn reset(&mut self) {
        self.squares.fill(None);
        self.hints = MoveList::default();

        let low = self.size / 2 - 1;
        let high = self.size / 2;
        let start = [
            (Position::new(low, low), Player::First),
            (Position::new(high, high), Player::First),
            (Position::new(low, high), Player::Second),
            (Position::new(high, low), Player::Second),
        ];
        for (position, player) in start {
            let index = self.index(position);
            self.squares[index] = Some(player);
        }
    }

    /// Returns the edge length of the board.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn index(&self, position: Position) -> usize {
        debug_assert!(position.is_within(self.size));
        position.row * self.size + position.col
    }

    /// Returns the owner of the square, or `None` when it is empty or off the board.
    #[inline]
    pub fn owner(&self, position: Position) -> Option<Player> {
        if position.is_within(self.size) {
            self.squares[self.index(position)]
        } else {
            None
        }
    }

    /// Returns what the square shows, including the hint overlay.
    ///
    /// # Returns
    ///
    /// `None` if the position is off the board.
    pub fn cell(&self, position: Position) -> Option<Cell> {
        if !position.is_within(self.size) {
            return None;
        }
        match self.squares[self.index(position)] {
            Some(player) => Some(Cell::Owned(player)),
            None if self.hints.contains(position) => Some(Cell::Hint),
            None => Some(Cell::Empty),
        }
    }

    /// Counts the opponent disks bracketed when walking from `from` along
    /// `dir` on behalf of `player`.
    ///
    /// The walk must cross one or more opponent disks and then land on a
    /// `player` disk; anything else brackets nothing and yields `0`.
    fn bracketed_run(&self, from: Position, dir: (isize, isize), player: Player) -> usize {
        let opponent = player.opponent();
        let mut run = 0;
        let mut cursor = from;
        while let Some(next) = cursor.step(dir, self.size) {
            match self.squares[self.index(next)] {
                Some(owner) if owner == opponent => {
                    run += 1;
                    cursor = next;
                }
                Some(_) => return run,
                None => return 0,
            }
        }
        0
    }

    /// Returns whether `player` may place a disk at `position`.
    ///
    /// The square must be on the board, empty, and bracket a run of opponent
    /// disks in at least one direction.
    pub fn is_legal(&self, position: Position, player: Player) -> bool {
        if !position.is_within(self.size) || self.squares[self.index(position)].is_some() {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&dir| self.bracketed_run(position, dir, player) > 0)
    }

    /// Computes the legal moves for `player` without touching the hint overlay.
    pub fn moves_for(&self, player: Player) -> MoveList {
        let mut moves = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                let position = Position::new(row, col);
                if self.is_legal(position, player) {
                    moves.push(position);
                }
            }
        }
        MoveList::from_sorted(moves)
    }

    /// Returns whether `player` has at least one legal move.
    pub fn has_moves(&self, player: Player) -> bool {
        (0..self.size)
            .flat_map(|row| (0..self.size).map(move |col| Position::new(row, col)))
            .any(|position| self.is_legal(position, player))
    }

    /// Computes the legal moves for `player` and marks them as hints.
    ///
    /// An empty result means `player` has to pass.
    pub fn legal_moves_for(&mut self, player: Player) -> MoveList {
        let moves = self.moves_for(player);
        self.hints = moves.clone();
        moves
    }

    /// Returns the move set currently shown as hints.
    pub fn hints(&self) -> &MoveList {
        &self.hints
    }

    /// Places a disk for `player` at `position` and flips every bracketed run.
    ///
    /// # Arguments
    ///
    /// * `position` - The square to place the disk on.
    /// * `player` - The player making the move.
    ///
    /// # Returns
    ///
    /// The disk counts `(first, second)` after the move.
    ///
    /// # Errors
    ///
    /// * `GameError::OutOfBounds` if `position` is off the board.
    /// * `GameError::InvalidMove` if the move is not legal for `player`.
    ///
    /// The board is left untouched on error.
    pub fn apply_move(&mut self, position: Position, player: Player) -> Result<(u32, u32), GameError> {
        if !position.is_within(self.size) {
            return Err(GameError::OutOfBounds(position));
        }

        let runs: Vec<((isize, isize), usize)> = DIRECTIONS
            .iter()
            .map(|&dir| (dir, self.bracketed_run(position, dir, player)))
            .filter(|&(_, run)| run > 0)
            .collect();
        if self.squares[self.index(position)].is_some() || runs.is_empty() {
            return Err(GameError::InvalidMove(position));
        }

        let index = self.index(position);
        self.squares[index] = Some(player);

        let mut flipped = 0;
        for (dir, run) in runs {
            let mut cursor = position;
            for _ in 0..run {
                // The run was measured on this board, so every step stays inside.
                let Some(next) = cursor.step(dir, self.size) else {
                    break;
                };
                let index = self.index(next);
                self.squares[index] = Some(player);
                cursor = next;
                flipped += 1;
            }
        }
        self.hints = MoveList::default();

        debug!(%position, ?player, flipped, "move applied");
        Ok(self.score())
    }

    /// Counts the disks of each player.
    ///
    /// # Returns
    ///
    /// `(first, second)`.
    pub fn score(&self) -> (u32, u32) {
        self.squares
            .iter()
            .fold((0, 0), |(first, second), square| match square {
                Some(Player::First) => (first + 1, second),
                Some(Player::Second) => (first, second + 1),
                None => (first, second),
            })
    }

    /// Returns the number of occupied squares.
    pub fn occupied(&self) -> usize {
        self.squares.iter().filter(|s| s.is_some()).count()
    }

    /// Returns whether every square is occupied.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(Option::is_some)
    }

    /// Returns the stored owners of one row, left to right.
    ///
    /// # Panics
    ///
    /// Panics if `row` is not on the board.
    pub fn row(&self, row: usize) -> &[Option<Player>] {
        assert!(row < self.size, "Invalid row: {row}");
        &self.squares[row * self.size..(row + 1) * self.size]
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Player>]> {
        self.squares.chunks(self.size)
    }
}

impl fmt::Display for Board {
    /// Formats the board as a plain grid with column letters and row numbers.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..self.size {
            write!(f, " {}", (b'A' + col as u8) as char)?;
        }
        for row in 0..self.size {
            write!(f, "\n{:>3}", row + 1)?;
            for col in 0..self.size {
                let cell = self.cell(Position::new(row, col)).ok_or(fmt::Error)?;
                write!(f, " {}", cell.to_char())?;
            }
        }
        Ok(())
    }
}

/// Serialized form of a board: one string per row.
#[derive(Serialize, Deserialize)]
struct BoardRecord {
    size: usize,
    rows: Vec<String>,
}

impl From<Board> for BoardRecord {
    fn from(board: Board) -> Self {
        let rows = (0..board.size)
            .map(|row| {
                board
                    .row(row)
                    .iter()
                    .map(|&owner| Cell::from(owner).to_char())
                    .collect()
            })
            .collect();
        BoardRecord {
            size: board.size,
            rows,
        }
    }
}

impl TryFrom<BoardRecord> for Board {
    type Error = String;

    fn try_from(record: BoardRecord) -> Result<Self, Self::Error> {
        let size = validate_size(record.size).map_err(|e| e.to_string())?;
        if record.rows.len() != size {
            return Err(format!("expected {size} rows, found {}", record.rows.len()));
        }

        let mut squares = Vec::with_capacity(size * size);
        for (i, row) in record.rows.iter().enumerate() {
            let width = row.chars().count();
            if width != size {
                return Err(format!("row {} has {width} squares, expected {size}", i + 1));
            }
            for c in row.chars() {
                let owner = match c {
                    '.' => None,
                    other => Some(
                        Player::from_char(other)
                            .ok_or_else(|| format!("unknown marker '{other}' in row {}", i + 1))?,
                    ),
                };
                squares.push(owner);
            }
        }

        Ok(Board {
            size,
            squares,
            hints: MoveList::default(),
        })
    }
}
