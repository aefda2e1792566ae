use std::fmt;
use std::str::FromStr;

/// Largest supported board edge. Columns are lettered `A` to `Z`.
pub const MAX_SIZE: usize = 26;

/// Smallest supported board edge.
pub const MIN_SIZE: usize = 4;

/// A square on the board, addressed by zero-based row and column.
///
/// In move notation the column is a letter and the row a 1-based number:
///
/// ```text
///     A  B  C  D
///  1 (0,0) (0,1) (0,2) (0,3)
///  2 (1,0) (1,1) (1,2) (1,3)
/// ```
///
/// so `D2` is `Position { row: 1, col: 3 }`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Creates a position from zero-based coordinates.
    pub const fn new(row: usize, col: usize) -> Position {
        Position { row, col }
    }

    /// Returns whether the position lies on a board of edge `size`.
    #[inline]
    pub fn is_within(self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// Returns the neighbouring position one step along `(d_row, d_col)`,
    /// or `None` when that step leaves a board of edge `size`.
    #[inline]
    pub fn step(self, (d_row, d_col): (isize, isize), size: usize) -> Option<Position> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        let next = Position { row, col };
        next.is_within(size).then_some(next)
    }

    /// Parses move notation for a board of edge `size`.
    ///
    /// The notation is a column letter (case-insensitive) followed by a
    /// 1-based row number, two or three characters in total (`D3`, `b12`).
    /// Surrounding whitespace is ignored.
    ///
    /// # Arguments
    ///
    /// * `s` - The text to parse.
    /// * `size` - Edge length of the board the position must fit on.
    ///
    /// # Returns
    ///
    /// * `Ok(Position)` - The parsed position if it is well formed and on the board.
    /// * `Err(PositionError)` - Which part of the notation was rejected.
    pub fn parse(s: &str, size: usize) -> Result<Position, PositionError> {
        let s = s.trim();
        let chars: Vec<char> = s.chars().collect();
        if !(2..=3).contains(&chars.len()) {
            return Err(PositionError::InvalidFormat);
        }

        let column = chars[0];
        if !column.is_ascii_alphabetic() {
            return Err(PositionError::InvalidColumn(column));
        }
        let col = (column.to_ascii_uppercase() as u8 - b'A') as usize;

        let row_text: String = chars[1..].iter().collect();
        if !row_text.chars().all(|c| c.is_ascii_digit()) {
            return Err(PositionError::InvalidRow(row_text));
        }
        let row = match row_text.parse::<usize>() {
            Ok(n) if n >= 1 => n - 1,
            _ => return Err(PositionError::InvalidRow(row_text)),
        };

        let position = Position { row, col };
        if !position.is_within(size) {
            return Err(PositionError::OutOfBounds(position));
        }
        Ok(position)
    }
}

/// Error type for move notation parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// Notation must be a letter followed by one or two digits
    InvalidFormat,
    /// Column must be a letter
    InvalidColumn(char),
    /// Row must be a number starting at 1
    InvalidRow(String),
    /// Well formed, but not on this board
    OutOfBounds(Position),
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::InvalidFormat => write!(
                f,
                "Invalid position format: expected a letter and a number (e.g., 'D3')"
            ),
            PositionError::InvalidColumn(c) => write!(f, "Invalid column '{c}': must be a letter"),
            PositionError::InvalidRow(r) => {
                write!(f, "Invalid row '{r}': must be a number starting at 1")
            }
            PositionError::OutOfBounds(p) => write!(f, "Position {p} is outside the board"),
        }
    }
}

impl std::error::Error for PositionError {}

impl FromStr for Position {
    type Err = PositionError;

    /// Parses move notation against the largest supported board.
    ///
    /// Use [`Position::parse`] to check against an actual board size.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::parse(s, MAX_SIZE)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.col < MAX_SIZE {
            write!(f, "{}{}", (b'A' + self.col as u8) as char, self.row + 1)
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(Position::parse("D3", 8), Ok(Position::new(2, 3)));
        assert_eq!(Position::parse("a1", 4), Ok(Position::new(0, 0)));
        assert_eq!(Position::parse("D2", 4), Ok(Position::new(1, 3)));
        assert_eq!(Position::parse("z26", 26), Ok(Position::new(25, 25)));
        assert_eq!(Position::parse(" b10 ", 12), Ok(Position::new(9, 1)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Position::parse("", 8), Err(PositionError::InvalidFormat));
        assert_eq!(Position::parse("D", 8), Err(PositionError::InvalidFormat));
        assert_eq!(Position::parse("D100", 8), Err(PositionError::InvalidFormat));
        assert_eq!(Position::parse("33", 8), Err(PositionError::InvalidColumn('3')));
        assert_eq!(
            Position::parse("DD", 8),
            Err(PositionError::InvalidRow("D".to_string()))
        );
        assert_eq!(
            Position::parse("A0", 8),
            Err(PositionError::InvalidRow("0".to_string()))
        );
        assert_eq!(
            Position::parse("A1x", 8),
            Err(PositionError::InvalidRow("1x".to_string()))
        );
    }

    #[test]
    fn test_parse_out_of_bounds() {
        assert_eq!(
            Position::parse("E1", 4),
            Err(PositionError::OutOfBounds(Position::new(0, 4)))
        );
        assert_eq!(
            Position::parse("A5", 4),
            Err(PositionError::OutOfBounds(Position::new(4, 0)))
        );
    }

    #[test]
    fn test_display_roundtrip() {
        for row in 0..MAX_SIZE {
            for col in 0..MAX_SIZE {
                let position = Position::new(row, col);
                assert_eq!(position.to_string().parse::<Position>(), Ok(position));
            }
        }
        assert_eq!(Position::new(1, 3).to_string(), "D2");
        assert_eq!(Position::new(11, 0).to_string(), "A12");
    }

    #[test]
    fn test_step() {
        let p = Position::new(0, 0);
        assert_eq!(p.step((-1, 0), 4), None);
        assert_eq!(p.step((0, -1), 4), None);
        assert_eq!(p.step((1, 1), 4), Some(Position::new(1, 1)));
        assert_eq!(Position::new(3, 3).step((1, 0), 4), None);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            PositionError::InvalidColumn('3').to_string(),
            "Invalid column '3': must be a letter"
        );
        assert_eq!(
            PositionError::OutOfBounds(Position::new(0, 4)).to_string(),
            "Position E1 is outside the board"
        );
    }
}
