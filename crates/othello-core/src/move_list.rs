//! Container for the legal moves of one player in a position.

use std::fmt;
use std::slice;

use crate::position::Position;

/// The legal placements for one player, in row-major order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Position>,
}

impl MoveList {
    /// Builds a move list from positions that are already in row-major order.
    pub(crate) fn from_sorted(moves: Vec<Position>) -> MoveList {
        debug_assert!(moves.windows(2).all(|w| w[0] < w[1]));
        MoveList { moves }
    }

    /// Returns the number of legal moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns whether there is no legal move, i.e. the player must pass.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns whether `position` is one of the legal moves.
    pub fn contains(&self, position: Position) -> bool {
        self.moves.binary_search(&position).is_ok()
    }

    /// Returns an iterator over the moves.
    pub fn iter(&self) -> slice::Iter<'_, Position> {
        self.moves.iter()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Position;
    type IntoIter = slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let moves = self
            .moves
            .iter()
            .map(|mv| mv.to_string())
            .collect::<Vec<String>>()
            .join(", ");
        write!(f, "[{moves}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        let list = MoveList::from_sorted(vec![Position::new(0, 2), Position::new(1, 3)]);
        assert_eq!(list.len(), 2);
        assert!(list.contains(Position::new(1, 3)));
        assert!(!list.contains(Position::new(1, 2)));
    }

    #[test]
    fn test_empty() {
        let list = MoveList::default();
        assert!(list.is_empty());
        assert_eq!(list.to_string(), "[]");
    }

    #[test]
    fn test_display() {
        let list = MoveList::from_sorted(vec![Position::new(0, 2), Position::new(1, 3)]);
        assert_eq!(list.to_string(), "[C1, D2]");
    }
}
