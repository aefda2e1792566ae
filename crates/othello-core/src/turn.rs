//! Whose turn it is, the turn counter, the disk counts and the hint switch.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::disc::Player;

/// Per-game turn bookkeeping shown in the side menu.
///
/// `score` mirrors the board; it is only ever changed by
/// [`TurnState::refresh_score`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    turn: u32,
    player: Player,
    score: (u32, u32),
    hints: bool,
}

impl Default for TurnState {
    /// Turn 1, `Second` to move, two disks each, hints off.
    fn default() -> Self {
        TurnState {
            turn: 1,
            player: Player::Second,
            score: (2, 2),
            hints: false,
        }
    }
}

impl TurnState {
    /// Creates the state for a fresh game on `board`.
    pub fn new(board: &Board) -> Self {
        let mut state = TurnState::default();
        state.refresh_score(board);
        state
    }

    /// Returns the turn counter, starting at 1.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Returns the player to move.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Returns the disk counts `(first, second)`.
    pub fn score(&self) -> (u32, u32) {
        self.score
    }

    /// Returns whether legal moves are shown on the board.
    pub fn hints_enabled(&self) -> bool {
        self.hints
    }

    /// Hands the move to the other player and increments the turn counter.
    ///
    /// Used both after a placement and for an automatic pass.
    pub fn advance_turn(&mut self) {
        self.player = self.player.opponent();
        self.turn += 1;
    }

    /// Copies the disk counts from the board.
    pub fn refresh_score(&mut self, board: &Board) {
        self.score = board.score();
    }

    /// Shows or hides the legal-move hints.
    pub fn toggle_hints(&mut self) {
        self.hints = !self.hints;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    #[test]
    fn test_default() {
        let state = TurnState::default();
        assert_eq!(state.turn(), 1);
        assert_eq!(state.player(), Player::Second);
        assert_eq!(state.score(), (2, 2));
        assert!(!state.hints_enabled());
    }

    #[test]
    fn test_advance_turn() {
        let mut state = TurnState::default();
        state.advance_turn();
        assert_eq!(state.turn(), 2);
        assert_eq!(state.player(), Player::First);
        state.advance_turn();
        assert_eq!(state.turn(), 3);
        assert_eq!(state.player(), Player::Second);
    }

    #[test]
    fn test_refresh_score() {
        let mut board = Board::new(4).unwrap();
        let mut state = TurnState::new(&board);
        board.apply_move(Position::new(1, 3), Player::First).unwrap();
        assert_eq!(state.score(), (2, 2));
        state.refresh_score(&board);
        assert_eq!(state.score(), (4, 1));
    }

    #[test]
    fn test_toggle_hints() {
        let mut state = TurnState::default();
        state.toggle_hints();
        assert!(state.hints_enabled());
        state.toggle_hints();
        assert!(!state.hints_enabled());
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut state = TurnState::default();
        state.advance_turn();
        state.toggle_hints();
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(
            json,
            r#"{"turn":2,"player":"First","score":[2,2],"hints":true}"#
        );
        let back: TurnState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
