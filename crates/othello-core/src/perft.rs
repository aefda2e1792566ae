//! Leaf counting over the move tree, used to validate move generation.

use crate::board::Board;
use crate::disc::Player;
use crate::error::GameError;

/// Leaf counts from the 8x8 starting position, indexed by `depth - 1`.
pub const REFERENCE_8X8: [u64; 7] = [4, 12, 56, 244, 1_396, 8_200, 55_092];

/// Executes a perft run from the starting position of a `size` board.
///
/// # Arguments
///
/// * `size` - Edge length of the board.
/// * `depth` - Number of plies to expand. A depth of `1` counts the
///   immediate legal moves of the opening player.
///
/// # Returns
///
/// The number of leaves reached.
///
/// # Errors
///
/// Returns `GameError::InvalidSize` if `size` is not a valid board size.
pub fn perft_root(size: usize, depth: u32) -> Result<u64, GameError> {
    let board = Board::new(size)?;
    Ok(perft(&board, Player::Second, depth))
}

/// Counts the leaves `depth` plies below `board` with `player` to move.
///
/// A pass does not consume a ply. A position where neither player can move
/// counts as one leaf.
pub fn perft(board: &Board, player: Player, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.moves_for(player);
    if moves.is_empty() {
        return if board.has_moves(player.opponent()) {
            perft(board, player.opponent(), depth)
        } else {
            1
        };
    }
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|&mv| {
            let mut next = board.clone();
            match next.apply_move(mv, player) {
                Ok(_) => perft(&next, player.opponent(), depth - 1),
                Err(_) => 0,
            }
        })
        .sum()
}
