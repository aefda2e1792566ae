//! Board engine, turn bookkeeping, snapshot history and game controller for
//! terminal Othello on square boards from 4x4 to 26x26.

pub mod board;
pub mod disc;
pub mod error;
pub mod game;
pub mod history;
pub mod move_list;
pub mod perft;
pub mod position;
pub mod turn;

pub use board::Board;
pub use disc::{Cell, Player};
pub use error::GameError;
pub use game::{Action, ActionOutcome, Game, Outcome, Phase, TurnStart};
pub use history::{JsonFileStore, MemoryStore, Snapshot, SnapshotStore};
pub use move_list::MoveList;
pub use position::{Position, PositionError};
pub use turn::TurnState;
