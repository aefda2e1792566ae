//! Game controller for one session.
//!
//! This module provides [`Game`], which owns the live [`Board`] and
//! [`TurnState`], resolves automatic passes, applies player actions and
//! records a snapshot before and after every placement so that undo and redo
//! can walk the turn history.

use tracing::{debug, info, warn};

use crate::board::Board;
use crate::disc::Player;
use crate::error::GameError;
use crate::history::{SessionId, Snapshot, SnapshotStore};
use crate::move_list::MoveList;
use crate::position::Position;
use crate::turn::TurnState;

/// Lifecycle of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    InProgress,
    Finished,
}

/// One player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Place a disk for the player to move.
    Place(Position),
    /// End the game immediately.
    Abandon,
    /// Show or hide the legal-move hints.
    ToggleHints,
    /// Restore the snapshot of the previous turn.
    Undo,
    /// Restore the snapshot of the next turn.
    Redo,
}

/// Result of [`Game::prepare_turn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStart {
    /// The player to move has at least one legal move.
    Ready,
    /// The given player had no legal move and passed.
    Passed(Player),
    /// The game is over.
    Finished,
}

/// Result of a successful [`Game::act`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// A disk was placed. `score` is `(first, second)` after the move.
    Placed {
        position: Position,
        player: Player,
        score: (u32, u32),
    },
    /// Hints are now shown (`true`) or hidden.
    HintsToggled(bool),
    /// The snapshot recorded for `turn` is now live.
    Restored { turn: u32 },
    /// The game is over.
    GameOver,
}

/// Final result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// `None` on a draw.
    pub winner: Option<Player>,
    /// Disk counts `(first, second)`.
    pub score: (u32, u32),
}

impl Outcome {
    /// Builds the outcome from final disk counts.
    ///
    /// The player with strictly more disks wins.
    pub fn from_score(score: (u32, u32)) -> Outcome {
        let winner = match score.0.cmp(&score.1) {
            std::cmp::Ordering::Greater => Some(Player::First),
            std::cmp::Ordering::Less => Some(Player::Second),
            std::cmp::Ordering::Equal => None,
        };
        Outcome { winner, score }
    }

    /// Returns the disk count of `player`.
    pub fn count(&self, player: Player) -> u32 {
        match player {
            Player::First => self.score.0,
            Player::Second => self.score.1,
        }
    }
}

/// A game in progress, backed by a snapshot store.
#[derive(Debug)]
pub struct Game<S: SnapshotStore> {
    board: Board,
    state: TurnState,
    store: S,
    phase: Phase,
}

impl<S: SnapshotStore> Game<S> {
    /// Creates a game on `board` with the default turn state.
    ///
    /// The game stays in [`Phase::Setup`] until [`Game::start`] is called.
    pub fn new(board: Board, store: S) -> Self {
        let state = TurnState::new(&board);
        Self::with_state(board, state, store)
    }

    /// Creates a game from an arbitrary position and turn state.
    ///
    /// The score in `state` is refreshed from `board`.
    pub fn with_state(board: Board, mut state: TurnState, store: S) -> Self {
        state.refresh_score(&board);
        Game {
            board,
            state,
            store,
            phase: Phase::Setup,
        }
    }

    /// Moves the game from setup into play.
    pub fn start(&mut self) {
        if self.phase == Phase::Setup {
            info!(size = self.board.size(), session = self.session(), "game started");
            self.phase = Phase::InProgress;
        }
    }

    /// Returns the live board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the live turn state.
    pub fn state(&self) -> &TurnState {
        &self.state
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns whether the game is over.
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Returns the snapshot store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the session id recorded in snapshots.
    pub fn session(&self) -> SessionId {
        self.store.session()
    }

    /// Returns the legal moves computed by the last [`Game::prepare_turn`].
    pub fn legal_moves(&self) -> &MoveList {
        self.board.hints()
    }

    /// Resolves the start of a turn.
    ///
    /// Computes the legal moves of the player to move. When there are none
    /// the turn passes to the opponent without recording a snapshot. When
    /// neither player can move, or the board is full, the game ends.
    ///
    /// A game still in setup is started first.
    pub fn prepare_turn(&mut self) -> TurnStart {
        self.start();
        if self.phase == Phase::Finished {
            return TurnStart::Finished;
        }
        if self.board.is_full() {
            self.finish();
            return TurnStart::Finished;
        }

        let player = self.state.player();
        if !self.board.legal_moves_for(player).is_empty() {
            return TurnStart::Ready;
        }

        if !self.board.has_moves(player.opponent()) {
            debug!(turn = self.state.turn(), "neither player can move");
            self.finish();
            return TurnStart::Finished;
        }

        self.state.advance_turn();
        self.board.legal_moves_for(self.state.player());
        debug!(?player, turn = self.state.turn(), "automatic pass");
        TurnStart::Passed(player)
    }

    /// Applies one player action.
    ///
    /// # Errors
    ///
    /// * `GameError::OutOfBounds` or `GameError::InvalidMove` for a placement
    ///   that is off the board or not legal for the player to move.
    /// * `GameError::SnapshotNotFound` when undo or redo has no usable record.
    ///
    /// The game is unchanged on error.
    pub fn act(&mut self, action: Action) -> Result<ActionOutcome, GameError> {
        if self.phase == Phase::Finished {
            return Ok(ActionOutcome::GameOver);
        }
        self.start();

        match action {
            Action::Place(position) => self.place(position),
            Action::Abandon => {
                self.abandon();
                Ok(ActionOutcome::GameOver)
            }
            Action::ToggleHints => {
                self.state.toggle_hints();
                Ok(ActionOutcome::HintsToggled(self.state.hints_enabled()))
            }
            Action::Undo => self.undo(),
            Action::Redo => {
                let turn = self.state.turn() + 1;
                let snapshot = self.load(turn)?;
                Ok(self.install(turn, snapshot))
            }
        }
    }

    /// Ends the game at once.
    pub fn abandon(&mut self) {
        if self.phase != Phase::Finished {
            info!(turn = self.state.turn(), "game abandoned");
            self.phase = Phase::Finished;
        }
    }

    /// Returns the result of the game from the current disk counts.
    pub fn outcome(&self) -> Outcome {
        Outcome::from_score(self.board.score())
    }

    fn finish(&mut self) {
        let outcome = self.outcome();
        info!(winner = ?outcome.winner, score = ?outcome.score, "game over");
        self.phase = Phase::Finished;
    }

    fn place(&mut self, position: Position) -> Result<ActionOutcome, GameError> {
        let player = self.state.player();
        if !position.is_within(self.board.size()) {
            return Err(GameError::OutOfBounds(position));
        }
        if !self.board.is_legal(position, player) {
            return Err(GameError::InvalidMove(position));
        }

        self.save(self.state.turn());
        let score = self.board.apply_move(position, player)?;
        self.state.advance_turn();
        self.state.refresh_score(&self.board);
        self.save(self.state.turn());

        if self.board.is_full() {
            self.finish();
        }
        Ok(ActionOutcome::Placed {
            position,
            player,
            score,
        })
    }

    /// Records the live state under `turn`. Failures are logged only.
    fn save(&mut self, turn: u32) {
        let snapshot = Snapshot {
            board: self.board.clone(),
            state: self.state.clone(),
            session: self.store.session(),
        };
        match self.store.save(turn, &snapshot) {
            Ok(()) => debug!(turn, "snapshot recorded"),
            Err(e) => warn!(turn, error = %e, "failed to record snapshot"),
        }
    }

    /// Restores the position before the last placement.
    ///
    /// The record one turn back is normally that position. When it is the
    /// position right after a placement that forced a pass, restoring it
    /// would replay the pass, so the pre-move record one key earlier is used.
    fn undo(&mut self) -> Result<ActionOutcome, GameError> {
        let turn = self
            .state
            .turn()
            .checked_sub(1)
            .ok_or(GameError::SnapshotNotFound(0))?;
        let snapshot = self.load(turn)?;
        if turn > 1 && must_pass(&snapshot) {
            let earlier = turn - 1;
            let snapshot = self.load(earlier)?;
            return Ok(self.install(earlier, snapshot));
        }
        Ok(self.install(turn, snapshot))
    }

    /// Loads a usable snapshot for `turn`.
    ///
    /// Unreadable records and records for another board size are reported
    /// as missing.
    fn load(&self, turn: u32) -> Result<Snapshot, GameError> {
        let snapshot = match self.store.load(turn) {
            Ok(snapshot) => snapshot,
            Err(GameError::MalformedSnapshot { turn, .. }) => {
                return Err(GameError::SnapshotNotFound(turn));
            }
            Err(e) => return Err(e),
        };
        if snapshot.board.size() != self.board.size() {
            warn!(turn, size = snapshot.board.size(), "snapshot has a different board size");
            return Err(GameError::SnapshotNotFound(turn));
        }
        Ok(snapshot)
    }

    fn install(&mut self, turn: u32, snapshot: Snapshot) -> ActionOutcome {
        self.board = snapshot.board;
        self.state = snapshot.state;
        debug!(turn, "snapshot restored");
        ActionOutcome::Restored { turn }
    }
}

/// Returns whether the player to move in `snapshot` has to pass.
fn must_pass(snapshot: &Snapshot) -> bool {
    let player = snapshot.state.player();
    !snapshot.board.has_moves(player) && snapshot.board.has_moves(player.opponent())
}
