//! Turn-indexed snapshots used for undo and redo.
//!
//! A snapshot pairs a [`Board`] with a [`TurnState`] and is stored under the
//! turn number current when it was taken. Saving twice under the same turn
//! keeps the last write. Undo loads `turn - 1` and redo loads `turn + 1`.
//!
//! [`JsonFileStore`] keeps one JSON document per turn under a directory named
//! after the session start time:
//!
//! ```text
//! games/
//!   1760781600/
//!     1.json
//!     2.json
//! ```

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::Board;
use crate::error::GameError;
use crate::turn::TurnState;

/// Default root directory for session namespaces.
pub const DEFAULT_ROOT: &str = "games";

/// Identifies one game session by its start time in unix seconds.
pub type SessionId = i64;

/// Returns a session id for a game starting now.
pub fn new_session_id() -> SessionId {
    chrono::Utc::now().timestamp()
}

/// A full copy of the game state at one turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Board,
    pub state: TurnState,
    pub session: SessionId,
}

impl Snapshot {
    /// Serializes the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parses and validates a snapshot recorded for `turn`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::MalformedSnapshot` if the text is not a snapshot,
    /// if its turn counter does not match `turn`, or if its disk counts do not
    /// match its board.
    pub fn from_json(turn: u32, text: &str) -> Result<Snapshot, GameError> {
        let malformed = |reason: String| GameError::MalformedSnapshot { turn, reason };

        let snapshot: Snapshot = serde_json::from_str(text).map_err(|e| malformed(e.to_string()))?;
        if snapshot.state.turn() != turn {
            return Err(malformed(format!(
                "recorded turn {} does not match key",
                snapshot.state.turn()
            )));
        }
        if snapshot.state.score() != snapshot.board.score() {
            return Err(malformed("score does not match board".to_string()));
        }
        Ok(snapshot)
    }
}

/// Storage for turn-keyed snapshots of one session.
pub trait SnapshotStore {
    /// Stores `snapshot` under `turn`, replacing any earlier record.
    fn save(&mut self, turn: u32, snapshot: &Snapshot) -> Result<(), GameError>;

    /// Loads the snapshot stored under `turn`.
    ///
    /// # Errors
    ///
    /// * `GameError::SnapshotNotFound` if nothing was stored under `turn`.
    /// * `GameError::MalformedSnapshot` if a record exists but cannot be read
    ///   back, including records that are not valid text.
    fn load(&self, turn: u32) -> Result<Snapshot, GameError>;

    /// Returns the session the records belong to.
    fn session(&self) -> SessionId;
}

/// Snapshot store writing one JSON file per turn.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
    session: SessionId,
}

impl JsonFileStore {
    /// Creates a store for `session` under `root`.
    ///
    /// Nothing is written until the first [`SnapshotStore::save`].
    pub fn new(root: impl Into<PathBuf>, session: SessionId) -> Self {
        JsonFileStore {
            root: root.into(),
            session,
        }
    }

    /// Returns the directory holding this session's records.
    pub fn session_dir(&self) -> PathBuf {
        self.root.join(self.session.to_string())
    }

    fn record_path(&self, turn: u32) -> PathBuf {
        self.session_dir().join(format!("{turn}.json"))
    }
}

impl SnapshotStore for JsonFileStore {
    fn save(&mut self, turn: u32, snapshot: &Snapshot) -> Result<(), GameError> {
        fs::create_dir_all(self.session_dir())?;
        let path = self.record_path(turn);
        let text = snapshot.to_json().map_err(io::Error::from)?;
        fs::write(&path, text)?;
        debug!(turn, path = %path.display(), "snapshot saved");
        Ok(())
    }

    fn load(&self, turn: u32) -> Result<Snapshot, GameError> {
        let path = self.record_path(turn);
        let parsed = match fs::read_to_string(&path) {
            Ok(text) => Snapshot::from_json(turn, &text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(GameError::SnapshotNotFound(turn));
            }
            Err(e) => Err(GameError::MalformedSnapshot {
                turn,
                reason: e.to_string(),
            }),
        };
        parsed.inspect_err(|e| {
            warn!(turn, path = %path.display(), error = %e, "unreadable snapshot");
        })
    }

    fn session(&self) -> SessionId {
        self.session
    }
}

/// Snapshot store keeping serialized records in memory.
///
/// Records go through the same JSON encoding as [`JsonFileStore`].
#[derive(Debug, Clone)]
pub struct MemoryStore {
    session: SessionId,
    records: HashMap<u32, String>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates an empty store for a session starting now.
    pub fn new() -> Self {
        Self::with_session(new_session_id())
    }

    /// Creates an empty store for `session`.
    pub fn with_session(session: SessionId) -> Self {
        MemoryStore {
            session,
            records: HashMap::new(),
        }
    }

    /// Returns the number of stored turns.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replaces the raw record for `turn`.
    pub fn insert_raw(&mut self, turn: u32, text: impl Into<String>) {
        self.records.insert(turn, text.into());
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, turn: u32, snapshot: &Snapshot) -> Result<(), GameError> {
        let text = snapshot.to_json().map_err(io::Error::from)?;
        self.records.insert(turn, text);
        debug!(turn, "snapshot saved in memory");
        Ok(())
    }

    fn load(&self, turn: u32) -> Result<Snapshot, GameError> {
        let text = self
            .records
            .get(&turn)
            .ok_or(GameError::SnapshotNotFound(turn))?;
        Snapshot::from_json(turn, text).inspect_err(|e| {
            warn!(turn, error = %e, "unreadable snapshot");
        })
    }

    fn session(&self) -> SessionId {
        self.session
    }
}
