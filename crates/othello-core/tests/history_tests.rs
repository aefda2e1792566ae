use std::fs;

use othello_core::history::DEFAULT_ROOT;
use othello_core::{
    Action, ActionOutcome, Board, Game, GameError, JsonFileStore, Player, Position, Snapshot,
    SnapshotStore, TurnState,
};
use tempfile::TempDir;

fn opening_snapshot(session: i64) -> Snapshot {
    let board = Board::new(6).unwrap();
    Snapshot {
        state: TurnState::new(&board),
        board,
        session,
    }
}

#[test]
fn test_session_directory_is_created_lazily() {
    let dir = TempDir::new().unwrap();
    let mut store = JsonFileStore::new(dir.path(), 1_760_781_600);
    assert!(!store.session_dir().exists());
    assert!(matches!(store.load(1), Err(GameError::SnapshotNotFound(1))));

    store.save(1, &opening_snapshot(1_760_781_600)).unwrap();
    assert_eq!(store.session_dir(), dir.path().join("1760781600"));
    assert!(store.session_dir().join("1.json").is_file());
}

#[test]
fn test_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let mut store = JsonFileStore::new(dir.path(), 7);
    let mut snapshot = opening_snapshot(7);
    snapshot
        .board
        .apply_move(Position::new(1, 2), Player::Second)
        .unwrap();
    snapshot.state.advance_turn();
    snapshot.state.refresh_score(&snapshot.board);
    snapshot.state.toggle_hints();

    store.save(2, &snapshot).unwrap();
    let loaded = store.load(2).unwrap();
    assert_eq!(loaded, snapshot);

    let text = fs::read_to_string(store.session_dir().join("2.json")).unwrap();
    assert_eq!(loaded.to_json().unwrap(), text);
}

#[test]
fn test_unreadable_file_is_malformed() {
    let dir = TempDir::new().unwrap();
    let mut store = JsonFileStore::new(dir.path(), 7);
    store.save(1, &opening_snapshot(7)).unwrap();

    let path = store.session_dir().join("1.json");
    let text = fs::read_to_string(&path).unwrap().replace("X", "Z");
    fs::write(&path, text).unwrap();
    assert!(matches!(
        store.load(1),
        Err(GameError::MalformedSnapshot { turn: 1, .. })
    ));

    fs::write(&path, "{}").unwrap();
    assert!(matches!(
        store.load(1),
        Err(GameError::MalformedSnapshot { turn: 1, .. })
    ));

    fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
    assert!(matches!(
        store.load(1),
        Err(GameError::MalformedSnapshot { turn: 1, .. })
    ));
}

#[test]
fn test_undo_over_binary_file_reports_no_backup() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path(), 9);
    let session_dir = store.session_dir();
    let mut game = Game::new(Board::new(4).unwrap(), store);
    game.prepare_turn();
    game.act(Action::Place("B1".parse().unwrap())).unwrap();

    fs::write(session_dir.join("1.json"), [0xff, 0xfe]).unwrap();
    let before = (game.board().clone(), game.state().clone());
    assert!(matches!(
        game.act(Action::Undo),
        Err(GameError::SnapshotNotFound(1))
    ));
    assert_eq!((game.board().clone(), game.state().clone()), before);
}

#[test]
fn test_sessions_do_not_share_records() {
    let dir = TempDir::new().unwrap();
    let mut first = JsonFileStore::new(dir.path(), 1);
    let second = JsonFileStore::new(dir.path(), 2);
    first.save(1, &opening_snapshot(1)).unwrap();
    assert!(matches!(second.load(1), Err(GameError::SnapshotNotFound(1))));
}

#[test]
fn test_default_root() {
    let store = JsonFileStore::new(DEFAULT_ROOT, 3);
    assert_eq!(store.session_dir(), std::path::Path::new("games").join("3"));
}

#[test]
fn test_game_undo_redo_on_disk() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path(), 11);
    let mut game = Game::new(Board::new(4).unwrap(), store);
    game.start();
    game.prepare_turn();

    game.act(Action::Place("B1".parse().unwrap())).unwrap();
    game.prepare_turn();
    game.act(Action::Place("A1".parse().unwrap())).unwrap();
    assert_eq!(game.state().turn(), 3);
    let after_second_move = (game.board().clone(), game.state().clone());

    assert_eq!(
        game.act(Action::Undo).unwrap(),
        ActionOutcome::Restored { turn: 2 }
    );
    assert_eq!(game.state().player(), Player::First);
    assert_eq!(game.state().score(), (1, 4));

    assert_eq!(
        game.act(Action::Undo).unwrap(),
        ActionOutcome::Restored { turn: 1 }
    );
    assert_eq!(game.board(), &Board::new(4).unwrap());

    assert!(matches!(
        game.act(Action::Undo),
        Err(GameError::SnapshotNotFound(0))
    ));

    game.act(Action::Redo).unwrap();
    game.act(Action::Redo).unwrap();
    assert_eq!((game.board().clone(), game.state().clone()), after_second_move);
    assert!(matches!(
        game.act(Action::Redo),
        Err(GameError::SnapshotNotFound(4))
    ));
}

#[test]
fn test_failed_save_does_not_stop_the_game() {
    let dir = TempDir::new().unwrap();
    // A file where the root directory should be makes every save fail.
    let root = dir.path().join("blocked");
    fs::write(&root, "").unwrap();

    let mut game = Game::new(Board::new(4).unwrap(), JsonFileStore::new(&root, 5));
    game.prepare_turn();
    assert!(game.act(Action::Place("B1".parse().unwrap())).is_ok());
    assert_eq!(game.state().turn(), 2);
    assert!(matches!(
        game.act(Action::Undo),
        Err(GameError::SnapshotNotFound(1))
    ));
}
