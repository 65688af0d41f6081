//! File-backed persistence tests
//!
//! Every test writes through `JsonFileStore`, drops it, and reopens the same
//! file to verify what actually reached disk.

use std::cell::RefCell;
use std::rc::Rc;
use tempo_core::{KeyValueStore, LastPlayedSnapshot, PlaylistEntry, SessionRecorder, LIKED_PLAYLIST};
use tempo_storage::{JsonFileStore, PlaylistBook, SessionStore, StorageError, LAST_PLAYED_KEY};

// ===== Test Helpers =====

fn entry(title: &str, artist: &str) -> PlaylistEntry {
    PlaylistEntry {
        title: title.to_string(),
        artist: artist.to_string(),
        source: format!("https://cdn.test/{}.mp3", title),
        thumbnail: format!("https://cdn.test/{}.jpg", title),
    }
}

fn snapshot(title: &str) -> LastPlayedSnapshot {
    LastPlayedSnapshot {
        title: title.to_string(),
        artist: "NAN".to_string(),
        thumbnail: None,
    }
}

// ===== Session =====

#[test]
fn test_last_played_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    {
        let mut session = SessionStore::new(JsonFileStore::open(&path).unwrap());
        session.record_last_played(&snapshot("Olala")).unwrap();
        session.record_last_played(&snapshot("Etoile")).unwrap();
    }

    let session = SessionStore::new(JsonFileStore::open(&path).unwrap());
    let restored = session.read_last_played().unwrap().unwrap();
    assert_eq!(restored.title, "Etoile");
}

#[test]
fn test_state_file_uses_documented_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("state.json");

    let store = Rc::new(RefCell::new(JsonFileStore::open(&path).unwrap()));
    SessionStore::new(Rc::clone(&store))
        .record(&snapshot("Olala"))
        .unwrap();
    PlaylistBook::new(Rc::clone(&store))
        .like(entry("Olala", "NAN"))
        .unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw[LAST_PLAYED_KEY]["title"], "Olala");
    assert_eq!(raw["playlists"][LIKED_PLAYLIST][0]["artist"], "NAN");
}

#[test]
fn test_corrupt_state_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = JsonFileStore::open(&path).unwrap_err();
    assert!(matches!(err, StorageError::SerializationError(_)));
}

// ===== Playlists =====

#[test]
fn test_playlist_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    {
        let mut book = PlaylistBook::new(JsonFileStore::open(&path).unwrap());
        book.create("Road trip").unwrap();
        book.add_entry("Road trip", entry("Olala", "NAN")).unwrap();
        book.add_entry("Road trip", entry("Tentation", "Sara"))
            .unwrap();
        book.add_entry("Gym", entry("Bondi", "Sara")).unwrap();
    }

    let mut book = PlaylistBook::new(JsonFileStore::open(&path).unwrap());
    assert_eq!(
        book.names().unwrap(),
        vec!["Gym".to_string(), LIKED_PLAYLIST.to_string(), "Road trip".to_string()]
    );

    let removed = book.remove_entry("Road trip", 0).unwrap();
    assert_eq!(removed.title, "Olala");
    assert_eq!(book.get("Road trip").unwrap().len(), 1);

    book.delete("Gym").unwrap();
    assert!(matches!(
        book.get("Gym"),
        Err(StorageError::NotFound { .. })
    ));
}

#[test]
fn test_creating_existing_playlist_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut book = PlaylistBook::new(JsonFileStore::open(dir.path().join("s.json")).unwrap());

    book.create("Road trip").unwrap();
    assert!(matches!(
        book.create("Road trip"),
        Err(StorageError::Duplicate(_))
    ));
}

#[test]
fn test_like_and_unlike() {
    let dir = tempfile::tempdir().unwrap();
    let mut book = PlaylistBook::new(JsonFileStore::open(dir.path().join("s.json")).unwrap());

    book.like(entry("Olala", "NAN")).unwrap();
    assert!(book.is_liked("Olala", "NAN").unwrap());

    assert!(book.unlike("Olala", "NAN").unwrap());
    assert!(!book.unlike("Olala", "NAN").unwrap());
    assert!(!book.is_liked("Olala", "NAN").unwrap());
}

#[test]
fn test_remove_out_of_range_entry() {
    let dir = tempfile::tempdir().unwrap();
    let mut book = PlaylistBook::new(JsonFileStore::open(dir.path().join("s.json")).unwrap());
    book.add_entry("Road trip", entry("Olala", "NAN")).unwrap();

    assert!(matches!(
        book.remove_entry("Road trip", 5),
        Err(StorageError::NotFound { .. })
    ));
    assert_eq!(book.get("Road trip").unwrap().len(), 1);
}

#[test]
fn test_corrupt_playlists_value_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::open(dir.path().join("s.json")).unwrap();
    store
        .set("playlists", serde_json::json!(["not", "a", "map"]))
        .unwrap();

    let book = PlaylistBook::new(store);
    assert!(matches!(book.all(), Err(StorageError::Corrupt { .. })));
}

#[test]
fn test_failed_like_is_not_remembered() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let mut book = PlaylistBook::new(JsonFileStore::open(&path).unwrap());

    std::fs::create_dir(&path).unwrap();

    assert!(book.like(entry("Olala", "NAN")).is_err());
    assert!(!book.is_liked("Olala", "NAN").unwrap());
    assert!(book.get(LIKED_PLAYLIST).unwrap().is_empty());
}
