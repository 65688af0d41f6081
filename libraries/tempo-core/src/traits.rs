//! Collaborator traits for Tempo
//!
//! The playback core never talks to a concrete store. Everything durable goes
//! through these traits so that hosts can plug in a file, a browser storage
//! shim, or an in-memory map for tests.
use crate::error::Result;
use crate::types::{LastPlayedSnapshot, PlaylistEntry};
use std::cell::RefCell;
use std::rc::Rc;

/// Durable key-value store
///
/// Values are JSON documents keyed by a fixed string. Writes are
/// last-write-wins; there is no locking because every writer runs on the
/// same event loop.
pub trait KeyValueStore {
    /// Read the value stored under `key`
    ///
    /// Returns `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;

    /// Overwrite the value stored under `key`
    fn set(&mut self, key: &str, value: serde_json::Value) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: serde_json::Value) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Shared handle, so session and playlist slices can write the same store
impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<RefCell<S>> {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        self.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: serde_json::Value) -> Result<()> {
        self.borrow_mut().set(key, value)
    }
}

/// Sink for the most recently loaded track identity
pub trait SessionRecorder {
    /// Overwrite the stored snapshot
    fn record_last_played(&mut self, snapshot: &LastPlayedSnapshot) -> Result<()>;

    /// Read the stored snapshot, if any
    fn read_last_played(&self) -> Result<Option<LastPlayedSnapshot>>;
}

/// Named playlists plus the reserved Liked collection
pub trait PlaylistCollection {
    /// Append an entry to Liked
    ///
    /// Fails with [`CoreError::Duplicate`](crate::CoreError::Duplicate) when an
    /// entry with the same title and artist is already liked.
    fn like(&mut self, entry: PlaylistEntry) -> Result<()>;

    /// Append an entry to the named playlist, creating it if missing
    fn add_to_playlist(&mut self, name: &str, entry: PlaylistEntry) -> Result<()>;
}
