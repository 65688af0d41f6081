//! Session persistence
//!
//! Remembers the identity of the last loaded track under one fixed key. The
//! record is overwritten on every load and never deleted.

use crate::error::{Result, StorageError};
use tempo_core::{KeyValueStore, LastPlayedSnapshot, SessionRecorder};
use tracing::debug;

/// Store key holding the last played snapshot
pub const LAST_PLAYED_KEY: &str = "lastPlayed";

/// Last-played record on top of a key-value store
#[derive(Debug, Clone)]
pub struct SessionStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Overwrite the stored snapshot
    pub fn record(&mut self, snapshot: &LastPlayedSnapshot) -> Result<()> {
        let value = serde_json::to_value(snapshot)?;
        self.store.set(LAST_PLAYED_KEY, value)?;
        debug!(title = %snapshot.title, artist = %snapshot.artist, "Recorded last played");
        Ok(())
    }

    /// Read the stored snapshot
    ///
    /// Returns `Ok(None)` when nothing was ever recorded.
    pub fn read(&self) -> Result<Option<LastPlayedSnapshot>> {
        let Some(value) = self.store.get(LAST_PLAYED_KEY)? else {
            return Ok(None);
        };

        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| StorageError::Corrupt {
                key: LAST_PLAYED_KEY.to_string(),
                reason: e.to_string(),
            })
    }

    /// Give back the underlying store
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S: KeyValueStore> SessionRecorder for SessionStore<S> {
    fn record_last_played(&mut self, snapshot: &LastPlayedSnapshot) -> tempo_core::Result<()> {
        Ok(self.record(snapshot)?)
    }

    fn read_last_played(&self) -> tempo_core::Result<Option<LastPlayedSnapshot>> {
        Ok(self.read()?)
    }
}
