//! Playlist management
//!
//! All playlists live under one store key as a JSON object mapping playlist
//! name to its ordered entries:
//!
//! ```json
//! {
//!   "Liked": [{ "title": "Olala", "artist": "NAN", "source": "...", "thumbnail": "..." }],
//!   "Road trip": []
//! }
//! ```
//!
//! The reserved [`LIKED_PLAYLIST`] collection is materialized on every read,
//! even when it was never written.

use crate::error::{Result, StorageError};
use std::collections::BTreeMap;
use tempo_core::{KeyValueStore, PlaylistCollection, PlaylistEntry, LIKED_PLAYLIST};
use tracing::{debug, info};

/// Store key holding every playlist
pub const PLAYLISTS_KEY: &str = "playlists";

/// Playlists by name, in name order
pub type Playlists = BTreeMap<String, Vec<PlaylistEntry>>;

/// Named playlists on top of a key-value store
#[derive(Debug, Clone)]
pub struct PlaylistBook<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PlaylistBook<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Every playlist, Liked included
    pub fn all(&self) -> Result<Playlists> {
        let mut playlists: Playlists = match self.store.get(PLAYLISTS_KEY)? {
            Some(value) => serde_json::from_value(value).map_err(|e| StorageError::Corrupt {
                key: PLAYLISTS_KEY.to_string(),
                reason: e.to_string(),
            })?,
            None => Playlists::new(),
        };
        playlists.entry(LIKED_PLAYLIST.to_string()).or_default();
        Ok(playlists)
    }

    /// Playlist names, Liked included
    pub fn names(&self) -> Result<Vec<String>> {
        Ok(self.all()?.into_keys().collect())
    }

    /// Entries of one playlist
    pub fn get(&self, name: &str) -> Result<Vec<PlaylistEntry>> {
        self.all()?
            .remove(name)
            .ok_or_else(|| StorageError::not_found("Playlist", name))
    }

    /// Create an empty playlist
    pub fn create(&mut self, name: &str) -> Result<()> {
        let name = validate_name(name)?;
        let mut playlists = self.all()?;
        if playlists.contains_key(name) {
            return Err(StorageError::Duplicate(format!("playlist \"{}\"", name)));
        }

        playlists.insert(name.to_string(), Vec::new());
        self.save(&playlists)?;
        info!(playlist = %name, "Playlist created");
        Ok(())
    }

    /// Delete a playlist
    ///
    /// Liked cannot be deleted.
    pub fn delete(&mut self, name: &str) -> Result<()> {
        if name == LIKED_PLAYLIST {
            return Err(StorageError::InvalidName(format!(
                "\"{}\" is reserved",
                LIKED_PLAYLIST
            )));
        }

        let mut playlists = self.all()?;
        if playlists.remove(name).is_none() {
            return Err(StorageError::not_found("Playlist", name));
        }

        self.save(&playlists)?;
        info!(playlist = %name, "Playlist deleted");
        Ok(())
    }

    /// Append an entry, creating the playlist if missing
    pub fn add_entry(&mut self, name: &str, entry: PlaylistEntry) -> Result<()> {
        let name = validate_name(name)?;
        let mut playlists = self.all()?;
        debug!(playlist = %name, title = %entry.title, "Adding entry");
        playlists.entry(name.to_string()).or_default().push(entry);
        self.save(&playlists)
    }

    /// Remove the entry at `index`
    pub fn remove_entry(&mut self, name: &str, index: usize) -> Result<PlaylistEntry> {
        let mut playlists = self.all()?;
        let entries = playlists
            .get_mut(name)
            .ok_or_else(|| StorageError::not_found("Playlist", name))?;

        if index >= entries.len() {
            return Err(StorageError::not_found(
                "Entry",
                format!("{}[{}]", name, index),
            ));
        }

        let removed = entries.remove(index);
        self.save(&playlists)?;
        Ok(removed)
    }

    /// Append to Liked unless the same title + artist is already there
    pub fn like(&mut self, entry: PlaylistEntry) -> Result<()> {
        let mut playlists = self.all()?;
        let liked = playlists.entry(LIKED_PLAYLIST.to_string()).or_default();

        if liked.iter().any(|e| e.matches(&entry.title, &entry.artist)) {
            return Err(StorageError::Duplicate(format!(
                "\"{}\" by {} is already liked",
                entry.title, entry.artist
            )));
        }

        info!(title = %entry.title, artist = %entry.artist, "Liked");
        liked.push(entry);
        self.save(&playlists)
    }

    /// Remove a track from Liked
    ///
    /// Returns whether something was removed.
    pub fn unlike(&mut self, title: &str, artist: &str) -> Result<bool> {
        let mut playlists = self.all()?;
        let liked = playlists.entry(LIKED_PLAYLIST.to_string()).or_default();

        let before = liked.len();
        liked.retain(|e| !e.matches(title, artist));
        if liked.len() == before {
            return Ok(false);
        }

        self.save(&playlists)?;
        Ok(true)
    }

    /// Whether the track is in Liked
    pub fn is_liked(&self, title: &str, artist: &str) -> Result<bool> {
        Ok(self
            .get(LIKED_PLAYLIST)?
            .iter()
            .any(|e| e.matches(title, artist)))
    }

    /// Give back the underlying store
    pub fn into_inner(self) -> S {
        self.store
    }

    fn save(&mut self, playlists: &Playlists) -> Result<()> {
        let value = serde_json::to_value(playlists)?;
        self.store.set(PLAYLISTS_KEY, value)?;
        Ok(())
    }
}

impl<S: KeyValueStore> PlaylistCollection for PlaylistBook<S> {
    fn like(&mut self, entry: PlaylistEntry) -> tempo_core::Result<()> {
        Ok(PlaylistBook::like(self, entry)?)
    }

    fn add_to_playlist(&mut self, name: &str, entry: PlaylistEntry) -> tempo_core::Result<()> {
        Ok(self.add_entry(name, entry)?)
    }
}

fn validate_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StorageError::InvalidName("name is blank".to_string()));
    }
    Ok(trimmed)
}
