//! Playlist and session snapshot types
use super::track::Track;
use serde::{Deserialize, Serialize};

/// Reserved name of the liked-tracks collection
pub const LIKED_PLAYLIST: &str = "Liked";

/// Entry stored in a named playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Resolved source location
    pub source: String,

    /// Artwork location (empty string when none)
    #[serde(default)]
    pub thumbnail: String,
}

impl PlaylistEntry {
    /// Build an entry from a track
    ///
    /// Returns `None` when the track has no usable source.
    pub fn from_track(track: &Track) -> Option<Self> {
        Some(Self {
            title: track.title.clone(),
            artist: track.artist.clone(),
            source: track.resolve_source()?.to_string(),
            thumbnail: track.thumbnail.clone().unwrap_or_default(),
        })
    }

    /// Whether this entry has the given title and artist
    pub fn matches(&self, title: &str, artist: &str) -> bool {
        self.title == title && self.artist == artist
    }
}

impl From<PlaylistEntry> for Track {
    fn from(entry: PlaylistEntry) -> Self {
        Track {
            title: entry.title,
            artist: entry.artist,
            sources: vec![entry.source],
            thumbnail: (!entry.thumbnail.is_empty()).then_some(entry.thumbnail),
        }
    }
}

/// Identity of the most recently loaded track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastPlayedSnapshot {
    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Artwork location
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl From<&Track> for LastPlayedSnapshot {
    fn from(track: &Track) -> Self {
        Self {
            title: track.title.clone(),
            artist: track.artist.clone(),
            thumbnail: track.thumbnail.clone(),
        }
    }
}
