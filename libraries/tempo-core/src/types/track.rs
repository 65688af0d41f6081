//! Track domain type
use serde::{Deserialize, Serialize};
use std::fmt;

/// Playable track
///
/// Immutable value record built from catalog or playlist data. A track carries
/// one or more candidate source locations; the first usable one wins and the
/// rest are fallbacks only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Candidate source locations, primary first
    pub sources: Vec<String>,

    /// Artwork location (optional)
    pub thumbnail: Option<String>,
}

impl Track {
    /// Create a track with a single source location
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            sources: vec![source.into()],
            thumbnail: None,
        }
    }

    /// Add a fallback source location
    #[must_use]
    pub fn with_fallback_source(mut self, source: impl Into<String>) -> Self {
        self.sources.push(source.into());
        self
    }

    /// Set the artwork location
    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// Resolve the source to hand to the audio resource
    ///
    /// Picks the first non-blank candidate. Returns `None` when every
    /// candidate is blank.
    pub fn resolve_source(&self) -> Option<&str> {
        self.sources
            .iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
    }

    /// Whether this track has the given title and artist
    ///
    /// Playlists match tracks by title + artist, never by source.
    pub fn matches(&self, title: &str, artist: &str) -> bool {
        self.title == title && self.artist == artist
    }
}

/// Context that produced the current queue
///
/// Queue-end behavior depends on it: only a full artist catalog continues
/// into the next artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Provenance {
    /// Every track of one catalog artist, in catalog order
    ArtistCatalog { artist_index: usize },

    /// A user playlist (including Liked)
    Playlist { name: String },

    /// Results of a search query
    SearchResults { query: String },

    /// The flat album shelf
    AlbumShelf,

    /// One ad-hoc track
    Single,
}

impl Provenance {
    /// Catalog index of the artist, when the queue is an artist catalog
    pub fn artist_index(&self) -> Option<usize> {
        match self {
            Self::ArtistCatalog { artist_index } => Some(*artist_index),
            _ => None,
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArtistCatalog { artist_index } => write!(f, "artist #{}", artist_index + 1),
            Self::Playlist { name } => write!(f, "playlist \"{}\"", name),
            Self::SearchResults { query } => write!(f, "search \"{}\"", query),
            Self::AlbumShelf => f.write_str("album shelf"),
            Self::Single => f.write_str("single track"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_primary_source() {
        let track = Track::new("Olala", "NAN", "https://cdn/a.mp3")
            .with_fallback_source("https://cdn/b.mp3");
        assert_eq!(track.resolve_source(), Some("https://cdn/a.mp3"));
    }

    #[test]
    fn resolve_falls_back_when_primary_blank() {
        let track = Track::new("Olala", "NAN", "  ").with_fallback_source("https://cdn/b.mp3");
        assert_eq!(track.resolve_source(), Some("https://cdn/b.mp3"));
    }

    #[test]
    fn resolve_none_when_all_blank() {
        let track = Track::new("Olala", "NAN", "");
        assert_eq!(track.resolve_source(), None);
    }

    #[test]
    fn provenance_artist_index() {
        assert_eq!(
            Provenance::ArtistCatalog { artist_index: 3 }.artist_index(),
            Some(3)
        );
        assert_eq!(Provenance::Single.artist_index(), None);
        assert_eq!(
            Provenance::Playlist {
                name: "Liked".to_string()
            }
            .artist_index(),
            None
        );
    }

    #[test]
    fn provenance_serializes_with_kind_tag() {
        let json = serde_json::to_value(Provenance::ArtistCatalog { artist_index: 2 }).unwrap();
        assert_eq!(json["kind"], "artist_catalog");
        assert_eq!(json["artist_index"], 2);
    }
}
