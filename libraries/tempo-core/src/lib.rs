//! Tempo Core
//!
//! Platform-agnostic domain types, collaborator traits, and error handling for Tempo.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Catalog`, `Provenance`, `LastPlayedSnapshot`, `PlaylistEntry`
//! - **Collaborator Traits**: `KeyValueStore`, `SessionRecorder`, `PlaylistCollection`
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use tempo_core::{Catalog, CatalogArtist, CatalogTrack, Provenance};
//!
//! let catalog = Catalog {
//!     artists: vec![CatalogArtist {
//!         name: "Synai".to_string(),
//!         photo: Some("https://cdn.example.com/synai.jpg".to_string()),
//!         tracks: vec![CatalogTrack::new("YHWH", "https://cdn.example.com/synai/1.mp3")],
//!     }],
//!     albums: vec![],
//! };
//!
//! let queue = catalog.artist_queue(0).unwrap();
//! assert_eq!(queue[0].artist, "Synai");
//! assert_eq!(Provenance::ArtistCatalog { artist_index: 0 }.artist_index(), Some(0));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use traits::{KeyValueStore, PlaylistCollection, SessionRecorder};

pub use types::{
    Catalog, CatalogAlbum, CatalogArtist, CatalogTrack, LastPlayedSnapshot, LyricsDocument,
    LyricsRequest, LyricsSection, PlaylistEntry, Provenance, Track, LIKED_PLAYLIST,
    LYRICS_UNAVAILABLE, LYRICS_UNRECOGNIZED,
};
