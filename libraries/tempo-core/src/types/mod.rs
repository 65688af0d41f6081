mod catalog;
mod lyrics;
mod playlist;
mod track;

pub use catalog::{Catalog, CatalogAlbum, CatalogArtist, CatalogTrack};
pub use lyrics::{
    LyricsDocument, LyricsRequest, LyricsSection, LYRICS_UNAVAILABLE, LYRICS_UNRECOGNIZED,
};
pub use playlist::{LastPlayedSnapshot, PlaylistEntry, LIKED_PLAYLIST};
pub use track::{Provenance, Track};
