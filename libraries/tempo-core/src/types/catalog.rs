//! Catalog snapshot types
//!
//! The catalog is produced elsewhere and handed to the player as a read-only
//! snapshot: ordered artists (each with an ordered track list) and a flat
//! album shelf.
use super::track::Track;
use serde::{Deserialize, Deserializer, Serialize};

/// Track as listed under a catalog artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogTrack {
    /// Track title
    pub title: String,

    /// Candidate source locations (`src` may be a string or a list)
    #[serde(alias = "src", deserialize_with = "one_or_many")]
    pub sources: Vec<String>,

    /// Track cover
    #[serde(default)]
    pub cover: Option<String>,
}

impl CatalogTrack {
    /// Create a catalog track with a single source
    pub fn new(title: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sources: vec![source.into()],
            cover: None,
        }
    }
}

/// Artist with their ordered tracks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogArtist {
    /// Artist name
    pub name: String,

    /// Artist photo, used as artwork for tracks without a cover
    #[serde(default)]
    pub photo: Option<String>,

    /// Tracks in catalog order
    #[serde(default)]
    pub tracks: Vec<CatalogTrack>,
}

/// Album shelf entry (flat, no artist nesting)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogAlbum {
    /// Album title
    pub title: String,

    /// Artist name as displayed on the shelf
    pub artist: String,

    /// Album artwork
    #[serde(default)]
    pub image: Option<String>,

    /// Audio location
    pub audio: String,
}

/// Read-only catalog snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Artists in catalog order
    #[serde(default)]
    pub artists: Vec<CatalogArtist>,

    /// Album shelf
    #[serde(default)]
    pub albums: Vec<CatalogAlbum>,
}

impl Catalog {
    /// Build the queue for one artist's full catalog
    ///
    /// Tracks without a cover use the artist photo. Returns `None` when the
    /// index is out of range.
    pub fn artist_queue(&self, artist_index: usize) -> Option<Vec<Track>> {
        let artist = self.artists.get(artist_index)?;
        Some(
            artist
                .tracks
                .iter()
                .map(|t| Track {
                    title: t.title.clone(),
                    artist: artist.name.clone(),
                    sources: t.sources.clone(),
                    thumbnail: t.cover.clone().or_else(|| artist.photo.clone()),
                })
                .collect(),
        )
    }

    /// First artist after `artist_index` that has at least one track
    pub fn next_artist_with_tracks(&self, artist_index: usize) -> Option<usize> {
        self.artists
            .iter()
            .enumerate()
            .skip(artist_index + 1)
            .find(|(_, artist)| !artist.tracks.is_empty())
            .map(|(i, _)| i)
    }

    /// Build the queue for the album shelf
    pub fn album_queue(&self) -> Vec<Track> {
        self.albums
            .iter()
            .map(|a| Track {
                title: a.title.clone(),
                artist: a.artist.clone(),
                sources: vec![a.audio.clone()],
                thumbnail: a.image.clone(),
            })
            .collect()
    }

    /// Locate a track by title
    ///
    /// Returns `(artist_index, track_index)` of the first artist whose track
    /// list contains the title.
    pub fn locate(&self, title: &str) -> Option<(usize, usize)> {
        self.artists.iter().enumerate().find_map(|(ai, artist)| {
            artist
                .tracks
                .iter()
                .position(|t| t.title == title)
                .map(|ti| (ai, ti))
        })
    }
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog {
            artists: vec![
                CatalogArtist {
                    name: "NAN".to_string(),
                    photo: Some("nan.jpg".to_string()),
                    tracks: vec![
                        CatalogTrack {
                            title: "Olala".to_string(),
                            sources: vec!["nan/1.mp3".to_string()],
                            cover: Some("nan/cover1.jpg".to_string()),
                        },
                        CatalogTrack::new("Etoile", "nan/3.mp3"),
                    ],
                },
                CatalogArtist {
                    name: "Empty".to_string(),
                    photo: None,
                    tracks: vec![],
                },
                CatalogArtist {
                    name: "Sara".to_string(),
                    photo: None,
                    tracks: vec![CatalogTrack::new("Tentation", "sara/2.mp3")],
                },
            ],
            albums: vec![CatalogAlbum {
                title: "In God".to_string(),
                artist: "Elihem".to_string(),
                image: Some("ingod.jpg".to_string()),
                audio: "elihem/1.mp3".to_string(),
            }],
        }
    }

    #[test]
    fn artist_queue_uses_photo_when_cover_missing() {
        let queue = catalog().artist_queue(0).unwrap();
        assert_eq!(queue.len(), 2);
        assert_eq!(queue[0].thumbnail.as_deref(), Some("nan/cover1.jpg"));
        assert_eq!(queue[1].thumbnail.as_deref(), Some("nan.jpg"));
        assert_eq!(queue[1].artist, "NAN");
    }

    #[test]
    fn artist_queue_out_of_range() {
        assert!(catalog().artist_queue(9).is_none());
    }

    #[test]
    fn next_artist_skips_empty_catalogs() {
        let catalog = catalog();
        assert_eq!(catalog.next_artist_with_tracks(0), Some(2));
        assert_eq!(catalog.next_artist_with_tracks(2), None);
    }

    #[test]
    fn album_queue_maps_shelf() {
        let queue = catalog().album_queue();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].resolve_source(), Some("elihem/1.mp3"));
    }

    #[test]
    fn locate_finds_first_artist_with_title() {
        let catalog = catalog();
        assert_eq!(catalog.locate("Etoile"), Some((0, 1)));
        assert_eq!(catalog.locate("Tentation"), Some((2, 0)));
        assert_eq!(catalog.locate("Missing"), None);
    }

    #[test]
    fn src_accepts_string_or_list() {
        let single: CatalogTrack =
            serde_json::from_str(r#"{"title":"A","src":"a.mp3"}"#).unwrap();
        assert_eq!(single.sources, vec!["a.mp3".to_string()]);

        let many: CatalogTrack =
            serde_json::from_str(r#"{"title":"B","src":["b1.mp3","b2.mp3"]}"#).unwrap();
        assert_eq!(many.sources.len(), 2);
        assert!(many.cover.is_none());
    }
}
