//! Lyric text types
use serde::{Deserialize, Serialize};

/// Placeholder shown when a track has no lyric text
pub const LYRICS_UNAVAILABLE: &str = "Lyrics are not available for this track yet.";

/// Placeholder shown when lyric text has an unknown shape
pub const LYRICS_UNRECOGNIZED: &str = "Unrecognized lyrics format.";

/// Request for the lyrics of the track that was just loaded
///
/// `token` increases monotonically with every load; responses carrying an
/// older token are discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricsRequest {
    /// Request token issued at load time
    pub token: u64,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,
}

/// One section of section-oriented lyrics (verse, chorus, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricsSection {
    /// Section type, e.g. `verse` or `chorus`
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    /// Lines of the section
    #[serde(default)]
    pub lines: Vec<String>,
}

/// Lyric text in one of the two recognized shapes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LyricsDocument {
    /// Line-oriented text; an empty string is a blank line
    Lines(Vec<String>),

    /// Section-oriented text
    Sections(Vec<LyricsSection>),
}

impl LyricsDocument {
    /// Whether the document has nothing to display
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Lines(lines) => lines.is_empty(),
            Self::Sections(sections) => sections.iter().all(|s| s.lines.is_empty()),
        }
    }
}
