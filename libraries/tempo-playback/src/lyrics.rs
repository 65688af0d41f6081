//! Lyric request tokens
//!
//! Every load issues a new token. A response is applied only when it carries
//! the latest token, so a slow fetch for an earlier track can never overwrite
//! the lyrics of the current one.

use tempo_core::{LyricsRequest, Track};

/// Issues and checks lyric request tokens
#[derive(Debug, Clone, Default)]
pub struct LyricsTracker {
    latest: u64,
}

impl LyricsTracker {
    /// Create a tracker with no request issued
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a request for the given track
    pub fn issue(&mut self, track: &Track) -> LyricsRequest {
        self.latest += 1;
        LyricsRequest {
            token: self.latest,
            title: track.title.clone(),
            artist: track.artist.clone(),
        }
    }

    /// Whether a response with this token is still wanted
    pub fn is_current(&self, token: u64) -> bool {
        token != 0 && token == self.latest
    }

    /// Latest issued token (0 when none)
    pub fn latest(&self) -> u64 {
        self.latest
    }
}
