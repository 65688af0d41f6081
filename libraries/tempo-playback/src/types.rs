//! Core types for playback management

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Requested playback state
///
/// Only changes when the audio resource confirms a transition, never on the
/// request alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackIntent {
    /// Nothing audible
    #[default]
    Paused,

    /// Resource confirmed playback
    Playing,
}

/// Shuffle and repeat flags
///
/// Independent and both may be on; shuffle wins on advance. Process-local,
/// never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modes {
    /// Pick a uniformly random index on advance
    pub shuffle: bool,

    /// Wrap to the first track at the end of the queue
    pub repeat: bool,
}

/// Configuration for the transport controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Position past which "previous" restarts the track (default: 3s)
    pub restart_threshold: Duration,

    /// Seed for the shuffle generator (default: entropy)
    pub shuffle_seed: Option<u64>,

    /// Album label sent to the system media session (default: "Tempo")
    pub media_album: String,

    /// Artwork used when a track has no thumbnail
    pub fallback_artwork: String,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            restart_threshold: Duration::from_secs(3),
            shuffle_seed: None,
            media_album: "Tempo".to_string(),
            fallback_artwork: "assets/default-cover.png".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.restart_threshold, Duration::from_secs(3));
        assert!(config.shuffle_seed.is_none());
        assert_eq!(config.media_album, "Tempo");
    }

    #[test]
    fn modes_start_off() {
        let modes = Modes::default();
        assert!(!modes.shuffle);
        assert!(!modes.repeat);
        assert_eq!(PlaybackIntent::default(), PlaybackIntent::Paused);
    }
}
