/// Player error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlayerError>;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Storage error: {0}")]
    Storage(#[from] tempo_storage::StorageError),

    #[error("Lyrics error: {0}")]
    Lyrics(#[from] tempo_lyrics::LyricsError),

    #[error("Playback error: {0}")]
    Playback(#[from] tempo_playback::PlaybackError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
