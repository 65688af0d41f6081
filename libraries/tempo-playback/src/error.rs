//! Error types for playback management

use tempo_core::CoreError;
use thiserror::Error;

/// Playback errors
///
/// Every failure is local and non-fatal. Callers usually log and continue.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Queue replacement with an empty track list
    #[error("Queue is empty")]
    EmptyQueue,

    /// Operation needs a current track but the cursor is unset
    #[error("No current track")]
    NoCurrentTrack,

    /// Cursor index outside the queue
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// Audio resource refused to start playback
    #[error("Resource rejected playback start: {0}")]
    ResourceStartRejected(String),

    /// Lyric text could not be fetched or was not understood
    #[error("Metadata unavailable: {0}")]
    MetadataUnavailable(String),

    /// Durable store unavailable
    #[error("Persistence unavailable: {0}")]
    PersistenceUnavailable(String),

    /// Every source candidate of the track is blank
    #[error("No playable source for \"{title}\"")]
    NoPlayableSource { title: String },

    /// Entry already present in the target collection
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Any other collaborator failure
    #[error(transparent)]
    Collection(CoreError),
}

impl From<CoreError> for PlaybackError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Duplicate(msg) => PlaybackError::DuplicateEntry(msg),
            CoreError::Storage(msg) => PlaybackError::PersistenceUnavailable(msg),
            CoreError::Io(e) => PlaybackError::PersistenceUnavailable(e.to_string()),
            other => PlaybackError::Collection(other),
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
