//! Error types for the lyrics client.

use tempo_core::{LYRICS_UNAVAILABLE, LYRICS_UNRECOGNIZED};
use thiserror::Error;

/// Errors that can occur when fetching lyric text.
#[derive(Error, Debug)]
pub enum LyricsError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Invalid base URL
    #[error("Invalid lyrics URL: {0}")]
    InvalidUrl(String),

    /// Track is not part of the catalog, so it has no lyric location
    #[error("No lyrics location for \"{title}\"")]
    NotListed { title: String },

    /// Host answered with a non-success status
    #[error("Lyrics host error ({status}) for {url}")]
    ServerError { status: u16, url: String },

    /// Host is offline or unreachable
    #[error("Lyrics host unreachable: {0}")]
    ServerUnreachable(String),

    /// Body was not JSON
    #[error("Failed to parse lyrics: {0}")]
    ParseError(String),

    /// JSON had neither a `lyrics` nor a `sections` array
    #[error("Unrecognized lyrics format")]
    UnrecognizedFormat,
}

impl LyricsError {
    /// Text the lyric panel shows for this failure
    pub fn placeholder(&self) -> &'static str {
        match self {
            LyricsError::UnrecognizedFormat => LYRICS_UNRECOGNIZED,
            _ => LYRICS_UNAVAILABLE,
        }
    }
}

/// Result type for lyrics operations.
pub type Result<T> = std::result::Result<T, LyricsError>;
