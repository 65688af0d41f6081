/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Entry or collection already exists
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Playlist name rejected (blank, reserved)
    #[error("Invalid playlist name: {0}")]
    InvalidName(String),

    /// Stored value does not have the expected shape
    #[error("Corrupt value under \"{key}\": {reason}")]
    Corrupt { key: String, reason: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Error from the underlying key-value store
    #[error(transparent)]
    Store(#[from] tempo_core::CoreError),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::SerializationError(err.to_string())
    }
}

impl From<StorageError> for tempo_core::CoreError {
    fn from(err: StorageError) -> Self {
        use tempo_core::CoreError;

        match err {
            StorageError::NotFound { entity, id } => CoreError::not_found(entity, id),
            StorageError::Duplicate(msg) => CoreError::duplicate(msg),
            StorageError::InvalidName(msg) => CoreError::invalid_input(msg),
            StorageError::Store(inner) => inner,
            other => CoreError::storage(other.to_string()),
        }
    }
}
