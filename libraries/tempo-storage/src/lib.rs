//! Tempo Storage
//!
//! Durable state for Tempo on top of a plain key-value store.
//!
//! # Architecture
//!
//! - **Backends**: [`MemoryStore`] and [`JsonFileStore`] implement `tempo_core::KeyValueStore`
//! - **Vertical Slicing**: each feature owns its key and its JSON shape
//!   (`session` → `lastPlayed`, `playlists` → `playlists`)
//! - **Shared store**: slices can share one backend through `Rc<RefCell<_>>`
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use tempo_core::{LastPlayedSnapshot, PlaylistEntry};
//! use tempo_storage::{MemoryStore, PlaylistBook, SessionStore};
//!
//! let store = Rc::new(RefCell::new(MemoryStore::new()));
//! let mut session = SessionStore::new(Rc::clone(&store));
//! let mut playlists = PlaylistBook::new(Rc::clone(&store));
//!
//! session.record(&LastPlayedSnapshot {
//!     title: "Olala".to_string(),
//!     artist: "NAN".to_string(),
//!     thumbnail: None,
//! })?;
//! playlists.like(PlaylistEntry {
//!     title: "Olala".to_string(),
//!     artist: "NAN".to_string(),
//!     source: "https://cdn.example.com/nan/1.mp3".to_string(),
//!     thumbnail: String::new(),
//! })?;
//!
//! assert_eq!(store.borrow().len(), 2);
//! # Ok::<(), tempo_storage::StorageError>(())
//! ```

mod error;
mod store;

// Vertical slices
pub mod playlists;
pub mod session;

pub use error::{Result, StorageError};
pub use playlists::{PlaylistBook, Playlists, PLAYLISTS_KEY};
pub use session::{SessionStore, LAST_PLAYED_KEY};
pub use store::{JsonFileStore, MemoryStore};
