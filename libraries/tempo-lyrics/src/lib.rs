//! Tempo Lyrics
//!
//! Best-effort lyric text for the track that is currently loaded.
//!
//! The playback controller only issues a [`LyricsRequest`](tempo_core::LyricsRequest)
//! token on every load. The host hands the request to a [`LyricsProvider`],
//! then passes the outcome back to the controller, which drops it when a newer
//! load happened in the meantime.
//!
//! # Features
//!
//! - Catalog-based document location (`artiste{N}/son{M}.json`)
//! - Line-oriented and section-oriented documents
//! - Placeholder text for every failure mode

mod client;
mod document;
mod error;

pub use client::{LyricsClient, LyricsConfig, LyricsProvider};
pub use document::parse_document;
pub use error::{LyricsError, Result};
