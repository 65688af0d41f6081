//! Tempo - Playback Management
//!
//! Platform-agnostic queue and transport control for Tempo.
//!
//! This crate provides:
//! - Ordered queue with cursor and provenance
//! - Advance policy (shuffle, repeat, artist continuation, 3s restart rule)
//! - Transport controller driving one audio resource
//! - Listener events for UI mirrors and the system media session
//! - Swipe-to-dismiss gesture and progress formatting
//!
//! # Architecture
//!
//! `tempo-playback` never decodes audio and never touches storage directly:
//! - The audio element is provided via [`AudioResource`]
//! - Session persistence and playlists go through `tempo-core` traits
//! - Lyric fetching is left to the host; the controller only issues tokens
//!
//! Everything runs on one thread. Hosts feed resource notifications back with
//! [`TransportController::handle_resource_event`] or
//! [`TransportController::pump_resource_events`].
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tempo_core::{Catalog, Provenance, Track};
//! use tempo_playback::{
//!     AudioResource, PlaybackConfig, PlaybackIntent, ResourceEvent, Result, TransportController,
//! };
//!
//! // Implement AudioResource for your platform
//! #[derive(Default)]
//! struct Element {
//!     paused: bool,
//!     position: Duration,
//!     pending: Vec<ResourceEvent>,
//! }
//!
//! impl AudioResource for Element {
//!     fn set_source(&mut self, _source: &str) {
//!         self.position = Duration::ZERO;
//!     }
//!     fn play(&mut self) -> Result<()> {
//!         self.paused = false;
//!         self.pending.push(ResourceEvent::Playing);
//!         Ok(())
//!     }
//!     fn pause(&mut self) {
//!         self.paused = true;
//!         self.pending.push(ResourceEvent::Paused);
//!     }
//!     fn is_paused(&self) -> bool {
//!         self.paused
//!     }
//!     fn has_ended(&self) -> bool {
//!         false
//!     }
//!     fn position(&self) -> Duration {
//!         self.position
//!     }
//!     fn duration(&self) -> Option<Duration> {
//!         Some(Duration::from_secs(200))
//!     }
//!     fn seek(&mut self, position: Duration) {
//!         self.position = position;
//!     }
//!     fn next_event(&mut self) -> Option<ResourceEvent> {
//!         self.pending.pop()
//!     }
//! }
//!
//! let mut controller = TransportController::new(
//!     Element::default(),
//!     Arc::new(Catalog::default()),
//!     PlaybackConfig::default(),
//! );
//!
//! let tracks = vec![
//!     Track::new("Olala", "NAN", "https://cdn.example.com/nan/1.mp3"),
//!     Track::new("Etoile", "NAN", "https://cdn.example.com/nan/3.mp3"),
//! ];
//! controller.play_collection(tracks, 0, Provenance::Single)?;
//! controller.pump_resource_events();
//! assert_eq!(controller.intent(), PlaybackIntent::Playing);
//!
//! controller.next()?;
//! assert_eq!(controller.current_track().unwrap().title, "Etoile");
//! # Ok::<(), tempo_playback::PlaybackError>(())
//! ```

pub mod advance;
mod controller;
mod error;
pub mod events;
mod lyrics;
mod queue;
mod resource;
pub mod surface;
pub mod types;

// Public exports
pub use controller::{PlayerSession, TransportController};
pub use error::{PlaybackError, Result};
pub use events::{LyricsView, PlaybackEvent, PlayerListener};
pub use lyrics::LyricsTracker;
pub use queue::Queue;
pub use resource::{AudioResource, ResourceEvent};
pub use surface::{
    format_time, ControlIntent, DragGesture, GestureOutcome, MediaCommand, MediaMetadata,
    MediaSession, MediaSessionBridge, MirrorState, PlayerMirrors, TransportIcon,
};
pub use types::{Modes, PlaybackConfig, PlaybackIntent};
