//! Playback Events
//!
//! Observer plumbing between the controller and everything that mirrors it
//! (UI presentations, system media session, session log). Zero listeners is a
//! valid configuration.

use crate::types::{Modes, PlaybackIntent};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tempo_core::{LyricsDocument, LyricsRequest, Provenance, Track};

/// Events emitted by the transport controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Queue replaced wholesale
    QueueReplaced {
        /// Context of the new queue
        provenance: Provenance,
        /// New queue length
        length: usize,
    },

    /// Track under the cursor was loaded into the resource
    TrackLoaded {
        /// The loaded track
        track: Track,
        /// Cursor position
        index: usize,
    },

    /// Confirmed play/pause state changed
    IntentChanged {
        /// The new intent
        intent: PlaybackIntent,
    },

    /// Shuffle or repeat toggled
    ModesChanged {
        /// Current flags
        modes: Modes,
    },

    /// Position update from the resource
    Progress {
        /// Current playback position
        position: Duration,
        /// Total duration, when known
        duration: Option<Duration>,
    },

    /// Lyric text wanted for the freshly loaded track
    LyricsRequested(LyricsRequest),

    /// Lyric panel content changed
    LyricsChanged(LyricsView),
}

/// What the lyric panel shows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LyricsView {
    /// Nothing loaded yet
    #[default]
    Empty,

    /// Fetch in flight
    Loading,

    /// Lyric text for the current track
    Document(LyricsDocument),

    /// Fallback message (fetch failed, unknown format, ...)
    Placeholder(String),
}

/// Receiver of playback events
pub trait PlayerListener {
    /// Handle one event
    fn on_event(&mut self, event: &PlaybackEvent);
}

impl<L: PlayerListener + ?Sized> PlayerListener for Rc<RefCell<L>> {
    fn on_event(&mut self, event: &PlaybackEvent) {
        self.borrow_mut().on_event(event);
    }
}
