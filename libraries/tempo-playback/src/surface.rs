//! External control surface
//!
//! Everything that mirrors or drives the controller from outside:
//! - Control intents (in-app buttons and system media keys)
//! - System media session bridge
//! - Compact and expanded UI mirrors
//! - Swipe-down gesture on the expanded presentation

use crate::events::{LyricsView, PlaybackEvent, PlayerListener};
use crate::types::{Modes, PlaybackIntent};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tempo_core::Track;

/// User or system transport request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ControlIntent {
    Play,
    Pause,
    TogglePlayPause,
    Next,
    Previous,
    ToggleShuffle,
    ToggleRepeat,
    /// Scrub to a percentage of the track, `0.0..=100.0`
    Scrub(f64),
}

/// Command coming from the system media controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaCommand {
    Play,
    Pause,
    NextTrack,
    PreviousTrack,
}

impl From<MediaCommand> for ControlIntent {
    fn from(command: MediaCommand) -> Self {
        match command {
            MediaCommand::Play => ControlIntent::Play,
            MediaCommand::Pause => ControlIntent::Pause,
            MediaCommand::NextTrack => ControlIntent::Next,
            MediaCommand::PreviousTrack => ControlIntent::Previous,
        }
    }
}

/// Metadata published to the system media session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub artwork: String,
}

impl MediaMetadata {
    /// Build metadata for a track, using the fallback artwork when it has none
    pub fn for_track(track: &Track, album: &str, fallback_artwork: &str) -> Self {
        Self {
            title: track.title.clone(),
            artist: track.artist.clone(),
            album: album.to_string(),
            artwork: track
                .thumbnail
                .clone()
                .unwrap_or_else(|| fallback_artwork.to_string()),
        }
    }
}

/// System media-control integration
///
/// Implemented by the host (browser media session, MPRIS, SMTC, ...).
pub trait MediaSession {
    /// Publish metadata for the loaded track
    fn set_metadata(&mut self, metadata: &MediaMetadata);

    /// Publish the confirmed playback state
    fn set_playback_status(&mut self, intent: PlaybackIntent);
}

/// Adapts a [`MediaSession`] to the listener interface
pub struct MediaSessionBridge<S: MediaSession> {
    session: S,
    album: String,
    fallback_artwork: String,
}

impl<S: MediaSession> MediaSessionBridge<S> {
    /// Create a bridge publishing under the given album label
    pub fn new(session: S, album: impl Into<String>, fallback_artwork: impl Into<String>) -> Self {
        Self {
            session,
            album: album.into(),
            fallback_artwork: fallback_artwork.into(),
        }
    }

    /// Underlying session
    pub fn session(&self) -> &S {
        &self.session
    }
}

impl<S: MediaSession> PlayerListener for MediaSessionBridge<S> {
    fn on_event(&mut self, event: &PlaybackEvent) {
        match event {
            PlaybackEvent::TrackLoaded { track, .. } => {
                let metadata = MediaMetadata::for_track(track, &self.album, &self.fallback_artwork);
                self.session.set_metadata(&metadata);
            }
            PlaybackEvent::IntentChanged { intent } => self.session.set_playback_status(*intent),
            _ => {}
        }
    }
}

/// Icon on the play/pause button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportIcon {
    /// Shown while paused
    #[default]
    Play,
    /// Shown while playing
    Pause,
}

impl From<PlaybackIntent> for TransportIcon {
    fn from(intent: PlaybackIntent) -> Self {
        match intent {
            PlaybackIntent::Paused => TransportIcon::Play,
            PlaybackIntent::Playing => TransportIcon::Pause,
        }
    }
}

/// What one presentation displays
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MirrorState {
    pub title: String,
    pub artist: String,
    pub thumbnail: String,
    pub icon: TransportIcon,
    pub shuffle_active: bool,
    pub repeat_active: bool,
    /// Progress bar fill, `0.0..=100.0`
    pub progress_percent: f64,
    pub elapsed: String,
    pub total: String,
    pub lyrics: LyricsView,
}

impl MirrorState {
    fn apply_modes(&mut self, modes: Modes) {
        self.shuffle_active = modes.shuffle;
        self.repeat_active = modes.repeat;
    }

    fn apply_progress(&mut self, position: Duration, duration: Option<Duration>) {
        self.progress_percent = progress_percent(position, duration);
        self.elapsed = format_time(position);
        self.total = format_time(duration.unwrap_or_default());
    }
}

/// Compact and expanded presentations kept in lockstep
///
/// Both mirror every event; only the expanded one carries the lyric panel.
#[derive(Debug, Clone)]
pub struct PlayerMirrors {
    compact: MirrorState,
    expanded: MirrorState,
    expanded_open: bool,
    fallback_artwork: String,
}

impl PlayerMirrors {
    /// Create mirrors showing the fallback artwork until something loads
    pub fn new(fallback_artwork: impl Into<String>) -> Self {
        let fallback_artwork = fallback_artwork.into();
        let blank = MirrorState {
            thumbnail: fallback_artwork.clone(),
            elapsed: format_time(Duration::ZERO),
            total: format_time(Duration::ZERO),
            ..MirrorState::default()
        };
        Self {
            compact: blank.clone(),
            expanded: blank,
            expanded_open: false,
            fallback_artwork,
        }
    }

    pub fn compact(&self) -> &MirrorState {
        &self.compact
    }

    pub fn expanded(&self) -> &MirrorState {
        &self.expanded
    }

    /// Whether the expanded presentation is showing
    pub fn is_expanded_open(&self) -> bool {
        self.expanded_open
    }

    pub fn open_expanded(&mut self) {
        self.expanded_open = true;
    }

    pub fn close_expanded(&mut self) {
        self.expanded_open = false;
    }

    fn each(&mut self, mut f: impl FnMut(&mut MirrorState)) {
        f(&mut self.compact);
        f(&mut self.expanded);
    }
}

impl PlayerListener for PlayerMirrors {
    fn on_event(&mut self, event: &PlaybackEvent) {
        match event {
            PlaybackEvent::TrackLoaded { track, .. } => {
                let thumbnail = track
                    .thumbnail
                    .clone()
                    .unwrap_or_else(|| self.fallback_artwork.clone());
                self.each(|m| {
                    m.title.clone_from(&track.title);
                    m.artist.clone_from(&track.artist);
                    m.thumbnail.clone_from(&thumbnail);
                    m.apply_progress(Duration::ZERO, None);
                });
            }
            PlaybackEvent::IntentChanged { intent } => {
                let icon = TransportIcon::from(*intent);
                self.each(|m| m.icon = icon);
            }
            PlaybackEvent::ModesChanged { modes } => {
                let modes = *modes;
                self.each(|m| m.apply_modes(modes));
            }
            PlaybackEvent::Progress { position, duration } => {
                let (position, duration) = (*position, *duration);
                self.each(|m| m.apply_progress(position, duration));
            }
            PlaybackEvent::LyricsChanged(view) => {
                self.expanded.lyrics = view.clone();
            }
            PlaybackEvent::QueueReplaced { .. } | PlaybackEvent::LyricsRequested(_) => {}
        }
    }
}

/// Progress bar fill for a position, `0.0` when the duration is unknown
pub fn progress_percent(position: Duration, duration: Option<Duration>) -> f64 {
    match duration {
        Some(d) if !d.is_zero() => {
            (position.as_secs_f64() / d.as_secs_f64() * 100.0).clamp(0.0, 100.0)
        }
        _ => 0.0,
    }
}

/// Format a duration as `m:ss`
pub fn format_time(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Outcome of releasing the expanded presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Released before dragging began
    None,
    /// Dragged far enough: close the expanded presentation
    Dismiss,
    /// Dragged but not far enough: animate back
    SnapBack,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragPhase {
    Idle,
    Pressed { start_y: f64 },
    Dragging { start_y: f64, offset: f64 },
}

/// Swipe-down-to-dismiss on the expanded presentation
///
/// ```text
/// Idle --press--> Pressed --move > 10px--> Dragging --release > 100px--> Dismiss
///                                                   --release <= 100px-> SnapBack
/// ```
#[derive(Debug, Clone)]
pub struct DragGesture {
    phase: DragPhase,
    start_threshold: f64,
    dismiss_threshold: f64,
}

impl DragGesture {
    /// Downward distance before the sheet follows the pointer
    pub const START_THRESHOLD: f64 = 10.0;

    /// Downward distance that dismisses on release
    pub const DISMISS_THRESHOLD: f64 = 100.0;

    pub fn new() -> Self {
        Self {
            phase: DragPhase::Idle,
            start_threshold: Self::START_THRESHOLD,
            dismiss_threshold: Self::DISMISS_THRESHOLD,
        }
    }

    /// Pointer went down
    pub fn press(&mut self, y: f64) {
        self.phase = DragPhase::Pressed { start_y: y };
    }

    /// Pointer moved
    ///
    /// Returns the offset to translate the sheet by once dragging.
    pub fn move_to(&mut self, y: f64) -> Option<f64> {
        match self.phase {
            DragPhase::Idle => None,
            DragPhase::Pressed { start_y } | DragPhase::Dragging { start_y, .. } => {
                let delta = y - start_y;
                let dragging = matches!(self.phase, DragPhase::Dragging { .. });
                if dragging || delta > self.start_threshold {
                    let offset = delta.max(0.0);
                    self.phase = DragPhase::Dragging { start_y, offset };
                    Some(offset)
                } else {
                    None
                }
            }
        }
    }

    /// Pointer released
    pub fn release(&mut self) -> GestureOutcome {
        let outcome = match self.phase {
            DragPhase::Dragging { offset, .. } if offset > self.dismiss_threshold => {
                GestureOutcome::Dismiss
            }
            DragPhase::Dragging { .. } => GestureOutcome::SnapBack,
            DragPhase::Idle | DragPhase::Pressed { .. } => GestureOutcome::None,
        };
        self.phase = DragPhase::Idle;
        outcome
    }

    /// Whether the sheet currently follows the pointer
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }
}

impl Default for DragGesture {
    fn default() -> Self {
        Self::new()
    }
}
