//! Platform-agnostic audio resource trait
//!
//! Abstracts the single playback element the controller drives (a browser
//! audio element, a native player, a simulator).

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Notification produced by the audio resource
///
/// The controller only trusts these for state: a successful `play()` call is
/// a request, `Playing` is the confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceEvent {
    /// Playback actually started
    Playing,

    /// Playback actually paused
    Paused,

    /// Current source played to the end
    Ended,

    /// Position moved
    TimeUpdate,
}

/// The one audio resource
///
/// Implementors queue notifications internally and hand them out through
/// [`AudioResource::next_event`].
pub trait AudioResource {
    /// Assign a new source location
    ///
    /// Resets position to zero and leaves the resource paused.
    fn set_source(&mut self, source: &str);

    /// Request playback start
    ///
    /// # Returns
    /// * `Ok(())` - Request accepted, `Playing` follows
    /// * `Err(PlaybackError::ResourceStartRejected)` - Refused (autoplay policy, no source, ...)
    fn play(&mut self) -> Result<()>;

    /// Request pause
    fn pause(&mut self);

    /// Whether the resource is currently paused
    fn is_paused(&self) -> bool;

    /// Whether the current source played to the end
    fn has_ended(&self) -> bool;

    /// Current playback position
    fn position(&self) -> Duration;

    /// Total duration, when known
    fn duration(&self) -> Option<Duration>;

    /// Move the playback position
    fn seek(&mut self, position: Duration);

    /// Next pending notification
    fn next_event(&mut self) -> Option<ResourceEvent> {
        None
    }

    /// Seek back to the start of the source
    ///
    /// Equivalent to `seek(Duration::ZERO)`
    fn restart(&mut self) {
        self.seek(Duration::ZERO);
    }
}

/// Scripted resource for testing
///
/// Accepts every source, confirms play and pause immediately, and reports a
/// fixed duration.
#[cfg(test)]
pub struct DummyResource {
    pub source: Option<String>,
    pub paused: bool,
    pub ended: bool,
    pub position: Duration,
    pub duration: Duration,
    pub reject_play: bool,
    pub assignments: usize,
    events: std::collections::VecDeque<ResourceEvent>,
}

#[cfg(test)]
impl DummyResource {
    pub fn new(duration: Duration) -> Self {
        Self {
            source: None,
            paused: true,
            ended: false,
            position: Duration::ZERO,
            duration,
            reject_play: false,
            assignments: 0,
            events: std::collections::VecDeque::new(),
        }
    }

    /// Run to the end of the source
    pub fn finish(&mut self) {
        self.position = self.duration;
        self.ended = true;
        self.paused = true;
        self.events.push_back(ResourceEvent::Paused);
        self.events.push_back(ResourceEvent::Ended);
    }
}

#[cfg(test)]
impl AudioResource for DummyResource {
    fn set_source(&mut self, source: &str) {
        self.source = Some(source.to_string());
        self.position = Duration::ZERO;
        self.ended = false;
        self.assignments += 1;
        if !self.paused {
            self.paused = true;
            self.events.push_back(ResourceEvent::Paused);
        }
    }

    fn play(&mut self) -> Result<()> {
        if self.reject_play || self.source.is_none() {
            return Err(crate::error::PlaybackError::ResourceStartRejected(
                "not allowed".to_string(),
            ));
        }
        if self.ended {
            self.position = Duration::ZERO;
            self.ended = false;
        }
        if self.paused {
            self.paused = false;
            self.events.push_back(ResourceEvent::Playing);
        }
        Ok(())
    }

    fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            self.events.push_back(ResourceEvent::Paused);
        }
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn has_ended(&self) -> bool {
        self.ended
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn duration(&self) -> Option<Duration> {
        self.source.as_ref().map(|_| self.duration)
    }

    fn seek(&mut self, position: Duration) {
        self.position = position.min(self.duration);
        self.ended = false;
    }

    fn next_event(&mut self) -> Option<ResourceEvent> {
        self.events.pop_front()
    }
}
