//! Simulated audio resource
//!
//! Stands in for a real output device: time only moves when the host calls
//! [`SimulatedResource::tick`], and every source has the same length.

use std::collections::VecDeque;
use std::time::Duration;
use tempo_playback::{AudioResource, PlaybackError, ResourceEvent, Result};
use tracing::{debug, trace};

/// Clock-driven stand-in for an audio element
#[derive(Debug)]
pub struct SimulatedResource {
    source: Option<String>,
    paused: bool,
    ended: bool,
    position: Duration,
    track_length: Duration,
    refuse_next_play: bool,
    events: VecDeque<ResourceEvent>,
}

impl SimulatedResource {
    /// Create an idle resource; every assigned source lasts `track_length`
    pub fn new(track_length: Duration) -> Self {
        Self {
            source: None,
            paused: true,
            ended: false,
            position: Duration::ZERO,
            track_length,
            refuse_next_play: false,
            events: VecDeque::new(),
        }
    }

    /// Currently assigned source
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Refuse the next `play()` request, like an autoplay policy would
    pub fn refuse_next_play(&mut self) {
        self.refuse_next_play = true;
    }

    /// Advance the clock while playing
    pub fn tick(&mut self, elapsed: Duration) {
        if self.paused || self.source.is_none() {
            return;
        }

        self.position = self.position.saturating_add(elapsed);
        if self.position >= self.track_length {
            self.run_out();
        } else {
            self.events.push_back(ResourceEvent::TimeUpdate);
        }
    }

    /// Jump straight to the end of the current source
    pub fn finish(&mut self) {
        if self.source.is_some() && !self.ended {
            self.run_out();
        }
    }

    fn run_out(&mut self) {
        self.position = self.track_length;
        self.ended = true;
        self.events.push_back(ResourceEvent::TimeUpdate);
        if !self.paused {
            self.paused = true;
            self.events.push_back(ResourceEvent::Paused);
        }
        self.events.push_back(ResourceEvent::Ended);
        debug!(source = ?self.source, "Simulated source ended");
    }
}

impl AudioResource for SimulatedResource {
    fn set_source(&mut self, source: &str) {
        trace!(source, "Assigning simulated source");
        self.source = Some(source.to_string());
        self.position = Duration::ZERO;
        self.ended = false;
        if !self.paused {
            self.paused = true;
            self.events.push_back(ResourceEvent::Paused);
        }
    }

    fn play(&mut self) -> Result<()> {
        if self.source.is_none() {
            return Err(PlaybackError::ResourceStartRejected(
                "no source assigned".to_string(),
            ));
        }
        if std::mem::take(&mut self.refuse_next_play) {
            return Err(PlaybackError::ResourceStartRejected(
                "playback not allowed".to_string(),
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
        self.source.as_ref().map(|_| self.track_length)
    }

    fn seek(&mut self, position: Duration) {
        self.position = position.min(self.track_length);
        if self.position < self.track_length {
            self.ended = false;
        }
        self.events.push_back(ResourceEvent::TimeUpdate);
    }

    fn next_event(&mut self) -> Option<ResourceEvent> {
        self.events.pop_front()
    }
}
