//! Transport controller - core orchestration
//!
//! Coordinates queue, advance policy, the audio resource and every listener.
//! This is the only place that mutates playback state.

use crate::{
    advance::{self, Advance, AdvanceContext, Retreat},
    error::{PlaybackError, Result},
    events::{LyricsView, PlaybackEvent, PlayerListener},
    lyrics::LyricsTracker,
    queue::Queue,
    resource::{AudioResource, ResourceEvent},
    surface::ControlIntent,
    types::{Modes, PlaybackConfig, PlaybackIntent},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tempo_core::{
    Catalog, LastPlayedSnapshot, LyricsDocument, PlaylistCollection, PlaylistEntry, Provenance,
    SessionRecorder, Track, LYRICS_UNAVAILABLE,
};
use tracing::{debug, info, warn};

/// Mutable playback state owned by the controller
#[derive(Debug, Clone, Default)]
pub struct PlayerSession {
    /// Current queue
    pub queue: Queue,

    /// Shuffle / repeat flags
    pub modes: Modes,

    /// Confirmed play/pause state
    pub intent: PlaybackIntent,
}

/// Transport controller
///
/// Owns the one audio resource and the session. Hosts feed it user intents
/// and resource notifications; it answers with [`PlaybackEvent`]s.
pub struct TransportController<R: AudioResource> {
    config: PlaybackConfig,
    session: PlayerSession,
    resource: R,

    /// Last source successfully handed to the resource
    assigned_source: Option<String>,

    catalog: Arc<Catalog>,
    listeners: Vec<Box<dyn PlayerListener>>,
    recorder: Option<Box<dyn SessionRecorder>>,
    rng: StdRng,
    lyrics: LyricsTracker,
}

impl<R: AudioResource> TransportController<R> {
    /// Create a controller driving `resource`
    pub fn new(resource: R, catalog: Arc<Catalog>, config: PlaybackConfig) -> Self {
        let rng = config
            .shuffle_seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

        Self {
            config,
            session: PlayerSession::default(),
            resource,
            assigned_source: None,
            catalog,
            listeners: Vec::new(),
            recorder: None,
            rng,
            lyrics: LyricsTracker::new(),
        }
    }

    /// Record the last loaded track through `recorder`
    #[must_use]
    pub fn with_session_recorder(mut self, recorder: Box<dyn SessionRecorder>) -> Self {
        self.recorder = Some(recorder);
        self
    }

    /// Register a listener
    pub fn add_listener(&mut self, listener: Box<dyn PlayerListener>) {
        self.listeners.push(listener);
    }

    // ===== Queue =====

    /// Replace the queue without loading anything
    pub fn set_queue(
        &mut self,
        tracks: Vec<Track>,
        start_index: usize,
        provenance: Provenance,
    ) -> Result<()> {
        self.session
            .queue
            .set_queue(tracks, start_index, provenance)?;

        let provenance = self.session.queue.provenance().clone();
        let length = self.session.queue.len();
        info!(provenance = %provenance, length, "Queue replaced");
        self.emit(&PlaybackEvent::QueueReplaced { provenance, length });
        Ok(())
    }

    /// Replace the queue and load the start track, without playing it
    ///
    /// Nothing changes when the start track has no playable source.
    pub fn cue_collection(
        &mut self,
        tracks: Vec<Track>,
        start_index: usize,
        provenance: Provenance,
    ) -> Result<()> {
        ensure_start_playable(&tracks, start_index)?;
        self.set_queue(tracks, start_index, provenance)?;
        self.load_current()
    }

    /// Replace the queue and start playing at `start_index` (clamped)
    pub fn play_collection(
        &mut self,
        tracks: Vec<Track>,
        start_index: usize,
        provenance: Provenance,
    ) -> Result<()> {
        ensure_start_playable(&tracks, start_index)?;
        self.set_queue(tracks, start_index, provenance)?;
        let start = self.session.queue.cursor().unwrap_or(0);
        self.play_from_queue(start)
    }

    /// Move the cursor to `index`, load it and request playback
    ///
    /// The cursor stays put when the target has no playable source.
    pub fn play_from_queue(&mut self, index: usize) -> Result<()> {
        let target = self
            .session
            .queue
            .get(index)
            .ok_or(PlaybackError::IndexOutOfBounds(index))?;
        playable_source(target)?;
        self.session.queue.set_cursor(index)?;
        self.load_current()?;
        self.request_play();
        Ok(())
    }

    /// Load the track under the cursor into the resource
    ///
    /// The source is only reassigned when it differs from the last one; an
    /// ended resource with the same source is rewound instead. Listeners,
    /// the session record and the lyric token are refreshed every time.
    pub fn load_current(&mut self) -> Result<()> {
        let track = self.session.queue.current_track()?.clone();
        let index = self.session.queue.cursor().unwrap_or(0);

        let source = playable_source(&track)?.to_string();

        if self.assigned_source.as_deref() == Some(source.as_str()) {
            if self.resource.has_ended() {
                debug!(source = %source, "Same source after end, rewinding");
                self.resource.restart();
            }
        } else {
            self.resource.set_source(&source);
            self.assigned_source = Some(source);
        }

        info!(title = %track.title, artist = %track.artist, index, "Track loaded");

        self.record_last_played(&track);
        self.emit(&PlaybackEvent::TrackLoaded {
            track: track.clone(),
            index,
        });

        let request = self.lyrics.issue(&track);
        self.emit(&PlaybackEvent::LyricsChanged(LyricsView::Loading));
        self.emit(&PlaybackEvent::LyricsRequested(request));

        Ok(())
    }

    // ===== Playback Control =====

    /// Request playback
    ///
    /// Loads the current track first when nothing was assigned yet. The
    /// intent only changes once the resource confirms.
    pub fn play(&mut self) {
        if self.assigned_source.is_none() {
            if let Err(e) = self.load_current() {
                debug!(error = %e, "Nothing to play");
                return;
            }
        }
        self.request_play();
    }

    /// Request pause
    pub fn pause(&mut self) {
        self.resource.pause();
    }

    /// Play when paused, pause otherwise
    pub fn toggle_play_pause(&mut self) {
        if self.resource.is_paused() {
            self.play();
        } else {
            self.pause();
        }
    }

    /// Skip forward according to the advance policy
    pub fn next(&mut self) -> Result<()> {
        self.advance_forward()
    }

    /// Restart the track or step back one
    ///
    /// Restarts when more than the configured threshold has elapsed,
    /// otherwise plays the previous queue entry. No-op on the first entry.
    pub fn previous(&mut self) -> Result<()> {
        let decision = advance::backward(
            self.session.queue.cursor(),
            self.resource.position(),
            self.config.restart_threshold,
        );

        match decision {
            Retreat::Restart => {
                debug!("Restarting current track");
                self.resource.restart();
                Ok(())
            }
            Retreat::PlayIndex(index) => self.play_from_queue(index),
            Retreat::Nothing => Ok(()),
        }
    }

    // ===== Seek =====

    /// Seek to a fraction of the track, clamped to `[0, 1]`
    ///
    /// No-op while the duration is unknown or zero.
    pub fn seek(&mut self, fraction: f64) {
        if !fraction.is_finite() {
            return;
        }

        match self.resource.duration() {
            Some(duration) if !duration.is_zero() => {
                let target = duration.mul_f64(fraction.clamp(0.0, 1.0));
                self.resource.seek(target);
            }
            _ => debug!("Seek ignored, duration unknown"),
        }
    }

    /// Seek to a percentage of the track (`0.0..=100.0`)
    pub fn scrub(&mut self, percent: f64) {
        self.seek(percent / 100.0);
    }

    // ===== Resource Notifications =====

    /// React to one resource notification
    pub fn handle_resource_event(&mut self, event: ResourceEvent) -> Result<()> {
        match event {
            ResourceEvent::Playing => self.set_intent(PlaybackIntent::Playing),
            ResourceEvent::Paused => self.set_intent(PlaybackIntent::Paused),
            ResourceEvent::Ended => return self.on_resource_ended(),
            ResourceEvent::TimeUpdate => {
                let position = self.resource.position();
                let duration = self.resource.duration();
                self.emit(&PlaybackEvent::Progress { position, duration });
            }
        }
        Ok(())
    }

    /// Drain and handle every pending resource notification
    ///
    /// Returns the number of notifications handled.
    pub fn pump_resource_events(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.resource.next_event() {
            if let Err(e) = self.handle_resource_event(event) {
                debug!(error = %e, ?event, "Resource notification ignored");
            }
            handled += 1;
        }
        handled
    }

    /// Track ended: the single automatic advancement site
    pub fn on_resource_ended(&mut self) -> Result<()> {
        debug!("Track ended");
        self.advance_forward()
    }

    // ===== Shuffle & Repeat =====

    /// Flip shuffle
    pub fn toggle_shuffle(&mut self) {
        self.session.modes.shuffle = !self.session.modes.shuffle;
        debug!(shuffle = self.session.modes.shuffle, "Shuffle toggled");
        self.emit_modes();
    }

    /// Flip repeat
    pub fn toggle_repeat(&mut self) {
        self.session.modes.repeat = !self.session.modes.repeat;
        debug!(repeat = self.session.modes.repeat, "Repeat toggled");
        self.emit_modes();
    }

    // ===== Collections =====

    /// Add the current track to Liked
    ///
    /// Fails with [`PlaybackError::DuplicateEntry`] when already liked.
    pub fn like_current(&self, collection: &mut dyn PlaylistCollection) -> Result<()> {
        let entry = self.current_entry()?;
        let title = entry.title.clone();
        collection.like(entry)?;
        info!(title = %title, "Track liked");
        Ok(())
    }

    /// Add the current track to a named playlist, creating it if missing
    pub fn add_current_to_playlist(
        &self,
        collection: &mut dyn PlaylistCollection,
        name: &str,
    ) -> Result<()> {
        let entry = self.current_entry()?;
        let title = entry.title.clone();
        collection.add_to_playlist(name, entry)?;
        info!(title = %title, playlist = %name, "Track added to playlist");
        Ok(())
    }

    // ===== Intents =====

    /// Apply a user or system control intent
    pub fn dispatch(&mut self, intent: ControlIntent) -> Result<()> {
        match intent {
            ControlIntent::Play => self.play(),
            ControlIntent::Pause => self.pause(),
            ControlIntent::TogglePlayPause => self.toggle_play_pause(),
            ControlIntent::Next => return self.next(),
            ControlIntent::Previous => return self.previous(),
            ControlIntent::ToggleShuffle => self.toggle_shuffle(),
            ControlIntent::ToggleRepeat => self.toggle_repeat(),
            ControlIntent::Scrub(percent) => self.scrub(percent),
        }
        Ok(())
    }

    // ===== Lyrics =====

    /// Apply a lyric fetch outcome
    ///
    /// Stale tokens are dropped. Failures and empty documents become a
    /// placeholder. Returns whether the outcome was applied.
    pub fn apply_lyrics(&mut self, token: u64, outcome: Result<LyricsDocument>) -> bool {
        if !self.lyrics.is_current(token) {
            debug!(token, latest = self.lyrics.latest(), "Dropping stale lyrics");
            return false;
        }

        let view = match outcome {
            Ok(document) if document.is_empty() => {
                LyricsView::Placeholder(LYRICS_UNAVAILABLE.to_string())
            }
            Ok(document) => LyricsView::Document(document),
            Err(e) => {
                debug!(error = %e, "Lyrics unavailable");
                LyricsView::Placeholder(match e {
                    PlaybackError::MetadataUnavailable(reason) => reason,
                    other => other.to_string(),
                })
            }
        };

        self.emit(&PlaybackEvent::LyricsChanged(view));
        true
    }

    // ===== State Queries =====

    pub fn session(&self) -> &PlayerSession {
        &self.session
    }

    pub fn queue(&self) -> &Queue {
        &self.session.queue
    }

    pub fn modes(&self) -> Modes {
        self.session.modes
    }

    pub fn intent(&self) -> PlaybackIntent {
        self.session.intent
    }

    /// Track under the cursor
    pub fn current_track(&self) -> Option<&Track> {
        self.session.queue.current_track().ok()
    }

    pub fn position(&self) -> Duration {
        self.resource.position()
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    pub fn resource_mut(&mut self) -> &mut R {
        &mut self.resource
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Latest issued lyric request token
    pub fn lyrics_token(&self) -> u64 {
        self.lyrics.latest()
    }

    // ===== Internals =====

    fn advance_forward(&mut self) -> Result<()> {
        let decision = advance::forward(
            &AdvanceContext {
                cursor: self.session.queue.cursor(),
                len: self.session.queue.len(),
                modes: self.session.modes,
                provenance: self.session.queue.provenance(),
                catalog: &self.catalog,
            },
            &mut self.rng,
        );
        debug!(?decision, "Advance");

        match decision {
            Advance::PlayIndex(index) => self.play_from_queue(index),
            Advance::SwitchArtist { artist_index } => {
                let tracks = self
                    .catalog
                    .artist_queue(artist_index)
                    .ok_or(PlaybackError::IndexOutOfBounds(artist_index))?;
                info!(artist_index, "Continuing with next artist");
                self.play_collection(tracks, 0, Provenance::ArtistCatalog { artist_index })
            }
            Advance::Stop => {
                info!("End of queue");
                self.resource.pause();
                self.set_intent(PlaybackIntent::Paused);
                Ok(())
            }
        }
    }

    fn request_play(&mut self) {
        if let Err(e) = self.resource.play() {
            warn!(error = %e, "Playback start rejected");
        }
    }

    fn set_intent(&mut self, intent: PlaybackIntent) {
        if self.session.intent == intent {
            return;
        }
        self.session.intent = intent;
        self.emit(&PlaybackEvent::IntentChanged { intent });
    }

    fn emit_modes(&mut self) {
        let modes = self.session.modes;
        self.emit(&PlaybackEvent::ModesChanged { modes });
    }

    fn record_last_played(&mut self, track: &Track) {
        let Some(recorder) = self.recorder.as_mut() else {
            return;
        };

        let snapshot = LastPlayedSnapshot::from(track);
        if let Err(e) = recorder.record_last_played(&snapshot) {
            let e = PlaybackError::from(e);
            warn!(error = %e, "Could not record last played track");
        }
    }

    fn current_entry(&self) -> Result<PlaylistEntry> {
        let track = self.session.queue.current_track()?;
        PlaylistEntry::from_track(track).ok_or_else(|| PlaybackError::NoPlayableSource {
            title: track.title.clone(),
        })
    }

    fn emit(&mut self, event: &PlaybackEvent) {
        for listener in &mut self.listeners {
            listener.on_event(event);
        }
    }
}

fn playable_source(track: &Track) -> Result<&str> {
    track
        .resolve_source()
        .ok_or_else(|| PlaybackError::NoPlayableSource {
            title: track.title.clone(),
        })
}

/// Check the track a new queue would start on; an empty list is left to
/// `Queue::set_queue` to reject
fn ensure_start_playable(tracks: &[Track], start_index: usize) -> Result<()> {
    let start = start_index.min(tracks.len().saturating_sub(1));
    match tracks.get(start) {
        Some(track) => playable_source(track).map(|_| ()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::DummyResource;
    use tempo_core::{CatalogArtist, CatalogTrack};

    fn create_test_track(title: &str) -> Track {
        Track::new(title, "Test Artist", format!("https://cdn.test/{}.mp3", title))
    }

    fn controller() -> TransportController<DummyResource> {
        let config = PlaybackConfig {
            shuffle_seed: Some(42),
            ..PlaybackConfig::default()
        };
        TransportController::new(
            DummyResource::new(Duration::from_secs(180)),
            Arc::new(Catalog::default()),
            config,
        )
    }

    fn abc() -> Vec<Track> {
        vec![
            create_test_track("A"),
            create_test_track("B"),
            create_test_track("C"),
        ]
    }

    #[test]
    fn play_collection_plays_start_track() {
        let mut ctrl = controller();
        ctrl.play_collection(abc(), 1, Provenance::AlbumShelf)
            .unwrap();
        ctrl.pump_resource_events();

        assert_eq!(ctrl.queue().cursor(), Some(1));
        assert_eq!(ctrl.intent(), PlaybackIntent::Playing);
        assert_eq!(
            ctrl.resource().source.as_deref(),
            Some("https://cdn.test/B.mp3")
        );
    }

    #[test]
    fn intent_waits_for_confirmation() {
        let mut ctrl = controller();
        ctrl.play_collection(abc(), 0, Provenance::Single).unwrap();
        assert_eq!(ctrl.intent(), PlaybackIntent::Paused);

        ctrl.pump_resource_events();
        assert_eq!(ctrl.intent(), PlaybackIntent::Playing);
    }

    #[test]
    fn rejected_start_keeps_paused() {
        let mut ctrl = controller();
        ctrl.resource_mut().reject_play = true;

        ctrl.play_collection(abc(), 0, Provenance::Single).unwrap();
        ctrl.pump_resource_events();

        assert_eq!(ctrl.intent(), PlaybackIntent::Paused);
        assert_eq!(ctrl.queue().cursor(), Some(0));
    }

    #[test]
    fn same_source_is_not_reassigned() {
        let mut ctrl = controller();
        ctrl.play_collection(abc(), 0, Provenance::Single).unwrap();
        ctrl.resource_mut().position = Duration::from_secs(30);

        ctrl.play_from_queue(0).unwrap();

        assert_eq!(ctrl.resource().assignments, 1);
        assert_eq!(ctrl.position(), Duration::from_secs(30));
    }

    #[test]
    fn same_source_after_end_rewinds() {
        let mut ctrl = controller();
        ctrl.play_collection(vec![create_test_track("Solo")], 0, Provenance::Single)
            .unwrap();
        ctrl.toggle_repeat();
        ctrl.pump_resource_events();

        ctrl.resource_mut().finish();
        ctrl.pump_resource_events();

        assert_eq!(ctrl.resource().assignments, 1);
        assert_eq!(ctrl.position(), Duration::ZERO);
        assert_eq!(ctrl.intent(), PlaybackIntent::Playing);
    }

    #[test]
    fn blank_sources_are_not_loaded() {
        let mut ctrl = controller();
        let result = ctrl.play_collection(
            vec![Track::new("Ghost", "Nobody", " ")],
            0,
            Provenance::Single,
        );

        assert!(matches!(
            result,
            Err(PlaybackError::NoPlayableSource { ref title }) if title == "Ghost"
        ));
        assert!(ctrl.resource().source.is_none());
        assert!(ctrl.queue().is_empty());
        assert!(ctrl.current_track().is_none());
    }

    #[test]
    fn unplayable_next_keeps_cursor_on_loaded_track() {
        let mut ctrl = controller();
        let tracks = vec![
            create_test_track("A"),
            Track::new("Ghost", "Nobody", " "),
            create_test_track("C"),
        ];
        ctrl.play_collection(tracks, 0, Provenance::Single).unwrap();
        ctrl.pump_resource_events();

        let result = ctrl.next();

        assert!(matches!(
            result,
            Err(PlaybackError::NoPlayableSource { ref title }) if title == "Ghost"
        ));
        assert_eq!(ctrl.queue().cursor(), Some(0));
        assert_eq!(ctrl.current_track().unwrap().title, "A");
        assert_eq!(
            ctrl.resource().source.as_deref(),
            ctrl.current_track().and_then(Track::resolve_source)
        );
        assert_eq!(ctrl.intent(), PlaybackIntent::Playing);
    }

    #[test]
    fn unplayable_collection_keeps_previous_queue() {
        let mut ctrl = controller();
        ctrl.play_collection(abc(), 1, Provenance::AlbumShelf)
            .unwrap();

        let result = ctrl.cue_collection(
            vec![create_test_track("X"), Track::new("Ghost", "Nobody", "")],
            5,
            Provenance::Single,
        );

        assert!(matches!(result, Err(PlaybackError::NoPlayableSource { .. })));
        assert_eq!(ctrl.queue().len(), 3);
        assert_eq!(ctrl.queue().provenance(), &Provenance::AlbumShelf);
        assert_eq!(ctrl.current_track().unwrap().title, "B");
    }

    #[test]
    fn seek_without_duration_is_noop() {
        let mut ctrl = controller();
        ctrl.seek(0.5);
        assert_eq!(ctrl.position(), Duration::ZERO);
    }

    #[test]
    fn seek_clamps_fraction() {
        let mut ctrl = controller();
        ctrl.play_collection(abc(), 0, Provenance::Single).unwrap();

        ctrl.seek(0.5);
        assert_eq!(ctrl.position(), Duration::from_secs(90));

        ctrl.seek(4.0);
        assert_eq!(ctrl.position(), Duration::from_secs(180));

        ctrl.scrub(-10.0);
        assert_eq!(ctrl.position(), Duration::ZERO);
    }

    #[test]
    fn toggle_play_pause_follows_resource() {
        let mut ctrl = controller();
        ctrl.play_collection(abc(), 0, Provenance::Single).unwrap();
        ctrl.pump_resource_events();

        ctrl.toggle_play_pause();
        ctrl.pump_resource_events();
        assert_eq!(ctrl.intent(), PlaybackIntent::Paused);

        ctrl.toggle_play_pause();
        ctrl.pump_resource_events();
        assert_eq!(ctrl.intent(), PlaybackIntent::Playing);
    }

    #[test]
    fn play_without_queue_is_quiet() {
        let mut ctrl = controller();
        ctrl.play();
        ctrl.pump_resource_events();
        assert_eq!(ctrl.intent(), PlaybackIntent::Paused);
    }

    #[test]
    fn stale_lyrics_are_dropped() {
        let mut ctrl = controller();
        ctrl.play_collection(abc(), 0, Provenance::Single).unwrap();
        let first = ctrl.lyrics_token();
        ctrl.next().unwrap();

        assert!(!ctrl.apply_lyrics(first, Ok(LyricsDocument::Lines(vec!["old".into()]))));
        assert!(ctrl.apply_lyrics(
            ctrl.lyrics_token(),
            Ok(LyricsDocument::Lines(vec!["new".into()]))
        ));
    }

    #[test]
    fn end_of_artist_switches_to_next_artist() {
        let catalog = Catalog {
            artists: vec![
                CatalogArtist {
                    name: "NAN".to_string(),
                    photo: None,
                    tracks: vec![CatalogTrack::new("Olala", "nan/1.mp3")],
                },
                CatalogArtist {
                    name: "Sara".to_string(),
                    photo: None,
                    tracks: vec![
                        CatalogTrack::new("Tentation", "sara/2.mp3"),
                        CatalogTrack::new("Bondi", "sara/3.mp3"),
                    ],
                },
            ],
            albums: vec![],
        };
        let mut ctrl = TransportController::new(
            DummyResource::new(Duration::from_secs(120)),
            Arc::new(catalog),
            PlaybackConfig::default(),
        );
        let tracks = ctrl.catalog().artist_queue(0).unwrap();
        ctrl.play_collection(tracks, 0, Provenance::ArtistCatalog { artist_index: 0 })
            .unwrap();

        ctrl.on_resource_ended().unwrap();

        assert_eq!(ctrl.queue().provenance().artist_index(), Some(1));
        assert_eq!(ctrl.queue().len(), 2);
        assert_eq!(ctrl.current_track().unwrap().title, "Tentation");
    }
}
