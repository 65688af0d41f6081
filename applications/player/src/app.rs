//! Console player
//!
//! Owns the transport controller, the playlist book and the presentation
//! mirrors, and turns console commands into controller calls. Everything
//! runs on one thread; lyric requests leave through a channel and come back
//! through [`PlayerApp::apply_lyrics`].

use crate::config::PlayerConfig;
use crate::console::{Command, HELP};
use crate::error::{PlayerError, Result};
use crate::simulator::SimulatedResource;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use tempo_core::{
    Catalog, KeyValueStore, LastPlayedSnapshot, LyricsDocument, LyricsRequest, Provenance, Track,
    LYRICS_UNAVAILABLE,
};
use tempo_playback::{
    ControlIntent, DragGesture, GestureOutcome, LyricsView, MediaMetadata, MediaSession,
    MediaSessionBridge, MirrorState, PlaybackError, PlaybackEvent, PlaybackIntent, PlayerListener,
    PlayerMirrors, TransportController, TransportIcon,
};
use tempo_storage::{PlaylistBook, SessionStore};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

/// What the console loop should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print these lines and keep reading
    Continue(Vec<String>),
    Quit,
}

/// Media session that reports to the log
#[derive(Debug, Default)]
pub struct LoggingMediaSession {
    metadata: Option<MediaMetadata>,
    status: PlaybackIntent,
}

impl LoggingMediaSession {
    pub fn metadata(&self) -> Option<&MediaMetadata> {
        self.metadata.as_ref()
    }

    pub fn status(&self) -> PlaybackIntent {
        self.status
    }
}

impl MediaSession for LoggingMediaSession {
    fn set_metadata(&mut self, metadata: &MediaMetadata) {
        info!(
            title = %metadata.title,
            artist = %metadata.artist,
            album = %metadata.album,
            "Media session metadata"
        );
        self.metadata = Some(metadata.clone());
    }

    fn set_playback_status(&mut self, intent: PlaybackIntent) {
        debug!(?intent, "Media session status");
        self.status = intent;
    }
}

/// Hands lyric requests to the async side of the host
struct LyricsForwarder {
    requests: UnboundedSender<LyricsRequest>,
}

impl PlayerListener for LyricsForwarder {
    fn on_event(&mut self, event: &PlaybackEvent) {
        if let PlaybackEvent::LyricsRequested(request) = event {
            if self.requests.send(request.clone()).is_err() {
                debug!(token = request.token, "Lyrics receiver gone, request dropped");
            }
        }
    }
}

/// The console player
pub struct PlayerApp<S: KeyValueStore + 'static> {
    controller: TransportController<SimulatedResource>,
    store: Rc<RefCell<S>>,
    playlists: PlaylistBook<Rc<RefCell<S>>>,
    mirrors: Rc<RefCell<PlayerMirrors>>,
    media: Rc<RefCell<MediaSessionBridge<LoggingMediaSession>>>,
    gesture: DragGesture,
}

impl<S: KeyValueStore + 'static> PlayerApp<S> {
    /// Wire the controller to the store, the mirrors and the media session
    pub fn new(
        catalog: Arc<Catalog>,
        store: Rc<RefCell<S>>,
        config: &PlayerConfig,
        lyric_requests: UnboundedSender<LyricsRequest>,
    ) -> Self {
        let playback = config.playback_config();
        let mirrors = Rc::new(RefCell::new(PlayerMirrors::new(
            playback.fallback_artwork.clone(),
        )));
        let media = Rc::new(RefCell::new(MediaSessionBridge::new(
            LoggingMediaSession::default(),
            playback.media_album.clone(),
            playback.fallback_artwork.clone(),
        )));

        let resource = SimulatedResource::new(config.track_length());
        let mut controller = TransportController::new(resource, catalog, playback)
            .with_session_recorder(Box::new(SessionStore::new(Rc::clone(&store))));
        controller.add_listener(Box::new(Rc::clone(&mirrors)));
        controller.add_listener(Box::new(Rc::clone(&media)));
        controller.add_listener(Box::new(LyricsForwarder {
            requests: lyric_requests,
        }));

        Self {
            controller,
            playlists: PlaylistBook::new(Rc::clone(&store)),
            store,
            mirrors,
            media,
            gesture: DragGesture::new(),
        }
    }

    /// Queue the album shelf without playing it
    ///
    /// Returns `false` when the catalog has no albums.
    pub fn cue_album_shelf(&mut self) -> Result<bool> {
        let tracks = self.controller.catalog().album_queue();
        if tracks.is_empty() {
            return Ok(false);
        }
        self.controller
            .cue_collection(tracks, 0, Provenance::AlbumShelf)?;
        Ok(true)
    }

    /// Read the stored last-played snapshot
    ///
    /// Informational only: nothing is restored from it.
    pub fn last_played(&self) -> Result<Option<LastPlayedSnapshot>> {
        Ok(SessionStore::new(Rc::clone(&self.store)).read()?)
    }

    /// Run one console command
    ///
    /// Command failures are reported as output lines; only quitting ends the
    /// loop.
    pub fn execute(&mut self, command: Command) -> Outcome {
        if command == Command::Quit {
            return Outcome::Quit;
        }

        let lines = match self.run(command) {
            Ok(lines) => lines,
            Err(e) => {
                debug!(error = %e, "Command failed");
                vec![describe_error(&e)]
            }
        };
        self.controller.pump_resource_events();
        Outcome::Continue(lines)
    }

    /// Advance the simulated clock and process what the resource reports
    pub fn tick(&mut self, elapsed: std::time::Duration) {
        self.controller.resource_mut().tick(elapsed);
        self.controller.pump_resource_events();
    }

    /// Deliver a lyric fetch outcome
    ///
    /// Returns `false` when a newer load superseded the request.
    pub fn apply_lyrics(
        &mut self,
        token: u64,
        outcome: tempo_lyrics::Result<LyricsDocument>,
    ) -> bool {
        let outcome = outcome.map_err(|e| {
            debug!(token, error = %e, "Lyrics fetch failed");
            PlaybackError::MetadataUnavailable(e.placeholder().to_string())
        });
        self.controller.apply_lyrics(token, outcome)
    }

    /// Answer a lyric request when no provider is configured
    pub fn lyrics_unavailable(&mut self, token: u64) -> bool {
        self.controller.apply_lyrics(
            token,
            Err(PlaybackError::MetadataUnavailable(
                LYRICS_UNAVAILABLE.to_string(),
            )),
        )
    }

    /// Lines describing what the player shows right now
    pub fn status(&self) -> Vec<String> {
        let mirrors = self.mirrors.borrow();
        let mut lines = render_mirror(mirrors.compact());

        let queue = self.controller.queue();
        if let Some(cursor) = queue.cursor() {
            lines.push(format!(
                "track {}/{} from {}",
                cursor + 1,
                queue.len(),
                queue.provenance()
            ));
        }

        if mirrors.is_expanded_open() {
            lines.extend(render_lyrics(&mirrors.expanded().lyrics));
        }
        lines
    }

    pub fn controller(&self) -> &TransportController<SimulatedResource> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut TransportController<SimulatedResource> {
        &mut self.controller
    }

    pub fn playlists(&self) -> &PlaylistBook<Rc<RefCell<S>>> {
        &self.playlists
    }

    pub fn mirrors(&self) -> std::cell::Ref<'_, PlayerMirrors> {
        self.mirrors.borrow()
    }

    /// Last metadata pushed to the media session
    pub fn media_metadata(&self) -> Option<MediaMetadata> {
        self.media.borrow().session().metadata().cloned()
    }

    // ===== Commands =====

    fn run(&mut self, command: Command) -> Result<Vec<String>> {
        match command {
            Command::Artist { artist, track } => {
                let artist_index = artist
                    .checked_sub(1)
                    .ok_or_else(|| PlayerError::Catalog("Artist positions start at 1".into()))?;
                let tracks = self
                    .controller
                    .catalog()
                    .artist_queue(artist_index)
                    .ok_or_else(|| PlayerError::Catalog(format!("No artist #{artist}")))?;
                self.controller.play_collection(
                    tracks,
                    track.saturating_sub(1),
                    Provenance::ArtistCatalog { artist_index },
                )?;
                Ok(self.settled_status())
            }
            Command::Albums => {
                let tracks = self.controller.catalog().album_queue();
                self.controller
                    .play_collection(tracks, 0, Provenance::AlbumShelf)?;
                Ok(self.settled_status())
            }
            Command::Playlist(name) => {
                let tracks: Vec<Track> = self
                    .playlists
                    .get(&name)?
                    .into_iter()
                    .map(Track::from)
                    .collect();
                self.controller
                    .play_collection(tracks, 0, Provenance::Playlist { name })?;
                Ok(self.settled_status())
            }
            Command::Single(title) => {
                let track = self.find_track(&title)?;
                self.controller
                    .play_collection(vec![track], 0, Provenance::Single)?;
                Ok(self.settled_status())
            }
            Command::Play => self.transport(ControlIntent::Play),
            Command::Pause => self.transport(ControlIntent::Pause),
            Command::Toggle => self.transport(ControlIntent::TogglePlayPause),
            Command::Next => self.transport(ControlIntent::Next),
            Command::Previous => self.transport(ControlIntent::Previous),
            Command::Shuffle => self.transport(ControlIntent::ToggleShuffle),
            Command::Repeat => self.transport(ControlIntent::ToggleRepeat),
            Command::Seek(percent) => self.transport(ControlIntent::Scrub(percent)),
            Command::Tick(elapsed) => {
                self.tick(elapsed);
                Ok(self.settled_status())
            }
            Command::End => {
                self.controller.resource_mut().finish();
                Ok(self.settled_status())
            }
            Command::Like => {
                self.controller.like_current(&mut self.playlists)?;
                Ok(vec!["Added to Liked".to_string()])
            }
            Command::Add(name) => {
                self.controller
                    .add_current_to_playlist(&mut self.playlists, &name)?;
                Ok(vec![format!("Added to {name}")])
            }
            Command::Playlists => Ok(self
                .playlists
                .all()?
                .iter()
                .map(|(name, entries)| format!("{name} ({})", entries.len()))
                .collect()),
            Command::Open => {
                self.mirrors.borrow_mut().open_expanded();
                Ok(self.settled_status())
            }
            Command::Swipe(distance) => Ok(vec![self.swipe(distance)]),
            Command::Status => Ok(self.settled_status()),
            Command::Help => Ok(HELP.lines().map(str::to_string).collect()),
            Command::Quit => Ok(Vec::new()),
        }
    }

    fn transport(&mut self, intent: ControlIntent) -> Result<Vec<String>> {
        self.controller.dispatch(intent)?;
        Ok(self.settled_status())
    }

    fn settled_status(&mut self) -> Vec<String> {
        self.controller.pump_resource_events();
        self.status()
    }

    fn find_track(&self, title: &str) -> Result<Track> {
        let catalog = self.controller.catalog();
        catalog
            .locate(title)
            .and_then(|(artist, track)| catalog.artist_queue(artist)?.into_iter().nth(track))
            .ok_or_else(|| PlayerError::Catalog(format!("No track titled \"{title}\"")))
    }

    fn swipe(&mut self, distance: f64) -> String {
        if !self.mirrors.borrow().is_expanded_open() {
            return "Expanded player is not open".to_string();
        }

        self.gesture.press(0.0);
        self.gesture.move_to(distance);
        match self.gesture.release() {
            GestureOutcome::Dismiss => {
                self.mirrors.borrow_mut().close_expanded();
                "Expanded player closed".to_string()
            }
            GestureOutcome::SnapBack => "Expanded player snapped back".to_string(),
            GestureOutcome::None => "Expanded player unchanged".to_string(),
        }
    }
}

fn describe_error(error: &PlayerError) -> String {
    match error {
        PlayerError::Playback(PlaybackError::NoCurrentTrack) => "Nothing is loaded".to_string(),
        PlayerError::Playback(PlaybackError::EmptyQueue) => {
            "That collection is empty; queue unchanged".to_string()
        }
        PlayerError::Playback(PlaybackError::DuplicateEntry(_)) => {
            "Already in Liked".to_string()
        }
        PlayerError::Playback(PlaybackError::PersistenceUnavailable(reason)) => {
            warn!(reason = %reason, "Playlist write failed");
            format!("Could not save: {reason}")
        }
        other => other.to_string(),
    }
}

fn render_mirror(state: &MirrorState) -> Vec<String> {
    if state.title.is_empty() {
        return vec!["Nothing loaded".to_string()];
    }

    let status = match state.icon {
        TransportIcon::Play => "paused",
        TransportIcon::Pause => "playing",
    };
    let flag = |on: bool| if on { "on" } else { "off" };

    vec![
        format!("[{status}] {} - {}", state.title, state.artist),
        format!(
            "{} / {} ({:.0}%)  shuffle: {}  repeat: {}",
            state.elapsed,
            state.total,
            state.progress_percent,
            flag(state.shuffle_active),
            flag(state.repeat_active)
        ),
    ]
}

fn render_lyrics(view: &LyricsView) -> Vec<String> {
    match view {
        LyricsView::Empty => Vec::new(),
        LyricsView::Loading => vec!["Loading lyrics...".to_string()],
        LyricsView::Placeholder(text) => vec![text.clone()],
        LyricsView::Document(LyricsDocument::Lines(lines)) => lines.clone(),
        LyricsView::Document(LyricsDocument::Sections(sections)) => sections
            .iter()
            .flat_map(|section| {
                section
                    .kind
                    .iter()
                    .map(|kind| format!("[{kind}]"))
                    .chain(section.lines.iter().cloned())
            })
            .collect(),
    }
}
