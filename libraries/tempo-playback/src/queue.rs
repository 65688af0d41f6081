//! Playback queue
//!
//! Ordered track list with a cursor and the provenance that produced it.
//! Replaced wholesale whenever playback starts from another context.

use crate::error::{PlaybackError, Result};
use tempo_core::{Provenance, Track};

/// Ordered playback queue
///
/// Structure:
/// ```text
/// Provenance: artist #2
/// ─────────────────────
///   0  Track A
/// > 1  Track B   (cursor)
///   2  Track C
/// ```
///
/// Invariant: the cursor is unset or strictly less than the queue length.
#[derive(Debug, Clone)]
pub struct Queue {
    tracks: Vec<Track>,
    cursor: Option<usize>,
    provenance: Provenance,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self {
            tracks: Vec::new(),
            cursor: None,
            provenance: Provenance::Single,
        }
    }

    /// Replace the whole queue
    ///
    /// `start_index` is clamped into range. An empty list is rejected and the
    /// previous queue is kept as is.
    pub fn set_queue(
        &mut self,
        tracks: Vec<Track>,
        start_index: usize,
        provenance: Provenance,
    ) -> Result<()> {
        if tracks.is_empty() {
            return Err(PlaybackError::EmptyQueue);
        }

        let start = start_index.min(tracks.len() - 1);
        self.tracks = tracks;
        self.cursor = Some(start);
        self.provenance = provenance;
        Ok(())
    }

    /// Track under the cursor
    pub fn current_track(&self) -> Result<&Track> {
        self.cursor
            .and_then(|i| self.tracks.get(i))
            .ok_or(PlaybackError::NoCurrentTrack)
    }

    /// Move the cursor
    pub fn set_cursor(&mut self, index: usize) -> Result<()> {
        if index >= self.tracks.len() {
            return Err(PlaybackError::IndexOutOfBounds(index));
        }
        self.cursor = Some(index);
        Ok(())
    }

    /// Current cursor position
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Whether the cursor sits on the final track
    pub fn is_last(&self) -> bool {
        matches!(self.cursor, Some(i) if i + 1 == self.tracks.len())
    }

    /// Whether there is a track before the cursor
    pub fn can_go_back(&self) -> bool {
        matches!(self.cursor, Some(i) if i > 0)
    }

    /// Track at index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// All tracks in queue order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Context that produced the queue
    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_track(title: &str) -> Track {
        Track::new(title, "Test Artist", format!("https://cdn.test/{}.mp3", title))
    }

    fn abc() -> Vec<Track> {
        vec![
            create_test_track("A"),
            create_test_track("B"),
            create_test_track("C"),
        ]
    }

    #[test]
    fn new_queue_is_empty() {
        let queue = Queue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.cursor(), None);
        assert!(matches!(
            queue.current_track(),
            Err(PlaybackError::NoCurrentTrack)
        ));
    }

    #[test]
    fn set_queue_positions_cursor() {
        let mut queue = Queue::new();
        queue.set_queue(abc(), 1, Provenance::AlbumShelf).unwrap();

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.cursor(), Some(1));
        assert_eq!(queue.current_track().unwrap().title, "B");
        assert_eq!(queue.provenance(), &Provenance::AlbumShelf);
    }

    #[test]
    fn set_queue_clamps_start_index() {
        let mut queue = Queue::new();
        queue.set_queue(abc(), 42, Provenance::Single).unwrap();
        assert_eq!(queue.cursor(), Some(2));
        assert!(queue.is_last());
    }

    #[test]
    fn empty_replacement_keeps_previous_queue() {
        let mut queue = Queue::new();
        queue
            .set_queue(abc(), 2, Provenance::ArtistCatalog { artist_index: 4 })
            .unwrap();

        let result = queue.set_queue(vec![], 0, Provenance::Single);

        assert!(matches!(result, Err(PlaybackError::EmptyQueue)));
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.cursor(), Some(2));
        assert_eq!(queue.provenance().artist_index(), Some(4));
    }

    #[test]
    fn set_cursor_is_bounds_checked() {
        let mut queue = Queue::new();
        queue.set_queue(abc(), 0, Provenance::Single).unwrap();

        assert!(queue.set_cursor(2).is_ok());
        assert!(matches!(
            queue.set_cursor(3),
            Err(PlaybackError::IndexOutOfBounds(3))
        ));
        assert_eq!(queue.cursor(), Some(2));
    }

    #[test]
    fn can_go_back_only_after_first() {
        let mut queue = Queue::new();
        assert!(!queue.can_go_back());

        queue.set_queue(abc(), 0, Provenance::Single).unwrap();
        assert!(!queue.can_go_back());

        queue.set_cursor(1).unwrap();
        assert!(queue.can_go_back());
    }
}
