//! Advance policy
//!
//! Pure decisions for "what plays next" and "what plays before". The
//! controller applies the outcome; nothing here touches the resource.

use crate::types::Modes;
use rand::Rng;
use std::time::Duration;
use tempo_core::{Catalog, Provenance};

/// Inputs for a forward decision
#[derive(Debug, Clone, Copy)]
pub struct AdvanceContext<'a> {
    /// Cursor of the current queue
    pub cursor: Option<usize>,

    /// Length of the current queue
    pub len: usize,

    /// Shuffle / repeat flags
    pub modes: Modes,

    /// Context that produced the queue
    pub provenance: &'a Provenance,

    /// Catalog snapshot, for artist continuation
    pub catalog: &'a Catalog,
}

/// Outcome of a forward decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Play the track at this index of the current queue
    PlayIndex(usize),

    /// Replace the queue with another artist's catalog, starting at 0
    SwitchArtist { artist_index: usize },

    /// End of the line: pause and leave the cursor where it is
    Stop,
}

/// Outcome of a backward decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreat {
    /// Seek the current track back to zero, cursor unchanged
    Restart,

    /// Play the track at this index of the current queue
    PlayIndex(usize),

    /// Already at the first track
    Nothing,
}

/// Decide what plays after the current track
///
/// Order of precedence:
/// 1. Shuffle: uniformly random index (may pick the current track again)
/// 2. Next index when not at the end
/// 3. Repeat: wrap to 0
/// 4. Artist catalog: continue with the next artist that has tracks
/// 5. Stop
pub fn forward<R: Rng + ?Sized>(ctx: &AdvanceContext<'_>, rng: &mut R) -> Advance {
    if ctx.len == 0 {
        return Advance::Stop;
    }

    if ctx.modes.shuffle {
        return Advance::PlayIndex(rng.gen_range(0..ctx.len));
    }

    let next = ctx.cursor.map_or(0, |i| i + 1);
    if next < ctx.len {
        return Advance::PlayIndex(next);
    }

    if ctx.modes.repeat {
        return Advance::PlayIndex(0);
    }

    if let Some(artist_index) = ctx.provenance.artist_index() {
        if let Some(next_artist) = ctx.catalog.next_artist_with_tracks(artist_index) {
            return Advance::SwitchArtist {
                artist_index: next_artist,
            };
        }
    }

    Advance::Stop
}

/// Decide what "previous" does
///
/// Past the threshold the current track restarts; otherwise step back one
/// track. Shuffle and repeat play no part.
pub fn backward(cursor: Option<usize>, position: Duration, threshold: Duration) -> Retreat {
    if position > threshold {
        return Retreat::Restart;
    }

    match cursor {
        Some(i) if i > 0 => Retreat::PlayIndex(i - 1),
        _ => Retreat::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempo_core::{CatalogArtist, CatalogTrack};

    fn catalog() -> Catalog {
        let artist = |name: &str, count: usize| CatalogArtist {
            name: name.to_string(),
            photo: None,
            tracks: (0..count)
                .map(|i| CatalogTrack::new(format!("{} {}", name, i), format!("{}/{}.mp3", name, i)))
                .collect(),
        };
        Catalog {
            artists: vec![artist("NAN", 3), artist("Ghost", 0), artist("Sara", 2)],
            albums: vec![],
        }
    }

    fn ctx<'a>(
        cursor: usize,
        len: usize,
        modes: Modes,
        provenance: &'a Provenance,
        catalog: &'a Catalog,
    ) -> AdvanceContext<'a> {
        AdvanceContext {
            cursor: Some(cursor),
            len,
            modes,
            provenance,
            catalog,
        }
    }

    #[test]
    fn forward_steps_to_next_index() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(1);
        let decision = forward(
            &ctx(1, 3, Modes::default(), &Provenance::AlbumShelf, &catalog),
            &mut rng,
        );
        assert_eq!(decision, Advance::PlayIndex(2));
    }

    #[test]
    fn forward_wraps_when_repeat_on() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(1);
        let modes = Modes {
            shuffle: false,
            repeat: true,
        };
        let provenance = Provenance::ArtistCatalog { artist_index: 0 };
        let decision = forward(&ctx(2, 3, modes, &provenance, &catalog), &mut rng);
        assert_eq!(decision, Advance::PlayIndex(0));
    }

    #[test]
    fn forward_continues_into_next_non_empty_artist() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(1);
        let provenance = Provenance::ArtistCatalog { artist_index: 0 };
        let decision = forward(&ctx(2, 3, Modes::default(), &provenance, &catalog), &mut rng);
        assert_eq!(decision, Advance::SwitchArtist { artist_index: 2 });
    }

    #[test]
    fn forward_stops_after_last_artist() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(1);
        let provenance = Provenance::ArtistCatalog { artist_index: 2 };
        let decision = forward(&ctx(1, 2, Modes::default(), &provenance, &catalog), &mut rng);
        assert_eq!(decision, Advance::Stop);
    }

    #[test]
    fn forward_stops_for_playlists_at_end() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(1);
        let provenance = Provenance::Playlist {
            name: "Liked".to_string(),
        };
        let decision = forward(&ctx(2, 3, Modes::default(), &provenance, &catalog), &mut rng);
        assert_eq!(decision, Advance::Stop);
    }

    #[test]
    fn shuffle_takes_precedence_over_repeat() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(7);
        let modes = Modes {
            shuffle: true,
            repeat: true,
        };
        for _ in 0..50 {
            match forward(&ctx(0, 4, modes, &Provenance::Single, &catalog), &mut rng) {
                Advance::PlayIndex(i) => assert!(i < 4),
                other => panic!("unexpected decision {:?}", other),
            }
        }
    }

    #[test]
    fn forward_on_empty_queue_stops() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(1);
        let decision = forward(
            &AdvanceContext {
                cursor: None,
                len: 0,
                modes: Modes::default(),
                provenance: &Provenance::Single,
                catalog: &catalog,
            },
            &mut rng,
        );
        assert_eq!(decision, Advance::Stop);
    }

    #[test]
    fn backward_restarts_past_threshold() {
        let threshold = Duration::from_secs(3);
        assert_eq!(
            backward(Some(2), Duration::from_millis(3001), threshold),
            Retreat::Restart
        );
    }

    #[test]
    fn backward_steps_back_within_threshold() {
        let threshold = Duration::from_secs(3);
        assert_eq!(
            backward(Some(2), Duration::from_secs(3), threshold),
            Retreat::PlayIndex(1)
        );
        assert_eq!(
            backward(Some(0), Duration::from_secs(1), threshold),
            Retreat::Nothing
        );
        assert_eq!(backward(None, Duration::ZERO, threshold), Retreat::Nothing);
    }
}
