use rand::{rng, seq::SliceRandom};
use std::sync::{Arc, Mutex};

use crate::api::model::Track;

/// Which logical listing produced the current queue. Two listings can show
/// the same track, so "is this row the active one" checks compare the
/// provenance tag and id alongside the track id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceTag {
    #[default]
    None,
    Artist,
    Album,
    Playlist,
    NewReleases,
    Liked,
    Search,
    History,
}

impl SourceTag {
    pub fn as_str(&self) -> &str {
        match self {
            SourceTag::None => "none",
            SourceTag::Artist => "artist",
            SourceTag::Album => "album",
            SourceTag::Playlist => "playlist",
            SourceTag::NewReleases => "new-releases",
            SourceTag::Liked => "liked",
            SourceTag::Search => "search",
            SourceTag::History => "history",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceContext {
    pub tag: SourceTag,
    pub id: Option<String>,
}

/// Queue, cursor and play flag. `current_index`, when set, always points
/// inside `queue`.
#[derive(Debug, Clone, Default)]
pub struct PlaybackState {
    pub queue: Vec<Track>,
    pub current_index: Option<usize>,
    pub is_playing: bool,
    pub context: SourceContext,
    original_queue: Option<Vec<Track>>,
    is_shuffled: bool,
}

/// Shared playback context. Clones share state; views read snapshots, UI
/// triggers call the mutators. Nothing here touches the network or survives
/// the process.
#[derive(Clone, Default)]
pub struct Player {
    state: Arc<Mutex<PlaybackState>>,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wholesale queue replacement. The play flag and provenance context are
    /// untouched; the cursor follows the current track's id if it is still
    /// present, otherwise it clears.
    pub fn set_songs(&self, tracks: Vec<Track>) {
        let mut state = self.state.lock().unwrap();
        let current_id = state
            .current_index
            .and_then(|i| state.queue.get(i))
            .map(|t| t.id.clone());
        state.queue = tracks;
        state.original_queue = None;
        state.is_shuffled = false;
        state.current_index =
            current_id.and_then(|id| state.queue.iter().position(|t| t.id == id));
    }

    /// Starts the given track. Matched by id within the queue; a track the
    /// queue does not contain becomes a single-entry queue at index 0.
    pub fn play_song(&self, track: Track) {
        let mut state = self.state.lock().unwrap();
        match state.queue.iter().position(|t| t.id == track.id) {
            Some(index) => state.current_index = Some(index),
            None => {
                state.queue = vec![track];
                state.original_queue = None;
                state.is_shuffled = false;
                state.current_index = Some(0);
            }
        }
        state.is_playing = true;
    }

    pub fn set_context(&self, tag: SourceTag) {
        self.state.lock().unwrap().context.tag = tag;
    }

    pub fn set_context_id(&self, id: Option<String>) {
        self.state.lock().unwrap().context.id = id;
    }

    pub fn toggle_play(&self) {
        let mut state = self.state.lock().unwrap();
        state.is_playing = !state.is_playing;
    }

    pub fn pause(&self) {
        self.state.lock().unwrap().is_playing = false;
    }

    pub fn next(&self) -> Option<Track> {
        let mut state = self.state.lock().unwrap();
        let index = state.current_index?;
        if index + 1 < state.queue.len() {
            state.current_index = Some(index + 1);
            state.queue.get(index + 1).cloned()
        } else {
            None
        }
    }

    pub fn previous(&self) -> Option<Track> {
        let mut state = self.state.lock().unwrap();
        let index = state.current_index?;
        if index > 0 {
            state.current_index = Some(index - 1);
            state.queue.get(index - 1).cloned()
        } else {
            None
        }
    }

    /// Shuffles the remainder of the queue while keeping the current track at
    /// its slot; un-shuffling restores the original order and re-locates the
    /// current track by id.
    pub fn toggle_shuffle(&self) {
        let mut state = self.state.lock().unwrap();
        if !state.is_shuffled {
            state.original_queue = Some(state.queue.clone());
            match state.current_index {
                Some(index) if index < state.queue.len() => {
                    let current = state.queue.remove(index);
                    state.queue.shuffle(&mut rng());
                    state.queue.insert(index, current);
                }
                _ => state.queue.shuffle(&mut rng()),
            }
            state.is_shuffled = true;
        } else if let Some(original) = state.original_queue.take() {
            let current_id = state
                .current_index
                .and_then(|i| state.queue.get(i))
                .map(|t| t.id.clone());
            state.queue = original;
            state.current_index =
                current_id.and_then(|id| state.queue.iter().position(|t| t.id == id));
            state.is_shuffled = false;
        }
    }

    pub fn current_track(&self) -> Option<Track> {
        let state = self.state.lock().unwrap();
        state.current_index.and_then(|i| state.queue.get(i)).cloned()
    }

    pub fn is_playing(&self) -> bool {
        self.state.lock().unwrap().is_playing
    }

    pub fn is_shuffled(&self) -> bool {
        self.state.lock().unwrap().is_shuffled
    }

    pub fn context(&self) -> SourceContext {
        self.state.lock().unwrap().context.clone()
    }

    /// The "is my row the one playing" check: track id, provenance tag and
    /// context id must all match the live state.
    pub fn is_active(&self, track_id: &str, tag: SourceTag, context_id: Option<&str>) -> bool {
        let state = self.state.lock().unwrap();
        let current = state.current_index.and_then(|i| state.queue.get(i));
        current.is_some_and(|t| t.id == track_id)
            && state.context.tag == tag
            && state.context.id.as_deref() == context_id
    }

    pub fn snapshot(&self) -> PlaybackState {
        self.state.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str) -> Track {
        Track {
            id: id.into(),
            title: format!("Track {id}"),
            artist: "Artist".into(),
            artist_id: None,
            album_id: None,
            cover_art: None,
            duration: Some(180),
            lyrics: None,
        }
    }

    fn queue(ids: &[&str]) -> Vec<Track> {
        ids.iter().map(|id| track(id)).collect()
    }

    #[test]
    fn play_song_in_queue_sets_current_and_playing() {
        let player = Player::new();
        player.set_songs(queue(&["a", "b", "c"]));

        player.play_song(track("b"));

        assert_eq!(player.current_track().unwrap().id, "b");
        assert!(player.is_playing());
    }

    #[test]
    fn play_song_absent_from_queue_becomes_single_entry_queue() {
        let player = Player::new();
        player.set_songs(queue(&["a", "b"]));

        player.play_song(track("z"));

        let state = player.snapshot();
        assert_eq!(state.queue.len(), 1);
        assert_eq!(state.current_index, Some(0));
        assert_eq!(player.current_track().unwrap().id, "z");
    }

    #[test]
    fn set_songs_does_not_alter_play_state() {
        let player = Player::new();
        player.set_songs(queue(&["a"]));
        player.play_song(track("a"));

        player.set_songs(queue(&["b", "c"]));

        assert!(player.is_playing());
        assert!(player.current_track().is_none());
    }

    #[test]
    fn set_songs_follows_current_track_by_id() {
        let player = Player::new();
        player.set_songs(queue(&["a", "b", "c"]));
        player.play_song(track("b"));

        player.set_songs(queue(&["b", "x"]));

        assert_eq!(player.current_track().unwrap().id, "b");
        assert_eq!(player.snapshot().current_index, Some(0));
    }

    #[test]
    fn toggle_play_leaves_queue_and_cursor_alone() {
        let player = Player::new();
        player.set_songs(queue(&["a", "b"]));
        player.play_song(track("a"));

        player.toggle_play();
        assert!(!player.is_playing());
        player.toggle_play();
        assert!(player.is_playing());

        let state = player.snapshot();
        assert_eq!(state.queue.len(), 2);
        assert_eq!(state.current_index, Some(0));
    }

    #[test]
    fn active_check_compares_context_not_just_track_id() {
        let player = Player::new();
        player.set_songs(queue(&["a", "b"]));
        player.set_context(SourceTag::Artist);
        player.set_context_id(Some("artist-9".into()));
        player.play_song(track("a"));

        assert!(player.is_active("a", SourceTag::Artist, Some("artist-9")));
        // Same track id listed under a different provenance is not active.
        assert!(!player.is_active("a", SourceTag::NewReleases, None));
        assert!(!player.is_active("a", SourceTag::Artist, Some("artist-7")));
        assert!(!player.is_active("b", SourceTag::Artist, Some("artist-9")));
    }

    #[test]
    fn next_and_previous_stay_in_bounds() {
        let player = Player::new();
        player.set_songs(queue(&["a", "b"]));
        player.play_song(track("a"));

        assert_eq!(player.next().unwrap().id, "b");
        assert!(player.next().is_none());
        assert_eq!(player.previous().unwrap().id, "a");
        assert!(player.previous().is_none());
    }

    #[test]
    fn shuffle_round_trip_keeps_current_track() {
        let player = Player::new();
        player.set_songs(queue(&["a", "b", "c", "d", "e"]));
        player.play_song(track("c"));

        player.toggle_shuffle();
        assert_eq!(player.current_track().unwrap().id, "c");

        player.toggle_shuffle();
        let state = player.snapshot();
        assert_eq!(
            state.queue.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            vec!["a", "b", "c", "d", "e"]
        );
        assert_eq!(player.current_track().unwrap().id, "c");
    }
}
