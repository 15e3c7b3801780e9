use crate::api::model::{Artist, HistoryEntry, SearchResults, Track};
use crate::player::SourceTag;

#[derive(Debug, Clone)]
#[allow(clippy::large_enum_variant)]
pub enum Event {
    // Events
    Initialize,
    SessionEstablished,
    LikedSongsFetched(Vec<Track>),
    FollowingFetched(Vec<Artist>),
    HistoryFetched(Vec<HistoryEntry>),
    SearchResults(SearchResults),
    LikeStatus(String, bool),
    FetchError(String),

    // Commands
    Search(String),
    PlayQueue(Vec<Track>, SourceTag, Option<String>, usize),
    ToggleLike(String, bool),
}
