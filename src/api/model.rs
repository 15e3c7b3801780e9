use serde::{Deserialize, Serialize};

/// A playable song as the backend returns it. Immutable once fetched;
/// the player references tracks by value but never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub artist_id: Option<String>,
    #[serde(default)]
    pub album_id: Option<String>,
    #[serde(default)]
    pub cover_art: Option<String>,
    /// Seconds.
    #[serde(default)]
    pub duration: Option<u64>,
    /// Raw timestamped lyric blob, when the catalog has one.
    #[serde(default)]
    pub lyrics: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub artist_id: Option<String>,
    #[serde(default)]
    pub cover_art: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub time_ago: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    pub song_id: String,
    pub song_info: Track,
    pub timestamp: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub songs: Vec<Track>,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub albums: Vec<Album>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatus {
    pub is_liked: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LikedSongsResponse {
    pub liked: Vec<Track>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FollowingResponse {
    pub following: Vec<Artist>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_decodes_camel_case_wire_names() {
        let json = r#"{
            "id": "s1",
            "title": "Holding Pattern",
            "artist": "Night Office",
            "artistId": "a9",
            "albumId": "al3",
            "coverArt": "/img/al3.png",
            "duration": 214
        }"#;
        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.id, "s1");
        assert_eq!(track.artist_id.as_deref(), Some("a9"));
        assert_eq!(track.duration, Some(214));
    }

    #[test]
    fn track_tolerates_missing_optional_fields() {
        let json = r#"{"id": "s2", "title": "Untitled", "artist": "?"}"#;
        let track: Track = serde_json::from_str(json).unwrap();
        assert!(track.album_id.is_none());
        assert!(track.cover_art.is_none());
    }

    #[test]
    fn like_status_uses_is_liked_key() {
        let status: LikeStatus = serde_json::from_str(r#"{"isLiked": true}"#).unwrap();
        assert!(status.is_liked);
    }

    #[test]
    fn history_envelope_decodes() {
        let json = r#"{
            "history": [
                {
                    "song_id": "s1",
                    "song_info": {"id": "s1", "title": "A", "artist": "B"},
                    "timestamp": "2026-08-01T10:00:00Z"
                }
            ]
        }"#;
        let resp: HistoryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.history.len(), 1);
        assert_eq!(resp.history[0].song_info.id, "s1");
    }

    #[test]
    fn search_results_default_to_empty_sections() {
        let results: SearchResults = serde_json::from_str(r#"{"songs": []}"#).unwrap();
        assert!(results.artists.is_empty());
        assert!(results.albums.is_empty());
    }
}
