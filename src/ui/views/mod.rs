pub mod following;
pub mod history;
pub mod liked_songs;
pub mod lyrics;
pub mod notifications;
pub mod search;

pub use following::Following;
pub use history::History;
pub use liked_songs::LikedSongs;
pub use lyrics::Lyrics;
pub use notifications::Notifications;
pub use search::Search;
