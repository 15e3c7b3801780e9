pub mod parse;
pub mod sync;

pub use parse::{LyricLine, parse_lrc};
pub use sync::{LyricCursor, LyricsSync};
