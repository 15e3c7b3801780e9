pub mod handler;

use std::time::{SystemTime, UNIX_EPOCH};

/// Pulsing marker next to the active row; a steady dot when paused.
pub fn get_active_track_icon(is_playing: bool) -> &'static str {
    if !is_playing {
        return "•";
    }

    const FRAME_STEP_MS: u64 = 100;
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64;

    match (now / FRAME_STEP_MS) as usize % 6 {
        0 | 5 => "·",
        1 | 4 => "•",
        _ => "●",
    }
}
