use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

use super::parse::{LyricLine, parse_lrc};

/// Fixed advancement delay while playing.
pub const TICK: Duration = Duration::from_millis(2000);

/// Pure stepper over a line sequence. The last line is terminal: `advance`
/// stops returning true there and never wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LyricCursor {
    current: usize,
    len: usize,
}

impl LyricCursor {
    pub fn new(len: usize) -> Self {
        Self { current: 0, len }
    }

    /// Cursor positioned mid-sequence, clamped to the last line.
    pub fn resume(current: usize, len: usize) -> Self {
        Self {
            current: current.min(len.saturating_sub(1)),
            len,
        }
    }

    pub fn current_line(&self) -> usize {
        self.current
    }

    pub fn at_end(&self) -> bool {
        self.len == 0 || self.current + 1 >= self.len
    }

    pub fn advance(&mut self) -> bool {
        if self.at_end() {
            return false;
        }
        self.current += 1;
        true
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }
}

/// Timer-driven highlight for one track's lyrics. Owns the parsed lines and
/// the current-line index; the index is advanced by a spawned interval task
/// while the track is playing. The task self-cancels at the last line;
/// `cancel` must be called on pause, track change and view unmount so no tick
/// outlives its context.
pub struct LyricsSync {
    track_id: String,
    lines: Vec<LyricLine>,
    current_line: Arc<AtomicUsize>,
    handle: Option<JoinHandle<()>>,
}

impl LyricsSync {
    pub fn new(track_id: impl Into<String>, blob: &str) -> Self {
        Self {
            track_id: track_id.into(),
            lines: parse_lrc(blob),
            current_line: Arc::new(AtomicUsize::new(0)),
            handle: None,
        }
    }

    pub fn matches_track(&self, track_id: &str) -> bool {
        self.track_id == track_id
    }

    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }

    pub fn current_line(&self) -> usize {
        self.current_line.load(Ordering::Relaxed)
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    fn cursor(&self) -> LyricCursor {
        LyricCursor::resume(self.current_line(), self.lines.len())
    }

    pub fn at_end(&self) -> bool {
        self.cursor().at_end()
    }

    /// Starts the fixed-delay advancement task, resuming from the current
    /// line. An empty or already-finished sequence spawns nothing.
    /// Restarting while a task is already running supersedes it.
    pub fn start(&mut self) {
        self.cancel();
        let mut cursor = self.cursor();
        if cursor.at_end() {
            return;
        }

        let current = self.current_line.clone();
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK);
            // The first tick of an interval fires immediately; swallow it so
            // every advancement waits a full delay.
            interval.tick().await;
            loop {
                interval.tick().await;
                cursor.advance();
                current.store(cursor.current_line(), Ordering::Relaxed);
                if cursor.at_end() {
                    break;
                }
            }
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn reset(&mut self) {
        self.cancel();
        self.current_line.store(0, Ordering::Relaxed);
    }
}

impl Drop for LyricsSync {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_advances_to_a_terminal_last_line() {
        let mut cursor = LyricCursor::new(5);
        for expected in 1..=4 {
            assert!(cursor.advance());
            assert_eq!(cursor.current_line(), expected);
        }
        // Further ticks are idempotent.
        assert!(!cursor.advance());
        assert!(!cursor.advance());
        assert_eq!(cursor.current_line(), 4);
    }

    #[test]
    fn cursor_over_empty_sequence_never_moves() {
        let mut cursor = LyricCursor::new(0);
        assert!(!cursor.advance());
        assert_eq!(cursor.current_line(), 0);
    }

    #[test]
    fn cursor_resume_clamps_to_the_last_line() {
        let cursor = LyricCursor::resume(9, 3);
        assert_eq!(cursor.current_line(), 2);
        assert!(cursor.at_end());

        let cursor = LyricCursor::resume(1, 3);
        assert_eq!(cursor.current_line(), 1);
        assert!(!cursor.at_end());
    }

    #[test]
    fn cursor_reset_returns_to_first_line() {
        let mut cursor = LyricCursor::new(3);
        cursor.advance();
        cursor.advance();
        cursor.reset();
        assert_eq!(cursor.current_line(), 0);
    }

    const FIVE_LINES: &str =
        "[00:01]one\n[00:02]two\n[00:03]three\n[00:04]four\n[00:05]five";

    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn timer_reaches_last_line_then_stops() {
        let mut sync = LyricsSync::new("t1", FIVE_LINES);
        sync.start();
        settle().await;

        for expected in 1..=4usize {
            tokio::time::advance(TICK).await;
            settle().await;
            assert_eq!(sync.current_line(), expected);
        }

        // Past the last line the task is done; extra ticks change nothing.
        tokio::time::advance(TICK).await;
        tokio::time::advance(TICK).await;
        settle().await;
        assert_eq!(sync.current_line(), 4);
        assert!(!sync.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_blob_starts_nothing() {
        let mut sync = LyricsSync::new("t1", "not a lyric blob");
        sync.start();
        assert!(!sync.is_running());
        assert_eq!(sync.current_line(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_advancement_immediately() {
        let mut sync = LyricsSync::new("t1", FIVE_LINES);
        sync.start();
        settle().await;

        tokio::time::advance(TICK).await;
        settle().await;
        assert_eq!(sync.current_line(), 1);

        sync.cancel();
        settle().await;
        tokio::time::advance(TICK).await;
        settle().await;
        assert_eq!(sync.current_line(), 1);
        assert!(!sync.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn restart_resumes_from_the_current_line() {
        let mut sync = LyricsSync::new("t1", FIVE_LINES);
        sync.start();
        settle().await;
        tokio::time::advance(TICK).await;
        settle().await;
        tokio::time::advance(TICK).await;
        settle().await;
        assert_eq!(sync.current_line(), 2);

        sync.cancel();
        sync.start();
        settle().await;
        tokio::time::advance(TICK).await;
        settle().await;
        assert_eq!(sync.current_line(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn start_at_the_last_line_spawns_nothing() {
        let mut sync = LyricsSync::new("t1", FIVE_LINES);
        sync.start();
        settle().await;
        for _ in 0..4 {
            tokio::time::advance(TICK).await;
            settle().await;
        }
        assert!(sync.at_end());

        sync.start();
        assert!(!sync.is_running());
        assert_eq!(sync.current_line(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_returns_to_line_zero_for_a_new_track() {
        let mut sync = LyricsSync::new("t1", FIVE_LINES);
        sync.start();
        settle().await;
        tokio::time::advance(TICK).await;
        settle().await;

        sync.reset();
        assert_eq!(sync.current_line(), 0);
        assert!(!sync.is_running());
    }
}
