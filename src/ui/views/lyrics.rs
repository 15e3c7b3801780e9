use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{Frame, layout::Rect};

use crate::{
    lyrics::LyricsSync,
    ui::{
        components::lyrics::LyricsWidget,
        context::AppContext,
        state::AppState,
        traits::{Action, View},
    },
};

/// Synced-lyrics view. Owns the advancement timer for the track on screen;
/// dropping the view (or a pause, or a track change) cancels it, so no tick
/// ever outlives the view or fires for a stale track.
#[derive(Default)]
pub struct Lyrics {
    sync: Option<LyricsSync>,
}

impl Lyrics {
    /// Reconciles the timer with the live playback context. Called every
    /// frame; a track change rebuilds the sync (index back to 0), a pause
    /// cancels it, a resume restarts it in place.
    fn reconcile(&mut self, ctx: &AppContext) {
        let Some(track) = ctx.player.current_track() else {
            self.sync = None;
            return;
        };

        let stale = !self
            .sync
            .as_ref()
            .is_some_and(|s| s.matches_track(&track.id));
        if stale {
            let blob = track.lyrics.as_deref().unwrap_or("");
            self.sync = Some(LyricsSync::new(track.id.clone(), blob));
        }

        let sync = self.sync.as_mut().unwrap();
        if ctx.player.is_playing() {
            if !sync.is_running() && !sync.at_end() {
                sync.start();
            }
        } else {
            sync.cancel();
        }
    }
}

#[async_trait]
impl View for Lyrics {
    fn render(&mut self, f: &mut Frame, area: Rect, _state: &AppState, ctx: &AppContext) {
        self.reconcile(ctx);

        let (lines, current) = match &self.sync {
            Some(sync) => (sync.lines(), sync.current_line()),
            None => (&[][..], 0),
        };
        f.render_widget(LyricsWidget::new(lines, current), area);
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        _ctx: &AppContext,
    ) -> Option<Action> {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('L') => Some(Action::CloseLyrics),
            _ => None,
        }
    }
}
