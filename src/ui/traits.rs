use async_trait::async_trait;
use ratatui::crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::event::events::Event;
use crate::ui::context::AppContext;
use crate::ui::state::AppState;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    PlayPause,
    NextTrack,
    PreviousTrack,
    ToggleShuffle,
    OpenLyrics,
    CloseLyrics,
    None,
}

#[async_trait]
pub trait View: Send {
    /// Called once when the view becomes active. Fetches start here.
    async fn on_mount(&mut self, _ctx: &AppContext) {}

    /// App events fan out to every view on the stack.
    async fn on_event(&mut self, _event: &Event, _ctx: &AppContext) {}

    fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, ctx: &AppContext);

    async fn handle_input(
        &mut self,
        _key: KeyEvent,
        _state: &AppState,
        _ctx: &AppContext,
    ) -> Option<Action> {
        None
    }
}
