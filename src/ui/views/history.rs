use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{List, ListItem, ListState, Paragraph},
};
use tokio::task::JoinHandle;

use crate::{
    api::model::HistoryEntry,
    event::events::Event,
    player::SourceTag,
    ui::{
        components::spinner::Spinner,
        context::AppContext,
        state::AppState,
        traits::{Action, View},
        util::get_active_track_icon,
    },
    util::colors,
};

#[derive(Default)]
pub struct History {
    list_state: ListState,
    entries: Vec<HistoryEntry>,
    loading: bool,
    fetch_handle: Option<JoinHandle<()>>,
}

impl Drop for History {
    fn drop(&mut self) {
        if let Some(handle) = self.fetch_handle.take() {
            handle.abort();
        }
    }
}

#[async_trait]
impl View for History {
    async fn on_mount(&mut self, ctx: &AppContext) {
        let Some(user_id) = ctx.session.user_id() else {
            return;
        };

        self.loading = true;
        let api = ctx.api.clone();
        let tx = ctx.event_tx.clone();

        self.fetch_handle = Some(tokio::spawn(async move {
            match api.fetch_history(&user_id).await {
                Ok(entries) => {
                    let _ = tx.send(Event::HistoryFetched(entries));
                }
                Err(e) => {
                    tracing::warn!("history fetch failed: {e}");
                    let _ = tx.send(Event::FetchError(e.to_string()));
                }
            }
        }));
    }

    async fn on_event(&mut self, event: &Event, _ctx: &AppContext) {
        match event {
            Event::HistoryFetched(entries) => {
                self.entries = entries.clone();
                self.loading = false;
            }
            Event::FetchError(_) => {
                self.loading = false;
            }
            _ => {}
        }
    }

    fn render(&mut self, f: &mut Frame, area: Rect, _state: &AppState, ctx: &AppContext) {
        if !ctx.session.is_authenticated() {
            let hint = Paragraph::new("Sign in to see your listening history")
                .style(Style::default().fg(colors::NEUTRAL))
                .centered();
            f.render_widget(hint, area);
            return;
        }

        if self.loading {
            let spinner = Spinner::default()
                .with_style(Style::default().fg(colors::PRIMARY))
                .with_label("Loading history...".to_string());
            f.render_widget(spinner, area);
            return;
        }

        if self.entries.is_empty() {
            let hint = Paragraph::new("Nothing played yet")
                .style(Style::default().fg(colors::NEUTRAL))
                .centered();
            f.render_widget(hint, area);
            return;
        }

        let is_playing = ctx.player.is_playing();
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| {
                let track = &entry.song_info;
                let is_current = ctx.player.is_active(&track.id, SourceTag::History, None);
                let prefix = if is_current {
                    format!("{} ", get_active_track_icon(is_playing))
                } else {
                    "  ".to_string()
                };
                let mut item = ListItem::new(format!(
                    "{}{} - {}  ({})",
                    prefix, track.title, track.artist, entry.timestamp
                ));
                if is_current {
                    item = item.style(
                        Style::default()
                            .fg(colors::SECONDARY)
                            .add_modifier(Modifier::BOLD),
                    );
                }
                item
            })
            .collect();

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        if self.list_state.selected().is_none() {
            self.list_state.select(Some(0));
        }
        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        let len = self.entries.len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                if len > 0 {
                    let i = self.list_state.selected().unwrap_or(0);
                    if i < len - 1 {
                        self.list_state.select(Some(i + 1));
                    }
                }
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if len > 0 {
                    let i = self.list_state.selected().unwrap_or(0);
                    if i > 0 {
                        self.list_state.select(Some(i - 1));
                    }
                }
                None
            }
            KeyCode::Enter => {
                if let Some(i) = self.list_state.selected()
                    && !self.entries.is_empty()
                {
                    let tracks = self.entries.iter().map(|e| e.song_info.clone()).collect();
                    let _ = ctx
                        .event_tx
                        .send(Event::PlayQueue(tracks, SourceTag::History, None, i));
                }
                None
            }
            _ => None,
        }
    }
}
