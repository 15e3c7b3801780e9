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
    api::model::Artist,
    event::events::Event,
    ui::{
        components::spinner::Spinner,
        context::AppContext,
        state::AppState,
        traits::{Action, View},
    },
    util::colors,
};

#[derive(Default)]
pub struct Following {
    list_state: ListState,
    artists: Vec<Artist>,
    loading: bool,
    fetch_handle: Option<JoinHandle<()>>,
}

impl Drop for Following {
    fn drop(&mut self) {
        if let Some(handle) = self.fetch_handle.take() {
            handle.abort();
        }
    }
}

#[async_trait]
impl View for Following {
    async fn on_mount(&mut self, ctx: &AppContext) {
        if !ctx.session.is_authenticated() {
            return;
        }

        self.loading = true;
        let api = ctx.api.clone();
        let tx = ctx.event_tx.clone();

        self.fetch_handle = Some(tokio::spawn(async move {
            match api.fetch_following().await {
                Ok(artists) => {
                    let _ = tx.send(Event::FollowingFetched(artists));
                }
                Err(e) => {
                    tracing::warn!("following fetch failed: {e}");
                    let _ = tx.send(Event::FetchError(e.to_string()));
                }
            }
        }));
    }

    async fn on_event(&mut self, event: &Event, _ctx: &AppContext) {
        match event {
            Event::FollowingFetched(artists) => {
                self.artists = artists.clone();
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
            let hint = Paragraph::new("Sign in to see artists you follow")
                .style(Style::default().fg(colors::NEUTRAL))
                .centered();
            f.render_widget(hint, area);
            return;
        }

        if self.loading {
            let spinner = Spinner::default()
                .with_style(Style::default().fg(colors::PRIMARY))
                .with_label("Loading followed artists...".to_string());
            f.render_widget(spinner, area);
            return;
        }

        if self.artists.is_empty() {
            let hint = Paragraph::new("You are not following anyone")
                .style(Style::default().fg(colors::NEUTRAL))
                .centered();
            f.render_widget(hint, area);
            return;
        }

        let items: Vec<ListItem> = self
            .artists
            .iter()
            .map(|artist| ListItem::new(format!("  {}", artist.name)))
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
        _ctx: &AppContext,
    ) -> Option<Action> {
        let len = self.artists.len();
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
            _ => None,
        }
    }
}
