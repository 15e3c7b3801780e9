use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};
use tokio::task::JoinHandle;

use crate::{
    api::model::Track,
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

pub struct LikedSongs {
    list_state: ListState,
    tracks: Vec<Track>,
    loading: bool,
    fetch_handle: Option<JoinHandle<()>>,
}

impl Default for LikedSongs {
    fn default() -> Self {
        Self {
            list_state: ListState::default(),
            tracks: vec![],
            loading: false,
            fetch_handle: None,
        }
    }
}

impl Drop for LikedSongs {
    fn drop(&mut self) {
        if let Some(handle) = self.fetch_handle.take() {
            handle.abort();
        }
    }
}

#[async_trait]
impl View for LikedSongs {
    async fn on_mount(&mut self, ctx: &AppContext) {
        // Unauthenticated: empty state, no request.
        if !ctx.session.is_authenticated() {
            return;
        }

        self.loading = true;
        let api = ctx.api.clone();
        let tx = ctx.event_tx.clone();

        let handle = tokio::spawn(async move {
            match api.fetch_liked_songs().await {
                Ok(tracks) => {
                    let _ = tx.send(Event::LikedSongsFetched(tracks));
                }
                Err(e) => {
                    tracing::warn!("liked songs fetch failed: {e}");
                    let _ = tx.send(Event::FetchError(e.to_string()));
                }
            }
        });
        self.fetch_handle = Some(handle);
    }

    async fn on_event(&mut self, event: &Event, _ctx: &AppContext) {
        match event {
            Event::LikedSongsFetched(tracks) => {
                self.tracks = tracks.clone();
                self.loading = false;
            }
            Event::LikeStatus(id, false) => {
                self.tracks.retain(|t| &t.id != id);
            }
            Event::FetchError(_) => {
                self.loading = false;
            }
            _ => {}
        }
    }

    fn render(&mut self, f: &mut Frame, area: Rect, _state: &AppState, ctx: &AppContext) {
        if !ctx.session.is_authenticated() {
            let hint = Paragraph::new("Sign in to see your liked songs")
                .style(Style::default().fg(colors::NEUTRAL))
                .centered();
            f.render_widget(hint, area);
            return;
        }

        if self.loading {
            let spinner = Spinner::default()
                .with_style(Style::default().fg(colors::PRIMARY))
                .with_label("Loading liked songs...".to_string());
            f.render_widget(spinner, area);
            return;
        }

        if self.tracks.is_empty() {
            let hint = Paragraph::new("No liked songs yet")
                .style(Style::default().fg(colors::NEUTRAL))
                .centered();
            f.render_widget(hint, area);
            return;
        }

        let is_playing = ctx.player.is_playing();
        let items: Vec<ListItem> = self
            .tracks
            .iter()
            .map(|track| {
                let is_current = ctx.player.is_active(&track.id, SourceTag::Liked, None);
                let prefix = if is_current {
                    format!("{} ", get_active_track_icon(is_playing))
                } else {
                    "  ".to_string()
                };

                let spans = vec![
                    Span::raw(prefix),
                    Span::raw(track.title.as_str()),
                    Span::raw(" - "),
                    Span::raw(track.artist.as_str()),
                ];

                let mut item = ListItem::new(Line::from(spans));
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
        let len = self.tracks.len();
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
                    && !self.tracks.is_empty()
                {
                    let _ = ctx.event_tx.send(Event::PlayQueue(
                        self.tracks.clone(),
                        SourceTag::Liked,
                        None,
                        i,
                    ));
                }
                None
            }
            KeyCode::Char('f') => {
                if let Some(track) = self.list_state.selected().and_then(|i| self.tracks.get(i)) {
                    // Everything here is already liked; 'f' unlikes.
                    let _ = ctx
                        .event_tx
                        .send(Event::ToggleLike(track.id.clone(), true));
                }
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{
        api::ApiService,
        auth::{Session, SessionHolder},
        notify::NotificationStore,
        player::Player,
    };

    fn context(session: SessionHolder) -> AppContext {
        let (event_tx, _event_rx) = flume::unbounded();
        AppContext {
            api: Arc::new(ApiService::new(session.clone())),
            session,
            player: Player::new(),
            notifications: Arc::new(Mutex::new(NotificationStore::new())),
            event_tx,
        }
    }

    #[tokio::test]
    async fn mount_without_a_session_fetches_nothing() {
        let ctx = context(SessionHolder::new());
        let mut view = LikedSongs::default();

        view.on_mount(&ctx).await;

        assert!(view.fetch_handle.is_none());
        assert!(!view.loading);
        assert!(view.tracks.is_empty());
    }

    #[tokio::test]
    async fn mount_with_a_session_spawns_the_fetch() {
        let holder = SessionHolder::new();
        holder.sign_in(Session {
            user_id: "u1".into(),
            role: "listener".into(),
            token: "tok".into(),
        });
        let ctx = context(holder);
        let mut view = LikedSongs::default();

        view.on_mount(&ctx).await;

        assert!(view.fetch_handle.is_some());
        assert!(view.loading);
    }
}
