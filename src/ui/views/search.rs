use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs},
};

use crate::{
    api::model::SearchResults,
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchTab {
    Songs,
    Artists,
    Albums,
}

impl SearchTab {
    fn as_str(&self) -> &str {
        match self {
            SearchTab::Songs => "Songs",
            SearchTab::Artists => "Artists",
            SearchTab::Albums => "Albums",
        }
    }

    fn next(&self) -> Self {
        match self {
            SearchTab::Songs => SearchTab::Artists,
            SearchTab::Artists => SearchTab::Albums,
            SearchTab::Albums => SearchTab::Songs,
        }
    }

    fn prev(&self) -> Self {
        match self {
            SearchTab::Songs => SearchTab::Albums,
            SearchTab::Artists => SearchTab::Songs,
            SearchTab::Albums => SearchTab::Artists,
        }
    }
}

pub struct Search {
    input: String,
    is_editing: bool,
    list_state: ListState,
    active_tab: SearchTab,
    results: Option<SearchResults>,
    is_loading: bool,
}

impl Default for Search {
    fn default() -> Self {
        Self {
            input: String::new(),
            is_editing: true,
            list_state: ListState::default(),
            active_tab: SearchTab::Songs,
            results: None,
            is_loading: false,
        }
    }
}

impl Search {
    /// Every edit re-sends the query; the app loop debounces so only the
    /// final query in a burst reaches the network.
    fn query_changed(&mut self, ctx: &AppContext) {
        if self.input.is_empty() {
            self.results = None;
            self.is_loading = false;
            return;
        }
        self.is_loading = true;
        let _ = ctx.event_tx.send(Event::Search(self.input.clone()));
    }

    fn active_len(&self) -> usize {
        let Some(results) = &self.results else {
            return 0;
        };
        match self.active_tab {
            SearchTab::Songs => results.songs.len(),
            SearchTab::Artists => results.artists.len(),
            SearchTab::Albums => results.albums.len(),
        }
    }
}

#[async_trait]
impl View for Search {
    async fn on_event(&mut self, event: &Event, _ctx: &AppContext) {
        match event {
            Event::SearchResults(results) => {
                self.results = Some(results.clone());
                self.is_loading = false;
                self.list_state.select(Some(0));
            }
            Event::FetchError(_) => {
                self.is_loading = false;
            }
            _ => {}
        }
    }

    fn render(&mut self, f: &mut Frame, area: Rect, _state: &AppState, ctx: &AppContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(1),
            ])
            .split(area);

        let input_style = if self.is_editing {
            Style::default().fg(colors::PRIMARY)
        } else {
            Style::default().fg(colors::NEUTRAL)
        };
        let input_block = Block::default()
            .borders(Borders::ALL)
            .title("Search")
            .border_style(input_style);
        f.render_widget(Paragraph::new(self.input.clone()).block(input_block), chunks[0]);

        let tabs = [SearchTab::Songs, SearchTab::Artists, SearchTab::Albums];
        let titles = tabs.iter().map(|t| t.as_str()).collect::<Vec<_>>();
        let tabs_widget = Tabs::new(titles)
            .block(Block::default().borders(Borders::BOTTOM))
            .select(tabs.iter().position(|t| *t == self.active_tab).unwrap_or(0))
            .highlight_style(
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(tabs_widget, chunks[1]);

        let results_area = chunks[2];
        if self.is_loading && self.results.is_none() {
            let spinner = Spinner::default()
                .with_style(Style::default().fg(colors::PRIMARY))
                .with_label("Searching...".to_string());
            f.render_widget(spinner, results_area);
            return;
        }

        let Some(results) = &self.results else {
            return;
        };

        let is_playing = ctx.player.is_playing();
        let mut items = Vec::new();
        match self.active_tab {
            SearchTab::Songs => {
                for track in &results.songs {
                    let is_current = ctx.player.is_active(
                        &track.id,
                        SourceTag::Search,
                        Some(self.input.as_str()),
                    );
                    let prefix = if is_current {
                        format!("{} ", get_active_track_icon(is_playing))
                    } else {
                        "  ".to_string()
                    };
                    let mut item =
                        ListItem::new(format!("{}{} - {}", prefix, track.title, track.artist));
                    if is_current {
                        item = item.style(
                            Style::default()
                                .fg(colors::SECONDARY)
                                .add_modifier(Modifier::BOLD),
                        );
                    }
                    items.push(item);
                }
            }
            SearchTab::Artists => {
                for artist in &results.artists {
                    items.push(ListItem::new(format!("  {}", artist.name)));
                }
            }
            SearchTab::Albums => {
                for album in &results.albums {
                    items.push(ListItem::new(format!("  {}", album.title)));
                }
            }
        }

        if items.is_empty() {
            let hint = Paragraph::new("No results")
                .style(Style::default().fg(colors::NEUTRAL))
                .centered();
            f.render_widget(hint, results_area);
            return;
        }

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
        f.render_stateful_widget(list, results_area, &mut self.list_state);
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        if self.is_editing {
            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => None,
                KeyCode::Char(c) => {
                    self.input.push(c);
                    self.query_changed(ctx);
                    Some(Action::None)
                }
                KeyCode::Backspace => {
                    self.input.pop();
                    self.query_changed(ctx);
                    Some(Action::None)
                }
                KeyCode::Enter | KeyCode::Esc => {
                    self.is_editing = false;
                    Some(Action::None)
                }
                _ => Some(Action::None),
            }
        } else {
            match key.code {
                KeyCode::Char('/') => {
                    self.is_editing = true;
                    Some(Action::None)
                }
                KeyCode::Left | KeyCode::Char('h') => {
                    self.active_tab = self.active_tab.prev();
                    self.list_state.select(Some(0));
                    Some(Action::None)
                }
                KeyCode::Right | KeyCode::Char('l') => {
                    self.active_tab = self.active_tab.next();
                    self.list_state.select(Some(0));
                    Some(Action::None)
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    let len = self.active_len();
                    if len > 0 {
                        let i = self.list_state.selected().unwrap_or(0);
                        if i < len - 1 {
                            self.list_state.select(Some(i + 1));
                        }
                    }
                    Some(Action::None)
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    let i = self.list_state.selected().unwrap_or(0);
                    if i > 0 {
                        self.list_state.select(Some(i - 1));
                    }
                    Some(Action::None)
                }
                KeyCode::Enter => {
                    if self.active_tab == SearchTab::Songs
                        && let Some(results) = &self.results
                        && let Some(i) = self.list_state.selected()
                        && i < results.songs.len()
                    {
                        let _ = ctx.event_tx.send(Event::PlayQueue(
                            results.songs.clone(),
                            SourceTag::Search,
                            Some(self.input.clone()),
                            i,
                        ));
                    }
                    Some(Action::None)
                }
                _ => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{
        api::{ApiService, model::Track},
        auth::SessionHolder,
        notify::NotificationStore,
        player::Player,
    };

    fn context() -> AppContext {
        let (event_tx, _event_rx) = flume::unbounded();
        let session = SessionHolder::new();
        AppContext {
            api: Arc::new(ApiService::new(session.clone())),
            session,
            player: Player::new(),
            notifications: Arc::new(Mutex::new(NotificationStore::new())),
            event_tx,
        }
    }

    fn track(id: &str) -> Track {
        Track {
            id: id.into(),
            title: id.into(),
            artist: "a".into(),
            artist_id: None,
            album_id: None,
            cover_art: None,
            duration: None,
            lyrics: None,
        }
    }

    #[tokio::test]
    async fn selection_stays_within_the_active_tab() {
        let ctx = context();
        let mut view = Search::default();
        view.is_editing = false;

        let results = SearchResults {
            songs: vec![track("s1"), track("s2")],
            ..SearchResults::default()
        };
        view.on_event(&Event::SearchResults(results), &ctx).await;

        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        for _ in 0..4 {
            view.handle_input(down, &AppState::default(), &ctx).await;
        }
        assert_eq!(view.list_state.selected(), Some(1));

        // The artists tab is empty; the cursor has nowhere to go.
        view.active_tab = SearchTab::Artists;
        view.list_state.select(Some(0));
        view.handle_input(down, &AppState::default(), &ctx).await;
        assert_eq!(view.list_state.selected(), Some(0));
    }
}
