use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::{
    notify::StoreStatus,
    ui::{
        components::spinner::Spinner,
        context::AppContext,
        state::AppState,
        traits::{Action, View},
    },
    util::colors,
};

/// Renders the shared notification store. Mark-read and remove are local
/// mutations applied straight to the store; only the initial fill came from
/// the server.
#[derive(Default)]
pub struct Notifications {
    list_state: ListState,
}

#[async_trait]
impl View for Notifications {
    fn render(&mut self, f: &mut Frame, area: Rect, _state: &AppState, ctx: &AppContext) {
        if !ctx.session.is_authenticated() {
            let hint = Paragraph::new("Sign in to see notifications")
                .style(Style::default().fg(colors::NEUTRAL))
                .centered();
            f.render_widget(hint, area);
            return;
        }

        let store = ctx.notifications.lock().unwrap();
        if store.status() == StoreStatus::Loading {
            let spinner = Spinner::default()
                .with_style(Style::default().fg(colors::PRIMARY))
                .with_label("Loading notifications...".to_string());
            f.render_widget(spinner, area);
            return;
        }

        if store.notifications().is_empty() {
            let hint = Paragraph::new("No notifications")
                .style(Style::default().fg(colors::NEUTRAL))
                .centered();
            f.render_widget(hint, area);
            return;
        }

        let items: Vec<ListItem> = store
            .notifications()
            .iter()
            .map(|n| {
                let marker = if n.read { "  " } else { "● " };
                let mut spans = vec![
                    Span::styled(marker, Style::default().fg(colors::PRIMARY)),
                    Span::raw(n.message.as_str()),
                ];
                if let Some(ago) = &n.time_ago {
                    spans.push(Span::styled(
                        format!("  {ago}"),
                        Style::default().fg(colors::NEUTRAL),
                    ));
                }
                let mut item = ListItem::new(Line::from(spans));
                if !n.read {
                    item = item.style(Style::default().add_modifier(Modifier::BOLD));
                }
                item
            })
            .collect();
        let len = items.len();

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        match self.list_state.selected() {
            None => self.list_state.select(Some(0)),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            _ => {}
        }
        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        let mut store = ctx.notifications.lock().unwrap();
        let len = store.notifications().len();
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
                if let Some(id) = self
                    .list_state
                    .selected()
                    .and_then(|i| store.notifications().get(i))
                    .map(|n| n.id.clone())
                {
                    store.mark_as_read(&id);
                }
                Some(Action::None)
            }
            KeyCode::Char('d') => {
                if let Some(id) = self
                    .list_state
                    .selected()
                    .and_then(|i| store.notifications().get(i))
                    .map(|n| n.id.clone())
                {
                    store.remove_notification(&id);
                }
                Some(Action::None)
            }
            _ => None,
        }
    }
}
