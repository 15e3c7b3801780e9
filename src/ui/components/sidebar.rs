use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{List, ListItem, Widget},
};

use crate::util::colors;

pub struct Sidebar<'a> {
    items: Vec<&'a str>,
    selected_index: usize,
    unread_badge: usize,
}

impl<'a> Sidebar<'a> {
    pub fn new(items: Vec<&'a str>, selected_index: usize) -> Self {
        Self {
            items,
            selected_index,
            unread_badge: 0,
        }
    }

    /// Unread-notification count rendered next to the last entry.
    pub fn with_unread_badge(mut self, count: usize) -> Self {
        self.unread_badge = count;
        self
    }
}

impl<'a> Widget for Sidebar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let last = self.items.len().saturating_sub(1);
        let items: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let label = if i == last && self.unread_badge > 0 {
                    format!("  {} ({})", item, self.unread_badge)
                } else {
                    format!("  {item}")
                };
                let style = if i == self.selected_index {
                    Style::default()
                        .fg(colors::PRIMARY)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors::NEUTRAL)
                };
                ListItem::new(label).style(style)
            })
            .collect();

        List::new(items).render(area, buf);
    }
}
