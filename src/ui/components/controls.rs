use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    symbols::{self, border},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::api::model::Track;
use crate::player::SourceContext;
use crate::util::{colors, format::format_duration};

/// Bottom playback bar: current track, play/pause glyph, shuffle flag and
/// the provenance of the queue.
pub struct PlayerBarWidget<'a> {
    track: Option<&'a Track>,
    context: &'a SourceContext,
    is_playing: bool,
    is_shuffled: bool,
}

impl<'a> PlayerBarWidget<'a> {
    pub fn new(
        track: Option<&'a Track>,
        context: &'a SourceContext,
        is_playing: bool,
        is_shuffled: bool,
    ) -> Self {
        Self {
            track,
            context,
            is_playing,
            is_shuffled,
        }
    }
}

impl<'a> Widget for PlayerBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(24)])
            .split(area);

        let state_icon = if self.is_playing { "▶" } else { "⏸" };
        let mut track_line = Line::default();
        track_line.push_span(state_icon.fg(colors::PRIMARY));
        track_line.push_span(" ");
        match self.track {
            Some(track) => {
                track_line.push_span(track.title.as_str().fg(colors::ACCENT).bold());
                track_line.push_span(" - ".fg(colors::NEUTRAL));
                track_line.push_span(track.artist.as_str());
                if let Some(duration) = track.duration {
                    track_line.push_span("  ".fg(colors::NEUTRAL));
                    track_line.push_span(format_duration(duration).fg(colors::NEUTRAL));
                }
            }
            None => track_line.push_span("No track".fg(colors::NEUTRAL)),
        }

        let track_block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED);
        Paragraph::new(track_line).block(track_block).render(layout[0], buf);

        let shuffle_icon = if self.is_shuffled {
            "shuffle".fg(colors::PRIMARY)
        } else {
            "shuffle".fg(colors::NEUTRAL)
        };
        let mut status_line = Line::default();
        status_line.push_span(shuffle_icon);
        status_line.push_span("  ");
        status_line.push_span(self.context.tag.as_str().fg(colors::SECONDARY));

        let status_block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::Set {
                top_left: symbols::line::ROUNDED.horizontal_down,
                bottom_left: symbols::line::ROUNDED.horizontal_up,
                ..symbols::border::ROUNDED
            });
        Paragraph::new(status_line)
            .block(status_block)
            .centered()
            .render(layout[1], buf);
    }
}
