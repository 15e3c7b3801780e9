use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::lyrics::LyricLine;
use crate::util::colors;

/// Renders parsed lyric lines centered around the sync timer's current line.
/// The scroll position is derived from the index; the widget holds no state
/// of its own.
pub struct LyricsWidget<'a> {
    lines: &'a [LyricLine],
    current_line: usize,
}

impl<'a> LyricsWidget<'a> {
    pub fn new(lines: &'a [LyricLine], current_line: usize) -> Self {
        Self {
            lines,
            current_line,
        }
    }

    fn draw_centered(inner: Rect, buf: &mut Buffer, y: u16, text: &str, style: Style) {
        if y < inner.y || y >= inner.y + inner.height {
            return;
        }
        let width = UnicodeWidthStr::width(text) as u16;
        let x = inner.x + (inner.width.saturating_sub(width)) / 2;
        buf.set_stringn(x, y, text, inner.width as usize, style);
    }
}

impl<'a> Widget for LyricsWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };

        if self.lines.is_empty() {
            let hint = "No lyrics available";
            let y = inner.y + inner.height / 2;
            Self::draw_centered(inner, buf, y, hint, Style::default().fg(colors::NEUTRAL));
            return;
        }

        let current = self.current_line.min(self.lines.len() - 1);
        let center_row = inner.y + inner.height / 2;
        let visible = (inner.height / 2) as usize;

        for offset in 0..=visible {
            // Line above the current one, if any.
            if offset > 0 {
                if let Some(line) = current
                    .checked_sub(offset)
                    .and_then(|i| self.lines.get(i))
                {
                    let y = center_row.saturating_sub(offset as u16);
                    Self::draw_centered(
                        inner,
                        buf,
                        y,
                        &line.text,
                        Style::default().fg(colors::NEUTRAL),
                    );
                }
            }

            if let Some(line) = self.lines.get(current + offset) {
                let y = center_row + offset as u16;
                let style = if offset == 0 {
                    Style::default()
                        .fg(colors::ACCENT)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors::NEUTRAL)
                };
                Self::draw_centered(inner, buf, y, &line.text, style);
            }
        }
    }
}
