use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    symbols::border,
    widgets::{Block, Borders},
};

use crate::{
    ui::{
        app::App,
        components::{controls::PlayerBarWidget, sidebar::Sidebar},
        state::Route,
    },
    util::colors,
};

pub struct AppLayout<'a> {
    pub app: &'a mut App,
}

impl<'a> AppLayout<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    pub fn render(self, f: &mut Frame, area: Rect) {
        let buf = f.buffer_mut();
        buf.set_style(area, Style::new().bg(colors::BACKGROUND));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(area);

        let main_area = chunks[0];
        let player_area = chunks[1];

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(22), Constraint::Min(1)])
            .split(main_area);

        let sidebar_block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .title("resona")
            .title_alignment(Alignment::Center);
        let mut content_block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .title(self.app.state.ui.current_route.title())
            .title_alignment(Alignment::Center);
        if let Some(error) = &self.app.state.ui.error_message {
            content_block = content_block.title_bottom(error.clone());
        }

        let sidebar_inner = sidebar_block.inner(main_chunks[0]);
        let content_inner = content_block.inner(main_chunks[1]);

        f.render_widget(sidebar_block, main_chunks[0]);
        f.render_widget(content_block, main_chunks[1]);

        let items = Route::SIDEBAR.iter().map(|r| r.title()).collect();
        let unread = self.app.ctx.notifications.lock().unwrap().unread_count();
        f.render_widget(
            Sidebar::new(items, self.app.state.ui.sidebar_index).with_unread_badge(unread),
            sidebar_inner,
        );

        self.app
            .router
            .render(f, content_inner, &self.app.state, &self.app.ctx);

        let current_track = self.app.ctx.player.current_track();
        let context = self.app.ctx.player.context();
        let bar = PlayerBarWidget::new(
            current_track.as_ref(),
            &context,
            self.app.ctx.player.is_playing(),
            self.app.ctx.player.is_shuffled(),
        );
        f.render_widget(bar, player_area);
    }
}
