use std::sync::{Arc, Mutex};

use flume::Receiver;

use crate::{
    api::ApiService,
    auth::SessionHolder,
    event::events::Event,
    notify::NotificationStore,
    player::Player,
    ui::{
        context::AppContext,
        layout::AppLayout,
        router::Router,
        state::AppState,
        tui::{self, TerminalEvent},
        util::handler::EventHandler,
        views::LikedSongs,
    },
    util::task::TaskManager,
};

pub struct App {
    pub event_rx: Receiver<Event>,
    pub ctx: AppContext,
    pub state: AppState,
    pub router: Router,
    pub task_manager: TaskManager,
    pub has_focus: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        let (event_tx, event_rx) = flume::unbounded();
        let session = SessionHolder::new();
        let api = Arc::new(ApiService::new(session.clone()));
        let ctx = AppContext {
            api,
            session,
            player: Player::new(),
            notifications: Arc::new(Mutex::new(NotificationStore::new())),
            event_tx,
        };

        Self {
            event_rx,
            ctx,
            state: AppState::default(),
            router: Router::new(Box::new(LikedSongs::default())),
            task_manager: TaskManager::new(),
            has_focus: true,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = tui::Tui::new()?;
        tui.enter()?;

        let _ = self.ctx.event_tx.send(Event::Initialize);
        EventHandler::handle_event(self, TerminalEvent::Init, &mut tui).await?;

        while !self.should_quit {
            tui.draw(|f| {
                AppLayout::new(self).render(f, f.area());
            })?;

            EventHandler::handle_events(self, &mut tui).await?;
        }

        self.task_manager.abort_all();
        tui.exit()?;
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
