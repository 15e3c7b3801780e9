use std::time::Duration;

use crossterm::event::KeyCode;
use ratatui::crossterm::event::{KeyEvent, KeyEventKind, KeyModifiers};
use tracing::info;

use crate::{
    event::events::Event,
    ui::{
        app::App,
        state::Route,
        traits::{Action, View},
        tui::{TerminalEvent, Tui},
        views,
    },
};

const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

pub struct EventHandler;

impl EventHandler {
    pub async fn handle_events(app: &mut App, tui: &mut Tui) -> color_eyre::Result<bool> {
        let mut should_render = false;
        if let Some(evt) = tui.next().await
            && Self::handle_event(app, evt, tui).await?
        {
            should_render = true;
        }

        while let Ok(evt) = app.event_rx.try_recv() {
            Self::handle_action(app, evt).await;
            should_render = true;
        }

        Ok(should_render)
    }

    pub async fn handle_event(
        app: &mut App,
        evt: TerminalEvent,
        tui: &mut Tui,
    ) -> color_eyre::Result<bool> {
        match evt {
            TerminalEvent::Init => {}
            TerminalEvent::Quit => app.should_quit = true,
            TerminalEvent::FocusGained => {
                app.has_focus = true;
                tui.clear()?;
            }
            TerminalEvent::FocusLost => app.has_focus = false,
            TerminalEvent::Key(key) => Self::handle_key_event(app, key).await,
            TerminalEvent::Tick => {
                return Ok(app.has_focus);
            }
            _ => {}
        }

        Ok(true)
    }

    pub async fn handle_action(app: &mut App, evt: Event) {
        app.router.on_event(&evt, &app.ctx).await;

        match evt {
            Event::Initialize => {
                if let Some(session) = crate::auth::Session::from_env() {
                    let role = session.role.clone();
                    let role_changed = app.ctx.session.sign_in(session);
                    if role_changed {
                        app.ctx
                            .notifications
                            .lock()
                            .unwrap()
                            .set_pending_notice(format!("Your role is now {role}"));
                    }
                    let _ = app.ctx.event_tx.send(Event::SessionEstablished);
                }
            }
            Event::SessionEstablished => {
                // Remount the active view so auth-gated fetches fire.
                let route = app.state.ui.current_route;
                app.router.replace(Self::view_for(route), &app.ctx).await;

                // The authenticated flag just became true; fill the store.
                let store = app.ctx.notifications.clone();
                store.lock().unwrap().begin_fetch();
                let api = app.ctx.api.clone();

                app.task_manager.spawn(
                    "notifications_fetch",
                    tokio::spawn(async move {
                        match api.fetch_notifications().await {
                            Ok(list) => store.lock().unwrap().replace(list),
                            Err(e) => store.lock().unwrap().fetch_failed(&e),
                        }
                    }),
                );
            }
            Event::Search(query) => {
                // Debounce: re-keying the task aborts the previous delay, so
                // a burst of keystrokes yields exactly one request.
                let api = app.ctx.api.clone();
                let tx = app.ctx.event_tx.clone();
                app.task_manager.spawn(
                    "search_debounce",
                    tokio::spawn(async move {
                        tokio::time::sleep(SEARCH_DEBOUNCE).await;
                        match api.search(&query, "all").await {
                            Ok(results) => {
                                let _ = tx.send(Event::SearchResults(results));
                            }
                            Err(e) => {
                                info!("search failed: {e}");
                                let _ = tx.send(Event::FetchError(e.to_string()));
                            }
                        }
                    }),
                );
            }
            Event::PlayQueue(tracks, tag, context_id, start_index) => {
                if let Some(track) = tracks.get(start_index).cloned() {
                    app.ctx.player.set_songs(tracks);
                    app.ctx.player.set_context(tag);
                    app.ctx.player.set_context_id(context_id);
                    app.ctx.player.play_song(track);
                }
            }
            Event::ToggleLike(song_id, currently_liked) => {
                let api = app.ctx.api.clone();
                let tx = app.ctx.event_tx.clone();
                app.task_manager.spawn(
                    "like_toggle",
                    tokio::spawn(async move {
                        let result = if currently_liked {
                            api.unlike(&song_id).await
                        } else {
                            api.like(&song_id).await
                        };
                        match result {
                            Ok(is_liked) => {
                                let _ = tx.send(Event::LikeStatus(song_id, is_liked));
                            }
                            Err(e) => {
                                info!("like toggle failed: {e}");
                                let _ = tx.send(Event::FetchError(e.to_string()));
                            }
                        }
                    }),
                );
            }
            Event::FetchError(e) => {
                app.state.ui.error_message = Some(e);
            }
            _ => {}
        }
    }

    async fn handle_key_event(app: &mut App, evt: KeyEvent) {
        if evt.kind != KeyEventKind::Press {
            return;
        }

        match evt.code {
            KeyCode::Char('c') if evt.modifiers == KeyModifiers::CONTROL => {
                app.should_quit = true;
                return;
            }
            KeyCode::Tab => {
                Self::switch_sidebar(app, 1).await;
                return;
            }
            KeyCode::BackTab => {
                Self::switch_sidebar(app, Route::SIDEBAR.len() - 1).await;
                return;
            }
            _ => {}
        }

        if let Some(action) = app.router.handle_input(evt, &app.state, &app.ctx).await {
            Self::dispatch_action(app, action).await;
            return;
        }

        // View left the key alone; global playback bindings apply.
        let action = match evt.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char(' ') => Some(Action::PlayPause),
            KeyCode::Char('n') => Some(Action::NextTrack),
            KeyCode::Char('p') => Some(Action::PreviousTrack),
            KeyCode::Char('s') => Some(Action::ToggleShuffle),
            KeyCode::Char('L') => Some(Action::OpenLyrics),
            KeyCode::Esc => Some(Action::CloseLyrics),
            _ => None,
        };
        if let Some(action) = action {
            Self::dispatch_action(app, action).await;
        }
    }

    async fn switch_sidebar(app: &mut App, step: usize) {
        let count = Route::SIDEBAR.len();
        app.state.ui.sidebar_index = (app.state.ui.sidebar_index + step) % count;
        let route = Route::SIDEBAR[app.state.ui.sidebar_index];
        app.state.ui.current_route = route;
        app.state.ui.error_message = None;
        app.router.replace(Self::view_for(route), &app.ctx).await;
    }

    fn view_for(route: Route) -> Box<dyn View> {
        match route {
            Route::LikedSongs => Box::new(views::LikedSongs::default()),
            Route::Search => Box::new(views::Search::default()),
            Route::History => Box::new(views::History::default()),
            Route::Following => Box::new(views::Following::default()),
            Route::Notifications => Box::new(views::Notifications::default()),
            Route::Lyrics => Box::new(views::Lyrics::default()),
        }
    }

    async fn dispatch_action(app: &mut App, action: Action) {
        match action {
            Action::Quit => app.should_quit = true,
            Action::PlayPause => app.ctx.player.toggle_play(),
            Action::NextTrack => {
                app.ctx.player.next();
            }
            Action::PreviousTrack => {
                app.ctx.player.previous();
            }
            Action::ToggleShuffle => app.ctx.player.toggle_shuffle(),
            Action::OpenLyrics => {
                if app.state.ui.current_route != Route::Lyrics {
                    app.state.ui.current_route = Route::Lyrics;
                    app.router
                        .push(Self::view_for(Route::Lyrics), &app.ctx)
                        .await;
                }
            }
            Action::CloseLyrics => {
                if app.state.ui.current_route == Route::Lyrics {
                    app.router.pop();
                    app.state.ui.current_route =
                        Route::SIDEBAR[app.state.ui.sidebar_index % Route::SIDEBAR.len()];
                }
            }
            Action::None => {}
        }
    }
}
