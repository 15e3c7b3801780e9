use std::sync::{Arc, Mutex};

use flume::Sender;

use crate::{
    api::ApiService, auth::SessionHolder, event::events::Event, notify::NotificationStore,
    player::Player,
};

/// Shared context every view reads: the API client, the session slot, the
/// playback context, the notification store and the channel back into the
/// app loop.
pub struct AppContext {
    pub api: Arc<ApiService>,
    pub session: SessionHolder,
    pub player: Player,
    pub notifications: Arc<Mutex<NotificationStore>>,
    pub event_tx: Sender<Event>,
}
