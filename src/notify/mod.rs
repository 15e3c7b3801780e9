use tracing::warn;

use crate::api::error::ApiError;
use crate::api::model::Notification;

/// Where the store stands with respect to its initial fetch. Stays `Idle`
/// for an unauthenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreStatus {
    #[default]
    Idle,
    Loading,
    Ready,
}

/// The authenticated user's notifications. Filled once from the server, then
/// mutated locally only: mark-read, add and remove never round-trip.
#[derive(Debug, Default)]
pub struct NotificationStore {
    status: StoreStatus,
    notifications: Vec<Notification>,
    pending_notice: Option<String>,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> StoreStatus {
        self.status
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn begin_fetch(&mut self) {
        self.status = StoreStatus::Loading;
    }

    /// Wholesale replacement from a successful fetch. A queued one-time
    /// system notice is materialized at the head and cleared so it fires at
    /// most once.
    pub fn replace(&mut self, notifications: Vec<Notification>) {
        self.notifications = notifications;
        if let Some(message) = self.pending_notice.take() {
            self.notifications.insert(
                0,
                Notification {
                    id: format!("local-{}", self.notifications.len()),
                    message,
                    read: false,
                    time_ago: Some("just now".to_string()),
                    link: None,
                },
            );
        }
        self.status = StoreStatus::Ready;
    }

    /// A failed fetch is non-fatal: log, keep whatever was there before.
    pub fn fetch_failed(&mut self, err: &ApiError) {
        warn!("notification fetch failed: {err}");
        if self.status == StoreStatus::Loading {
            self.status = if self.notifications.is_empty() {
                StoreStatus::Idle
            } else {
                StoreStatus::Ready
            };
        }
    }

    /// Local-only, idempotent; unknown ids are ignored.
    pub fn mark_as_read(&mut self, id: &str) {
        if let Some(n) = self.notifications.iter_mut().find(|n| n.id == id) {
            n.read = true;
        }
    }

    /// Prepends a local-only notification.
    pub fn add_notification(&mut self, notification: Notification) {
        self.notifications.insert(0, notification);
    }

    /// Local-only removal; unknown ids leave the list unchanged.
    pub fn remove_notification(&mut self, id: &str) {
        self.notifications.retain(|n| n.id != id);
    }

    /// Queues the one-time "role changed" notice for the next `replace`.
    pub fn set_pending_notice(&mut self, message: impl Into<String>) {
        self.pending_notice = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(id: &str) -> Notification {
        Notification {
            id: id.into(),
            message: format!("message {id}"),
            read: false,
            time_ago: Some("2h".into()),
            link: None,
        }
    }

    #[test]
    fn store_starts_idle_with_no_notifications() {
        let store = NotificationStore::new();
        assert_eq!(store.status(), StoreStatus::Idle);
        assert!(store.notifications().is_empty());
    }

    #[test]
    fn fetch_flow_replaces_wholesale() {
        let mut store = NotificationStore::new();
        store.begin_fetch();
        assert_eq!(store.status(), StoreStatus::Loading);

        store.replace(vec![notification("a"), notification("b")]);
        assert_eq!(store.status(), StoreStatus::Ready);
        assert_eq!(store.notifications().len(), 2);

        store.replace(vec![notification("c")]);
        assert_eq!(store.notifications().len(), 1);
        assert_eq!(store.notifications()[0].id, "c");
    }

    #[test]
    fn fetch_failure_keeps_prior_list() {
        let mut store = NotificationStore::new();
        store.replace(vec![notification("a")]);

        store.begin_fetch();
        store.fetch_failed(&ApiError::Network("boom".into()));

        assert_eq!(store.status(), StoreStatus::Ready);
        assert_eq!(store.notifications().len(), 1);
    }

    #[test]
    fn mark_as_read_is_idempotent() {
        let mut store = NotificationStore::new();
        store.replace(vec![notification("a"), notification("b")]);

        store.mark_as_read("a");
        let once: Vec<_> = store.notifications().to_vec();
        store.mark_as_read("a");

        assert_eq!(store.notifications(), once.as_slice());
        assert!(store.notifications()[0].read);
        assert!(!store.notifications()[1].read);
    }

    #[test]
    fn mark_as_read_of_unknown_id_is_a_no_op() {
        let mut store = NotificationStore::new();
        store.replace(vec![notification("a")]);
        store.mark_as_read("zzz");
        assert!(!store.notifications()[0].read);
    }

    #[test]
    fn remove_of_unknown_id_leaves_list_unchanged() {
        let mut store = NotificationStore::new();
        store.replace(vec![notification("a"), notification("b")]);

        store.remove_notification("zzz");
        assert_eq!(store.notifications().len(), 2);

        store.remove_notification("a");
        assert_eq!(store.notifications().len(), 1);
        assert_eq!(store.notifications()[0].id, "b");
    }

    #[test]
    fn add_notification_prepends() {
        let mut store = NotificationStore::new();
        store.replace(vec![notification("a")]);
        store.add_notification(notification("new"));
        assert_eq!(store.notifications()[0].id, "new");
    }

    #[test]
    fn pending_notice_fires_exactly_once() {
        let mut store = NotificationStore::new();
        store.set_pending_notice("Your role is now artist");

        store.replace(vec![notification("a")]);
        assert_eq!(store.notifications()[0].message, "Your role is now artist");

        store.replace(vec![notification("b")]);
        assert_eq!(store.notifications().len(), 1);
        assert_eq!(store.notifications()[0].id, "b");
    }

    #[test]
    fn unread_count_tracks_read_flags() {
        let mut store = NotificationStore::new();
        store.replace(vec![notification("a"), notification("b")]);
        assert_eq!(store.unread_count(), 2);
        store.mark_as_read("a");
        assert_eq!(store.unread_count(), 1);
    }
}
