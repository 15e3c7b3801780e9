use std::sync::{Arc, RwLock};

/// An authenticated user. Created on sign-in, dropped on sign-out.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub role: String,
    pub token: String,
}

impl Session {
    /// Builds a session from the environment, if a token is present.
    /// A missing token is not an error; the client runs unauthenticated.
    pub fn from_env() -> Option<Self> {
        let token = std::env::var("RESONA_TOKEN").ok()?;
        let user_id = std::env::var("RESONA_USER_ID").unwrap_or_default();
        let role = std::env::var("RESONA_ROLE").unwrap_or_else(|_| "listener".to_string());
        Some(Self {
            user_id,
            role,
            token,
        })
    }
}

/// Shared holder for the current session. Clones share the same slot, so the
/// API service and the UI always observe the same state.
#[derive(Debug, Clone, Default)]
pub struct SessionHolder {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionHolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a session, returning true when the role differs from the
    /// previous session's role. The caller uses that to queue the one-time
    /// "role changed" system notice.
    pub fn sign_in(&self, session: Session) -> bool {
        let mut slot = self.inner.write().unwrap();
        let role_changed = slot
            .as_ref()
            .is_some_and(|prev| prev.role != session.role);
        *slot = Some(session);
        role_changed
    }

    pub fn sign_out(&self) {
        *self.inner.write().unwrap() = None;
    }

    pub fn session(&self) -> Option<Session> {
        self.inner.read().unwrap().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().unwrap().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.read().unwrap().as_ref().map(|s| s.token.clone())
    }

    pub fn user_id(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap()
            .as_ref()
            .map(|s| s.user_id.clone())
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: &str) -> Session {
        Session {
            user_id: "u1".into(),
            role: role.into(),
            token: "tok".into(),
        }
    }

    #[test]
    fn sign_in_then_out_flips_authenticated() {
        let holder = SessionHolder::new();
        assert!(!holder.is_authenticated());

        holder.sign_in(session("listener"));
        assert!(holder.is_authenticated());
        assert_eq!(holder.user_id().as_deref(), Some("u1"));

        holder.sign_out();
        assert!(!holder.is_authenticated());
        assert!(holder.token().is_none());
    }

    #[test]
    fn role_change_is_reported_once_per_sign_in() {
        let holder = SessionHolder::new();
        assert!(!holder.sign_in(session("listener")));
        assert!(holder.sign_in(session("artist")));
        assert!(!holder.sign_in(session("artist")));
    }

    #[test]
    fn clones_share_the_same_slot() {
        let holder = SessionHolder::new();
        let other = holder.clone();
        holder.sign_in(session("listener"));
        assert!(other.is_authenticated());
    }
}
