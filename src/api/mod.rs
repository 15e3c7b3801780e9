pub mod error;
pub mod model;

use reqwest::RequestBuilder;

use crate::auth::SessionHolder;
use error::ApiError;
use model::{
    Artist, FollowingResponse, HistoryEntry, HistoryResponse, LikeStatus, LikedSongsResponse,
    Notification, SearchResults, Track,
};

const DEFAULT_BASE_URL: &str = "http://localhost:5000";

pub struct ApiService {
    client: reqwest::Client,
    base_url: String,
    session: SessionHolder,
}

impl ApiService {
    pub fn new(session: SessionHolder) -> Self {
        let base_url = std::env::var("RESONA_API_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self {
            client: reqwest::Client::new(),
            base_url,
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attaches the Bearer header when a session exists. Endpoints that allow
    /// anonymous access go through here and simply omit the header.
    fn with_auth(&self, req: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Like `with_auth`, but for endpoints that require a session. Fails
    /// before any request is made.
    fn with_required_auth(
        &self,
        req: RequestBuilder,
        endpoint: &str,
    ) -> Result<RequestBuilder, ApiError> {
        match self.session.token() {
            Some(token) => Ok(req.bearer_auth(token)),
            None => Err(ApiError::AuthMissing(endpoint.to_string())),
        }
    }

    pub async fn fetch_history(&self, user_id: &str) -> Result<Vec<HistoryEntry>, ApiError> {
        let req = self
            .client
            .get(self.url(&format!("/api/history/user/{user_id}")));
        let resp: HistoryResponse = self
            .with_auth(req)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resp.history)
    }

    pub async fn like(&self, song_id: &str) -> Result<bool, ApiError> {
        let req = self
            .client
            .post(self.url(&format!("/api/likes/{song_id}/like")));
        let req = self.with_required_auth(req, "likes/like")?;
        let status: LikeStatus = req.send().await?.error_for_status()?.json().await?;
        Ok(status.is_liked)
    }

    pub async fn unlike(&self, song_id: &str) -> Result<bool, ApiError> {
        let req = self
            .client
            .post(self.url(&format!("/api/likes/{song_id}/unlike")));
        let req = self.with_required_auth(req, "likes/unlike")?;
        let status: LikeStatus = req.send().await?.error_for_status()?.json().await?;
        Ok(status.is_liked)
    }

    pub async fn is_liked(&self, song_id: &str) -> Result<bool, ApiError> {
        let req = self
            .client
            .get(self.url(&format!("/api/likes/is-liked/{song_id}")));
        let status: LikeStatus = self
            .with_auth(req)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(status.is_liked)
    }

    pub async fn fetch_notifications(&self) -> Result<Vec<Notification>, ApiError> {
        let req = self.client.get(self.url("/api/notifications/"));
        let req = self.with_required_auth(req, "notifications")?;
        Ok(req.send().await?.error_for_status()?.json().await?)
    }

    pub async fn search(&self, query: &str, kind: &str) -> Result<SearchResults, ApiError> {
        let req = self
            .client
            .get(self.url("/api/search"))
            .query(&[("query", query), ("type", kind)]);
        Ok(self
            .with_auth(req)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn fetch_liked_songs(&self) -> Result<Vec<Track>, ApiError> {
        let req = self.client.get(self.url("/user/me/liked-songs"));
        let req = self.with_required_auth(req, "liked-songs")?;
        let resp: LikedSongsResponse = req.send().await?.error_for_status()?.json().await?;
        Ok(resp.liked)
    }

    pub async fn fetch_following(&self) -> Result<Vec<Artist>, ApiError> {
        let req = self.client.get(self.url("/user/me/following"));
        let req = self.with_required_auth(req, "following")?;
        let resp: FollowingResponse = req.send().await?.error_for_status()?.json().await?;
        Ok(resp.following)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Session;

    #[tokio::test]
    async fn protected_calls_fail_before_any_request_without_a_session() {
        let api = ApiService::new(SessionHolder::new());

        let err = api.fetch_notifications().await.unwrap_err();
        assert!(matches!(err, ApiError::AuthMissing(_)));

        let err = api.fetch_liked_songs().await.unwrap_err();
        assert!(matches!(err, ApiError::AuthMissing(_)));

        let err = api.like("s1").await.unwrap_err();
        assert!(matches!(err, ApiError::AuthMissing(_)));
    }

    #[test]
    fn url_joins_base_and_path() {
        let holder = SessionHolder::new();
        holder.sign_in(Session {
            user_id: "u1".into(),
            role: "listener".into(),
            token: "tok".into(),
        });
        let api = ApiService::new(holder);
        assert!(api.url("/api/search").ends_with("/api/search"));
    }
}
