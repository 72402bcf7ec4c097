use chrono::{Duration, Utc};
use http::header::HeaderMap;
use std::sync::Arc;

use crate::session::config::SessionConfig;
use crate::session::errors::SessionError;
use crate::session::types::{CsrfToken, SessionUser, StoredSession};
use crate::storage::{CacheData, SharedCacheStore};
use crate::userdb::UserStore;
use crate::utils::{gen_random_string, get_cookie, header_set_cookie};

use super::signed;

const SESSION_PREFIX: &str = "session";

/// Establishes, resolves and tears down the identity behind a session cookie.
///
/// Cloning is cheap; clones share the same cache store and user store.
#[derive(Clone)]
pub struct SessionManager {
    cache: SharedCacheStore,
    users: UserStore,
    config: Arc<SessionConfig>,
}

impl SessionManager {
    pub fn new(cache: SharedCacheStore, users: UserStore, config: SessionConfig) -> Self {
        Self {
            cache,
            users,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Start a session for `user_id`.
    ///
    /// Any session presented in `request_headers` is discarded first, so a
    /// fresh id is issued on every login. Returns the `Set-Cookie` headers.
    #[tracing::instrument(skip(self, request_headers))]
    pub async fn log_in(
        &self,
        user_id: &str,
        request_headers: &HeaderMap,
    ) -> Result<HeaderMap, SessionError> {
        if let Some(old_id) = self.session_id(request_headers) {
            tracing::debug!("Replacing previous session");
            self.cache
                .lock()
                .await
                .remove(SESSION_PREFIX, &old_id)
                .await?;
        }

        let session_id = gen_random_string(32)?;
        let csrf_token = gen_random_string(32)?;
        let max_age = self.config.max_age;
        let max_age_secs = i64::try_from(max_age)
            .map_err(|_| SessionError::Config(format!("Session max age {max_age} is too large")))?;
        let expires_at = Duration::try_seconds(max_age_secs)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .ok_or_else(|| {
                SessionError::Config(format!("Session max age {max_age} is out of range"))
            })?;
        let ttl = usize::try_from(max_age)
            .map_err(|_| SessionError::Config(format!("Session max age {max_age} is too large")))?;

        let stored_session = StoredSession {
            user_id: user_id.to_string(),
            csrf_token,
            expires_at,
            ttl: max_age,
        };

        self.cache
            .lock()
            .await
            .put_with_ttl(
                SESSION_PREFIX,
                &session_id,
                CacheData::try_from(stored_session)?,
                ttl,
            )
            .await?;

        let mut headers = HeaderMap::new();
        header_set_cookie(
            &mut headers,
            &self.config.cookie_name,
            &session_id,
            max_age_secs,
            self.config.secure,
        )?;

        tracing::info!(user_id = %user_id, "Session created");
        Ok(headers)
    }

    /// End the session presented in `request_headers`, if any.
    ///
    /// Always returns headers that expire the session cookie.
    #[tracing::instrument(skip(self, request_headers))]
    pub async fn log_out(&self, request_headers: &HeaderMap) -> Result<HeaderMap, SessionError> {
        if let Some(session_id) = self.session_id(request_headers) {
            self.cache
                .lock()
                .await
                .remove(SESSION_PREFIX, &session_id)
                .await?;
            tracing::info!("Session removed");
        }

        let mut headers = HeaderMap::new();
        self.clear_cookie(&mut headers, &self.config.cookie_name)?;
        Ok(headers)
    }

    /// The identity behind the request's session cookie.
    ///
    /// `None` when there is no cookie, the session is unknown or expired, or
    /// its user no longer exists.
    pub async fn current_identity(
        &self,
        request_headers: &HeaderMap,
    ) -> Result<Option<(SessionUser, CsrfToken)>, SessionError> {
        let Some(session_id) = self.session_id(request_headers) else {
            return Ok(None);
        };

        let cached = self.cache.lock().await.get(SESSION_PREFIX, &session_id).await?;
        let Some(cached) = cached else {
            tracing::debug!("Session not found in store");
            return Ok(None);
        };

        let stored_session = match StoredSession::try_from(cached) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Discarding unreadable session: {}", e);
                return Ok(None);
            }
        };

        if stored_session.expires_at < Utc::now() {
            tracing::debug!("Session expired at {}", stored_session.expires_at);
            self.cache
                .lock()
                .await
                .remove(SESSION_PREFIX, &session_id)
                .await?;
            return Ok(None);
        }

        let Some(user) = self.users.get_user(&stored_session.user_id).await? else {
            tracing::debug!(user_id = %stored_session.user_id, "Session user no longer exists");
            return Ok(None);
        };

        Ok(Some((
            SessionUser::from(user),
            CsrfToken::new(stored_session.csrf_token),
        )))
    }

    /// Sign `value` for storage in the cookie `name`.
    pub fn sign_cookie_value(&self, name: &str, value: &str) -> Result<String, SessionError> {
        signed::sign(&self.config.secret, name, value)
    }

    /// Read and verify the signed cookie `name`. Forged values read as absent.
    pub fn read_signed_cookie(&self, request_headers: &HeaderMap, name: &str) -> Option<String> {
        let raw = get_cookie(request_headers, name)?;
        let value = signed::verify(&self.config.secret, name, &raw);
        if value.is_none() {
            tracing::warn!(cookie = %name, "Ignoring cookie with invalid signature");
        }
        value
    }

    /// Append a signed `Set-Cookie` for `name` living `max_age` seconds.
    pub fn set_signed_cookie(
        &self,
        headers: &mut HeaderMap,
        name: &str,
        value: &str,
        max_age: i64,
    ) -> Result<(), SessionError> {
        let signed = self.sign_cookie_value(name, value)?;
        header_set_cookie(headers, name, &signed, max_age, self.config.secure)?;
        Ok(())
    }

    /// Append a `Set-Cookie` that expires `name`.
    pub fn clear_cookie(&self, headers: &mut HeaderMap, name: &str) -> Result<(), SessionError> {
        header_set_cookie(headers, name, "", 0, self.config.secure)?;
        Ok(())
    }

    fn session_id(&self, request_headers: &HeaderMap) -> Option<String> {
        get_cookie(request_headers, &self.config.cookie_name).filter(|id| !id.is_empty())
    }
}
