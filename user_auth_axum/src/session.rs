use axum::{
    extract::{FromRef, FromRequestParts, OptionalFromRequestParts},
    response::{IntoResponse, Response},
};
use http::request::Parts;
use user_auth::{AuthState, CsrfToken, Denial, SessionUser};

use crate::error::IntoResponseError;
use crate::guard::denial_response;

/// Logged-in user, available as an axum extractor.
///
/// As a plain extractor it sends visitors without a session to the login
/// page; as `Option<AuthUser>` it yields `None` for them instead. Both read
/// the user record afresh on every request.
///
/// ```no_run
/// use axum::{Router, routing::get};
/// use user_auth_axum::{AuthState, AuthUser};
///
/// async fn greet(user: AuthUser) -> String {
///     format!("Hello, {}!", user.name)
/// }
///
/// # async fn app(state: AuthState) {
/// let app: Router = Router::new().route("/hello", get(greet)).with_state(state);
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct AuthUser {
    /// Unique user identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Lower-cased e-mail address
    pub email: String,
    /// Whether the user has admin privileges
    pub is_admin: bool,
    /// CSRF token of the user's session
    pub csrf_token: CsrfToken,
}

impl From<(SessionUser, CsrfToken)> for AuthUser {
    fn from((user, csrf_token): (SessionUser, CsrfToken)) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            is_admin: user.is_admin,
            csrf_token,
        }
    }
}

impl From<&AuthUser> for SessionUser {
    fn from(auth_user: &AuthUser) -> Self {
        SessionUser {
            id: auth_user.id.clone(),
            name: auth_user.name.clone(),
            email: auth_user.email.clone(),
            is_admin: auth_user.is_admin,
        }
    }
}

async fn resolve(parts: &Parts, auth: &AuthState) -> Result<Option<AuthUser>, Response> {
    auth.sessions()
        .current_identity(&parts.headers)
        .await
        .map(|identity| identity.map(AuthUser::from))
        .into_response_error()
        .map_err(IntoResponse::into_response)
}

impl<S> FromRequestParts<S> for AuthUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthState::from_ref(state);
        match resolve(parts, &auth).await? {
            Some(user) => Ok(user),
            None => {
                tracing::debug!("No session for {} {}", parts.method, parts.uri);
                Err(denial_response(
                    auth.sessions(),
                    Denial::Login,
                    &parts.method,
                    &parts.uri,
                ))
            }
        }
    }
}

impl<S> OptionalFromRequestParts<S> for AuthUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        let auth = AuthState::from_ref(state);
        resolve(parts, &auth).await
    }
}
