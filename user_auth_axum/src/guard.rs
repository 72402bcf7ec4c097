//! Turns access-control decisions into HTTP redirects.

use axum::response::{IntoResponse, Redirect, Response};
use http::{HeaderMap, Method, Uri};
use user_auth::{Action, Decision, Denial, SessionManager, SessionUser, authorize};

use crate::config::{LANDING_URL, LOGIN_URL};
use crate::flash::{Flash, set_flash};
use crate::redirect_back::store_location;
use crate::session::AuthUser;

/// Run the access rules for `action`; `Err` carries the redirect to send.
pub(crate) fn require(
    sessions: &SessionManager,
    user: Option<&AuthUser>,
    action: &Action,
    method: &Method,
    uri: &Uri,
) -> Result<(), Response> {
    let identity = user.map(SessionUser::from);
    match authorize(identity.as_ref(), action) {
        Decision::Permit => Ok(()),
        Decision::Deny(denial) => Err(denial_response(sessions, denial, method, uri)),
    }
}

/// Like [`require`], handing back the permitted user.
pub(crate) fn require_user(
    sessions: &SessionManager,
    user: Option<AuthUser>,
    action: &Action,
    method: &Method,
    uri: &Uri,
) -> Result<AuthUser, Response> {
    require(sessions, user.as_ref(), action, method, uri)?;
    user.ok_or_else(|| denial_response(sessions, Denial::Login, method, uri))
}

/// Redirect for a denied request.
///
/// Login denials on `GET` remember the requested page for after login.
pub(crate) fn denial_response(
    sessions: &SessionManager,
    denial: Denial,
    method: &Method,
    uri: &Uri,
) -> Response {
    match denial {
        Denial::Login => {
            let mut headers = HeaderMap::new();
            if method == Method::GET {
                if let Err(e) = store_location(sessions, &mut headers, uri) {
                    tracing::error!("Failed to remember requested page: {}", e);
                }
            }
            if let Err(e) = set_flash(sessions, &mut headers, &Flash::danger("Please log in.")) {
                tracing::error!("Failed to set flash: {}", e);
            }
            (headers, Redirect::to(LOGIN_URL)).into_response()
        }
        Denial::Landing => Redirect::to(LANDING_URL).into_response(),
    }
}
