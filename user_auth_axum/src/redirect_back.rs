//! Remembers the page a visitor asked for before being sent to log in.

use http::{HeaderMap, Uri};
use user_auth::{SessionError, SessionManager};

pub(crate) const RETURN_TO_COOKIE: &str = "return_to";
const RETURN_TO_MAX_AGE: i64 = 600;

/// Only same-site absolute paths are followed after login.
pub(crate) fn is_local_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
        && !path.chars().any(char::is_control)
}

pub(crate) fn store_location(
    sessions: &SessionManager,
    response: &mut HeaderMap,
    uri: &Uri,
) -> Result<(), SessionError> {
    let Some(path) = uri.path_and_query().map(|pq| pq.as_str()) else {
        return Ok(());
    };
    if !is_local_path(path) {
        tracing::warn!(path = %path, "Not remembering non-local path");
        return Ok(());
    }
    tracing::debug!(path = %path, "Remembering requested page");
    sessions.set_signed_cookie(response, RETURN_TO_COOKIE, path, RETURN_TO_MAX_AGE)
}

/// The remembered page, if any, expiring it in `response`.
pub(crate) fn take_location(
    sessions: &SessionManager,
    request: &HeaderMap,
    response: &mut HeaderMap,
) -> Result<Option<String>, SessionError> {
    let Some(path) = sessions.read_signed_cookie(request, RETURN_TO_COOKIE) else {
        return Ok(None);
    };
    sessions.clear_cookie(response, RETURN_TO_COOKIE)?;
    Ok(Some(path).filter(|p| is_local_path(p)))
}
