use axum::response::{IntoResponse, Response};
use http::{HeaderMap, StatusCode};

use crate::session::AuthUser;

pub(crate) const CSRF_HEADER: &str = "x-csrf-token";
pub(crate) const CSRF_FORM_FIELD: &str = "authenticity_token";

/// Check a state-changing request against the session's token.
///
/// The `X-CSRF-Token` header takes precedence over the form field.
pub(crate) fn verify_csrf(
    user: &AuthUser,
    headers: &HeaderMap,
    form_token: Option<&str>,
) -> Result<(), Response> {
    let submitted = headers
        .get(CSRF_HEADER)
        .and_then(|h| h.to_str().ok())
        .or(form_token);

    match submitted {
        Some(token) if user.csrf_token.matches(token) => {
            tracing::trace!("CSRF token verified");
            Ok(())
        }
        Some(_) => {
            tracing::warn!(user_id = %user.id, "CSRF token mismatch");
            Err(forbidden())
        }
        None => {
            tracing::warn!(user_id = %user.id, "CSRF token missing ({} or {})", CSRF_HEADER, CSRF_FORM_FIELD);
            Err(forbidden())
        }
    }
}

fn forbidden() -> Response {
    (StatusCode::FORBIDDEN, "Invalid authenticity token").into_response()
}
