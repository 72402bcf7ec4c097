use axum::response::{IntoResponse, Response};
use http::StatusCode;
use user_auth::{CoordinationError, SessionError};

const INTERNAL_ERROR_BODY: &str = "Internal server error";

/// Helper trait for converting errors to a standard response error format
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)>;
}

/// Map CoordinationError variants to status codes; server faults get a
/// generic body and the detail goes to the log.
fn coordination_failure(e: CoordinationError) -> (StatusCode, String) {
    let status = match e {
        CoordinationError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CoordinationError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        CoordinationError::Unauthorized => StatusCode::FORBIDDEN,
        CoordinationError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("Request failed: {}", e);
        (status, INTERNAL_ERROR_BODY.to_string())
    } else {
        (status, e.to_string())
    }
}

impl<T> IntoResponseError<T> for Result<T, CoordinationError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(coordination_failure)
    }
}

impl<T> IntoResponseError<T> for Result<T, SessionError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            tracing::error!("Session failure: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_BODY.to_string(),
            )
        })
    }
}

/// Template rendering failures
impl<T> IntoResponseError<T> for Result<T, askama::Error> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            tracing::error!("Template rendering failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_BODY.to_string(),
            )
        })
    }
}

/// Error half of a page handler's result.
///
/// Status pairs, finished responses such as guard redirects, and
/// coordination failures all convert with `?`.
pub(crate) struct PageError(Response);

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        self.0
    }
}

impl From<Response> for PageError {
    fn from(response: Response) -> Self {
        Self(response)
    }
}

impl From<(StatusCode, String)> for PageError {
    fn from(error: (StatusCode, String)) -> Self {
        Self(error.into_response())
    }
}

impl From<CoordinationError> for PageError {
    fn from(error: CoordinationError) -> Self {
        coordination_failure(error).into()
    }
}
