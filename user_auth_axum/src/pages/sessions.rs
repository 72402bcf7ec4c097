use askama::Template;
use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    response::{IntoResponse, Redirect, Response},
};
use http::{HeaderMap, StatusCode};
use serde::Deserialize;
use user_auth::{CoordinationError, authenticate};

use crate::config::LANDING_URL;
use crate::csrf::verify_csrf;
use crate::error::{IntoResponseError, PageError};
use crate::redirect_back::take_location;
use crate::session::AuthUser;

use super::layout::{Layout, Page, render};
use super::router::AppState;

#[derive(Template)]
#[template(path = "login.j2", escape = "html")]
struct LoginTemplate {
    layout: Layout,
    email: String,
    error: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub(super) struct LoginForm {
    email: String,
    password: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub(super) struct LogoutForm {
    authenticity_token: Option<String>,
}

pub(super) async fn new_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    user: Option<AuthUser>,
) -> Result<Response, (StatusCode, String)> {
    if let Some(user) = user {
        return Ok(Redirect::to(&format!("/users/{}", user.id)).into_response());
    }

    let page = Page::new(&state, None, &headers, "Log in")?;
    let template = LoginTemplate {
        layout: page.layout,
        email: String::new(),
        error: None,
    };
    render(StatusCode::OK, page.headers, &template)
}

pub(super) async fn create_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Response, PageError> {
    let form = form.map(|Form(f)| f).unwrap_or_default();

    let user = match authenticate(state.auth.users(), &form.email, &form.password).await {
        Ok(user) => user,
        Err(CoordinationError::InvalidCredentials) => {
            // Rendered in place, so the alert is gone on the next page
            let page = Page::new(&state, None, &headers, "Log in")?;
            let template = LoginTemplate {
                layout: page.layout,
                email: form.email,
                error: Some("Invalid email/password combination".to_string()),
            };
            return Ok(render(StatusCode::OK, page.headers, &template)?);
        }
        Err(e) => return Err(e.into()),
    };

    let sessions = state.auth.sessions();
    let mut response_headers = sessions.log_in(&user.id, &headers).await.into_response_error()?;
    let target = take_location(sessions, &headers, &mut response_headers)
        .into_response_error()?
        .unwrap_or_else(|| format!("/users/{}", user.id));

    tracing::info!(user_id = %user.id, target = %target, "User logged in");
    Ok((response_headers, Redirect::to(&target)).into_response())
}

/// Ends the session. Visitors without one are simply sent home.
pub(super) async fn destroy_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    user: Option<AuthUser>,
    form: Result<Form<LogoutForm>, FormRejection>,
) -> Result<Response, PageError> {
    let form = form.map(|Form(f)| f).unwrap_or_default();

    if let Some(user) = &user {
        verify_csrf(user, &headers, form.authenticity_token.as_deref())?;
    }

    let response_headers = state
        .auth
        .sessions()
        .log_out(&headers)
        .await
        .into_response_error()?;

    if let Some(user) = user {
        tracing::info!(user_id = %user.id, "User logged out");
    }
    Ok((response_headers, Redirect::to(LANDING_URL)).into_response())
}
