use askama::Template;
use axum::{
    Form,
    extract::{
        Path, Query, State,
        rejection::{FormRejection, QueryRejection},
    },
    response::{IntoResponse, Redirect, Response},
};
use chrono::{DateTime, Utc};
use http::{HeaderMap, Method, StatusCode, Uri};
use serde::Deserialize;
use user_auth::{
    Action, CoordinationError, ProfileUpdate, SessionUser, SignupRequest,
    delete_user_account_admin, get_user, list_users_page, register_user, update_user_account,
};

use crate::config::LANDING_URL;
use crate::csrf::verify_csrf;
use crate::error::{IntoResponseError, PageError};
use crate::flash::{Flash, set_flash};
use crate::guard::require_user;
use crate::session::AuthUser;

use super::layout::{Layout, Page, render};
use super::router::AppState;

#[derive(Template)]
#[template(path = "signup.j2", escape = "html")]
struct SignupTemplate {
    layout: Layout,
    name: String,
    email: String,
    errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "show.j2", escape = "html")]
struct ShowTemplate {
    layout: Layout,
    name: String,
    member_since: String,
}

#[derive(Template)]
#[template(path = "edit.j2", escape = "html")]
struct EditTemplate {
    layout: Layout,
    id: String,
    name: String,
    email: String,
    errors: Vec<String>,
}

struct UserRow {
    id: String,
    name: String,
    deletable: bool,
}

#[derive(Template)]
#[template(path = "index.j2", escape = "html")]
struct IndexTemplate {
    layout: Layout,
    rows: Vec<UserRow>,
    page: i64,
    total_pages: i64,
    previous_page: Option<i64>,
    next_page: Option<i64>,
}

/// Body of the profile form and of `_method` overridden posts
#[derive(Deserialize, Default)]
#[serde(default)]
pub(super) struct UserForm {
    #[serde(rename = "_method")]
    method: Option<String>,
    authenticity_token: Option<String>,
    name: String,
    email: String,
    password: String,
    password_confirmation: String,
}

impl UserForm {
    fn profile(&self) -> ProfileUpdate {
        ProfileUpdate {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            password_confirmation: self.password_confirmation.clone(),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub(super) struct IndexQuery {
    page: Option<String>,
}

fn member_since(created_at: &DateTime<Utc>) -> String {
    created_at.format("%B %-d, %Y").to_string()
}

fn profile_path(id: &str) -> String {
    format!("/users/{id}")
}

pub(super) async fn new_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    user: Option<AuthUser>,
) -> Result<Response, (StatusCode, String)> {
    let page = Page::new(&state, user.as_ref(), &headers, "Sign up")?;
    let template = SignupTemplate {
        layout: page.layout,
        name: String::new(),
        email: String::new(),
        errors: Vec::new(),
    };
    render(StatusCode::OK, page.headers, &template)
}

pub(super) async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    user: Option<AuthUser>,
    form: Result<Form<SignupRequest>, FormRejection>,
) -> Result<Response, PageError> {
    let request = form.map(|Form(f)| f).unwrap_or_default();

    match register_user(state.auth.users(), &request).await {
        Ok(created) => {
            let sessions = state.auth.sessions();
            let mut response_headers = sessions
                .log_in(&created.id, &headers)
                .await
                .into_response_error()?;
            let welcome = Flash::success(format!("Welcome to the {}!", state.pages.app_title));
            set_flash(sessions, &mut response_headers, &welcome).into_response_error()?;
            Ok((response_headers, Redirect::to(&profile_path(&created.id))).into_response())
        }
        Err(CoordinationError::Validation(errors)) => {
            let page = Page::new(&state, user.as_ref(), &headers, "Sign up")?;
            let template = SignupTemplate {
                layout: page.layout,
                name: request.name,
                email: request.email,
                errors,
            };
            Ok(render(StatusCode::UNPROCESSABLE_ENTITY, page.headers, &template)?)
        }
        Err(e) => Err(e.into()),
    }
}

pub(super) async fn show(
    State(state): State<AppState>,
    headers: HeaderMap,
    user: Option<AuthUser>,
    Path(id): Path<String>,
) -> Result<Response, (StatusCode, String)> {
    let Some(shown) = get_user(state.auth.users(), &id).await.into_response_error()? else {
        return Err((StatusCode::NOT_FOUND, "User not found".to_string()));
    };

    let page = Page::new(&state, user.as_ref(), &headers, &shown.name)?;
    let template = ShowTemplate {
        layout: page.layout,
        member_since: member_since(&shown.created_at),
        name: shown.name,
    };
    render(StatusCode::OK, page.headers, &template)
}

pub(super) async fn edit(
    State(state): State<AppState>,
    headers: HeaderMap,
    method: Method,
    uri: Uri,
    user: Option<AuthUser>,
    Path(id): Path<String>,
) -> Result<Response, PageError> {
    let action = Action::EditUser {
        target_id: id.clone(),
    };
    let user = require_user(state.auth.sessions(), user, &action, &method, &uri)?;

    let page = Page::new(&state, Some(&user), &headers, "Edit user")?;
    let template = EditTemplate {
        layout: page.layout,
        id,
        name: user.name,
        email: user.email,
        errors: Vec::new(),
    };
    Ok(render(StatusCode::OK, page.headers, &template)?)
}

pub(super) async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    method: Method,
    uri: Uri,
    user: Option<AuthUser>,
    Path(id): Path<String>,
    form: Result<Form<UserForm>, FormRejection>,
) -> Result<Response, PageError> {
    let form = form.map(|Form(f)| f).unwrap_or_default();
    apply_update(&state, &headers, &method, &uri, user, id, form).await
}

pub(super) async fn destroy(
    State(state): State<AppState>,
    headers: HeaderMap,
    method: Method,
    uri: Uri,
    user: Option<AuthUser>,
    Path(id): Path<String>,
    form: Result<Form<UserForm>, FormRejection>,
) -> Result<Response, PageError> {
    let form = form.map(|Form(f)| f).unwrap_or_default();
    apply_destroy(&state, &headers, &method, &uri, user, id, form).await
}

/// `POST /users/{id}` from HTML forms, dispatched on the `_method` field.
pub(super) async fn method_override(
    State(state): State<AppState>,
    headers: HeaderMap,
    method: Method,
    uri: Uri,
    user: Option<AuthUser>,
    Path(id): Path<String>,
    form: Result<Form<UserForm>, FormRejection>,
) -> Result<Response, PageError> {
    let form = form.map(|Form(f)| f).unwrap_or_default();
    let overridden = form.method.as_deref().map(str::to_ascii_lowercase);

    match overridden.as_deref() {
        Some("patch") | Some("put") => {
            apply_update(&state, &headers, &method, &uri, user, id, form).await
        }
        Some("delete") => apply_destroy(&state, &headers, &method, &uri, user, id, form).await,
        other => {
            tracing::debug!("Unsupported _method override: {:?}", other);
            Err(StatusCode::METHOD_NOT_ALLOWED.into_response().into())
        }
    }
}

async fn apply_update(
    state: &AppState,
    headers: &HeaderMap,
    method: &Method,
    uri: &Uri,
    user: Option<AuthUser>,
    id: String,
    form: UserForm,
) -> Result<Response, PageError> {
    let sessions = state.auth.sessions();
    let action = Action::UpdateUser {
        target_id: id.clone(),
    };
    let user = require_user(sessions, user, &action, method, uri)?;
    verify_csrf(&user, headers, form.authenticity_token.as_deref())?;

    match update_user_account(state.auth.users(), &user.id, &form.profile()).await {
        Ok(updated) => {
            let mut response_headers = HeaderMap::new();
            set_flash(sessions, &mut response_headers, &Flash::success("Profile updated"))
                .into_response_error()?;
            Ok((response_headers, Redirect::to(&profile_path(&updated.id))).into_response())
        }
        Err(CoordinationError::Validation(errors)) => {
            let page = Page::new(state, Some(&user), headers, "Edit user")?;
            let template = EditTemplate {
                layout: page.layout,
                id,
                name: form.name,
                email: form.email,
                errors,
            };
            Ok(render(StatusCode::UNPROCESSABLE_ENTITY, page.headers, &template)?)
        }
        Err(e) => Err(e.into()),
    }
}

async fn apply_destroy(
    state: &AppState,
    headers: &HeaderMap,
    method: &Method,
    uri: &Uri,
    user: Option<AuthUser>,
    id: String,
    form: UserForm,
) -> Result<Response, PageError> {
    let sessions = state.auth.sessions();
    let action = Action::DestroyUser {
        target_id: id.clone(),
    };
    let user = require_user(sessions, user, &action, method, uri)?;
    verify_csrf(&user, headers, form.authenticity_token.as_deref())?;

    match delete_user_account_admin(state.auth.users(), &SessionUser::from(&user), &id).await {
        Ok(()) => {
            let mut response_headers = HeaderMap::new();
            set_flash(sessions, &mut response_headers, &Flash::success("User deleted"))
                .into_response_error()?;
            Ok((response_headers, Redirect::to("/users")).into_response())
        }
        // Role revoked between the guard and the delete
        Err(CoordinationError::Unauthorized) => Ok(Redirect::to(LANDING_URL).into_response()),
        Err(e) => Err(e.into()),
    }
}

pub(super) async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
    method: Method,
    uri: Uri,
    user: Option<AuthUser>,
    query: Result<Query<IndexQuery>, QueryRejection>,
) -> Result<Response, PageError> {
    let user = require_user(
        state.auth.sessions(),
        user,
        &Action::ListUsers,
        &method,
        &uri,
    )?;

    let requested = query
        .ok()
        .and_then(|Query(q)| q.page)
        .and_then(|p| p.trim().parse::<i64>().ok())
        .unwrap_or(1);

    let listing = list_users_page(state.auth.users(), requested, state.pages.users_per_page).await?;

    let previous_page = listing.has_previous().then(|| listing.page - 1);
    let next_page = listing.has_next().then(|| listing.page + 1);
    let rows = listing
        .users
        .into_iter()
        .map(|u| UserRow {
            deletable: user.is_admin && u.id != user.id,
            id: u.id,
            name: u.name,
        })
        .collect();

    let page = Page::new(&state, Some(&user), &headers, "All users")?;
    let template = IndexTemplate {
        layout: page.layout,
        rows,
        page: listing.page,
        total_pages: listing.total_pages,
        previous_page,
        next_page,
    };
    Ok(render(StatusCode::OK, page.headers, &template)?)
}
