use askama::Template;
use axum::{extract::State, response::Response};
use http::{HeaderMap, StatusCode};

use crate::session::AuthUser;

use super::layout::{Layout, Page, render};
use super::router::AppState;

#[derive(Template)]
#[template(path = "home.j2", escape = "html")]
struct HomeTemplate {
    layout: Layout,
    user_name: Option<String>,
}

#[derive(Template)]
#[template(path = "help.j2", escape = "html")]
struct HelpTemplate {
    layout: Layout,
}

pub(super) async fn home(
    State(state): State<AppState>,
    headers: HeaderMap,
    user: Option<AuthUser>,
) -> Result<Response, (StatusCode, String)> {
    let page = Page::new(&state, user.as_ref(), &headers, "")?;
    let template = HomeTemplate {
        layout: page.layout,
        user_name: user.map(|u| u.name),
    };
    render(StatusCode::OK, page.headers, &template)
}

pub(super) async fn help(
    State(state): State<AppState>,
    headers: HeaderMap,
    user: Option<AuthUser>,
) -> Result<Response, (StatusCode, String)> {
    let page = Page::new(&state, user.as_ref(), &headers, "Help")?;
    let template = HelpTemplate {
        layout: page.layout,
    };
    render(StatusCode::OK, page.headers, &template)
}
