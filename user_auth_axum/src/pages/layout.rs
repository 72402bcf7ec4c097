use askama::Template;
use axum::response::{Html, IntoResponse, Response};
use http::{HeaderMap, StatusCode};

use crate::error::IntoResponseError;
use crate::flash::{Flash, take_flash};
use crate::session::AuthUser;

use super::router::AppState;

/// Identity shown in the header navigation
pub(super) struct NavUser {
    pub(super) id: String,
}

/// Values every page passes to `layout.j2`
pub(super) struct Layout {
    pub(super) full_title: String,
    pub(super) app_title: String,
    pub(super) user: Option<NavUser>,
    pub(super) csrf_token: Option<String>,
    pub(super) flash: Option<Flash>,
}

/// A page about to be rendered: its layout and the response headers
/// accumulated while building it.
pub(super) struct Page {
    pub(super) layout: Layout,
    pub(super) headers: HeaderMap,
}

impl Page {
    /// Start a page titled `title`, consuming any pending flash.
    pub(super) fn new(
        state: &AppState,
        user: Option<&AuthUser>,
        request: &HeaderMap,
        title: &str,
    ) -> Result<Self, (StatusCode, String)> {
        let mut headers = HeaderMap::new();
        let flash = take_flash(state.auth.sessions(), request, &mut headers).into_response_error()?;

        Ok(Self {
            layout: Layout {
                full_title: state.pages.full_title(title),
                app_title: state.pages.app_title.clone(),
                user: user.map(|u| NavUser { id: u.id.clone() }),
                csrf_token: user.map(|u| u.csrf_token.as_str().to_string()),
                flash,
            },
            headers,
        })
    }
}

pub(super) fn render(
    status: StatusCode,
    headers: HeaderMap,
    template: &impl Template,
) -> Result<Response, (StatusCode, String)> {
    let html = template.render().into_response_error()?;
    Ok((status, headers, Html(html)).into_response())
}
