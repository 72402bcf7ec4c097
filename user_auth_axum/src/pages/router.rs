use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};
use std::sync::Arc;
use user_auth::AuthState;

use crate::config::PagesConfig;

use super::{sessions, static_pages, users};

/// State shared by the page handlers
#[derive(Clone, FromRef)]
pub struct AppState {
    pub auth: AuthState,
    pub pages: Arc<PagesConfig>,
}

/// All user-directory pages, configured from the environment.
pub fn user_auth_router(auth: AuthState) -> Router {
    user_auth_router_with(auth, PagesConfig::default())
}

pub fn user_auth_router_with(auth: AuthState, pages: PagesConfig) -> Router {
    let state = AppState {
        auth,
        pages: Arc::new(pages),
    };

    Router::new()
        .route("/", get(static_pages::home))
        .route("/help", get(static_pages::help))
        .route("/signup", get(users::new_user))
        .route(
            "/login",
            get(sessions::new_session).post(sessions::create_session),
        )
        .route(
            "/logout",
            post(sessions::destroy_session).delete(sessions::destroy_session),
        )
        .route("/users", get(users::index).post(users::create))
        .route(
            "/users/{id}",
            get(users::show)
                .patch(users::update)
                .delete(users::destroy)
                .post(users::method_override),
        )
        .route("/users/{id}/edit", get(users::edit))
        .with_state(state)
}
