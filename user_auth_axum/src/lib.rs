//! user-auth-axum - axum pages and extractors for the user-auth library.
//!
//! [`user_auth_router`] serves the complete user directory: static pages,
//! login and logout, signup, profiles, the profile editor and the
//! administrator's user index. [`AuthUser`] can be used in application
//! handlers to read the logged-in identity.

mod config;
mod csrf;
mod error;
mod flash;
mod guard;
mod pages;
mod redirect_back;
mod session;

pub use config::{APP_TITLE, LANDING_URL, LOGIN_URL, PagesConfig, USERS_PER_PAGE};
pub use error::IntoResponseError;
pub use flash::{Flash, FlashKind};
pub use pages::{AppState, user_auth_router, user_auth_router_with};
pub use session::AuthUser;

pub use user_auth::AuthState;
