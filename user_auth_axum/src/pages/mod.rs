mod layout;
mod router;
mod sessions;
mod static_pages;
mod users;

pub use router::{AppState, user_auth_router, user_auth_router_with};
