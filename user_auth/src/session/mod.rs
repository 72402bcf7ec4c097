mod config;
mod errors;
mod main;
mod types;

pub use config::SessionConfig;
pub use errors::SessionError;
pub use main::SessionManager;
pub use types::{CsrfToken, SessionUser};
