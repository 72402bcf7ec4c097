mod session;
mod signed;

pub use session::SessionManager;
