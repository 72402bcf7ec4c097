//! User-facing flows built on the stores: credential checks, signup,
//! self-service profile updates and administrator operations.

mod admin;
mod errors;
mod login;
mod user;

pub use admin::{UsersPage, delete_user_account_admin, ensure_admin_user, get_user, list_users_page};
pub use errors::CoordinationError;
pub use login::authenticate;
pub use user::{ProfileUpdate, SignupRequest, register_user, update_user_account};
