mod errors;
mod password;
mod storage;
mod types;
mod validation;

pub use errors::UserError;
pub use password::{hash_password, verify_password};
pub use storage::UserStore;
pub use types::{User, UserSearchField};
pub use validation::{
    EMAIL_MAX_LEN, NAME_MAX_LEN, PASSWORD_MIN_LEN, normalize_email, validate_email, validate_name,
    validate_password,
};
