//! user-auth - session management and access control for a server-rendered
//! user directory.
//!
//! The crate keeps the framework-independent parts: user records and their
//! validation, password hashing, the session store, the ordered
//! access-control rules and the login / signup / profile / admin flows.
//! The web layer lives in `user-auth-axum`.

mod authz;
mod coordination;
mod session;
mod state;
mod storage;
mod userdb;
mod utils;

#[cfg(test)]
mod test_utils;

pub use authz::{Action, Decision, Denial, authorize};

pub use coordination::{
    CoordinationError, ProfileUpdate, SignupRequest, UsersPage, authenticate,
    delete_user_account_admin, ensure_admin_user, get_user, list_users_page,
    register_user, update_user_account,
};

pub use session::{CsrfToken, SessionConfig, SessionError, SessionManager, SessionUser};

pub use state::AuthState;

pub use storage::{
    CacheData, CacheStore, DataStore, InMemoryCacheStore, SharedCacheStore, StorageError,
    cache_store_from_env, data_store_from_env, sqlite_memory_store,
};

pub use userdb::{
    EMAIL_MAX_LEN, NAME_MAX_LEN, PASSWORD_MIN_LEN, User, UserError, UserSearchField, UserStore,
    normalize_email,
};

pub use utils::{UtilError, gen_random_string};
