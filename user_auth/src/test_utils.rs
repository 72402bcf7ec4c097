//! Shared fixtures for unit tests. Every call builds a private in-memory
//! database, so tests never see each other's rows.

use crate::storage::sqlite_memory_store;
use crate::userdb::{User, UserStore, hash_password};

pub(crate) async fn user_store() -> UserStore {
    let users = UserStore::new(sqlite_memory_store().expect("in-memory store"));
    users.init().await.expect("users table");
    users
}

/// Insert a non-admin user with a real password hash.
pub(crate) async fn seed_user(users: &UserStore, name: &str, email: &str, password: &str) -> User {
    let user = User::new(
        uuid::Uuid::new_v4().to_string(),
        name.to_string(),
        email.to_lowercase(),
        hash_password(password).expect("hash"),
    );
    users.upsert_user(user).await.expect("seed user")
}
