use crate::userdb::{User, UserSearchField, UserStore, verify_password};

use super::errors::CoordinationError;

/// Check an e-mail / password pair. E-mail matching ignores case.
#[tracing::instrument(skip(users, password))]
pub async fn authenticate(
    users: &UserStore,
    email: &str,
    password: &str,
) -> Result<User, CoordinationError> {
    let user = users
        .get_user_by(UserSearchField::Email(email.to_string()))
        .await?;

    match user {
        Some(user) if verify_password(&user.password_hash, password) => {
            tracing::info!(user_id = %user.id, "Credentials verified");
            Ok(user)
        }
        _ => Err(CoordinationError::InvalidCredentials.log()),
    }
}
