use chrono::Utc;
use serde::Deserialize;
use std::fmt;

use crate::userdb::{
    User, UserSearchField, UserStore, hash_password, normalize_email, validate_email,
    validate_name, validate_password,
};

use super::errors::CoordinationError;

/// Fields submitted by the signup form
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Fields submitted by the profile edit form.
///
/// A blank password leaves the current one unchanged.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for ProfileUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileUpdate")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("changes_password", &!self.password.is_empty())
            .finish_non_exhaustive()
    }
}

async fn email_taken_by_other(
    users: &UserStore,
    email: &str,
    user_id: Option<&str>,
) -> Result<bool, CoordinationError> {
    let existing = users
        .get_user_by(UserSearchField::Email(email.to_string()))
        .await?;
    Ok(existing.is_some_and(|u| Some(u.id.as_str()) != user_id))
}

/// Create an account from the signup form.
///
/// The first account in an empty directory becomes an administrator.
#[tracing::instrument(skip(users))]
pub async fn register_user(
    users: &UserStore,
    request: &SignupRequest,
) -> Result<User, CoordinationError> {
    let mut errors = validate_name(&request.name);
    errors.extend(validate_email(&request.email));
    errors.extend(validate_password(
        &request.password,
        &request.password_confirmation,
    ));

    let email = normalize_email(&request.email);
    if errors.is_empty() && email_taken_by_other(users, &email, None).await? {
        errors.push("Email has already been taken".to_string());
    }
    if !errors.is_empty() {
        return Err(CoordinationError::Validation(errors).log());
    }

    let user = User::new(
        uuid::Uuid::new_v4().to_string(),
        request.name.trim().to_string(),
        email,
        hash_password(&request.password)?,
    );
    let user = users.create_user(user).await?;
    tracing::info!(user_id = %user.id, is_admin = user.is_admin, "User registered");
    Ok(user)
}

/// Apply a profile edit to `user_id`'s own record.
#[tracing::instrument(skip(users))]
pub async fn update_user_account(
    users: &UserStore,
    user_id: &str,
    update: &ProfileUpdate,
) -> Result<User, CoordinationError> {
    let mut user = users.get_user(user_id).await?.ok_or_else(|| {
        CoordinationError::ResourceNotFound {
            resource_type: "User".to_string(),
            resource_id: user_id.to_string(),
        }
        .log()
    })?;

    let changes_password = !update.password.is_empty() || !update.password_confirmation.is_empty();

    let mut errors = validate_name(&update.name);
    errors.extend(validate_email(&update.email));
    if changes_password {
        errors.extend(validate_password(
            &update.password,
            &update.password_confirmation,
        ));
    }

    let email = normalize_email(&update.email);
    if errors.is_empty() && email_taken_by_other(users, &email, Some(user_id)).await? {
        errors.push("Email has already been taken".to_string());
    }
    if !errors.is_empty() {
        return Err(CoordinationError::Validation(errors).log());
    }

    user.name = update.name.trim().to_string();
    user.email = email;
    if changes_password {
        user.password_hash = hash_password(&update.password)?;
    }
    user.updated_at = Utc::now();

    let user = users.upsert_user(user).await?;
    tracing::info!(user_id = %user.id, changes_password, "User updated");
    Ok(user)
}
