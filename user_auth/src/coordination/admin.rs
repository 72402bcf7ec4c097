use crate::session::SessionUser;
use crate::userdb::{
    User, UserSearchField, UserStore, hash_password, normalize_email, validate_email,
    validate_name, validate_password,
};

use super::errors::CoordinationError;

/// One page of the user index
#[derive(Debug, Clone)]
pub struct UsersPage {
    pub users: Vec<User>,
    /// 1-based, clamped to the available pages
    pub page: i64,
    pub total_pages: i64,
    pub total_users: i64,
}

impl UsersPage {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

pub async fn get_user(users: &UserStore, user_id: &str) -> Result<Option<User>, CoordinationError> {
    users
        .get_user(user_id)
        .await
        .map_err(|e| CoordinationError::Database(e.to_string()))
}

/// Users in signup order, `per_page` at a time. Out-of-range pages are
/// clamped to the nearest existing page.
pub async fn list_users_page(
    users: &UserStore,
    page: i64,
    per_page: i64,
) -> Result<UsersPage, CoordinationError> {
    let per_page = per_page.max(1);
    let total_users = users.count_users().await?;
    let total_pages = page_count(total_users, per_page);
    let page = page.clamp(1, total_pages);

    let users = users.get_users_page((page - 1) * per_page, per_page).await?;

    Ok(UsersPage {
        users,
        page,
        total_pages,
        total_users,
    })
}

/// Pages needed for `total_users` rows, at least one.
fn page_count(total_users: i64, per_page: i64) -> i64 {
    let full = total_users / per_page;
    (full + i64::from(total_users % per_page != 0)).max(1)
}

/// Delete `user_id` on behalf of `admin`.
///
/// The acting user's role is re-read from the database so a revoked
/// administrator cannot act on a stale identity. Administrators cannot
/// delete themselves.
pub async fn delete_user_account_admin(
    users: &UserStore,
    admin: &SessionUser,
    user_id: &str,
) -> Result<(), CoordinationError> {
    let actor = users.get_user(&admin.id).await?;
    if !actor.is_some_and(|a| a.is_admin) {
        tracing::debug!("User is not authorized to delete user accounts");
        return Err(CoordinationError::Unauthorized.log());
    }

    if admin.id == user_id {
        tracing::debug!("Administrators cannot delete their own account");
        return Err(CoordinationError::Unauthorized.log());
    }

    let user = users.get_user(user_id).await?.ok_or_else(|| {
        CoordinationError::ResourceNotFound {
            resource_type: "User".to_string(),
            resource_id: user_id.to_string(),
        }
        .log()
    })?;

    tracing::debug!("Deleting user account: {:#?}", user);

    users.delete_user(user_id).await?;

    tracing::info!(
        "Admin user: {} deleted user account {}",
        admin.id,
        user_id
    );
    Ok(())
}

/// Make sure an administrator with `email` exists, creating or promoting it.
///
/// Used to seed deployments; an existing account keeps its password.
pub async fn ensure_admin_user(
    users: &UserStore,
    name: &str,
    email: &str,
    password: &str,
) -> Result<User, CoordinationError> {
    let email = normalize_email(email);

    if let Some(mut existing) = users
        .get_user_by(UserSearchField::Email(email.clone()))
        .await?
    {
        if existing.is_admin {
            return Ok(existing);
        }
        existing.is_admin = true;
        let user = users.upsert_user(existing).await?;
        tracing::info!(user_id = %user.id, "Promoted existing user to administrator");
        return Ok(user);
    }

    let mut errors = validate_name(name);
    errors.extend(validate_email(&email));
    errors.extend(validate_password(password, password));
    if !errors.is_empty() {
        return Err(CoordinationError::Validation(errors).log());
    }

    let mut user = User::new(
        uuid::Uuid::new_v4().to_string(),
        name.trim().to_string(),
        email,
        hash_password(password)?,
    );
    user.is_admin = true;

    let user = users.upsert_user(user).await?;
    tracing::info!(user_id = %user.id, "Created administrator account");
    Ok(user)
}
