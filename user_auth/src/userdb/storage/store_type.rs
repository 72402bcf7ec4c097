use std::sync::Arc;

use crate::storage::DataStore;
use crate::userdb::{
    errors::UserError,
    types::{User, UserSearchField},
};

use super::postgres::*;
use super::sqlite::*;

/// Handle to the users table on whichever backend the data store selects.
#[derive(Clone)]
pub struct UserStore {
    data: Arc<dyn DataStore>,
}

impl UserStore {
    pub fn new(data: Arc<dyn DataStore>) -> Self {
        Self { data }
    }

    /// Initialize the user database tables
    pub async fn init(&self) -> Result<(), UserError> {
        match (self.data.as_sqlite(), self.data.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                validate_user_tables_sqlite(pool).await?;
                Ok(())
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_user_tables_postgres(pool).await?;
                Ok(())
            }
            _ => Err(UserError::Storage("Unsupported database type".to_string())),
        }
    }

    pub async fn count_users(&self) -> Result<i64, UserError> {
        if let Some(pool) = self.data.as_sqlite() {
            count_users_sqlite(pool).await
        } else if let Some(pool) = self.data.as_postgres() {
            count_users_postgres(pool).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Users in signup order, `limit` rows starting at `offset`
    #[tracing::instrument(skip(self))]
    pub async fn get_users_page(&self, offset: i64, limit: i64) -> Result<Vec<User>, UserError> {
        let offset = offset.max(0);
        let limit = limit.max(0);

        if let Some(pool) = self.data.as_sqlite() {
            get_users_page_sqlite(pool, offset, limit).await
        } else if let Some(pool) = self.data.as_postgres() {
            get_users_page_postgres(pool, offset, limit).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Get a user by their ID
    #[tracing::instrument(skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: &str) -> Result<Option<User>, UserError> {
        self.get_user_by(UserSearchField::Id(id.to_string())).await
    }

    #[tracing::instrument(skip(self), fields(user_field = %field))]
    pub async fn get_user_by(&self, field: UserSearchField) -> Result<Option<User>, UserError> {
        let field = match field {
            UserSearchField::Email(email) => UserSearchField::Email(email.trim().to_lowercase()),
            other => other,
        };

        let result = if let Some(pool) = self.data.as_sqlite() {
            get_user_by_field_sqlite(pool, &field).await
        } else if let Some(pool) = self.data.as_postgres() {
            get_user_by_field_postgres(pool, &field).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(Some(_)) => {
                tracing::debug!(found = true, "User lookup completed");
            }
            Ok(None) => {
                tracing::debug!(found = false, "User lookup completed - not found");
            }
            Err(e) => {
                tracing::error!(error = %e, "User lookup failed");
            }
        }

        result
    }

    /// Create or update a user, keyed on `id`
    #[tracing::instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn upsert_user(&self, user: User) -> Result<User, UserError> {
        let result = if let Some(pool) = self.data.as_sqlite() {
            upsert_user_sqlite(pool, user).await
        } else if let Some(pool) = self.data.as_postgres() {
            upsert_user_postgres(pool, user).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(user) => {
                tracing::info!(
                    user_id = %user.id,
                    is_admin = user.is_admin,
                    sequence_number = user.sequence_number,
                    "User upsert completed successfully"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "User upsert failed");
            }
        }

        result
    }

    /// Insert a brand-new user. The stored row is an admin exactly when the
    /// table held no users at insert time; `user.is_admin` is ignored.
    #[tracing::instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn create_user(&self, user: User) -> Result<User, UserError> {
        let result = if let Some(pool) = self.data.as_sqlite() {
            insert_user_sqlite(pool, user).await
        } else if let Some(pool) = self.data.as_postgres() {
            insert_user_postgres(pool, user).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(user) => {
                tracing::info!(
                    user_id = %user.id,
                    is_admin = user.is_admin,
                    sequence_number = user.sequence_number,
                    "User created"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "User creation failed");
            }
        }

        result
    }

    /// Returns `false` when no row matched `id`.
    #[tracing::instrument(skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: &str) -> Result<bool, UserError> {
        if let Some(pool) = self.data.as_sqlite() {
            delete_user_sqlite(pool, id).await
        } else if let Some(pool) = self.data.as_postgres() {
            delete_user_postgres(pool, id).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }
}
