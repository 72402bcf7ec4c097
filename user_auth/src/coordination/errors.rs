use thiserror::Error;

use crate::session::SessionError;
use crate::userdb::UserError;
use crate::utils::UtilError;

/// Errors that can occur while running a user flow
#[derive(Error, Debug)]
pub enum CoordinationError {
    /// Submitted fields failed validation; messages are shown to the user
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// Unknown e-mail or wrong password
    #[error("Invalid email/password combination")]
    InvalidCredentials,

    /// Unauthorized access error
    #[error("Unauthorized access")]
    Unauthorized,

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Resource not found with context
    #[error("Resource not found: {resource_type} {resource_id}")]
    ResourceNotFound {
        resource_type: String,
        resource_id: String,
    },

    /// Error from the user database operations
    #[error("User error: {0}")]
    UserError(UserError),

    /// Error from Session operations
    #[error("Session error: {0}")]
    SessionError(SessionError),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    UtilsError(UtilError),
}

impl CoordinationError {
    /// Log the error and return self
    pub fn log(self) -> Self {
        match &self {
            Self::Validation(messages) => tracing::debug!("Validation failed: {:?}", messages),
            Self::InvalidCredentials => tracing::warn!("Invalid email/password combination"),
            Self::Unauthorized => tracing::warn!("Unauthorized access"),
            Self::Database(msg) => tracing::error!("Database error: {}", msg),
            Self::ResourceNotFound {
                resource_type,
                resource_id,
            } => tracing::warn!("Resource not found: {} {}", resource_type, resource_id),
            Self::UserError(err) => tracing::error!("User error: {}", err),
            Self::SessionError(err) => tracing::error!("Session error: {}", err),
            Self::UtilsError(err) => tracing::error!("Utils error: {}", err),
        }
        self
    }
}

// Custom From implementations that automatically log errors

impl From<UserError> for CoordinationError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Conflict(message) => Self::Validation(vec![message]),
            err => {
                let error = Self::UserError(err);
                tracing::error!("{}", error);
                error
            }
        }
    }
}

impl From<SessionError> for CoordinationError {
    fn from(err: SessionError) -> Self {
        let error = Self::SessionError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<UtilError> for CoordinationError {
    fn from(err: UtilError) -> Self {
        let error = Self::UtilsError(err);
        tracing::error!("{}", error);
        error
    }
}
