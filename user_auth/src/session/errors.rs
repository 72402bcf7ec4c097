use thiserror::Error;

use crate::storage::StorageError;
use crate::userdb::UserError;
use crate::utils::UtilError;

#[derive(Debug, Error, Clone)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Cookie error: {0}")]
    Cookie(String),

    #[error("CSRF token error: {0}")]
    CsrfToken(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),

    /// Error from user database operations
    #[error("User error: {0}")]
    User(#[from] UserError),
}

impl From<StorageError> for SessionError {
    fn from(err: StorageError) -> Self {
        tracing::error!("Session storage error: {}", err);
        Self::Storage(err.to_string())
    }
}
