//! Database connection configuration

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::{env, str::FromStr, sync::Arc, sync::LazyLock};

use crate::storage::errors::StorageError;

use super::types::{DataStore, PostgresDataStore, SqliteDataStore};

static GENERIC_DATA_STORE_TYPE: LazyLock<String> = LazyLock::new(|| {
    env::var("GENERIC_DATA_STORE_TYPE").unwrap_or_else(|_| "sqlite".to_string())
});

static GENERIC_DATA_STORE_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("GENERIC_DATA_STORE_URL").unwrap_or_else(|_| "sqlite:user_auth.db".to_string())
});

/// Table prefix from environment variable
pub(crate) static DB_TABLE_PREFIX: LazyLock<String> =
    LazyLock::new(|| env::var("DB_TABLE_PREFIX").unwrap_or_else(|_| "ua_".to_string()));

/// Build the data store selected by `GENERIC_DATA_STORE_TYPE`.
///
/// Pools connect lazily; the first query surfaces connection problems.
pub fn data_store_from_env() -> Result<Arc<dyn DataStore>, StorageError> {
    build_data_store(
        GENERIC_DATA_STORE_TYPE.as_str(),
        GENERIC_DATA_STORE_URL.as_str(),
    )
}

/// A private in-memory SQLite database.
///
/// The pool holds exactly one connection that never idles out, since every
/// SQLite connection to `:memory:` opens a separate database.
pub fn sqlite_memory_store() -> Result<Arc<dyn DataStore>, StorageError> {
    let opts = SqliteConnectOptions::from_str("sqlite::memory:")?;
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_lazy_with(opts);
    Ok(Arc::new(SqliteDataStore { pool }))
}

fn build_data_store(store_type: &str, store_url: &str) -> Result<Arc<dyn DataStore>, StorageError> {
    tracing::info!(
        "Initializing data store with type: {}, url: {}",
        store_type,
        store_url
    );

    let store: Arc<dyn DataStore> = match store_type {
        "sqlite" => {
            let opts = SqliteConnectOptions::from_str(store_url)?.create_if_missing(true);
            Arc::new(SqliteDataStore {
                pool: sqlx::sqlite::SqlitePool::connect_lazy_with(opts),
            })
        }
        "postgres" => Arc::new(PostgresDataStore {
            pool: sqlx::PgPool::connect_lazy(store_url)?,
        }),
        t => {
            return Err(StorageError::Config(format!(
                "Unsupported store type: {t}. Supported types are 'sqlite' and 'postgres'"
            )));
        }
    };

    Ok(store)
}
