mod cache_store;
mod data_store;
mod errors;
mod schema_validation;
mod types;

pub use cache_store::{CacheStore, InMemoryCacheStore, SharedCacheStore, cache_store_from_env};
pub use data_store::{DataStore, data_store_from_env, sqlite_memory_store};
pub use errors::StorageError;
pub use types::CacheData;

pub(crate) use data_store::DB_TABLE_PREFIX;
pub(crate) use schema_validation::{validate_postgres_table_schema, validate_sqlite_table_schema};
