mod config;
mod types;

pub(crate) use config::DB_TABLE_PREFIX;
pub use config::{data_store_from_env, sqlite_memory_store};
pub use types::DataStore;
