use std::sync::Arc;

use tokio::sync::Mutex;

use crate::session::{SessionConfig, SessionManager};
use crate::storage::{
    DataStore, InMemoryCacheStore, SharedCacheStore, cache_store_from_env, data_store_from_env,
    sqlite_memory_store,
};
use crate::userdb::UserStore;

type InitError = Box<dyn std::error::Error + Send + Sync>;

/// Stores shared by every request.
///
/// Built once at startup and handed to the web layer as application state.
#[derive(Clone)]
pub struct AuthState {
    users: UserStore,
    sessions: SessionManager,
}

impl AuthState {
    /// Wire the stores together and create the users table if needed.
    pub async fn new(
        data: Arc<dyn DataStore>,
        cache: SharedCacheStore,
        config: SessionConfig,
    ) -> Result<Self, InitError> {
        let users = UserStore::new(data);
        users.init().await?;
        let sessions = SessionManager::new(cache, users.clone(), config);
        Ok(Self { users, sessions })
    }

    /// Stores selected by the `GENERIC_*_STORE_*` environment variables.
    pub async fn from_env() -> Result<Self, InitError> {
        let data = data_store_from_env()?;
        let cache = cache_store_from_env().await?;
        Self::new(data, cache, SessionConfig::default()).await
    }

    /// Private in-memory stores, for tests and demos.
    pub async fn in_memory(config: SessionConfig) -> Result<Self, InitError> {
        let cache: SharedCacheStore = Arc::new(Mutex::new(Box::new(InMemoryCacheStore::new())));
        Self::new(sqlite_memory_store()?, cache, config).await
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }
}
