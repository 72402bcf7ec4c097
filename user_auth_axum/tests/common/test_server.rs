use std::collections::HashMap;
use tokio::task::JoinHandle;
use user_auth::{User, ensure_admin_user, register_user};
use user_auth_axum::{AuthState, PagesConfig, user_auth_router_with};

use super::fixtures::{TEST_PASSWORD, TestUsers, test_pages_config, test_session_config};

pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// The full router served on an ephemeral port
///
/// Seeds the administrator from [`TestUsers::admin`] plus two regular
/// users, all with [`TEST_PASSWORD`].
pub struct TestServer {
    server_handle: JoinHandle<()>,
    pub base_url: String,
    pub auth: AuthState,
    users: HashMap<String, User>,
}

impl TestServer {
    pub async fn start() -> TestResult<Self> {
        Self::start_with(test_pages_config()).await
    }

    pub async fn start_with(pages: PagesConfig) -> TestResult<Self> {
        let auth = AuthState::in_memory(test_session_config()).await?;

        let admin = TestUsers::admin();
        let mut users = HashMap::new();
        let seeded = ensure_admin_user(auth.users(), &admin.name, &admin.email, TEST_PASSWORD)
            .await?;
        users.insert(seeded.email.clone(), seeded);
        for user in [TestUsers::archer(), TestUsers::lana()] {
            let created = register_user(auth.users(), &user.signup()).await?;
            users.insert(created.email.clone(), created);
        }

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);

        let app = user_auth_router_with(auth.clone(), pages);
        let server_handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server stopped: {e}");
            }
        });

        Ok(Self {
            server_handle,
            base_url,
            auth,
            users,
        })
    }

    /// Seeded record for `email`
    pub fn user(&self, email: &str) -> &User {
        &self.users[email]
    }

    pub async fn register(&mut self, name: &str, email: &str) -> TestResult<User> {
        let request = user_auth::SignupRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: TEST_PASSWORD.to_string(),
            password_confirmation: TEST_PASSWORD.to_string(),
        };
        let created = register_user(self.auth.users(), &request).await?;
        self.users.insert(created.email.clone(), created.clone());
        Ok(created)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.server_handle.abort();
    }
}
