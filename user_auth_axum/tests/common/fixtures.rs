use user_auth::{SessionConfig, SignupRequest};
use user_auth_axum::PagesConfig;

pub const TEST_PASSWORD: &str = "password";

/// Accounts seeded into every test server
pub struct TestUsers;

impl TestUsers {
    /// Administrator, created first
    pub fn admin() -> TestUser {
        TestUser {
            name: "Michael Example".to_string(),
            email: "michael@example.com".to_string(),
        }
    }

    pub fn archer() -> TestUser {
        TestUser {
            name: "Sterling Archer".to_string(),
            email: "duchess@example.gov".to_string(),
        }
    }

    pub fn lana() -> TestUser {
        TestUser {
            name: "Lana Kane".to_string(),
            email: "hands@example.gov".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TestUser {
    pub name: String,
    pub email: String,
}

impl TestUser {
    pub fn signup(&self) -> SignupRequest {
        SignupRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            password: TEST_PASSWORD.to_string(),
            password_confirmation: TEST_PASSWORD.to_string(),
        }
    }
}

/// Plain-http cookies so the client sends them back
pub fn test_session_config() -> SessionConfig {
    SessionConfig {
        cookie_name: "sid".to_string(),
        max_age: 600,
        secure: false,
        secret: b"integration-test-secret".to_vec(),
    }
}

pub fn test_pages_config() -> PagesConfig {
    PagesConfig {
        app_title: "Sample App".to_string(),
        users_per_page: 30,
    }
}
