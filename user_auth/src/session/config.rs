use std::env;
use std::fmt;
use std::sync::LazyLock;

static SESSION_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    env::var("SESSION_COOKIE_NAME")
        .ok()
        .unwrap_or("__Host-SessionId".to_string())
});

/// Browsers cap cookie lifetimes at 400 days
const MAX_SESSION_MAX_AGE: u64 = 400 * 24 * 60 * 60;

const DEFAULT_SESSION_MAX_AGE: u64 = 3600;

static SESSION_COOKIE_MAX_AGE: LazyLock<u64> =
    LazyLock::new(|| parse_max_age(env::var("SESSION_COOKIE_MAX_AGE").ok().as_deref()));

static SESSION_COOKIE_SECURE: LazyLock<bool> = LazyLock::new(|| {
    env::var("SESSION_COOKIE_SECURE")
        .ok()
        .and_then(|s| parse_flag(&s))
        .unwrap_or(true)
});

static AUTH_SERVER_SECRET: LazyLock<Vec<u8>> =
    LazyLock::new(|| match env::var("AUTH_SERVER_SECRET") {
        Ok(secret) => secret.into_bytes(),
        Err(_) => {
            tracing::warn!("AUTH_SERVER_SECRET is not set, using the development default");
            "default_secret_key_change_in_production"
                .to_string()
                .into_bytes()
        }
    });

fn parse_max_age(value: Option<&str>) -> u64 {
    match value.map(|v| v.trim().parse::<u64>()) {
        None => DEFAULT_SESSION_MAX_AGE,
        Some(Ok(secs)) if (1..=MAX_SESSION_MAX_AGE).contains(&secs) => secs,
        Some(_) => {
            tracing::warn!(
                "SESSION_COOKIE_MAX_AGE must be between 1 and {} seconds, using {}",
                MAX_SESSION_MAX_AGE,
                DEFAULT_SESSION_MAX_AGE
            );
            DEFAULT_SESSION_MAX_AGE
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Session cookie and signing settings.
///
/// `Default` reads the `SESSION_COOKIE_*` and `AUTH_SERVER_SECRET`
/// environment variables once per process.
#[derive(Clone)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session id
    pub cookie_name: String,
    /// Session lifetime in seconds
    pub max_age: u64,
    /// Whether cookies carry the `Secure` attribute
    pub secure: bool,
    /// HMAC key for signed cookies
    pub secret: Vec<u8>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: SESSION_COOKIE_NAME.clone(),
            max_age: *SESSION_COOKIE_MAX_AGE,
            secure: *SESSION_COOKIE_SECURE,
            secret: AUTH_SERVER_SECRET.clone(),
        }
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("cookie_name", &self.cookie_name)
            .field("max_age", &self.max_age)
            .field("secure", &self.secure)
            .field("secret", &"[redacted]")
            .finish()
    }
}
