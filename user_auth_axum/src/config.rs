//! Page-level settings for the web layer

use std::sync::LazyLock;

/// Where visitors without a session are sent
pub const LOGIN_URL: &str = "/login";

/// Where logged-in visitors lacking a right are sent
pub const LANDING_URL: &str = "/";

/// Base of every page title
/// Default: "Sample App"
pub static APP_TITLE: LazyLock<String> =
    LazyLock::new(|| std::env::var("APP_TITLE").unwrap_or_else(|_| "Sample App".to_string()));

/// Rows per page on the user index
/// Default: 30, at most 1000
pub static USERS_PER_PAGE: LazyLock<i64> = LazyLock::new(|| {
    parse_per_page(std::env::var("USERS_PER_PAGE").ok().as_deref())
});

const MAX_USERS_PER_PAGE: i64 = 1000;

fn parse_per_page(value: Option<&str>) -> i64 {
    value
        .and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n > 0)
        .map_or(30, |n| n.min(MAX_USERS_PER_PAGE))
}

/// Settings the page handlers read. `Default` takes the environment values.
#[derive(Clone, Debug)]
pub struct PagesConfig {
    pub app_title: String,
    pub users_per_page: i64,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            app_title: APP_TITLE.clone(),
            users_per_page: *USERS_PER_PAGE,
        }
    }
}

impl PagesConfig {
    /// `"{page} | {app}"`, or just the app title for an unnamed page.
    pub fn full_title(&self, page_title: &str) -> String {
        if page_title.is_empty() {
            self.app_title.clone()
        } else {
            format!("{page_title} | {}", self.app_title)
        }
    }
}
