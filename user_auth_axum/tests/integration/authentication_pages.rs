use crate::common::mock_browser::redirect_location;
use crate::common::test_server::TestResult;
use crate::common::{MockBrowser, TestServer, TestUsers};
use reqwest::StatusCode;

/// Login, logout and the navigation links that depend on them

#[tokio::test]
async fn test_login_page_for_visitor() -> TestResult {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url);

    let page = browser.visit("/login").await?;

    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.title().as_deref(), Some("Log in | Sample App"));
    assert!(page.has_link("/login", "Log in"));
    assert!(!page.has_link_text("Log out"));
    assert!(!page.has_alert());
    Ok(())
}

#[tokio::test]
async fn test_invalid_login_shows_alert_once() -> TestResult {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url);

    // Given a login with a wrong password
    let response = browser
        .log_in_with(&TestUsers::archer().email, "not-the-password")
        .await?;

    // Then the login form is rendered again with an alert
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await?;
    assert!(body.contains("<title>Log in | Sample App</title>"));
    assert!(body.contains(r#"class="alert alert-error""#));
    assert!(body.contains("Invalid email/password combination"));
    assert!(body.contains(r#"value="duchess@example.gov""#));

    // When the visitor moves on to another page
    let home = browser.visit("/").await?;

    // Then the alert is gone
    assert!(!home.has_alert());
    assert!(home.has_link("/login", "Log in"));
    Ok(())
}

#[tokio::test]
async fn test_login_with_unknown_email_is_rejected() -> TestResult {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url);

    let response = browser.log_in_as("nobody@example.com").await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await?.contains("alert-error"));
    assert!(!browser.visit("/").await?.has_link_text("Log out"));
    Ok(())
}

#[tokio::test]
async fn test_login_then_logout_swaps_links() -> TestResult {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url);
    let archer = server.user(&TestUsers::archer().email).clone();
    let profile = format!("/users/{}", archer.id);
    let settings = format!("/users/{}/edit", archer.id);

    // Given a successful login
    let response = browser.log_in_as(&archer.email).await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(redirect_location(&response).as_deref(), Some(profile.as_str()));

    // Then the profile page shows the logged-in navigation
    let page = browser.follow(response).await?;
    assert_eq!(page.title().as_deref(), Some("Sterling Archer | Sample App"));
    assert!(page.has_link(&profile, "Profile"));
    assert!(page.has_link(&settings, "Settings"));
    assert!(page.has_link("/users", "Users"));
    assert!(page.has_link("/logout", "Log out"));
    assert!(!page.has_link("/login", "Log in"));

    // When the user logs out through the nav link
    let token = page.csrf_token().ok_or("missing csrf token")?;
    let response = browser.click_data_method("/logout", "delete", &token).await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(redirect_location(&response).as_deref(), Some("/"));

    // Then the visitor navigation is back
    let page = browser.follow(response).await?;
    assert!(page.has_link("/login", "Log in"));
    assert!(!page.has_link_text("Log out"));
    assert!(!page.has_link_text("Profile"));

    // And protected pages require a login again
    let response = browser.get(&settings).await?;
    assert_eq!(redirect_location(&response).as_deref(), Some("/login"));
    Ok(())
}

#[tokio::test]
async fn test_logout_without_session_redirects_home() -> TestResult {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url);

    // A second window that already logged out sends the same request
    let response = browser.delete("/logout", None).await?;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(redirect_location(&response).as_deref(), Some("/"));
    Ok(())
}

#[tokio::test]
async fn test_logout_requires_csrf_token() -> TestResult {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url);
    browser.log_in_as(&TestUsers::lana().email).await?;

    let response = browser.delete("/logout", None).await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Still logged in
    assert!(browser.visit("/").await?.has_link_text("Log out"));
    Ok(())
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() -> TestResult {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url);

    let response = browser.log_in_as("DUCHESS@Example.GOV").await?;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let page = browser.follow(response).await?;
    assert!(page.has_link_text("Log out"));
    Ok(())
}

#[tokio::test]
async fn test_admin_navigation() -> TestResult {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url);

    let response = browser.log_in_as(&TestUsers::admin().email).await?;
    let page = browser.follow(response).await?;

    assert!(page.has_link("/users", "Users"));
    assert!(page.has_link("/logout", "Log out"));
    assert!(!page.has_link("/login", "Log in"));
    Ok(())
}

#[tokio::test]
async fn test_login_page_sends_logged_in_user_to_profile() -> TestResult {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url);
    let lana = server.user(&TestUsers::lana().email).clone();
    browser.log_in_as(&lana.email).await?;

    let response = browser.get("/login").await?;

    assert_eq!(
        redirect_location(&response),
        Some(format!("/users/{}", lana.id))
    );
    Ok(())
}

#[tokio::test]
async fn test_relogin_replaces_previous_identity() -> TestResult {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url);
    let archer = server.user(&TestUsers::archer().email).clone();
    let lana = server.user(&TestUsers::lana().email).clone();

    browser.log_in_as(&archer.email).await?;
    // Log in again as someone else without logging out
    let response = browser
        .post_form("/login", &[("email", lana.email.as_str()), ("password", "password")])
        .await?;
    assert_eq!(
        redirect_location(&response),
        Some(format!("/users/{}", lana.id))
    );

    let page = browser.visit("/").await?;
    assert!(page.has_link(&format!("/users/{}", lana.id), "Profile"));
    assert!(!page.has_link(&format!("/users/{}", archer.id), "Profile"));
    Ok(())
}
