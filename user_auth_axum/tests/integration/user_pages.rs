use crate::common::mock_browser::redirect_location;
use crate::common::test_server::TestResult;
use crate::common::{MockBrowser, TestServer, TestUsers, test_pages_config};
use reqwest::StatusCode;
use user_auth_axum::PagesConfig;

/// Protected user pages: redirects for visitors, owners and administrators

fn profile_form<'a>(name: &'a str, email: &'a str, token: &'a str) -> [(&'a str, &'a str); 5] {
    [
        ("name", name),
        ("email", email),
        ("password", ""),
        ("password_confirmation", ""),
        ("authenticity_token", token),
    ]
}

#[tokio::test]
async fn test_visitor_is_sent_to_login_from_edit_and_index() -> TestResult {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url);
    let archer = server.user(&TestUsers::archer().email).clone();

    for path in [format!("/users/{}/edit", archer.id), "/users".to_string()] {
        let response = browser.get(&path).await?;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "GET {path}");
        assert_eq!(redirect_location(&response).as_deref(), Some("/login"));

        let page = browser.follow(response).await?;
        assert_eq!(page.title().as_deref(), Some("Log in | Sample App"));
        assert!(page.body.contains("Please log in."));
    }
    Ok(())
}

#[tokio::test]
async fn test_visitor_update_and_destroy_are_sent_to_login() -> TestResult {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url);
    let archer = server.user(&TestUsers::archer().email).clone();
    let path = format!("/users/{}", archer.id);

    let response = browser
        .patch_form(&path, &profile_form("Hacked", "hacked@example.com", ""))
        .await?;
    assert_eq!(redirect_location(&response).as_deref(), Some("/login"));

    let response = browser.delete(&path, None).await?;
    assert_eq!(redirect_location(&response).as_deref(), Some("/login"));

    let response = browser.click_data_method(&path, "delete", "forged").await?;
    assert_eq!(redirect_location(&response).as_deref(), Some("/login"));

    // Nothing changed
    let stored = server.auth.users().get_user(&archer.id).await?.ok_or("user vanished")?;
    assert_eq!(stored.name, archer.name);
    Ok(())
}

#[tokio::test]
async fn test_login_returns_to_requested_page() -> TestResult {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url);
    let archer = server.user(&TestUsers::archer().email).clone();
    let settings = format!("/users/{}/edit", archer.id);

    // Given a visitor bounced from the settings page
    let response = browser.get(&settings).await?;
    assert_eq!(redirect_location(&response).as_deref(), Some("/login"));

    // When they log in
    let response = browser.log_in_as(&archer.email).await?;

    // Then they land on the page they asked for
    assert_eq!(redirect_location(&response).as_deref(), Some(settings.as_str()));
    let page = browser.follow(response).await?;
    assert_eq!(page.title().as_deref(), Some("Edit user | Sample App"));

    // And the remembered page is used only once
    browser.click_data_method("/logout", "delete", &page.csrf_token().ok_or("no token")?).await?;
    let response = browser.log_in_as(&archer.email).await?;
    assert_eq!(
        redirect_location(&response),
        Some(format!("/users/{}", archer.id))
    );
    Ok(())
}

#[tokio::test]
async fn test_other_user_cannot_edit_or_update() -> TestResult {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url);
    let archer = server.user(&TestUsers::archer().email).clone();
    let lana = server.user(&TestUsers::lana().email).clone();

    // Given Lana is logged in
    browser.log_in_as(&lana.email).await?;
    let token = browser.csrf_token().await?;

    // When she opens Archer's settings
    let response = browser.get(&format!("/users/{}/edit", archer.id)).await?;

    // Then she is sent to the landing page without the edit form
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(redirect_location(&response).as_deref(), Some("/"));
    let page = browser.follow(response).await?;
    assert!(!page.body.contains("Edit user"));

    // When she submits an update for Archer
    let response = browser
        .patch_form(
            &format!("/users/{}", archer.id),
            &profile_form("Hacked", "hacked@example.com", &token),
        )
        .await?;

    // Then she is redirected home and Archer's record is untouched
    assert_eq!(redirect_location(&response).as_deref(), Some("/"));
    assert!(!response.text().await?.contains("Edit user"));
    let stored = server.auth.users().get_user(&archer.id).await?.ok_or("user vanished")?;
    assert_eq!(stored.name, archer.name);
    assert_eq!(stored.email, archer.email);
    Ok(())
}

#[tokio::test]
async fn test_owner_updates_profile() -> TestResult {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url);
    let archer = server.user(&TestUsers::archer().email).clone();
    let profile = format!("/users/{}", archer.id);

    browser.log_in_as(&archer.email).await?;
    let edit = browser.visit(&format!("{profile}/edit")).await?;
    assert_eq!(edit.title().as_deref(), Some("Edit user | Sample App"));
    let token = edit.csrf_token().ok_or("no token")?;

    // Submitted the way the HTML form does it
    let mut form = profile_form("Sterling Malory Archer", "Sterling@Example.gov", &token).to_vec();
    form.push(("_method", "patch"));
    let response = browser.post_form(&profile, &form).await?;

    assert_eq!(redirect_location(&response).as_deref(), Some(profile.as_str()));
    let page = browser.follow(response).await?;
    assert!(page.body.contains("Profile updated"));
    assert_eq!(
        page.title().as_deref(),
        Some("Sterling Malory Archer | Sample App")
    );

    let stored = server.auth.users().get_user(&archer.id).await?.ok_or("user vanished")?;
    assert_eq!(stored.email, "sterling@example.gov");

    // Blank password kept the old one
    browser.click_data_method("/logout", "delete", &token).await?;
    let response = browser.log_in_as("sterling@example.gov").await?;
    assert_eq!(redirect_location(&response).as_deref(), Some(profile.as_str()));
    Ok(())
}

#[tokio::test]
async fn test_invalid_update_rerenders_form() -> TestResult {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url);
    let archer = server.user(&TestUsers::archer().email).clone();

    browser.log_in_as(&archer.email).await?;
    let token = browser.csrf_token().await?;

    let response = browser
        .patch_form(
            &format!("/users/{}", archer.id),
            &profile_form("", "not-an-email", &token),
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.text().await?;
    assert!(body.contains("<title>Edit user | Sample App</title>"));
    assert!(body.contains("error_explanation"));
    Ok(())
}

#[tokio::test]
async fn test_owner_update_without_token_is_forbidden() -> TestResult {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url);
    let archer = server.user(&TestUsers::archer().email).clone();
    browser.log_in_as(&archer.email).await?;

    let response = browser
        .patch_form(
            &format!("/users/{}", archer.id),
            &profile_form("New Name", &archer.email, "wrong-token"),
        )
        .await?;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn test_non_admin_cannot_delete() -> TestResult {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url);
    let lana = server.user(&TestUsers::lana().email).clone();
    let admin = server.user(&TestUsers::admin().email).clone();

    browser.log_in_as(&lana.email).await?;
    let token = browser.csrf_token().await?;

    let response = browser
        .delete(&format!("/users/{}", admin.id), Some(&token))
        .await?;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(redirect_location(&response).as_deref(), Some("/"));
    assert!(server.auth.users().get_user(&admin.id).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn test_index_lists_users_with_delete_links_for_admin() -> TestResult {
    let server = TestServer::start().await?;
    let admin = server.user(&TestUsers::admin().email).clone();
    let archer = server.user(&TestUsers::archer().email).clone();

    // Regular users see the list without delete links
    let browser = MockBrowser::new(&server.base_url);
    browser.log_in_as(&archer.email).await?;
    let page = browser.visit("/users").await?;
    assert_eq!(page.title().as_deref(), Some("All users | Sample App"));
    assert!(page.has_link(&format!("/users/{}", admin.id), &admin.name));
    assert!(!page.has_link_text("delete"));

    // Administrators get one per other user
    let browser = MockBrowser::new(&server.base_url);
    browser.log_in_as(&admin.email).await?;
    let page = browser.visit("/users").await?;
    assert_eq!(page.delete_links_to(&format!("/users/{}", archer.id)), 1);
    assert_eq!(page.delete_links_to(&format!("/users/{}", admin.id)), 0);
    Ok(())
}

#[tokio::test]
async fn test_admin_deletes_user() -> TestResult {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url);
    let admin = server.user(&TestUsers::admin().email).clone();
    let archer = server.user(&TestUsers::archer().email).clone();

    // Given a logged-in admin and a second browser logged in as Archer
    browser.log_in_as(&admin.email).await?;
    let token = browser.csrf_token().await?;
    let archer_browser = MockBrowser::new(&server.base_url);
    archer_browser.log_in_as(&archer.email).await?;

    // When the admin clicks Archer's delete link
    let response = browser
        .click_data_method(&format!("/users/{}", archer.id), "delete", &token)
        .await?;

    // Then the user is gone and the index says so
    assert_eq!(redirect_location(&response).as_deref(), Some("/users"));
    let page = browser.follow(response).await?;
    assert!(page.body.contains("User deleted"));
    assert!(!page.has_link_text(&archer.name));
    assert!(server.auth.users().get_user(&archer.id).await?.is_none());

    // And Archer's session no longer identifies anyone
    let page = archer_browser.visit("/").await?;
    assert!(page.has_link("/login", "Log in"));
    Ok(())
}

#[tokio::test]
async fn test_admin_cannot_delete_self() -> TestResult {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url);
    let admin = server.user(&TestUsers::admin().email).clone();

    browser.log_in_as(&admin.email).await?;
    let token = browser.csrf_token().await?;

    let response = browser
        .delete(&format!("/users/{}", admin.id), Some(&token))
        .await?;

    assert_eq!(redirect_location(&response).as_deref(), Some("/"));
    assert!(server.auth.users().get_user(&admin.id).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn test_index_paginates() -> TestResult {
    let pages = PagesConfig {
        users_per_page: 2,
        ..test_pages_config()
    };
    let mut server = TestServer::start_with(pages).await?;
    let extra = server.register("Cheryl Tunt", "cheryl@example.com").await?;
    let browser = MockBrowser::new(&server.base_url);
    browser.log_in_as(&extra.email).await?;

    let first = browser.visit("/users").await?;
    assert!(first.body.contains("Page 1 of 2"));
    assert!(first.has_link("/users?page=2", "Next &rarr;"));

    let second = browser.visit("/users?page=2").await?;
    assert!(second.body.contains("Page 2 of 2"));
    assert!(second.has_link(&format!("/users/{}", extra.id), "Cheryl Tunt"));

    // Out of range clamps to the last page
    let clamped = browser.visit("/users?page=99").await?;
    assert!(clamped.body.contains("Page 2 of 2"));
    Ok(())
}

#[tokio::test]
async fn test_signup_logs_in_new_user() -> TestResult {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url);

    let signup = browser.visit("/signup").await?;
    assert_eq!(signup.title().as_deref(), Some("Sign up | Sample App"));

    let response = browser
        .post_form(
            "/users",
            &[
                ("name", "Pam Poovey"),
                ("email", "pam@example.com"),
                ("password", "foobar"),
                ("password_confirmation", "foobar"),
            ],
        )
        .await?;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let page = browser.follow(response).await?;
    assert_eq!(page.title().as_deref(), Some("Pam Poovey | Sample App"));
    assert!(page.body.contains("Welcome to the Sample App!"));
    assert!(page.has_link_text("Log out"));

    // The welcome flash is shown once
    assert!(!browser.visit("/").await?.body.contains("Welcome to the Sample App!"));
    Ok(())
}

#[tokio::test]
async fn test_signup_with_taken_email_rerenders_form() -> TestResult {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url);

    let response = browser
        .post_form(
            "/users",
            &[
                ("name", "Impostor"),
                ("email", "MICHAEL@example.com"),
                ("password", "foobar"),
                ("password_confirmation", "foobar"),
            ],
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.text().await?;
    assert!(body.contains("<title>Sign up | Sample App</title>"));
    assert!(body.contains("error_explanation"));
    Ok(())
}

#[tokio::test]
async fn test_show_unknown_user_is_not_found() -> TestResult {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url);

    let page = browser.visit("/users/no-such-user").await?;

    assert_eq!(page.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_unsupported_method_override() -> TestResult {
    let server = TestServer::start().await?;
    let browser = MockBrowser::new(&server.base_url);
    let archer = server.user(&TestUsers::archer().email).clone();

    let response = browser
        .post_form(&format!("/users/{}", archer.id), &[("_method", "options")])
        .await?;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    Ok(())
}
