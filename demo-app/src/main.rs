use std::env;

use user_auth::ensure_admin_user;
use user_auth_axum::{AuthState, user_auth_router};

mod server;

use server::{init_tracing, spawn_http_server, spawn_https_server};

/// Create the administrator named by `ADMIN_EMAIL`, `ADMIN_NAME` and
/// `ADMIN_PASSWORD` when all three are set.
async fn seed_admin(auth: &AuthState) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (Ok(email), Ok(name), Ok(password)) = (
        env::var("ADMIN_EMAIL"),
        env::var("ADMIN_NAME"),
        env::var("ADMIN_PASSWORD"),
    ) else {
        tracing::debug!("ADMIN_* not set; skipping admin seeding");
        return Ok(());
    };

    let admin = ensure_admin_user(auth.users(), &name, &email, &password).await?;
    tracing::info!(user_id = %admin.id, "Administrator available: {}", admin.email);
    Ok(())
}

fn port_from_env(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    init_tracing("demo_app");

    let auth = AuthState::from_env().await?;
    seed_admin(&auth).await?;

    let app = user_auth_router(auth);

    let http = spawn_http_server(port_from_env("PORT", 3000), app.clone());

    match (env::var("TLS_CERT_FILE"), env::var("TLS_KEY_FILE")) {
        (Ok(cert), Ok(key)) => {
            let https =
                spawn_https_server(port_from_env("HTTPS_PORT", 3443), app, &cert, &key).await?;
            let _ = tokio::join!(http, https);
        }
        _ => {
            let _ = http.await;
        }
    }
    Ok(())
}
