#![allow(dead_code)]

use newsdesk_api::{config::AppConfig, routes, state::AppState};
use newsdesk_core::envelope::ApiEnvelope;
use newsdesk_core::events::bus::EventBus;
use serde::de::DeserializeOwned;
use serde_json::json;
use uuid::Uuid;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-password";
pub const AUTHOR_PASSWORD: &str = "author-password";

/// Boot a server on an ephemeral port and return its base URL.
pub async fn spawn_server() -> String {
    let config = AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        jwt_secret: "integration-test-secret".to_string(),
        token_ttl_secs: 3600,
        event_bus_capacity: 64,
        log_level: "warn".to_string(),
        admin_username: ADMIN_USERNAME.to_string(),
        admin_password: ADMIN_PASSWORD.to_string(),
    };
    let state = AppState::new(config, EventBus::new(64));
    state.seed_admin().await.expect("seed admin");

    let app = routes::build_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

/// Log in and return `(token, user id)`.
pub async fn login(
    client: &reqwest::Client,
    base: &str,
    username: &str,
    password: &str,
) -> (String, Uuid) {
    let resp = client
        .post(format!("{base}/v1/auth/login"))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("login request");
    let body: serde_json::Value = data(resp).await;
    (
        body["token"].as_str().expect("token").to_string(),
        body["userId"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("userId"),
    )
}

/// Register a fresh author account and return `(token, user id)`.
pub async fn register_author(
    client: &reqwest::Client,
    base: &str,
    username: &str,
) -> (String, Uuid) {
    let resp = client
        .post(format!("{base}/v1/auth/register"))
        .json(&json!({ "username": username, "password": AUTHOR_PASSWORD }))
        .send()
        .await
        .expect("register request");
    let body: serde_json::Value = data(resp).await;
    (
        body["token"].as_str().expect("token").to_string(),
        body["userId"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("userId"),
    )
}

/// Unwrap a successful envelope into its data payload.
pub async fn data<T: DeserializeOwned>(resp: reqwest::Response) -> T {
    let env: ApiEnvelope<T> = resp.json().await.expect("envelope body");
    env.into_result().expect("success envelope")
}

/// A draft payload with everything submission validation wants.
pub fn draft_json(title: &str) -> serde_json::Value {
    json!({
        "kind": "article",
        "title": title,
        "body": "Witnesses describe a quiet morning until the sirens began.",
        "category": "politics",
        "region": "eu",
    })
}
