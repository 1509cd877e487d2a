#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use moviesinfo_api::config::AppConfig;
use moviesinfo_api::database::MemoryStore;
use moviesinfo_api::AppState;
use reqwest::{Response, StatusCode};
use serde_json::{json, Value};

pub const PASSWORD: &str = "popcorn123";

pub struct TestServer {
    pub base_url: String,
    pub store: Arc<MemoryStore>,
    pub client: reqwest::Client,
}

/// Start the router on a free port inside the current test runtime, backed
/// by a fresh seeded in-memory store.
pub async fn spawn_server() -> Result<TestServer> {
    spawn_server_with(|state| state).await
}

/// Like [`spawn_server`], with a hook to adjust the state before serving.
pub async fn spawn_server_with(customize: impl FnOnce(AppState) -> AppState) -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let mut config = AppConfig::development();
    // Lowest bcrypt cost keeps registration fast in tests
    config.security.bcrypt_cost = 4;

    let store = Arc::new(MemoryStore::seeded()?);
    let state = customize(AppState::new(Arc::new(config), store.clone(), store.clone())?);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind {}", base_url))?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, moviesinfo_api::app(state)).await;
    });

    Ok(TestServer {
        base_url,
        store,
        client: reqwest::Client::new(),
    })
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(&self, username: &str) -> Result<Response> {
        let payload = json!({
            "Username": username,
            "Password": PASSWORD,
            "Email": format!("{}@example.com", username.to_lowercase()),
            "Birthday": "1990-05-17"
        });
        Ok(self.client.post(self.url("/users")).json(&payload).send().await?)
    }

    /// Register a user and return a bearer token for it.
    pub async fn register_and_login(&self, username: &str) -> Result<String> {
        let res = self.register(username).await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "register failed: {}", res.status());

        let res = self
            .client
            .post(self.url("/login"))
            .json(&json!({ "Username": username, "Password": PASSWORD }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());

        let body = res.json::<Value>().await?;
        body["token"]
            .as_str()
            .map(str::to_string)
            .context("login response missing token")
    }

    pub async fn get(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).bearer_auth(token).send().await?)
    }
}
