#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

use document_api::auth::{issue_token, Claims, JwtTokenVerifier};
use document_api::config::AppConfig;
use document_api::database::{Document, InMemoryDocumentStore};
use document_api::AppState;

pub const SECRET: &str = "integration-test-secret";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub store: Arc<InMemoryDocumentStore>,
}

impl TestServer {
    /// Serve the application on an unused port, backed by a fresh in-memory store
    pub async fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryDocumentStore::new());
        let state = AppState {
            verifier: Arc::new(JwtTokenVerifier::new(SECRET)),
            documents: store.clone(),
        };
        let app = document_api::app(state, &AppConfig::from_env());

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let server = Self { port, base_url, store };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline { break; }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn document_url(&self, id: &str) -> String {
        format!("{}/api/documents/{}", self.base_url, id)
    }

    pub async fn seed(&self, id: &str, owner: &str, content: &str) {
        self.store.insert(Document::new(id, owner, content)).await;
    }
}

/// `Cookie` header value carrying a valid token for `user_id`
pub fn auth_cookie(user_id: &str) -> String {
    let security = AppConfig::from_env().security;
    let claims = Claims::from_config(user_id, Some(format!("{}@example.com", user_id)), &security);
    let token = issue_token(&claims, SECRET).expect("token issuance");
    format!("session=abc; auth_token={}", token)
}
