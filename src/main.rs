use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use document_api::auth::{issue_token, Claims, JwtTokenVerifier};
use document_api::config::{self, Environment};
use document_api::database::DatabaseManager;
use document_api::AppState;

#[derive(Parser)]
#[command(name = "document-api")]
#[command(about = "Ownership-scoped document API server")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Address to bind (overrides DOCUMENT_API_HOST)")]
    host: Option<String>,

    #[arg(long, help = "Port to listen on (overrides DOCUMENT_API_PORT / PORT)")]
    port: Option<u16>,

    #[arg(long, value_name = "USER_ID", help = "Print a signed auth_token for USER_ID and exit")]
    issue_token: Option<String>,

    #[arg(long, requires = "issue_token", help = "Email to embed in the issued token")]
    email: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let cli = Cli::parse();

    let config = config::config();
    tracing::info!("Starting Document API in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET must be set outside development");
    }
    if config.environment == Environment::Development && std::env::var("JWT_SECRET").is_err() {
        tracing::warn!("Using the built-in development JWT secret");
    }

    if let Some(user_id) = cli.issue_token {
        let claims = Claims::from_config(user_id, cli.email, &config.security);
        let token = issue_token(&claims, &config.security.jwt_secret)?;
        println!("{}", token);
        return Ok(());
    }

    let documents = DatabaseManager::document_store(&config.database)
        .await
        .context("failed to initialize document store")?;

    let state = AppState {
        verifier: Arc::new(JwtTokenVerifier::new(config.security.jwt_secret.clone())),
        documents,
    };

    let app = document_api::app(state, config);

    let host = cli.host.unwrap_or_else(|| config.server.host.clone());
    let port = cli.port.unwrap_or(config.server.port);
    let bind_addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Document API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
