pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{any, get},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::TokenVerifier;
use crate::config::{AppConfig, SecurityConfig};
use crate::database::DocumentStore;

/// Collaborators shared by every request
#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<dyn TokenVerifier>,
    pub documents: Arc<dyn DocumentStore>,
}

/// Build the HTTP application
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        // Public
        .merge(public_routes())
        // Protected (authentication handled per request)
        .merge(document_routes())
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn public_routes() -> Router<AppState> {
    use handlers::public;

    Router::new()
        .route("/", get(public::root))
        .route("/health", get(public::health))
}

fn document_routes() -> Router<AppState> {
    use handlers::protected::documents;

    // Every verb is routed so unsupported ones still pass auth and ownership first
    Router::new()
        .route("/api/documents", any(documents::document_action))
        .route("/api/documents/", any(documents::document_action))
        .route("/api/documents/:id", any(documents::document_action))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    // Cookie credentials require an explicit origin list
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
