use std::sync::Arc;
use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::config::DatabaseConfig;

use super::memory::InMemoryDocumentStore;
use super::postgres::PgDocumentStore;
use super::store::{DocumentStore, StoreError};

/// Builds the document store the server runs against
pub struct DatabaseManager;

impl DatabaseManager {
    /// Postgres when a URL is configured, in-memory otherwise.
    pub async fn document_store(config: &DatabaseConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
        match &config.url {
            Some(url) => {
                let pool = Self::connect(url, config).await?;
                let store = PgDocumentStore::new(pool);
                store.ensure_schema().await?;
                info!("Using Postgres document store");
                Ok(Arc::new(store))
            }
            None => {
                tracing::warn!("DATABASE_URL not set; documents are kept in memory and lost on restart");
                Ok(Arc::new(InMemoryDocumentStore::new()))
            }
        }
    }

    /// Open a connection pool
    pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<PgPool, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!("Created database pool (max {} connections)", config.max_connections);
        Ok(pool)
    }
}
