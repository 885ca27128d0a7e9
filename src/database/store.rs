use async_trait::async_trait;
use thiserror::Error;

use super::models::Document;

/// Errors raised by a document store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Backend error: {0}")]
    Backend(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Ownership-scoped document persistence.
///
/// Every operation takes both the document id and the caller's user id and
/// only matches a document when both agree. A document owned by someone else
/// is reported exactly as a missing one.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_document(&self, id: &str, owner_id: &str) -> Result<Option<Document>, StoreError>;

    /// Replace the content in place. `None` when nothing matched.
    async fn update_document(
        &self,
        id: &str,
        owner_id: &str,
        content: &str,
    ) -> Result<Option<Document>, StoreError>;

    /// `true` when a document was removed.
    async fn delete_document(&self, id: &str, owner_id: &str) -> Result<bool, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
