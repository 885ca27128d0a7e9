use async_trait::async_trait;
use sqlx::PgPool;

use super::models::Document;
use super::store::{DocumentStore, StoreError};

const CREATE_DOCUMENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    id          TEXT PRIMARY KEY,
    user_id     TEXT NOT NULL,
    title       TEXT,
    content     TEXT NOT NULL DEFAULT '',
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
)"#;

const CREATE_OWNER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS documents_user_id_idx ON documents (user_id)";

const DOCUMENT_COLUMNS: &str = "id, user_id, title, content, created_at, updated_at";

/// Postgres-backed document store
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the documents table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_DOCUMENTS_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_OWNER_INDEX).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn get_document(&self, id: &str, owner_id: &str) -> Result<Option<Document>, StoreError> {
        let sql = format!(
            "SELECT {} FROM documents WHERE id = $1 AND user_id = $2",
            DOCUMENT_COLUMNS
        );

        let doc = sqlx::query_as::<_, Document>(&sql)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(doc)
    }

    async fn update_document(
        &self,
        id: &str,
        owner_id: &str,
        content: &str,
    ) -> Result<Option<Document>, StoreError> {
        let sql = format!(
            "UPDATE documents SET content = $3, updated_at = now() \
             WHERE id = $1 AND user_id = $2 RETURNING {}",
            DOCUMENT_COLUMNS
        );

        let doc = sqlx::query_as::<_, Document>(&sql)
            .bind(id)
            .bind(owner_id)
            .bind(content)
            .fetch_optional(&self.pool)
            .await?;

        Ok(doc)
    }

    async fn delete_document(&self, id: &str, owner_id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
