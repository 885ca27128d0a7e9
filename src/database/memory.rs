use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::models::Document;
use super::store::{DocumentStore, StoreError};

/// Process-local document store.
///
/// Used when no database is configured, and by tests.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<String, Document>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a document, keyed by its id
    pub async fn insert(&self, document: Document) {
        let mut documents = self.documents.write().await;
        documents.insert(document.id.clone(), document);
    }

    /// Unscoped lookup, for seeding and assertions
    pub async fn find(&self, id: &str) -> Option<Document> {
        self.documents.read().await.get(id).cloned()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    #[cfg(test)]
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get_document(&self, id: &str, owner_id: &str) -> Result<Option<Document>, StoreError> {
        let documents = self.documents.read().await;
        Ok(documents
            .get(id)
            .filter(|doc| doc.is_owned_by(owner_id))
            .cloned())
    }

    async fn update_document(
        &self,
        id: &str,
        owner_id: &str,
        content: &str,
    ) -> Result<Option<Document>, StoreError> {
        let mut documents = self.documents.write().await;

        let Some(doc) = documents.get_mut(id).filter(|doc| doc.is_owned_by(owner_id)) else {
            return Ok(None);
        };

        doc.content = content.to_string();
        doc.updated_at = Utc::now();
        Ok(Some(doc.clone()))
    }

    async fn delete_document(&self, id: &str, owner_id: &str) -> Result<bool, StoreError> {
        let mut documents = self.documents.write().await;

        let owned = documents.get(id).is_some_and(|doc| doc.is_owned_by(owner_id));
        if owned {
            documents.remove(id);
        }
        Ok(owned)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
