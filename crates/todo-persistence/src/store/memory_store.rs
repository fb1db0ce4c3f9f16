use async_trait::async_trait;
use todo_core::TodoResult;
use todo_domain::Fields;
use tokio::sync::RwLock;

use crate::traits::{CollectionPath, Document, DocumentId, DocumentStore};
use crate::tree::DocumentTree;

/// Process-local document store. Contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    tree: RwLock<DocumentTree>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> DocumentTree {
        self.tree.read().await.clone()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list_documents(&self, collection: &CollectionPath) -> TodoResult<Vec<Document>> {
        Ok(self.tree.read().await.list(collection))
    }

    async fn insert_document(
        &self,
        collection: &CollectionPath,
        fields: Fields,
    ) -> TodoResult<DocumentId> {
        let id = self.tree.write().await.insert(collection, fields);
        tracing::debug!("Inserted {}/{}", collection, id);
        Ok(id)
    }

    async fn update_fields(
        &self,
        collection: &CollectionPath,
        id: &str,
        fields: Fields,
    ) -> TodoResult<()> {
        self.tree.write().await.update(collection, id, fields)
    }

    async fn delete_document(&self, collection: &CollectionPath, id: &str) -> TodoResult<()> {
        if !self.tree.write().await.delete(collection, id) {
            tracing::debug!("Delete of missing document {}/{} ignored", collection, id);
        }
        Ok(())
    }
}
