use crate::store::atomic_writer::AtomicWriter;
use crate::traits::{CollectionPath, Document, DocumentId, DocumentStore, PersistenceMetadata};
use crate::tree::DocumentTree;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use todo_core::{TodoError, TodoResult};
use todo_domain::Fields;
use tokio::sync::Mutex;
use uuid::Uuid;

const FORMAT_VERSION: u32 = 1;

/// Document store persisted as a single JSON file.
///
/// Every call reads the file and every write replaces it atomically, so
/// separate processes see each other's writes between calls. Writes within
/// one process are serialized; writes across processes are last-writer-wins.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    instance_id: Uuid,
    write_lock: Mutex<()>,
}

/// On-disk wrapper around the document tree
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonEnvelope {
    pub version: u32,
    pub metadata: PersistenceMetadata,
    pub documents: DocumentTree,
}

impl JsonEnvelope {
    pub fn empty() -> Self {
        Self {
            version: FORMAT_VERSION,
            metadata: PersistenceMetadata::new(FORMAT_VERSION, Uuid::new_v4()),
            documents: DocumentTree::new(),
        }
    }

    pub fn to_json_string(&self) -> TodoResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            instance_id: Uuid::new_v4(),
            write_lock: Mutex::new(()),
        }
    }

    async fn load_tree(&self) -> TodoResult<DocumentTree> {
        let Some(bytes) = AtomicWriter::read_optional(&self.path)
            .await
            .map_err(|e| self.unavailable(e))?
        else {
            return Ok(DocumentTree::new());
        };

        let envelope: JsonEnvelope = serde_json::from_slice(&bytes)?;
        if envelope.version != FORMAT_VERSION {
            return Err(TodoError::Serialization(format!(
                "Unsupported format version: {}",
                envelope.version
            )));
        }
        Ok(envelope.documents)
    }

    async fn save_tree(&self, documents: DocumentTree) -> TodoResult<()> {
        let envelope = JsonEnvelope {
            version: FORMAT_VERSION,
            metadata: PersistenceMetadata::new(FORMAT_VERSION, self.instance_id),
            documents,
        };
        let bytes = serde_json::to_vec_pretty(&envelope)?;
        AtomicWriter::write_atomic(&self.path, &bytes)
            .await
            .map_err(|e| self.unavailable(e))?;

        tracing::info!(
            "Saved {} documents ({} bytes) to {}",
            envelope.documents.document_count(),
            bytes.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Read-modify-write under the instance lock
    async fn modify<T>(
        &self,
        change: impl FnOnce(&mut DocumentTree) -> TodoResult<T> + Send,
    ) -> TodoResult<T> {
        let _guard = self.write_lock.lock().await;
        let mut tree = self.load_tree().await?;
        let result = change(&mut tree)?;
        self.save_tree(tree).await?;
        Ok(result)
    }

    fn unavailable(&self, err: TodoError) -> TodoError {
        TodoError::StoreUnavailable(format!("{}: {}", self.path.display(), err))
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn list_documents(&self, collection: &CollectionPath) -> TodoResult<Vec<Document>> {
        let tree = self.load_tree().await?;
        Ok(tree.list(collection))
    }

    async fn insert_document(
        &self,
        collection: &CollectionPath,
        fields: Fields,
    ) -> TodoResult<DocumentId> {
        self.modify(|tree| Ok(tree.insert(collection, fields))).await
    }

    async fn update_fields(
        &self,
        collection: &CollectionPath,
        id: &str,
        fields: Fields,
    ) -> TodoResult<()> {
        self.modify(|tree| tree.update(collection, id, fields)).await
    }

    async fn delete_document(&self, collection: &CollectionPath, id: &str) -> TodoResult<()> {
        self.modify(|tree| {
            tree.delete(collection, id);
            Ok(())
        })
        .await
    }
}
