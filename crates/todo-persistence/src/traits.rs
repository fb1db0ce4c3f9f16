use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use todo_core::TodoResult;
use todo_domain::Fields;
use uuid::Uuid;

/// Store-assigned document identifier
pub type DocumentId = String;

/// Slash-separated address of a collection, e.g. `users/{uid}/todoLists`.
/// Always has an odd number of segments: collection, document, collection...
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionPath(String);

impl CollectionPath {
    /// Top-level collection
    pub fn root(collection: &str) -> Self {
        Self(collection.to_string())
    }

    /// Collection nested under document `doc_id` of this collection
    pub fn nested(&self, doc_id: &str, collection: &str) -> Self {
        Self(format!("{}/{}/{}", self.0, doc_id, collection))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A document as read back from a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub fields: Fields,
}

/// Metadata written alongside persisted documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceMetadata {
    /// Version of the persistence format
    pub format_version: u32,
    /// ID of the instance that performed the save
    pub instance_id: Uuid,
    /// When this data was saved
    pub saved_at: DateTime<Utc>,
}

impl PersistenceMetadata {
    pub fn new(format_version: u32, instance_id: Uuid) -> Self {
        Self {
            format_version,
            instance_id,
            saved_at: Utc::now(),
        }
    }
}

/// Remote hierarchical collection store.
///
/// Documents carry no schema; field shapes are a convention of the caller.
/// Ids are assigned by the store on insert.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document currently in `collection`. Order is store-defined.
    async fn list_documents(&self, collection: &CollectionPath) -> TodoResult<Vec<Document>>;

    /// Insert a new document and return the id the store assigned to it
    async fn insert_document(
        &self,
        collection: &CollectionPath,
        fields: Fields,
    ) -> TodoResult<DocumentId>;

    /// Merge `fields` into an existing document. Fails with `NotFound`
    /// when the document does not exist.
    async fn update_fields(
        &self,
        collection: &CollectionPath,
        id: &str,
        fields: Fields,
    ) -> TodoResult<()>;

    /// Delete a document. Deleting a missing document succeeds.
    async fn delete_document(&self, collection: &CollectionPath, id: &str) -> TodoResult<()>;
}
