use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use todo_core::{TodoError, TodoResult};
use todo_domain::Fields;
use uuid::Uuid;

use crate::traits::{CollectionPath, Document, DocumentId};

/// All collections of a store, keyed by collection path then document id.
///
/// Nested collections are independent entries: deleting a document leaves
/// the collections under it in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentTree {
    #[serde(default)]
    collections: BTreeMap<CollectionPath, BTreeMap<DocumentId, Fields>>,
}

impl DocumentTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self, collection: &CollectionPath) -> Vec<Document> {
        self.collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| Document {
                        id: id.clone(),
                        fields: fields.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn insert(&mut self, collection: &CollectionPath, fields: Fields) -> DocumentId {
        let id = Self::generate_id();
        self.collections
            .entry(collection.clone())
            .or_default()
            .insert(id.clone(), fields);
        id
    }

    pub fn update(&mut self, collection: &CollectionPath, id: &str, fields: Fields) -> TodoResult<()> {
        let existing = self
            .collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| TodoError::NotFound(format!("document {}/{}", collection, id)))?;
        existing.extend(fields);
        Ok(())
    }

    /// Returns whether a document was removed
    pub fn delete(&mut self, collection: &CollectionPath, id: &str) -> bool {
        let Some(docs) = self.collections.get_mut(collection) else {
            return false;
        };
        let removed = docs.remove(id).is_some();
        if docs.is_empty() {
            self.collections.remove(collection);
        }
        removed
    }

    pub fn document_count(&self) -> usize {
        self.collections.values().map(BTreeMap::len).sum()
    }

    fn generate_id() -> DocumentId {
        Uuid::new_v4().simple().to_string()
    }
}
