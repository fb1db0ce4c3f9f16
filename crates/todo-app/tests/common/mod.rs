#![allow(dead_code)]

use async_trait::async_trait;
use mockall::mock;
use serde_json::json;
use todo_core::{TodoError, TodoResult};
use todo_domain::{Fields, User};
use todo_persistence::{CollectionPath, Document, DocumentId, DocumentStore, MemoryDocumentStore};

mock! {
    pub Store {}

    #[async_trait]
    impl DocumentStore for Store {
        async fn list_documents(&self, collection: &CollectionPath) -> TodoResult<Vec<Document>>;
        async fn insert_document(
            &self,
            collection: &CollectionPath,
            fields: Fields,
        ) -> TodoResult<DocumentId>;
        async fn update_fields(
            &self,
            collection: &CollectionPath,
            id: &str,
            fields: Fields,
        ) -> TodoResult<()>;
        async fn delete_document(&self, collection: &CollectionPath, id: &str) -> TodoResult<()>;
    }
}

/// Memory store whose deletes always fail, leaving relocated tasks behind
#[derive(Default)]
pub struct FailingDeleteStore {
    pub inner: MemoryDocumentStore,
}

#[async_trait]
impl DocumentStore for FailingDeleteStore {
    async fn list_documents(&self, collection: &CollectionPath) -> TodoResult<Vec<Document>> {
        self.inner.list_documents(collection).await
    }

    async fn insert_document(
        &self,
        collection: &CollectionPath,
        fields: Fields,
    ) -> TodoResult<DocumentId> {
        self.inner.insert_document(collection, fields).await
    }

    async fn update_fields(
        &self,
        collection: &CollectionPath,
        id: &str,
        fields: Fields,
    ) -> TodoResult<()> {
        self.inner.update_fields(collection, id, fields).await
    }

    async fn delete_document(&self, _collection: &CollectionPath, _id: &str) -> TodoResult<()> {
        Err(TodoError::StoreUnavailable("connection reset".to_string()))
    }
}

pub fn ada() -> User {
    User::new("ada", "ada@example.com")
}

pub fn bob() -> User {
    User::new("bob", "bob@example.com")
}

pub fn fields(value: serde_json::Value) -> Fields {
    value.as_object().cloned().unwrap_or_default()
}

pub fn list_doc(id: &str, name: &str) -> Document {
    Document {
        id: id.to_string(),
        fields: fields(json!({
            "name": name,
            "createdBy": "ada@example.com",
            "createdAt": "2024-05-01T09:00:00Z"
        })),
    }
}

pub fn task_doc(id: &str, title: &str, priority: &str) -> Document {
    Document {
        id: id.to_string(),
        fields: fields(json!({
            "title": title,
            "description": "",
            "dueDate": "2024-06-01",
            "priority": priority,
            "createdAt": "2024-05-02T09:00:00Z"
        })),
    }
}

/// Mock store serving two lists for `ada`: `home` holding task `t1` at low
/// priority and an empty `work`. Expects exactly `reads` collection reads.
pub fn mock_with_two_lists(reads: usize) -> MockStore {
    let mut store = MockStore::new();
    store
        .expect_list_documents()
        .times(reads)
        .returning(|path| match path.as_str() {
            "users/ada/todoLists" => Ok(vec![list_doc("home", "Home"), list_doc("work", "Work")]),
            "users/ada/todoLists/home/tasks" => Ok(vec![task_doc("t1", "Fix sink", "low")]),
            _ => Ok(vec![]),
        });
    store
}
